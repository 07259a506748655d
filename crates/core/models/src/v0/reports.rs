use iso8601_timestamp::Timestamp;

auto_derived!(
    /// Anecdote report as served to clients
    pub struct Report {
        /// Unique Id
        pub id: String,
        /// Display name chosen by the submitter
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        pub name: Option<String>,
        /// Rough period the anecdote took place in
        pub period: String,
        /// Anecdote text
        pub content: String,
        /// How many visitors marked this report as familiar
        pub reference_count: u32,
        /// When this report was submitted
        #[cfg_attr(feature = "schemas", schema(value_type = String))]
        pub created_at: Timestamp,
    }

    /// Submission payload for a new report
    ///
    /// Every field is defaulted so shape errors surface as a length
    /// violation in the admission pipeline rather than a
    /// deserialization rejection.
    pub struct DataSubmitReport {
        /// Display name (optional, at most 30 characters)
        #[cfg_attr(feature = "serde", serde(default))]
        pub name: String,
        /// Period label (optional, at most 30 characters)
        #[cfg_attr(feature = "serde", serde(default))]
        pub period: String,
        /// Anecdote text (required, 1 to 2000 characters)
        #[cfg_attr(feature = "serde", serde(default))]
        pub content: String,
    }
);
