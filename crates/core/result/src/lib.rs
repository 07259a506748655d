#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

#[cfg(feature = "axum")]
pub mod axum;

/// Result type with custom Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error information
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Error {
    /// Type of error and additional information
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub error_type: ErrorType,

    /// Where this error occurred
    pub location: String,
}

/// Possible error types
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    /// This error was not labeled :(
    LabelMe,

    // ? Submission admission errors
    /// Structural constraint violated (lengths, required content)
    InvalidInput,
    /// Denylisted term found in submitted text
    Flagged,
    /// Quota exhausted, or identical content submitted too recently
    ///
    /// Duplicate and quota violations share one variant; callers are
    /// never told which of the two checks they tripped.
    RateLimited,

    // ? Reference count errors
    NotFound,

    // ? General errors
    DatabaseError {
        operation: String,
        collection: String,
    },
    InternalError,
}

impl Error {
    /// Message shown to the caller for this class of error
    ///
    /// Errors of the same severity share a message so the response body
    /// does not reveal which admission check fired.
    pub fn message(&self) -> &'static str {
        match self.error_type {
            ErrorType::InvalidInput | ErrorType::Flagged => "投稿内容を確認してください",
            ErrorType::RateLimited => "投稿をしばらくお待ちください",
            ErrorType::NotFound => "Not Found",
            _ => "エラーが発生しました",
        }
    }
}

#[macro_export]
macro_rules! create_error {
    ( $error: ident $( $tt:tt )? ) => {
        $crate::Error {
            error_type: $crate::ErrorType::$error $( $tt )?,
            location: format!("{}:{}:{}", file!(), line!(), column!()),
        }
    };
}

#[macro_export]
macro_rules! create_database_error {
    ( $operation: expr, $collection: expr ) => {
        create_error!(DatabaseError {
            operation: $operation.to_string(),
            collection: $collection.to_string()
        })
    };
}

#[macro_export]
#[cfg(debug_assertions)]
macro_rules! query {
    ( $self: ident, $type: ident, $collection: expr, $($rest:expr),+ ) => {
        Ok($self.$type($collection, $($rest),+).await.unwrap())
    };
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! query {
    ( $self: ident, $type: ident, $collection: expr, $($rest:expr),+ ) => {
        $self.$type($collection, $($rest),+).await
            .map_err(|_| create_database_error!(stringify!($type), $collection))
    };
}
