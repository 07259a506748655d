use std::time::Duration;

use iso8601_timestamp::Timestamp;
use murmur_config::config;
use murmur_content::{fingerprint, moderation, normalise};
use murmur_models::v0;
use murmur_result::Result;
use ulid::Ulid;

use crate::{Database, RatelimitEvent};

auto_derived!(
    /// Anonymous anecdote report
    pub struct Report {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Display name chosen by the submitter
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        /// Rough period the anecdote took place in
        #[serde(default)]
        pub period: String,
        /// Anecdote text
        pub content: String,
        /// Fingerprint of the normalised content, used for duplicate
        /// suppression
        pub content_hash: String,
        /// How many visitors marked this report as familiar
        #[serde(default)]
        pub reference_count: u32,
    }
);

impl Report {
    /// Create a new report, running the full admission pipeline
    ///
    /// Checks run in order: structural validation, moderation,
    /// duplicate suppression, then every configured ratelimit window.
    /// Only once all of them pass is the source's ratelimit event
    /// recorded and the report persisted.
    pub async fn create(
        db: &Database,
        data: v0::DataSubmitReport,
        source_ip: String,
    ) -> Result<Report> {
        let config = config().await;
        let limits = config.features.limits;

        let name = data.name.trim();
        let period = data.period.trim();
        let text = data.content.trim();

        if text.is_empty()
            || text.chars().count() > limits.content_max
            || name.chars().count() > limits.name_max
            || period.chars().count() > limits.period_max
        {
            return Err(create_error!(InvalidInput));
        }

        if moderation::is_flagged(text) || (!name.is_empty() && moderation::is_flagged(name)) {
            return Err(create_error!(Flagged));
        }

        let content_hash = fingerprint(&normalise(text));

        if db
            .has_recent_duplicate(
                &content_hash,
                Duration::from_secs(limits.duplicate_window_seconds),
            )
            .await?
        {
            return Err(create_error!(RateLimited));
        }

        for window in &config.features.ratelimits {
            if db
                .has_ratelimited(
                    &source_ip,
                    Duration::from_secs(window.window_seconds),
                    window.limit,
                )
                .await?
            {
                return Err(create_error!(RateLimited));
            }
        }

        // Check-then-act: two concurrent submissions can both pass the
        // checks above before either records its event, so the quota
        // is a soft limit. The store offers no transaction spanning
        // the count and the insert.
        RatelimitEvent::create(db, source_ip).await?;

        let report = Report {
            id: Ulid::new().to_string(),
            name: (!name.is_empty()).then(|| name.to_string()),
            period: period.to_string(),
            content: text.to_string(),
            content_hash,
            reference_count: 0,
        };

        db.insert_report(&report).await?;
        Ok(report)
    }

    /// Mark this report as referenced by one more visitor
    pub async fn add_reference(db: &Database, report_id: &str) -> Result<Report> {
        db.increment_reference_count(report_id).await
    }

    /// When this report was submitted, derived from its ULID
    pub fn timestamp(&self) -> Timestamp {
        Ulid::from_string(&self.id)
            .ok()
            .and_then(|ulid| {
                Timestamp::UNIX_EPOCH.checked_add(iso8601_timestamp::Duration::milliseconds(
                    ulid.timestamp_ms() as i64,
                ))
            })
            .unwrap_or(Timestamp::UNIX_EPOCH)
    }

    /// Convert to API model
    pub fn into_v0(self) -> v0::Report {
        let created_at = self.timestamp();

        v0::Report {
            id: self.id,
            name: self.name,
            period: self.period,
            content: self.content,
            reference_count: self.reference_count,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use murmur_models::v0::DataSubmitReport;
    use murmur_result::ErrorType;

    use crate::Report;

    fn submission(content: &str) -> DataSubmitReport {
        DataSubmitReport {
            name: String::new(),
            period: "最近".to_string(),
            content: content.to_string(),
        }
    }

    #[async_std::test]
    async fn accepts_and_persists_a_submission() {
        database_test!(|db| async move {
            let report = Report::create(
                &db,
                DataSubmitReport {
                    name: "  匿名  ".to_string(),
                    period: "子どもの頃".to_string(),
                    content: "  hello  ".to_string(),
                },
                "203.0.113.7".to_string(),
            )
            .await
            .unwrap();

            assert_eq!(report.content, "hello");
            assert_eq!(report.name.as_deref(), Some("匿名"));
            assert_eq!(report.period, "子どもの頃");
            assert_eq!(report.reference_count, 0);

            let fetched = db.fetch_report(&report.id).await.unwrap();
            assert_eq!(fetched, report);

            let v0 = fetched.into_v0();
            assert!(!v0.id.is_empty());
            assert_eq!(v0.reference_count, 0);
        });
    }

    #[async_std::test]
    async fn rejects_structural_violations() {
        database_test!(|db| async move {
            for data in [
                submission(""),
                submission("   "),
                submission(&"a".repeat(2001)),
                DataSubmitReport {
                    name: "x".repeat(31),
                    ..submission("valid content")
                },
                DataSubmitReport {
                    period: "x".repeat(31),
                    ..submission("valid content")
                },
            ] {
                let error = Report::create(&db, data, "203.0.113.7".to_string())
                    .await
                    .unwrap_err();
                assert_eq!(error.error_type, ErrorType::InvalidInput);
            }
        });
    }

    #[async_std::test]
    async fn accepts_content_at_the_length_limit() {
        database_test!(|db| async move {
            let report = Report::create(&db, submission(&"a".repeat(2000)), "203.0.113.7".to_string())
                .await
                .unwrap();
            assert_eq!(report.content.chars().count(), 2000);
        });
    }

    #[async_std::test]
    async fn rejects_flagged_text() {
        database_test!(|db| async move {
            let error = Report::create(&db, submission("ＦＵＣＫ this place"), "203.0.113.7".to_string())
                .await
                .unwrap_err();
            assert_eq!(error.error_type, ErrorType::Flagged);

            let error = Report::create(
                &db,
                DataSubmitReport {
                    name: "porn king".to_string(),
                    ..submission("a perfectly fine story")
                },
                "203.0.113.7".to_string(),
            )
            .await
            .unwrap_err();
            assert_eq!(error.error_type, ErrorType::Flagged);
        });
    }

    #[async_std::test]
    async fn rejects_duplicate_content_within_the_window() {
        database_test!(|db| async move {
            let report = Report::create(&db, submission("same story"), "203.0.113.7".to_string())
                .await
                .unwrap();

            // Different source, same content after normalisation
            let error = Report::create(&db, submission("Same   Story"), "198.51.100.1".to_string())
                .await
                .unwrap_err();
            assert_eq!(error.error_type, ErrorType::RateLimited);

            // Once the stored report falls outside the window the
            // fingerprint no longer matches anything recent.
            async_std::task::sleep(Duration::from_millis(50)).await;
            assert!(!db
                .has_recent_duplicate(&report.content_hash, Duration::from_millis(10))
                .await
                .unwrap());
        });
    }

    #[async_std::test]
    async fn rejects_the_fourth_submission_in_the_short_window() {
        database_test!(|db| async move {
            let ip = "203.0.113.7".to_string();

            for content in ["first story", "second story", "third story"] {
                Report::create(&db, submission(content), ip.clone())
                    .await
                    .unwrap();
            }

            let error = Report::create(&db, submission("fourth story"), ip.clone())
                .await
                .unwrap_err();
            assert_eq!(error.error_type, ErrorType::RateLimited);

            // Another source is unaffected
            Report::create(&db, submission("someone else's story"), "198.51.100.1".to_string())
                .await
                .unwrap();

            // The count resets once the events age out of the window
            async_std::task::sleep(Duration::from_millis(50)).await;
            assert!(!db
                .has_ratelimited(&ip, Duration::from_millis(10), 3)
                .await
                .unwrap());
        });
    }

    #[async_std::test]
    async fn reference_count_increments_serially() {
        database_test!(|db| async move {
            let report = Report::create(&db, submission("a familiar story"), "203.0.113.7".to_string())
                .await
                .unwrap();

            for expected in 1..=3 {
                let updated = Report::add_reference(&db, &report.id).await.unwrap();
                assert_eq!(updated.reference_count, expected);
            }

            let error = Report::add_reference(&db, "01J00000000000000000000000")
                .await
                .unwrap_err();
            assert_eq!(error.error_type, ErrorType::NotFound);
        });
    }

    #[async_std::test]
    async fn recent_reports_are_newest_first() {
        database_test!(|db| async move {
            let mut ids = Vec::new();
            for (index, content) in ["one", "two", "three"].iter().enumerate() {
                let ip = format!("203.0.113.{}", index + 1);
                ids.push(Report::create(&db, submission(content), ip).await.unwrap().id);
                async_std::task::sleep(Duration::from_millis(2)).await;
            }

            let recent = db.fetch_recent_reports(2).await.unwrap();
            assert_eq!(recent.len(), 2);
            assert_eq!(recent[0].id, *ids.last().unwrap());
            assert_eq!(recent[1].id, ids[1]);
        });
    }
}
