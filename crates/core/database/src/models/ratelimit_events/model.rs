use murmur_result::Result;
use ulid::Ulid;

use crate::Database;

auto_derived!(
    /// Ratelimit Event
    ///
    /// Append-only record of one accepted submission attempt from a
    /// source address. Never updated or deleted by this service.
    pub struct RatelimitEvent {
        /// Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Source network address the submission came from
        pub source_ip: String,
    }
);

impl RatelimitEvent {
    /// Record a ratelimit event for the given source
    pub async fn create(db: &Database, source_ip: String) -> Result<()> {
        db.insert_ratelimit_event(&RatelimitEvent {
            id: Ulid::new().to_string(),
            source_ip,
        })
        .await
    }
}
