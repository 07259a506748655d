use std::time::Duration;

use murmur_result::Result;

use crate::Report;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractReports: Sync + Send {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()>;

    /// Fetch a report by its id
    async fn fetch_report(&self, report_id: &str) -> Result<Report>;

    /// Fetch the most recently submitted reports, newest first
    async fn fetch_recent_reports(&self, limit: usize) -> Result<Vec<Report>>;

    /// Whether content with this fingerprint was stored within the
    /// trailing window
    async fn has_recent_duplicate(&self, content_hash: &str, window: Duration) -> Result<bool>;

    /// Bump a report's reference count by one and return the updated
    /// report
    async fn increment_reference_count(&self, report_id: &str) -> Result<Report>;
}
