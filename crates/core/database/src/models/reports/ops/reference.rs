use std::time::Duration;

use murmur_result::Result;

use super::AbstractReports;
use crate::util::ulid_floor;
use crate::{ReferenceDb, Report};

#[async_trait]
impl AbstractReports for ReferenceDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if reports.contains_key(&report.id) {
            Err(create_database_error!("insert", "report"))
        } else {
            reports.insert(report.id.to_string(), report.clone());
            Ok(())
        }
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, report_id: &str) -> Result<Report> {
        let reports = self.reports.lock().await;
        reports
            .get(report_id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch the most recently submitted reports, newest first
    async fn fetch_recent_reports(&self, limit: usize) -> Result<Vec<Report>> {
        let reports = self.reports.lock().await;
        let mut recent: Vec<Report> = reports.values().cloned().collect();
        recent.sort_by(|a, b| b.id.cmp(&a.id));
        recent.truncate(limit);
        Ok(recent)
    }

    /// Whether content with this fingerprint was stored within the
    /// trailing window
    async fn has_recent_duplicate(&self, content_hash: &str, window: Duration) -> Result<bool> {
        let reports = self.reports.lock().await;
        let cutoff = ulid_floor(window);

        Ok(reports
            .values()
            .any(|report| report.id.as_str() >= cutoff.as_str() && report.content_hash == content_hash))
    }

    /// Bump a report's reference count and return the updated report
    async fn increment_reference_count(&self, report_id: &str) -> Result<Report> {
        let mut reports = self.reports.lock().await;
        let report = reports
            .get_mut(report_id)
            .ok_or_else(|| create_error!(NotFound))?;

        report.reference_count += 1;
        Ok(report.clone())
    }
}
