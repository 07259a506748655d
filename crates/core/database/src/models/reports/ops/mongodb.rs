use std::time::Duration;

use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use murmur_result::Result;

use super::AbstractReports;
use crate::util::ulid_floor;
use crate::{MongoDb, Report};

static COL: &str = "reports";

#[async_trait]
impl AbstractReports for MongoDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        query!(self, insert_one, COL, &report).map(|_| ())
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, report_id: &str) -> Result<Report> {
        query!(self, find_one_by_id, COL, report_id)?.ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch the most recently submitted reports, newest first
    async fn fetch_recent_reports(&self, limit: usize) -> Result<Vec<Report>> {
        self.find_with_options(
            COL,
            doc! {},
            FindOptions::builder()
                .sort(doc! { "_id": -1 })
                .limit(limit as i64)
                .build(),
        )
        .await
        .map_err(|_| create_database_error!("find", COL))
    }

    /// Whether content with this fingerprint was stored within the
    /// trailing window
    async fn has_recent_duplicate(&self, content_hash: &str, window: Duration) -> Result<bool> {
        self.col::<Report>(COL)
            .count_documents(doc! {
                "_id": {
                    "$gte": ulid_floor(window)
                },
                "content_hash": content_hash
            })
            .await
            .map(|count| count > 0)
            .map_err(|_| create_database_error!("count_documents", COL))
    }

    /// Bump a report's reference count atomically and return the
    /// updated report
    async fn increment_reference_count(&self, report_id: &str) -> Result<Report> {
        self.col::<Report>(COL)
            .find_one_and_update(
                doc! { "_id": report_id },
                doc! { "$inc": { "reference_count": 1 } },
            )
            .with_options(
                FindOneAndUpdateOptions::builder()
                    .return_document(ReturnDocument::After)
                    .build(),
            )
            .await
            .map_err(|_| create_database_error!("find_one_and_update", COL))?
            .ok_or_else(|| create_error!(NotFound))
    }
}
