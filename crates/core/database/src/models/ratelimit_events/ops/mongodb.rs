use std::time::Duration;

use murmur_result::Result;

use super::AbstractRatelimitEvents;
use crate::util::ulid_floor;
use crate::{MongoDb, RatelimitEvent};

static COL: &str = "ratelimit_events";

#[async_trait]
impl AbstractRatelimitEvents for MongoDb {
    /// Insert a new ratelimit event
    async fn insert_ratelimit_event(&self, event: &RatelimitEvent) -> Result<()> {
        query!(self, insert_one, COL, &event).map(|_| ())
    }

    /// Count events for a source in the given window and check whether
    /// the limit is already reached
    async fn has_ratelimited(
        &self,
        source_ip: &str,
        period: Duration,
        count: usize,
    ) -> Result<bool> {
        self.col::<RatelimitEvent>(COL)
            .count_documents(doc! {
                "_id": {
                    "$gte": ulid_floor(period)
                },
                "source_ip": source_ip
            })
            .await
            .map(|c| c as usize >= count)
            .map_err(|_| create_database_error!("count_documents", COL))
    }
}
