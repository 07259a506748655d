use std::time::Duration;

use murmur_result::Result;

use super::AbstractRatelimitEvents;
use crate::util::ulid_floor;
use crate::{RatelimitEvent, ReferenceDb};

#[async_trait]
impl AbstractRatelimitEvents for ReferenceDb {
    /// Insert a new ratelimit event
    async fn insert_ratelimit_event(&self, event: &RatelimitEvent) -> Result<()> {
        let mut ratelimit_events = self.ratelimit_events.lock().await;
        if ratelimit_events.contains_key(&event.id) {
            Err(create_database_error!("insert", "ratelimit_event"))
        } else {
            ratelimit_events.insert(event.id.to_string(), event.clone());
            Ok(())
        }
    }

    /// Count events for a source in the given window and check whether
    /// the limit is already reached
    async fn has_ratelimited(
        &self,
        source_ip: &str,
        period: Duration,
        count: usize,
    ) -> Result<bool> {
        let ratelimit_events = self.ratelimit_events.lock().await;
        let cutoff = ulid_floor(period);

        Ok(ratelimit_events
            .iter()
            .filter(|(id, event)| id.as_str() >= cutoff.as_str() && event.source_ip == source_ip)
            .count()
            >= count)
    }
}
