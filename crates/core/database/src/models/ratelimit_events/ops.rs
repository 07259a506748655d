use std::time::Duration;

use murmur_result::Result;

use crate::RatelimitEvent;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractRatelimitEvents: Sync + Send {
    /// Insert a new ratelimit event
    async fn insert_ratelimit_event(&self, event: &RatelimitEvent) -> Result<()>;

    /// Count events for a source in the given window and check whether
    /// the limit is already reached
    async fn has_ratelimited(
        &self,
        source_ip: &str,
        period: Duration,
        count: usize,
    ) -> Result<bool>;
}
