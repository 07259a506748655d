use std::time::{Duration, SystemTime, UNIX_EPOCH};

use ulid::Ulid;

/// Smallest ULID whose timestamp lies `period` in the past
///
/// Usable as an inclusive lower bound (`id >= cutoff`) for time-range
/// scans over ULID-keyed collections. The random component is zeroed so
/// the window start is exact rather than fuzzy within a millisecond.
pub fn ulid_floor(period: Duration) -> String {
    let since = SystemTime::now() - period;
    let ms = since
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    Ulid::from_parts(ms, 0).to_string()
}
