use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

/// Generates a correlation id for request tracking.
///
/// One id is generated per logical request and reused (not regenerated)
/// across its retry attempts. The format combines a unix-millisecond
/// timestamp with a random suffix; unique within a process lifetime for all
/// practical purposes. No persistence across restarts.
#[must_use]
pub fn new_correlation_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    let uuid = Uuid::new_v4().simple().to_string();
    let suffix = &uuid[..8];
    format!("costplus-{millis}-{suffix}")
}
