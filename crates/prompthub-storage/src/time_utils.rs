//! Timestamp helpers shared across storage modules.

/// Current time as milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
