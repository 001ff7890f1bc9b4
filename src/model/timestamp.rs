use chrono::prelude::*;

// Unix timestamp in seconds.
pub type Timestamp = i64;

/// Source of line timestamps. Encoders call it once per sample.
pub type Clock = fn() -> Timestamp;

pub fn unix_now() -> Timestamp {
    Utc::now().timestamp()
}
