//! Time and timestamp utilities
//!
//! Points in time are stored as epoch milliseconds on disk and as
//! `DateTime<Utc>` in memory.

use chrono::{DateTime, Utc};

/// Largest magnitude (in ms) a stored timestamp may have.
///
/// Matches the range of an ECMAScript `Date`, which is what front-ends
/// write into the file.
pub const MAX_TIMESTAMP_MILLIS: i64 = 8_640_000_000_000_000;

/// Get current Unix timestamp in milliseconds
pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert epoch milliseconds into a point in time.
///
/// Zero and out-of-range values yield `None`.
pub fn timestamp_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    if millis == 0 || millis.unsigned_abs() > MAX_TIMESTAMP_MILLIS as u64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis)
}

/// Same as [`timestamp_from_millis`] for a floating point value.
///
/// Non-finite values (NaN, infinities) yield `None`; fractions are truncated.
pub fn timestamp_from_millis_f64(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > MAX_TIMESTAMP_MILLIS as f64 {
        return None;
    }
    timestamp_from_millis(millis.trunc() as i64)
}

/// Convert a point in time into epoch milliseconds
pub fn timestamp_to_millis(ts: &DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}
