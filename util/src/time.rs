//! General time utility functions

use chrono;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A monotonic tick source.
///
/// Ticks are in milliseconds and must never decrease between two calls.
pub trait Clock {
    /// Current tick in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

/// Convert a duration into a whole number of milliseconds, saturating negative durations at
/// zero.
pub fn duration_to_millis(duration: chrono::Duration) -> u64 {
    let ms = duration.num_milliseconds();
    if ms < 0 {
        0
    } else {
        ms as u64
    }
}
