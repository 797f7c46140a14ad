//! `M:SS` clock labels for the progress line.

use std::time::Duration;

/// Format a position in seconds as `M:SS` (minutes unpadded, seconds zero-padded).
///
/// Non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn format_duration(d: Duration) -> String {
    format_time(d.as_secs_f64())
}
