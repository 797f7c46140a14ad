use std::time::Duration;

use crate::time_format::format_duration;

/// Snapshot of how far the loaded track has played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub position: Duration,
    pub duration: Option<Duration>,
}

impl Progress {
    /// Played fraction in `0.0..=1.0`; zero while the length is unknown.
    pub fn fraction(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => (self.position.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn elapsed_label(&self) -> String {
        format_duration(self.position)
    }

    pub fn total_label(&self) -> String {
        self.duration.map(format_duration).unwrap_or_else(|| "0:00".to_string())
    }
}
