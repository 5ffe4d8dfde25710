//! Wall-clock timing helpers

use std::time::{Duration, Instant};

/// A simple timer to measure elapsed time.
pub struct Timer {
    start_time: Instant,
}

impl Timer {
    /// Creates a new timer and starts it.
    pub fn new() -> Self {
        Self { start_time: Instant::now() }
    }

    /// Returns the elapsed time since the timer was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Elapsed time in milliseconds with nanosecond resolution.
    pub fn elapsed_ms(&self) -> f64 {
        duration_ms(self.elapsed())
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a duration to fractional milliseconds (nanoseconds / 1e6).
pub fn duration_ms(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1e6
}
