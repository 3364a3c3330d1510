//! Time-related utilities with clock abstraction for testability.

use std::time::Duration;

use chrono::{DateTime, Local};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current wall-clock time in the server's local timezone
    fn now(&self) -> DateTime<Local>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Local>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<Local>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.fixed_time
    }
}

/// Format a time as `HH:MM:SS`, the format used on every chat frame
pub fn format_clock_time(time: &DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Format a duration rounded to whole seconds, e.g. `1h2m3s`, `4m0s`, `7s`
pub fn format_uptime(duration: Duration) -> String {
    let mut secs = duration.as_secs();
    if duration.subsec_millis() >= 500 {
        secs += 1;
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
