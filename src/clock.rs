//! Time sources for the search deadline.

use std::time::{Duration, Instant};

/// Elapsed time since the start of one move decision.
pub trait Clock {
    /// Start measuring from now.
    fn restart(&mut self);
    /// Time since the last restart.
    fn elapsed(&self) -> Duration;
}

/// Monotonic wall clock.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    start: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for WallClock {
    fn restart(&mut self) {
        self.start = Instant::now();
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A clock frozen at a fixed elapsed time. Makes deadline behavior
/// reproducible in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub Duration);

impl FixedClock {
    /// Never past any deadline.
    pub fn zero() -> Self {
        Self(Duration::ZERO)
    }

    /// Past every deadline.
    pub fn expired() -> Self {
        Self(Duration::MAX)
    }
}

impl Clock for FixedClock {
    fn restart(&mut self) {}

    fn elapsed(&self) -> Duration {
        self.0
    }
}
