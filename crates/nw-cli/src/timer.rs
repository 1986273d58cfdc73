//! Wall-clock implementation of the engine's advance timer.
//!
//! The console loop cannot be interrupted mid-read, so the timer is
//! cooperative: the loop polls [`WallTimer::is_due`] between inputs and
//! fires the advance itself.

use std::time::{Duration, Instant};

use nw_engine::host::AdvanceTimer;

/// A cancellable single-shot deadline.
#[derive(Debug, Default)]
pub struct WallTimer {
    deadline: Option<Instant>,
}

impl WallTimer {
    /// Create an unarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an armed deadline has elapsed.
    pub fn is_due(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Whether a deadline is armed.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

impl AdvanceTimer for WallTimer {
    fn arm(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }
}
