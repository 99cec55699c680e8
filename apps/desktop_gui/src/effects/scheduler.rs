//! Frame-polled recurring timer.

use std::time::Duration;

/// Fires every `interval` until cancelled. Times are seconds on the caller's clock.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask {
    interval: f64,
    next_due: f64,
    cancelled: bool,
}

impl ScheduledTask {
    /// First firing is one interval after `now`.
    pub fn every(interval: Duration, now: f64) -> Self {
        let interval = interval.as_secs_f64().max(f64::EPSILON);
        Self {
            interval,
            next_due: now + interval,
            cancelled: false,
        }
    }

    /// Whether the task fires at `now`. Missed ticks are not made up: after a
    /// stalled frame the task fires once and the next firing is one interval out.
    pub fn poll(&mut self, now: f64) -> bool {
        if self.cancelled || self.next_due > now {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn next_due(&self) -> Option<f64> {
        (!self.cancelled).then_some(self.next_due)
    }
}
