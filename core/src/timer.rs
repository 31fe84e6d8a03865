//! Refresh scheduling as a plain state machine.
//!
//! The timer never sleeps on its own. Whoever drives it passes the current
//! instant to [`RefreshTimer::poll`], which makes the cadence testable with a
//! paused or hand-built clock.

use std::time::Duration;

use netdir_common::config::MINIMUM_UPDATE_INTERVAL;
use tokio::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct RefreshTimer {
    interval: Option<Duration>,
    deadline: Option<Instant>,
}

impl RefreshTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)starts the timer with a period of `seconds`, counted from `now`.
    ///
    /// Values below [`MINIMUM_UPDATE_INTERVAL`] stop the timer instead.
    /// Returns whether the timer is running afterwards.
    pub fn set_interval(&mut self, seconds: u64, now: Instant) -> bool {
        if seconds < MINIMUM_UPDATE_INTERVAL {
            self.stop();
            return false;
        }

        let interval: Duration = Duration::from_secs(seconds);
        self.interval = Some(interval);
        self.deadline = Some(now + interval);
        true
    }

    pub fn stop(&mut self) {
        self.interval = None;
        self.deadline = None;
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Reports whether the deadline has passed and, if so, re-arms one
    /// interval after `now`. Fires at most once per call, missed periods are
    /// not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match (self.interval, self.deadline) {
            (Some(interval), Some(deadline)) if now >= deadline => {
                self.deadline = Some(now + interval);
                true
            }
            _ => false,
        }
    }
}
