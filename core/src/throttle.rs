//! Leading-edge throttle for raw resize signals.
//!
//! The first signal of a burst arms the gate and the caller schedules one
//! timer for the interval. Signals arriving while armed are dropped: the timer
//! is not reset and nothing is queued. When the timer fires the gate disarms.
//! A final signal inside a window is therefore only reflected if the
//! dimensions read at fire time already include it.

use std::cell::Cell;
use std::time::Duration;

#[derive(Debug)]
pub struct ThrottleGate {
    interval: Duration,
    armed: Cell<bool>,
}

impl ThrottleGate {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            armed: Cell::new(false),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Offer one raw signal. Returns `true` if this signal opened a new window
    /// and the caller must schedule the fire callback.
    pub fn offer(&self) -> bool {
        !self.armed.replace(true)
    }

    /// Close the current window. Called from the fire callback.
    pub fn release(&self) {
        self.armed.set(false);
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }
}
