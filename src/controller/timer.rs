//! Platform Drop Timer
//!
//! Per-actor countdown that clears the platform drop latch. Driven by
//! simulated time, so replays fire it on the same tick every run.

use serde::{Serialize, Deserialize};

/// Slack absorbing f32 rounding when summing tick durations.
pub const TIMER_EPSILON: f32 = 1e-6;

/// Cancellable, restartable countdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DropTimer {
    remaining: Option<f32>,
}

impl DropTimer {
    /// Create an idle timer.
    pub const fn new() -> Self {
        Self { remaining: None }
    }

    /// Start the countdown, replacing any pending one.
    pub fn schedule(&mut self, delay: f32) {
        self.remaining = Some(delay.max(0.0));
    }

    /// Stop the countdown without firing.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Whether a countdown is pending.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Let `dt` seconds pass. Returns true exactly once, when the countdown
    /// reaches zero.
    pub fn advance(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };

        let left = remaining - dt.max(0.0);
        if left <= TIMER_EPSILON {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(left);
            false
        }
    }
}
