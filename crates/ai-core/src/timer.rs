#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Remainders at or below this many seconds count as finished (fixed-step `dt` drift).
const FINISH_TOLERANCE: f32 = 1e-5;

/// Counts a duration down by explicit `update(dt)` calls.
///
/// Multi-step waits (wind-ups, fuses, decision intervals) are plain values updated once per
/// tick; there is no hidden continuation state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountdownTimer {
    duration: f32,
    remaining: f32,
    running: bool,
}

impl CountdownTimer {
    /// A stopped timer that will count `duration` seconds once started.
    pub fn new(duration: f32) -> Self {
        let duration = duration.max(0.0);
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    /// A stopped timer that already reads as finished.
    pub fn expired(duration: f32) -> Self {
        let mut timer = Self::new(duration);
        timer.remaining = 0.0;
        timer
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Restart from the full duration.
    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.running = true;
    }

    /// Restart with a new duration.
    pub fn start_with(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
        self.start();
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance by `dt` seconds. Returns `true` exactly on the update that finishes the timer.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining -= dt.max(0.0);
        if self.remaining <= FINISH_TOLERANCE {
            self.remaining = 0.0;
            self.running = false;
            return true;
        }
        false
    }
}
