//! Idle-timeout tracking for the low-power profile

use crate::config::IDLE_TIMEOUT_MS;
use crate::time::Instant;

pub struct PowerManager {
    last_input: Instant,
    timeout_ms: u32,
}

impl PowerManager {
    pub const fn new(now: Instant, timeout_ms: u32) -> Self {
        Self {
            last_input: now,
            timeout_ms,
        }
    }

    /// Called for every accepted move
    pub fn note_input(&mut self, now: Instant) {
        self.last_input = now;
    }

    /// Restart the idle window, after a game reset or a wake
    pub fn rearm(&mut self, now: Instant) {
        self.last_input = now;
    }

    pub fn last_input(&self) -> Instant {
        self.last_input
    }

    /// Never true while an animation runs: the board is still showing
    /// something and the animation owns the reset.
    pub fn should_sleep(&self, now: Instant, animation_active: bool) -> bool {
        !animation_active && now.has_elapsed(self.last_input, self.timeout_ms)
    }
}

impl Default for PowerManager {
    fn default() -> Self {
        Self::new(Instant::ZERO, IDLE_TIMEOUT_MS)
    }
}
