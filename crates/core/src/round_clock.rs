//! Countdown for timed rounds, in milliseconds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundClock {
    elapsed_ms: u32,
    limit_ms: u32,
}

impl RoundClock {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            elapsed_ms: 0,
            limit_ms,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn remaining_ms(&self) -> u32 {
        self.limit_ms.saturating_sub(self.elapsed_ms)
    }

    pub fn is_up(&self) -> bool {
        self.elapsed_ms >= self.limit_ms
    }

    /// Advance by `dt_ms`. Returns true on the tick that runs the clock out.
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        if self.is_up() {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.limit_ms);
        self.is_up()
    }
}
