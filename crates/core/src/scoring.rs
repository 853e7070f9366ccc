//! Scoring module - clear points, combo scaling and the high score
//!
//! Every match pass inside a cascade scores
//! `tiles * tile_ratio * combo * combo_ratio`, so the same clear is worth
//! twice as much on the second pass of a chain as on the first.

/// Points for one match pass. Saturates instead of overflowing.
pub fn calculate_clear_score(tile_count: usize, combo: u32, tile_ratio: u32, combo_ratio: u32) -> u32 {
    let tiles = u32::try_from(tile_count).unwrap_or(u32::MAX);
    tiles
        .saturating_mul(tile_ratio)
        .saturating_mul(combo.saturating_mul(combo_ratio))
}

/// Current and high score for one board session.
///
/// The high score outlives [`ScoreEngine::reset_score`]; it only moves when a
/// game-over check commits a better result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEngine {
    tile_ratio: u32,
    combo_ratio: u32,
    current: u32,
    high: u32,
}

impl ScoreEngine {
    pub fn new(tile_ratio: u32, combo_ratio: u32) -> Self {
        Self {
            tile_ratio,
            combo_ratio,
            current: 0,
            high: 0,
        }
    }

    /// Add the points for a clear and return them.
    pub fn apply_clear(&mut self, tile_count: usize, combo: u32) -> u32 {
        let delta = calculate_clear_score(tile_count, combo, self.tile_ratio, self.combo_ratio);
        self.current = self.current.saturating_add(delta);
        delta
    }

    pub fn reset_score(&mut self) {
        self.current = 0;
    }

    /// Promote the current score to high score if it beats it.
    /// Returns whether a new high score was set.
    pub fn check_and_commit_high_score(&mut self) -> bool {
        if self.current > self.high {
            self.high = self.current;
            return true;
        }
        false
    }

    pub fn current_score(&self) -> u32 {
        self.current
    }

    pub fn high_score(&self) -> u32 {
        self.high
    }

    pub fn tile_ratio(&self) -> u32 {
        self.tile_ratio
    }

    pub fn combo_ratio(&self) -> u32 {
        self.combo_ratio
    }
}
