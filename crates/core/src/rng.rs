//! RNG module - deterministic tile generation
//!
//! Every random tile the engine places (initial fill and cascade refill) is
//! drawn through the [`TileRng`] trait. The default source is a small LCG so
//! that a seed fully determines a game; tests can plug in a scripted source.

use crate::types::TileKind;

/// Source of uniformly distributed tile ids.
pub trait TileRng {
    /// Random value in `[0, max)`; a zero `max` behaves like one.
    fn next_range(&mut self, max: u32) -> u32;

    /// Uniform pick from a non-empty candidate list.
    fn pick(&mut self, candidates: &[TileKind]) -> TileKind {
        let i = self.next_range(candidates.len() as u32) as usize;
        candidates[i]
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current internal state; feeding it back to `new` resumes the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl TileRng for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of a power-of-two LCG cycle with short periods
        // (bit 0 alternates), so take the range from the high half.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of values, then repeats the last one.
///
/// Values are reduced modulo the requested range, so a script written for a
/// four-kind board stays in range on any board.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl TileRng for ScriptedRng {
    fn next_range(&mut self, max: u32) -> u32 {
        let value = match self.values.get(self.cursor) {
            Some(&v) => {
                self.cursor += 1;
                v
            }
            None => self.values.last().copied().unwrap_or(0),
        };
        value % max.max(1)
    }
}
