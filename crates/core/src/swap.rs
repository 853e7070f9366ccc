//! Swap validation
//!
//! A swap is legal when both coordinates are on the board, hold live tiles,
//! are orthogonally adjacent, and exchanging them produces at least one run.
//! Legal swaps stay committed to the grid; illegal ones leave it untouched.

use serde::Serialize;

use crate::error::BoardError;
use crate::grid::Grid;
use crate::matcher::find_all_matches;
use crate::types::Coord;

/// Why a swap request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    SameTile,
    NotAdjacent,
    EmptyTile,
    NoMatch,
    GameOver,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::SameTile => "same_tile",
            RejectReason::NotAdjacent => "not_adjacent",
            RejectReason::EmptyTile => "empty_tile",
            RejectReason::NoMatch => "no_match",
            RejectReason::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapVerdict {
    Accepted,
    Rejected(RejectReason),
}

impl SwapVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapVerdict::Accepted)
    }
}

/// Check `a <-> b` and commit the exchange when it makes a match.
///
/// Off-board coordinates are an error rather than a rejection; every other
/// failed check reverts and reports the reason.
pub fn validate_swap(grid: &mut Grid, a: Coord, b: Coord) -> Result<SwapVerdict, BoardError> {
    let tile_a = grid.get(a)?;
    let tile_b = grid.get(b)?;

    if a == b {
        return Ok(SwapVerdict::Rejected(RejectReason::SameTile));
    }
    if !a.is_adjacent(b) {
        return Ok(SwapVerdict::Rejected(RejectReason::NotAdjacent));
    }
    if tile_a.is_none() || tile_b.is_none() {
        return Ok(SwapVerdict::Rejected(RejectReason::EmptyTile));
    }

    grid.swap(a, b)?;
    if find_all_matches(grid).is_empty() {
        grid.swap(a, b)?;
        return Ok(SwapVerdict::Rejected(RejectReason::NoMatch));
    }
    Ok(SwapVerdict::Accepted)
}
