use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::grid::Grid;

/// Stable 64-bit FNV-1a hasher for `board_hash`.
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Read-only copy of everything a view needs to draw one frame.
///
/// `cells` is row-major, bottom row first; `0` is an empty cell and a live
/// tile of kind `k` is stored as `k + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    pub cells: Vec<u8>,
    pub score: u32,
    pub high_score: u32,
    pub game_over: bool,
    pub remaining_ms: Option<u32>,
    pub board_hash: u64,
}

impl BoardSnapshot {
    /// Encoded cell at `(x, y)`, `0` when empty or off the board.
    pub fn cell(&self, x: u8, y: u8) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(0)
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Overwrite the board part from `grid`, reusing the cell buffer.
    pub(crate) fn write_grid(&mut self, grid: &Grid) {
        self.width = grid.width();
        self.height = grid.height();
        self.cells.clear();
        self.cells
            .extend(grid.cells().iter().map(|t| t.map_or(0, |k| k.saturating_add(1))));
        self.board_hash = board_hash(grid);
    }
}

/// Deterministic hash of the tile layout.
pub fn board_hash(grid: &Grid) -> u64 {
    let mut hasher = Fnv1aHasher::new();
    grid.width().hash(&mut hasher);
    grid.height().hash(&mut hasher);
    grid.cells().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    #[test]
    fn test_write_grid_encodes_empty_as_zero() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(Coord::new(0, 0), Some(0)).unwrap();
        grid.set(Coord::new(1, 1), Some(3)).unwrap();

        let mut snap = BoardSnapshot::default();
        snap.write_grid(&grid);
        assert_eq!(snap.cells, vec![1, 0, 0, 4]);
        assert_eq!(snap.cell(1, 1), 4);
        assert_eq!(snap.cell(5, 0), 0);
    }

    #[test]
    fn test_board_hash_tracks_layout() {
        let mut a = Grid::new(3, 3).unwrap();
        let b = a.clone();
        assert_eq!(board_hash(&a), board_hash(&b));

        a.set(Coord::new(1, 1), Some(2)).unwrap();
        assert_ne!(board_hash(&a), board_hash(&b));
    }
}
