//! Board initialization - random fill that avoids ready-made matches
//!
//! Cells are filled in a fixed sweep (outer x, inner y), so when `(x, y)` is
//! chosen only the cells to its left and below exist. A kind is excluded
//! when the two cells directly left, or the two directly below, already hold
//! that same kind. If the exclusions would leave nothing to pick, the full
//! catalog is used instead.
//!
//! The lookback is two cells in two directions only; it is a best-effort rule,
//! not a guarantee of a match-free board.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::rng::TileRng;
use crate::types::{Coord, TileKind, MAX_TILE_TYPES};

/// Kinds that would extend an existing pair left of or below `c`.
fn excluded_kinds(grid: &Grid, c: Coord) -> ArrayVec<TileKind, 2> {
    let mut excluded = ArrayVec::new();
    for (a, b) in [
        (c.offset(-1, 0), c.offset(-2, 0)),
        (c.offset(0, -1), c.offset(0, -2)),
    ] {
        if let (Some(ka), Some(kb)) = (grid.kind_at(a), grid.kind_at(b)) {
            if ka == kb && !excluded.contains(&ka) {
                excluded.push(ka);
            }
        }
    }
    excluded
}

/// Candidate kinds for `c` under the initialization rule.
pub fn starting_candidates(
    grid: &Grid,
    c: Coord,
    tile_type_count: TileKind,
) -> ArrayVec<TileKind, { MAX_TILE_TYPES as usize }> {
    let tile_type_count = tile_type_count.min(MAX_TILE_TYPES);
    let excluded = excluded_kinds(grid, c);
    let candidates: ArrayVec<TileKind, { MAX_TILE_TYPES as usize }> = (0..tile_type_count)
        .filter(|k| !excluded.contains(k))
        .collect();
    if candidates.is_empty() {
        return (0..tile_type_count).collect();
    }
    candidates
}

/// Overwrite every cell of `grid` with a fresh starting layout.
pub fn populate<R: TileRng>(grid: &mut Grid, rng: &mut R, tile_type_count: TileKind) {
    grid.clear();
    let mut placed = Vec::with_capacity(grid.cells().len());
    grid.fill_empty(
        |g, c| rng.pick(&starting_candidates(g, c, tile_type_count)),
        &mut placed,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::find_all_matches;
    use crate::rng::SimpleRng;

    #[test]
    fn test_pair_below_is_excluded() {
        let mut grid = Grid::new(1, 3).unwrap();
        grid.set(Coord::new(0, 0), Some(2)).unwrap();
        grid.set(Coord::new(0, 1), Some(2)).unwrap();
        let candidates = starting_candidates(&grid, Coord::new(0, 2), 4);
        assert_eq!(candidates.as_slice(), &[0, 1, 3]);
    }

    #[test]
    fn test_unequal_pair_excludes_nothing() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.set(Coord::new(0, 0), Some(1)).unwrap();
        grid.set(Coord::new(1, 0), Some(2)).unwrap();
        let candidates = starting_candidates(&grid, Coord::new(2, 0), 3);
        assert_eq!(candidates.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_falls_back_to_full_catalog() {
        // Single kind: both pairs exclude kind 0 and nothing is left.
        let mut grid = Grid::new(3, 3).unwrap();
        for c in [(0, 2), (1, 2), (2, 0), (2, 1)] {
            grid.set(Coord::new(c.0, c.1), Some(0)).unwrap();
        }
        let candidates = starting_candidates(&grid, Coord::new(2, 2), 1);
        assert_eq!(candidates.as_slice(), &[0]);
    }

    #[test]
    fn test_populate_fills_without_matches() {
        for seed in 1..50 {
            let mut grid = Grid::new(8, 8).unwrap();
            populate(&mut grid, &mut SimpleRng::new(seed), 3);
            assert!(grid.is_full());
            assert!(
                find_all_matches(&grid).is_empty(),
                "seed {} produced a starting match",
                seed
            );
        }
    }
}
