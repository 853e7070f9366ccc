//! Match detection - finds every tile that sits in a line of 3 or more
//!
//! For each live cell the detector walks outward along both axes while the
//! neighbor holds the same kind. The vertical pair (up + down) and the
//! horizontal pair (left + right) are judged independently: an axis counts
//! when its run, origin included, reaches [`MIN_RUN`]. The result is the
//! deduplicated union of all qualifying runs.
//!
//! Cost is O(width · height · max(width, height)) per call. That is fine for
//! casual board sizes; very large boards would want incremental detection
//! around the cells that actually changed.

use crate::grid::Grid;
use crate::types::{Coord, Direction, TileKind, MIN_RUN};

/// Coordinates found by one detection pass, without duplicates, in sweep
/// order (outer x, inner y).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    coords: Vec<Coord>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.coords.binary_search(&c).is_ok()
    }

    pub fn as_slice(&self) -> &[Coord] {
        &self.coords
    }

    pub fn into_vec(self) -> Vec<Coord> {
        self.coords
    }
}

/// Number of consecutive live `kind` tiles starting one step from `origin`
/// in `dir`. Empty cells and the board edge end the walk.
fn run_from(grid: &Grid, origin: Coord, dir: Direction, kind: TileKind) -> usize {
    let mut count = 0;
    let mut c = origin.step(dir);
    while grid.kind_at(c) == Some(kind) {
        count += 1;
        c = c.step(dir);
    }
    count
}

/// Find all tiles participating in a horizontal or vertical run of 3+.
pub fn find_all_matches(grid: &Grid) -> MatchSet {
    let width = grid.width() as usize;
    let mut marked = vec![false; grid.cells().len()];

    for origin in grid.coords() {
        let Some(kind) = grid.kind_at(origin) else {
            continue;
        };

        for (back, fwd) in [
            (Direction::Down, Direction::Up),
            (Direction::Left, Direction::Right),
        ] {
            let before = run_from(grid, origin, back, kind);
            let after = run_from(grid, origin, fwd, kind);
            if before + 1 + after < MIN_RUN {
                continue;
            }

            let (dx, dy) = fwd.delta();
            let start = before as i8;
            for i in -start..=after as i8 {
                let c = origin.offset(dx * i, dy * i);
                marked[(c.y as usize) * width + (c.x as usize)] = true;
            }
        }
    }

    // Sweep order keeps the list sorted for `Coord`'s (x, y) ordering.
    let coords = grid
        .coords()
        .filter(|c| marked[(c.y as usize) * width + (c.x as usize)])
        .collect();
    MatchSet { coords }
}

/// Would placing `kind` at `c` complete a run of 3+ with the live tiles
/// already around it? Used to spawn tiles that do not match on purpose.
pub fn would_complete_run(grid: &Grid, c: Coord, kind: TileKind) -> bool {
    [
        (Direction::Down, Direction::Up),
        (Direction::Left, Direction::Right),
    ]
    .iter()
    .any(|&(back, fwd)| run_from(grid, c, back, kind) + 1 + run_from(grid, c, fwd, kind) >= MIN_RUN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        let rows: Vec<Vec<_>> = rows
            .iter()
            .map(|r| {
                r.chars()
                    .map(|ch| ch.to_digit(10).map(|d| d as TileKind))
                    .collect()
            })
            .collect();
        Grid::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_no_matches_on_checkerboard() {
        let g = grid(&["0101", "1010", "0101"]);
        assert!(find_all_matches(&g).is_empty());
    }

    #[test]
    fn test_horizontal_run_of_three() {
        let g = grid(&["0120", "2221", "0103"]);
        let m = find_all_matches(&g);
        assert_eq!(
            m.as_slice(),
            &[Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)]
        );
    }

    #[test]
    fn test_vertical_run_of_four() {
        let g = grid(&["1..", "1..", "1..", "1.."]);
        assert_eq!(find_all_matches(&g).len(), 4);
    }

    #[test]
    fn test_cross_shape_counts_shared_cell_once() {
        let g = grid(&[".3.", "333", ".3."]);
        let m = find_all_matches(&g);
        assert_eq!(m.len(), 5);
        assert!(m.contains(Coord::new(1, 1)));
    }

    #[test]
    fn test_empty_cell_breaks_run() {
        let g = grid(&["22.22"]);
        assert!(find_all_matches(&g).is_empty());
    }

    #[test]
    fn test_axes_are_independent() {
        // Two in a row and two in a column through the corner: no match.
        let g = grid(&["4..", "4..", "x44"]);
        assert!(find_all_matches(&g).is_empty());
    }

    #[test]
    fn test_would_complete_run_between_neighbors() {
        let g = grid(&["1.1"]);
        assert!(would_complete_run(&g, Coord::new(1, 0), 1));
        assert!(!would_complete_run(&g, Coord::new(1, 0), 2));
    }
}
