//! Grid module - owns the tiles of one board
//!
//! Tiles live in a flat vector in row-major order (`y * width + x`), bottom
//! row first. Every in-range coordinate always holds exactly one [`Tile`];
//! "destroyed" tiles are simply `None` until gravity or refill overwrite them.
//!
//! Checked accessors (`get`, `set`, `swap`, `is_empty`) fail with
//! [`BoardError::OutOfBounds`]; `tile_at` is the cheap probe used by scans.

use arrayvec::ArrayVec;

use crate::error::BoardError;
use crate::types::{ConfigError, Coord, Direction, Tile, TileKind, MAX_BOARD_DIM};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u8,
    height: u8,
    cells: Vec<Tile>,
}

impl Grid {
    /// Create an all-empty grid.
    pub fn new(width: u8, height: u8) -> Result<Self, BoardError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth.into());
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight.into());
        }
        if width > MAX_BOARD_DIM || height > MAX_BOARD_DIM {
            return Err(ConfigError::TooLarge.into());
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        })
    }

    /// Build a grid from rows listed top row first, the way a board reads on
    /// screen. `rows[0]` becomes `y = height - 1`.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Result<Self, BoardError> {
        let height = u8::try_from(rows.len()).map_err(|_| ConfigError::TooLarge)?;
        let width = rows
            .first()
            .map(|row| u8::try_from(row.len()).map_err(|_| ConfigError::TooLarge))
            .transpose()?
            .unwrap_or(0);
        if rows.iter().any(|row| row.len() != width as usize) {
            return Err(ConfigError::GridMismatch.into());
        }

        let mut grid = Self::new(width, height)?;
        for (row_idx, row) in rows.iter().enumerate() {
            let y = height as usize - 1 - row_idx;
            let start = y * width as usize;
            grid.cells[start..start + width as usize].copy_from_slice(row);
        }
        Ok(grid)
    }

    /// Rows top row first (inverse of [`Grid::from_rows`]).
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        let width = self.width as usize;
        (0..self.height as usize)
            .rev()
            .map(|y| self.cells[y * width..(y + 1) * width].to_vec())
            .collect()
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, c: Coord) -> Option<usize> {
        if !self.in_bounds(c) {
            return None;
        }
        Some((c.y as usize) * (self.width as usize) + (c.x as usize))
    }

    #[inline(always)]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as u8) < self.width && (c.y as u8) < self.height
    }

    fn out_of_bounds(&self, coord: Coord) -> BoardError {
        BoardError::OutOfBounds {
            coord,
            width: self.width,
            height: self.height,
        }
    }

    fn checked_index(&self, c: Coord) -> Result<usize, BoardError> {
        self.index(c).ok_or_else(|| self.out_of_bounds(c))
    }

    /// Tile at `c`, or `None` when `c` is off the board.
    #[inline]
    pub fn tile_at(&self, c: Coord) -> Option<Tile> {
        self.index(c).map(|idx| self.cells[idx])
    }

    /// Live tile kind at `c`; `None` for empty cells and off-board positions.
    #[inline]
    pub fn kind_at(&self, c: Coord) -> Option<TileKind> {
        self.tile_at(c).flatten()
    }

    pub fn get(&self, c: Coord) -> Result<Tile, BoardError> {
        Ok(self.cells[self.checked_index(c)?])
    }

    pub fn set(&mut self, c: Coord, tile: Tile) -> Result<(), BoardError> {
        let idx = self.checked_index(c)?;
        self.cells[idx] = tile;
        Ok(())
    }

    /// Exchange two tiles. Nothing changes unless both coordinates are valid.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<(), BoardError> {
        let ia = self.checked_index(a)?;
        let ib = self.checked_index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    pub fn is_empty(&self, c: Coord) -> Result<bool, BoardError> {
        Ok(self.get(c)?.is_none())
    }

    /// In-bounds orthogonal neighbors of `c`.
    pub fn neighbors(&self, c: Coord) -> ArrayVec<Coord, 4> {
        Direction::ALL
            .iter()
            .map(|&dir| c.step(dir))
            .filter(|&n| self.in_bounds(n))
            .collect()
    }

    /// Empty every listed cell. Off-board coordinates are ignored.
    pub fn clear_cells(&mut self, coords: &[Coord]) {
        for &c in coords {
            if let Some(idx) = self.index(c) {
                self.cells[idx] = None;
            }
        }
    }

    /// Let the live tiles of column `x` fall toward `y = 0`, keeping their
    /// order, and record `(from, to)` for every tile that changed row.
    /// Vacated slots end up at the top of the column.
    pub fn compact_column(&mut self, x: i8, moves: &mut Vec<(Coord, Coord)>) {
        if x < 0 || x as u8 >= self.width {
            return;
        }
        let width = self.width as usize;
        let col = x as usize;
        let mut write_y = 0usize;

        for read_y in 0..self.height as usize {
            let read_idx = read_y * width + col;
            if self.cells[read_idx].is_none() {
                continue;
            }
            if read_y != write_y {
                let write_idx = write_y * width + col;
                self.cells[write_idx] = self.cells[read_idx];
                self.cells[read_idx] = None;
                moves.push((
                    Coord::new(x, read_y as i8),
                    Coord::new(x, write_y as i8),
                ));
            }
            write_y += 1;
        }
    }

    /// Fill every empty cell, column by column from the left, bottom to top
    /// within a column. `pick` sees the grid as filled so far.
    pub fn fill_empty(
        &mut self,
        mut pick: impl FnMut(&Grid, Coord) -> TileKind,
        spawned: &mut Vec<(Coord, TileKind)>,
    ) {
        for x in 0..self.width as i8 {
            for y in 0..self.height as i8 {
                let c = Coord::new(x, y);
                let idx = (y as usize) * (self.width as usize) + (x as usize);
                if self.cells[idx].is_some() {
                    continue;
                }
                let kind = pick(self, c);
                self.cells[idx] = Some(kind);
                spawned.push((c, kind));
            }
        }
    }

    /// All coordinates in sweep order (outer x, inner y).
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (w, h) = (self.width as i8, self.height as i8);
        (0..w).flat_map(move |x| (0..h).map(move |y| Coord::new(x, y)))
    }

    /// Flat cell slice, row-major, bottom row first.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Empty the whole grid.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}
