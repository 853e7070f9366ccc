//! Core types module - shared data structures and constants
//!
//! Everything here is plain data: coordinates, tiles, board configuration,
//! the cascade event vocabulary and the abstract player actions. The board
//! engine, the terminal view and the input mapping all speak these types.
//!
//! # Coordinates
//!
//! - `x` grows left to right, `y` grows bottom to top.
//! - `y = 0` is the bottom row; gravity pulls tiles toward lower `y`.
//! - Coordinates are signed so that callers can express off-board positions,
//!   which the engine rejects with an out-of-bounds error instead of clamping.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 8 | Board columns |
//! | `DEFAULT_HEIGHT` | 8 | Board rows |
//! | `DEFAULT_TILE_TYPES` | 5 | Distinct tile kinds |
//! | `MIN_RUN` | 3 | Shortest line that counts as a match |
//! | `TICK_MS` | 16 | Front-end frame interval |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{BoardConfig, Coord, Direction};
//!
//! let config = BoardConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let a = Coord::new(2, 2);
//! assert_eq!(a.step(Direction::Right), Coord::new(3, 2));
//! assert!(a.is_adjacent(Coord::new(2, 3)));
//! assert!(!a.is_adjacent(Coord::new(3, 3)));
//! ```

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Default board width (8 columns)
pub const DEFAULT_WIDTH: u8 = 8;

/// Default board height (8 rows)
pub const DEFAULT_HEIGHT: u8 = 8;

/// Default number of distinct tile kinds
pub const DEFAULT_TILE_TYPES: u8 = 5;

/// Largest accepted board side. Coordinates are `i8`, so this keeps every
/// neighbor offset representable.
pub const MAX_BOARD_DIM: u8 = 64;

/// Largest accepted tile catalog.
pub const MAX_TILE_TYPES: u8 = 32;

/// Shortest line of equal tiles that counts as a match.
pub const MIN_RUN: usize = 3;

/// Front-end frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long the front end shows the "wrong move" cue after a rejected swap.
pub const WRONG_MOVE_FLASH_MS: u32 = 400;

/// Tile type id, always `< tile_type_count` for live tiles.
pub type TileKind = u8;

/// Cell on the board (None = empty/destroyed, Some = live tile of that kind)
pub type Tile = Option<TileKind>;

/// A board position.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[display("({x}, {y})")]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`. Saturates instead of wrapping so that a step off
    /// the edge of a maximum-size board stays off the board.
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Neighbor one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }

    /// True when `other` is one of the four orthogonal neighbors.
    /// A coordinate is never adjacent to itself.
    pub fn is_adjacent(self, other: Coord) -> bool {
        let dx = (self.x as i16 - other.x as i16).abs();
        let dy = (self.y as i16 - other.y as i16).abs();
        dx + dy == 1
    }
}

/// The four scan/move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(dx, dy)` with `y` growing upward.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Construction-time configuration problems.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[display("board width must be at least 1")]
    ZeroWidth,
    #[display("board height must be at least 1")]
    ZeroHeight,
    #[display("board sides are limited to {} cells", MAX_BOARD_DIM)]
    TooLarge,
    #[display("at least one tile type is required")]
    NoTileTypes,
    #[display("at most {} tile types are supported", MAX_TILE_TYPES)]
    TooManyTileTypes,
    #[display("tile_ratio must be positive")]
    ZeroTileRatio,
    #[display("combo_ratio must be positive")]
    ZeroComboRatio,
    #[display("round_duration_ms must be positive for a timed round")]
    ZeroRoundDuration,
    #[display("supplied grid does not match the configured dimensions")]
    GridMismatch,
    #[display("supplied grid holds tile kind {kind}, outside the configured catalog")]
    UnknownTileKind { kind: TileKind },
}

/// Board configuration.
///
/// Missing fields fall back to [`BoardConfig::default`] when deserialized, so a
/// config file only needs to name what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    pub tile_type_count: u8,
    pub tile_ratio: u32,
    pub combo_ratio: u32,
    /// Length of a timed round. `None` plays untimed.
    pub round_duration_ms: Option<u32>,
    /// Most cascade passes one resolve may run. `None` means `width * height`.
    pub max_cascade_depth: Option<u32>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile_type_count: DEFAULT_TILE_TYPES,
            tile_ratio: 1,
            combo_ratio: 1,
            round_duration_ms: None,
            max_cascade_depth: None,
        }
    }
}

impl BoardConfig {
    /// Shorthand for the five core options, everything else defaulted.
    pub fn new(width: u8, height: u8, tile_type_count: u8, tile_ratio: u32, combo_ratio: u32) -> Self {
        Self {
            width,
            height,
            tile_type_count,
            tile_ratio,
            combo_ratio,
            ..Self::default()
        }
    }

    pub fn with_round_duration_ms(mut self, duration_ms: u32) -> Self {
        self.round_duration_ms = Some(duration_ms);
        self
    }

    pub fn with_max_cascade_depth(mut self, depth: u32) -> Self {
        self.max_cascade_depth = Some(depth);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.width > MAX_BOARD_DIM || self.height > MAX_BOARD_DIM {
            return Err(ConfigError::TooLarge);
        }
        if self.tile_type_count == 0 {
            return Err(ConfigError::NoTileTypes);
        }
        if self.tile_type_count > MAX_TILE_TYPES {
            return Err(ConfigError::TooManyTileTypes);
        }
        if self.tile_ratio == 0 {
            return Err(ConfigError::ZeroTileRatio);
        }
        if self.combo_ratio == 0 {
            return Err(ConfigError::ZeroComboRatio);
        }
        if self.round_duration_ms == Some(0) {
            return Err(ConfigError::ZeroRoundDuration);
        }
        Ok(())
    }

    /// Effective cascade cap (never below 1).
    pub fn cascade_cap(&self) -> u32 {
        self.max_cascade_depth
            .unwrap_or(self.width as u32 * self.height as u32)
            .max(1)
    }
}

/// One observable board change, in the order a presentation layer must play it.
///
/// Every event describes a grid mutation that has already been committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CascadeEvent {
    /// The player's swap stood.
    Swapped { a: Coord, b: Coord },
    /// These cells were emptied by one match pass.
    Cleared {
        coords: Vec<Coord>,
        /// Combo depth of the pass (1 for the swap's own match).
        combo: u32,
        /// Score awarded for the pass.
        points: u32,
    },
    /// A surviving tile fell within its column.
    Dropped { from: Coord, to: Coord },
    /// A new tile appeared in a vacated cell.
    Spawned { coord: Coord, kind: TileKind },
    /// No matches remain and every column is full.
    SettleComplete,
}

/// Abstract player actions produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    /// Select the tile under the cursor, or swap it with the selected one.
    Select,
    /// Drop the current selection.
    Cancel,
    Restart,
}

impl BoardAction {
    /// Cursor direction, if this is a cursor move.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            BoardAction::CursorLeft => Some(Direction::Left),
            BoardAction::CursorRight => Some(Direction::Right),
            BoardAction::CursorUp => Some(Direction::Up),
            BoardAction::CursorDown => Some(Direction::Down),
            _ => None,
        }
    }
}
