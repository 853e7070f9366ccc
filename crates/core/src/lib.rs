//! Core board logic - pure, deterministic, and testable
//!
//! This crate holds every match-3 rule: the grid, the starting fill, swap
//! validation, match detection, the cascade loop and scoring. It has no
//! dependency on terminals or I/O; the only ambient concern it carries is
//! `tracing` instrumentation.
//!
//! # Module Structure
//!
//! - [`grid`]: tile storage, checked access, column gravity and refill
//! - [`init`]: starting fill that avoids ready-made runs
//! - [`matcher`]: horizontal/vertical run detection
//! - [`swap`]: swap legality and revert
//! - [`cascade`]: clear / drop / refill state machine and its event log
//! - [`scoring`]: per-pass points, combo scaling, high score
//! - [`round_clock`]: timed-round countdown
//! - [`engine`]: [`BoardEngine`], the owner of all of the above
//! - [`snapshot`]: read-only frame data for views
//! - [`rng`]: seeded and scripted tile sources
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{BoardEngine, SwapOutcome};
//! use tui_match3_types::{BoardConfig, Coord};
//!
//! let mut engine = BoardEngine::new(BoardConfig::default(), 12345)?;
//!
//! match engine.request_swap(Coord::new(0, 0), Coord::new(1, 0))? {
//!     SwapOutcome::Accepted(report) => {
//!         assert!(report.final_combo_depth >= 1);
//!         assert!(report.settled());
//!     }
//!     SwapOutcome::Rejected(_) => assert_eq!(engine.current_score(), 0),
//! }
//! # Ok::<(), tui_match3_core::BoardError>(())
//! ```
//!
//! # Coordinates
//!
//! `Coord { x, y }` with `y = 0` the bottom row. Gravity pulls toward lower
//! `y` and refill spawns at the top of each column.

pub mod cascade;
pub mod engine;
pub mod error;
pub mod grid;
pub mod init;
pub mod matcher;
pub mod rng;
pub mod round_clock;
pub mod scoring;
pub mod snapshot;
pub mod swap;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use cascade::{CascadePhase, CascadeResolver, ResolveReport};
pub use engine::{BoardEngine, GameOverReport, SwapOutcome};
pub use error::BoardError;
pub use grid::Grid;
pub use matcher::{find_all_matches, MatchSet};
pub use rng::{ScriptedRng, SimpleRng, TileRng};
pub use round_clock::RoundClock;
pub use scoring::{calculate_clear_score, ScoreEngine};
pub use snapshot::BoardSnapshot;
pub use swap::{validate_swap, RejectReason, SwapVerdict};
