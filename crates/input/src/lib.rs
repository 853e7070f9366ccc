//! Terminal input (board-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::BoardAction`]. Cursor and
//! selection state belong to the caller; this crate only translates keys.

pub mod map;

pub use tui_match3_types as types;

pub use map::{handle_key_event, should_quit};
