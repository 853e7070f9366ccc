//! Terminal board renderer.
//!
//! A small, game-oriented rendering layer for playing a board in a terminal.
//! It avoids widget toolkits and renders into a plain framebuffer that is
//! diffed and flushed to the terminal.
//!
//! - [`fb`]: framebuffer and styles
//! - [`board_view`]: snapshot + overlay to framebuffer (pure)
//! - [`play`]: cursor, selection and wrong-move flash held for the engine
//! - [`renderer`]: crossterm output with diffing

pub mod board_view;
pub mod fb;
pub mod play;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use board_view::{tile_glyph, BoardOverlay, BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use play::{PlayEvent, PlayState};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
