//! Board engine errors.
//!
//! Only caller contract violations are errors. A swap that produces no match
//! is an ordinary outcome and is reported through [`crate::SwapOutcome`].

use derive_more::{Display, Error, From};

use crate::types::{ConfigError, Coord};

#[derive(Debug, Display, Error, From, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// A coordinate outside the grid was passed in.
    #[display("{coord} is outside the {width}x{height} board")]
    #[from(skip)]
    OutOfBounds { coord: Coord, width: u8, height: u8 },
    /// Rejected at construction; no grid was built.
    #[display("invalid board configuration: {_0}")]
    InvalidConfiguration(#[error(source)] ConfigError),
}
