//! Coordinate errors.

use thiserror::Error;

/// Errors raised when building a [`Square`](crate::Square) from raw values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareError {
    #[error("square index {0} is outside 0-63")]
    IndexOutOfRange(u8),

    #[error("coordinates ({file}, {rank}) are outside 0-7")]
    CoordinatesOutOfRange { file: u8, rank: u8 },

    #[error("invalid algebraic square: '{0}'")]
    InvalidAlgebraic(String),
}
