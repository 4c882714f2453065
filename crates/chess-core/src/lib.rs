//! Core types for chess.
//!
//! This crate provides the board-independent building blocks used by the
//! engine:
//! - [`Color`] and [`PieceKind`] for piece identity
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - the [`vector`] module with step/ray geometry over square indices
//! - [`MoveFlag`] and [`MoveText`] for tagging and printing moves
//! - FEN field parsing ([`FenFields`])
//!
//! Squares are numbered 0-63 from the top-left corner of the board: index 0
//! is `a8`, index 7 is `h8`, index 63 is `h1`.

mod color;
mod error;
mod fen;
mod mov;
mod piece;
mod square;
pub mod vector;

pub use color::Color;
pub use error::SquareError;
pub use fen::{CastlingField, FenError, FenFields, Placement};
pub use mov::{MoveFlag, MoveText};
pub use piece::PieceKind;
pub use square::{File, Rank, Square};
