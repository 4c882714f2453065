//! Chess move generation on a mutable board.
//!
//! This crate provides:
//! - [`Board`] - piece arena and square map, mutated in place
//! - [`Move`] - a reversible command with [`Board::apply`] and [`Board::reverse`]
//! - legal move generation with check, pin, and en passant filtering
//! - checkmate and stalemate detection ([`GameStatus`])
//! - [`Game`] - a board with an undoable move history
//! - [`perft`] and [`perft_divide`] for validating the generator
//!
//! # Architecture
//!
//! Every piece caches the set of squares it attacks as a [`Bitboard`].
//! Legality is decided from those caches instead of by trying each move and
//! looking for a check afterwards. After each apply or reverse the moved
//! piece and every slider refresh their caches; pawns, knights, and kings
//! only depend on their own square.
//!
//! # Example
//!
//! ```
//! use chess_engine::{perft, Board, Game};
//!
//! let mut board = Board::startpos();
//! assert_eq!(board.legal_moves().len(), 20);
//! assert_eq!(perft(&mut board, 2), 400);
//!
//! let mut game = Game::new();
//! game.play("e2e4").unwrap();
//! game.play("e7e5").unwrap();
//! game.undo().unwrap();
//! println!("{}", game.board());
//! ```

mod apply;
mod bitboard;
mod board;
mod game;
mod mov;
pub mod movegen;
mod piece;
mod setup;

pub use bitboard::Bitboard;
pub use board::Board;
pub use game::{Game, GameError, GameStatus};
pub use mov::Move;
pub use movegen::perft::{perft, perft_divide, perft_divide_after, PerftReport};
pub use piece::{Piece, PieceId};
pub use setup::SetupError;
