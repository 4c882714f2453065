//! Game management with an undoable move history.
//!
//! The [`Game`] struct wraps a [`Board`] and records every move played on
//! it, so that moves can be taken back one by one.

use chess_core::{Color, MoveText};
use thiserror::Error;

use crate::{Board, Move, SetupError};

/// Where a position stands from the point of view of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has a legal move.
    Ongoing,
    /// The side to move is in check with no legal move.
    Checkmate { winner: Color },
    /// The side to move is not in check and has no legal move.
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Error type for game operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// The text is not coordinate notation like `e2e4` or `e7e8q`.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    /// The game has already ended.
    #[error("game has already ended")]
    GameAlreadyOver,

    /// There is no move left to take back.
    #[error("no move to undo")]
    NothingToUndo,
}

/// A chess game with history tracking.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::startpos())
    }

    /// Creates a game from a custom starting position.
    pub fn from_board(board: Board) -> Self {
        Game {
            board,
            history: Vec::new(),
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        Ok(Self::from_board(Board::from_fen(fen)?))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns all legal moves of the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves()
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.is_king_in_check(self.board.side_to_move())
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// Moves played so far, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Moves played so far in coordinate notation.
    pub fn history_notation(&self) -> Vec<String> {
        self.history.iter().map(Move::notation).collect()
    }

    /// Plays a move given in coordinate notation, e.g. `e2e4` or `e7e8q`.
    pub fn play(&mut self, notation: &str) -> Result<Move, GameError> {
        if MoveText::parse(notation).is_none() {
            return Err(GameError::InvalidNotation(notation.to_string()));
        }
        if self.status().is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let m = self
            .board
            .find_move(notation)
            .ok_or_else(|| GameError::IllegalMove(notation.to_string()))?;
        self.push(m);
        Ok(m)
    }

    /// Plays a move generated for the current position.
    pub fn play_move(&mut self, m: Move) -> Result<(), GameError> {
        if !self.board.legal_moves().contains(&m) {
            return Err(GameError::IllegalMove(m.notation()));
        }
        self.push(m);
        Ok(())
    }

    /// Takes back the last move.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let m = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.board.reverse(&m);
        tracing::trace!(notation = %m, ply = self.board.ply(), "undo");
        Ok(m)
    }

    fn push(&mut self, m: Move) {
        self.board.apply(&m);
        self.history.push(m);
        tracing::trace!(notation = %m, ply = self.board.ply(), "play");
    }

    /// Consumes the game, returning the current board.
    pub fn into_board(self) -> Board {
        self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game() {
        let game = Game::new();
        assert!(game.history().is_empty());
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert!(!game.is_check());
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn play_records_history() {
        let mut game = Game::new();
        game.play("e2e4").unwrap();
        game.play("e7e5").unwrap();
        assert_eq!(game.history_notation(), vec!["e2e4", "e7e5"]);
        assert_eq!(game.board().side_to_move(), Color::White);
    }

    #[test]
    fn illegal_and_invalid_moves() {
        let mut game = Game::new();
        assert_eq!(
            game.play("e2e5"),
            Err(GameError::IllegalMove("e2e5".to_string()))
        );
        assert_eq!(
            game.play("e7e5"),
            Err(GameError::IllegalMove("e7e5".to_string()))
        );
        assert_eq!(
            game.play("castle"),
            Err(GameError::InvalidNotation("castle".to_string()))
        );
        assert!(game.history().is_empty());
    }

    #[test]
    fn play_move_checks_legality() {
        let mut game = Game::new();
        let m = game.board().find_move("g1f3").unwrap();
        game.play_move(m).unwrap();
        // The same move is not legal for Black.
        assert_eq!(
            game.play_move(m),
            Err(GameError::IllegalMove("g1f3".to_string()))
        );
    }

    #[test]
    fn undo_restores_previous_position() {
        let mut game = Game::new();
        let start = game.board().clone();
        game.play("e2e4").unwrap();
        let after_e4 = game.board().clone();
        game.play("d7d5").unwrap();
        game.play("e4d5").unwrap();

        game.undo().unwrap();
        game.undo().unwrap();
        assert_eq!(game.board(), &after_e4);
        game.undo().unwrap();
        assert_eq!(game.board(), &start);
        assert_eq!(game.undo(), Err(GameError::NothingToUndo));
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut game = Game::new();
        for notation in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.play(notation).unwrap();
        }
        assert!(game.is_check());
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert!(game.board().is_checkmate(Color::White));
        assert_eq!(game.play("e1f2"), Err(GameError::GameAlreadyOver));

        game.undo().unwrap();
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn stalemate() {
        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert!(game.board().is_stalemate(Color::Black));
        assert!(!game.board().is_checkmate(Color::Black));
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        let game = Game::from_fen("6k1/5ppp/8/8/8/8/8/3R2K1 b - - 0 1").unwrap();
        assert_eq!(game.status(), GameStatus::Ongoing);
        let mated = Game::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(
            mated.status(),
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
    }
}
