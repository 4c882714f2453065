//! Building a [`Board`] from FEN.

use chess_core::{Color, FenError, FenFields, PieceKind, Square};
use thiserror::Error;

use crate::board::square;
use crate::Board;

/// Errors from setting up a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("more than one {0} king on the board")]
    DuplicateKing(Color),

    #[error("no pawn that could have just passed en passant square {0}")]
    MissingEnPassantPawn(String),
}

impl Board {
    /// Sets up a position from FEN, seen from White's side.
    ///
    /// FEN carries no move history, so it is reconstructed from what the
    /// fields imply: kings and pawns off their starting squares have moved,
    /// a corner rook without its castling right has moved, and the pawn
    /// behind an en passant target advanced two squares on the previous ply.
    pub fn from_fen(fen: &str) -> Result<Board, SetupError> {
        let fields = FenFields::parse(fen)?;
        let mut board = Board::empty(Color::White, fields.side_to_move, fields.ply());

        let mut kings = [0usize; 2];
        for p in &fields.placements {
            board.place(p.kind, p.color, p.square);
            if p.kind == PieceKind::King {
                kings[p.color.index()] += 1;
            }
        }
        for color in Color::ALL {
            match kings[color.index()] {
                0 => return Err(SetupError::MissingKing(color)),
                1 => {}
                _ => return Err(SetupError::DuplicateKing(color)),
            }
        }

        board.mark_moved_pieces(&fields);
        if let Some(target) = fields.en_passant {
            board.mark_two_step_pawn(target)?;
        }
        board.refresh_all_attacks();

        tracing::debug!(
            fen,
            side_to_move = %board.side_to_move,
            ply = board.ply,
            pieces = board.pieces.len(),
            "board set up from FEN"
        );
        Ok(board)
    }

    fn mark_moved_pieces(&mut self, fields: &FenFields) {
        for piece in &mut self.pieces {
            let color = piece.color;
            let home_row = if color == self.perspective { 7 } else { 0 };
            let pawn_row = if color == self.perspective { 6 } else { 1 };
            let sq = piece.square;
            piece.has_moved = match piece.kind {
                PieceKind::King => sq != square(4, home_row),
                PieceKind::Pawn => sq.row() != pawn_row,
                PieceKind::Rook => {
                    let granted = sq.row() == home_row
                        && ((sq.col() == 7 && fields.castling.allows(color, true))
                            || (sq.col() == 0 && fields.castling.allows(color, false)));
                    !granted
                }
                _ => false,
            };
        }
    }

    /// Stamps the pawn that just skipped over `target`.
    fn mark_two_step_pawn(&mut self, target: Square) -> Result<(), SetupError> {
        let mover = self.side_to_move.opposite();
        let missing = || SetupError::MissingEnPassantPawn(target.to_string());

        let pawn_sq = target.offset(self.forward(mover)).ok_or_else(missing)?;
        let id = self.piece_id_at(pawn_sq).ok_or_else(missing)?;
        let ply = self.ply;
        let pawn = self.piece_mut(id);
        if pawn.kind != PieceKind::Pawn || pawn.color != mover {
            return Err(missing());
        }
        pawn.two_step_ply = Some(ply.saturating_sub(1));
        pawn.has_moved = true;
        Ok(())
    }
}
