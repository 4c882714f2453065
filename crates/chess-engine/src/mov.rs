//! Moves as reversible commands.

use chess_core::{MoveFlag, MoveText, PieceKind, Square};
use std::fmt;

use crate::PieceId;

/// One ply transition, described against the position it was generated in.
///
/// A move is applied once with [`Board::apply`](crate::Board::apply) and
/// undone at most once with [`Board::reverse`](crate::Board::reverse), in
/// last-in-first-out order with any other moves. It records everything the
/// reverse needs that the board no longer knows after the apply, in
/// particular whether this was the mover's first move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) piece: PieceId,
    pub(crate) captured: Option<PieceId>,
    pub(crate) flag: MoveFlag,
    pub(crate) first_move: bool,
}

impl Move {
    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The moving piece.
    #[inline]
    pub const fn piece(&self) -> PieceId {
        self.piece
    }

    /// The captured piece. For en passant it stands beside the origin, not
    /// on the destination.
    #[inline]
    pub const fn captured(&self) -> Option<PieceId> {
        self.captured
    }

    #[inline]
    pub const fn flag(&self) -> MoveFlag {
        self.flag
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        self.flag.is_castling()
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.flag, MoveFlag::EnPassant)
    }

    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.flag.promotion_piece()
    }

    /// Whether the mover had not moved before this move was generated.
    #[inline]
    pub const fn is_first_move(&self) -> bool {
        self.first_move
    }

    /// The printable form of this move.
    #[inline]
    pub const fn text(&self) -> MoveText {
        MoveText::new(self.from, self.to, self.promotion())
    }

    /// Algebraic notation, e.g. `e2e4` or `d7c8q`.
    pub fn notation(&self) -> String {
        self.text().to_string()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {:?})", self.text(), self.flag)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
