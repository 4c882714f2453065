//! Pieces owned by a [`Board`](crate::Board).

use chess_core::{Color, PieceKind, Square};

use crate::Bitboard;

/// Stable handle to a piece in a board's piece arena.
///
/// Ids survive apply/reverse: the piece that moves in a [`Move`](crate::Move)
/// is the same id after the move is reversed, including a pawn that
/// promoted in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u16);

impl PieceId {
    /// Returns the arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A piece with its movement state and cached attack set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub(crate) kind: PieceKind,
    pub(crate) color: Color,
    pub(crate) square: Square,
    pub(crate) has_moved: bool,
    /// Ply on which this pawn advanced two squares.
    pub(crate) two_step_ply: Option<u32>,
    pub(crate) attacks: Bitboard,
}

impl Piece {
    pub(crate) const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
            has_moved: false,
            two_step_ply: None,
            attacks: Bitboard::EMPTY,
        }
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// The square this piece stands on. For a captured piece, or a pawn that
    /// has been replaced by its promotion, the square it last occupied.
    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// The ply on which this pawn made its two-square advance, if it did.
    #[inline]
    pub const fn two_step_ply(&self) -> Option<u32> {
        self.two_step_ply
    }

    /// Squares this piece currently attacks, own-occupied squares included.
    #[inline]
    pub const fn attacked_squares(&self) -> Bitboard {
        self.attacks
    }

    #[inline]
    pub const fn is_slider(&self) -> bool {
        self.kind.is_slider()
    }

    /// Returns the FEN letter for this piece.
    pub const fn fen_char(&self) -> char {
        self.kind.to_fen_char(self.color)
    }
}
