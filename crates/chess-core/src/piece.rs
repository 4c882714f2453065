//! Chess piece kinds.

use crate::vector;
use crate::Color;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Kinds a pawn may promote to, in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Returns the index of this piece kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the lowercase letter used in FEN and move notation.
    ///
    /// The knight prints as `n` so it does not collide with the king.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Returns the FEN character for this piece with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = self.letter();
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece kind and color.
    pub const fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, Color::from_fen_case(c)))
    }

    /// Parses a lowercase or uppercase promotion letter.
    pub const fn from_promotion_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            _ => None,
        }
    }

    /// Returns true if this piece is a sliding piece (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Returns the ray directions of a sliding piece; empty for the others.
    pub const fn ray_vectors(self) -> &'static [i8] {
        match self {
            PieceKind::Bishop => &vector::DIAGONAL,
            PieceKind::Rook => &vector::ORTHOGONAL,
            PieceKind::Queen => &vector::QUEEN,
            _ => &[],
        }
    }

    /// Returns true if this piece slides along the given unit direction.
    #[inline]
    pub const fn slides_along(self, direction: i8) -> bool {
        match self {
            PieceKind::Bishop => vector::is_diagonal(direction),
            PieceKind::Rook => vector::is_orthogonal(direction),
            PieceKind::Queen => vector::is_diagonal(direction) || vector::is_orthogonal(direction),
            _ => false,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_to_fen() {
        assert_eq!(PieceKind::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(PieceKind::Pawn.to_fen_char(Color::Black), 'p');
        assert_eq!(PieceKind::King.to_fen_char(Color::White), 'K');
        assert_eq!(PieceKind::Knight.to_fen_char(Color::Black), 'n');
    }

    #[test]
    fn piece_from_fen() {
        assert_eq!(
            PieceKind::from_fen_char('P'),
            Some((PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            PieceKind::from_fen_char('q'),
            Some((PieceKind::Queen, Color::Black))
        );
        assert_eq!(PieceKind::from_fen_char('x'), None);
        assert_eq!(PieceKind::from_fen_char('1'), None);
    }

    #[test]
    fn promotion_letters() {
        assert_eq!(PieceKind::from_promotion_char('n'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_promotion_char('Q'), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_promotion_char('k'), None);
        assert_eq!(PieceKind::from_promotion_char('p'), None);
        let letters: String = PieceKind::PROMOTIONS.iter().map(|k| k.letter()).collect();
        assert_eq!(letters, "qrbn");
    }

    #[test]
    fn sliders_and_lines() {
        assert!(!PieceKind::Pawn.is_slider());
        assert!(!PieceKind::King.is_slider());
        assert!(PieceKind::Queen.is_slider());

        assert!(PieceKind::Bishop.slides_along(-7));
        assert!(!PieceKind::Bishop.slides_along(8));
        assert!(PieceKind::Rook.slides_along(-1));
        assert!(!PieceKind::Rook.slides_along(9));
        assert!(PieceKind::Queen.slides_along(9) && PieceKind::Queen.slides_along(8));
        assert!(!PieceKind::Knight.slides_along(1));

        assert_eq!(PieceKind::Queen.ray_vectors().len(), 8);
        assert!(PieceKind::Knight.ray_vectors().is_empty());
    }
}
