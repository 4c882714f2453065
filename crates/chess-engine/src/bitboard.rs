//! Square sets packed into a 64-bit integer.
//!
//! Each piece caches the squares it attacks as a [`Bitboard`]; the move
//! generator also uses them for pin lines and check-blocking squares.

use chess_core::Square;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of squares, bit `n` standing for square index `n` (bit 0 = a8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// Empty bitboard (no squares set).
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Creates a bitboard with a single square set.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1u64 << sq.index())
    }

    /// Returns true if the bitboard is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of set squares.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the given square is set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    /// Sets the given square.
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    /// Pops and returns the lowest-indexed square.
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Square::from_index(index)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.set(sq);
        }
        bb
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard({:#018x})", self.0)?;
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let mark = if (self.0 >> (row * 8 + col)) & 1 == 1 {
                    'X'
                } else {
                    '.'
                };
                write!(f, "{} ", mark)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

/// Iterator over set squares in ascending index order.
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitboard_from_square() {
        let bb = Bitboard::from_square(Square::A8);
        assert_eq!(bb.0, 1);
        assert!(bb.contains(Square::A8));
        assert!(!bb.contains(Square::B8));
    }

    #[test]
    fn set_squares() {
        let mut bb = Bitboard::EMPTY;
        bb.set(Square::E1);
        bb.set(Square::E8);
        bb.set(Square::E1);
        assert_eq!(bb.count(), 2);
        assert!(bb.contains(Square::E1));
        assert!(!bb.contains(Square::from_algebraic("e2").unwrap()));
    }

    #[test]
    fn collect_and_iterate_in_index_order() {
        let bb: Bitboard = [Square::H1, Square::A8, Square::E1].into_iter().collect();
        let squares: Vec<Square> = bb.into_iter().collect();
        assert_eq!(squares, vec![Square::A8, Square::E1, Square::H1]);
    }

    #[test]
    fn set_operations() {
        let a = Bitboard::from_square(Square::A8) | Bitboard::from_square(Square::B8);
        let b = Bitboard::from_square(Square::B8);
        assert_eq!(a & b, b);
        assert!((b & Bitboard::from_square(Square::A8)).is_empty());
    }

    #[test]
    fn debug_draws_top_row_first() {
        let rendered = format!("{:?}", Bitboard::from_square(Square::A8));
        let first_row = rendered.lines().nth(1).unwrap();
        assert!(first_row.starts_with("8 X"));
    }
}
