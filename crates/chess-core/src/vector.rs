//! Step and ray vectors over square indices.
//!
//! A vector is a signed offset added to a square index. Moving "up" the
//! board (towards row 0) is `-8`, moving right is `+1`. Use
//! [`Square::offset`] to apply one so that row wraps are rejected.

use crate::Square;

/// Diagonal ray directions.
pub const DIAGONAL: [i8; 4] = [-9, -7, 7, 9];

/// Orthogonal ray directions.
pub const ORTHOGONAL: [i8; 4] = [-1, 1, -8, 8];

/// All eight ray directions, diagonals first.
pub const QUEEN: [i8; 8] = [-9, -7, 7, 9, -1, 1, -8, 8];

/// Knight jumps.
pub const KNIGHT: [i8; 8] = [-17, -15, -6, 10, 17, 15, 6, -10];

/// King steps.
pub const KING: [i8; 8] = [1, -1, 8, -8, -9, 9, -7, 7];

/// Returns true for a unit diagonal direction.
#[inline]
pub const fn is_diagonal(vector: i8) -> bool {
    matches!(vector, -9 | -7 | 7 | 9)
}

/// Returns true for a unit orthogonal direction.
#[inline]
pub const fn is_orthogonal(vector: i8) -> bool {
    matches!(vector, -1 | 1 | -8 | 8)
}

/// Returns true for a knight jump.
#[inline]
pub const fn is_knight_jump(vector: i8) -> bool {
    matches!(vector, -17 | -15 | -10 | -6 | 6 | 10 | 15 | 17)
}

/// Returns the unit direction leading from `from` to `to`, if both squares
/// share a row, column, or diagonal.
///
/// Uses column/row deltas rather than index arithmetic, so squares that only
/// look aligned because of a row wrap (e.g. h8 and a7) are not reported.
pub const fn direction_between(from: Square, to: Square) -> Option<i8> {
    if from.index() == to.index() {
        return None;
    }
    let dc = to.col() as i8 - from.col() as i8;
    let dr = to.row() as i8 - from.row() as i8;
    if dc != 0 && dr != 0 && dc.abs() != dr.abs() {
        return None;
    }
    Some(dr.signum() * 8 + dc.signum())
}

/// Iterator over the squares visited by repeatedly stepping along a vector,
/// not including the starting square.
#[derive(Debug, Clone)]
pub struct Ray {
    current: Option<Square>,
    vector: i8,
}

impl Iterator for Ray {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let next = self.current?.offset(self.vector);
        self.current = next;
        next
    }
}

/// Walks from `from` along `vector` to the edge of the board.
#[inline]
pub const fn ray(from: Square, vector: i8) -> Ray {
    Ray {
        current: Some(from),
        vector,
    }
}

/// Returns the squares strictly between two aligned squares, nearest to
/// `from` first. Unaligned squares have nothing between them.
pub fn squares_between(from: Square, to: Square) -> impl Iterator<Item = Square> {
    let vector = direction_between(from, to);
    let walk = vector.map(|v| ray(from, v));
    walk.into_iter()
        .flatten()
        .take_while(move |&sq| sq != to)
}
