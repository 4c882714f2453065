//! Attack sets for all piece types.
//!
//! An attack set holds every square a piece could capture on, whether that
//! square is empty, enemy-occupied, or own-occupied. Own-occupied squares
//! count so that a king cannot capture a defended piece.

use crate::{Bitboard, Board, Piece};
use chess_core::vector::{self, ray};
use chess_core::{Color, PieceKind, Square};

/// Computes the squares `piece` attacks on `board`.
pub(crate) fn attacked_squares(board: &Board, piece: &Piece) -> Bitboard {
    let from = piece.square;
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(from, board.forward(piece.color)),
        PieceKind::Knight => knight_attacks(from),
        PieceKind::King => king_attacks(from),
        kind => slider_attacks(board, from, piece.color, kind.ray_vectors()),
    }
}

/// The two forward diagonals of a pawn pushing along `forward`.
pub fn pawn_attacks(from: Square, forward: i8) -> Bitboard {
    step_attacks(from, &[forward - 1, forward + 1])
}

#[inline]
pub fn knight_attacks(from: Square) -> Bitboard {
    step_attacks(from, &vector::KNIGHT)
}

#[inline]
pub fn king_attacks(from: Square) -> Bitboard {
    step_attacks(from, &vector::KING)
}

fn step_attacks(from: Square, vectors: &[i8]) -> Bitboard {
    vectors.iter().filter_map(|&v| from.offset(v)).collect()
}

/// Rays from `from` along `vectors`. Each ray includes the first occupied
/// square and stops there, except that it runs on through the enemy king.
pub fn slider_attacks(board: &Board, from: Square, color: Color, vectors: &[i8]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &v in vectors {
        for sq in ray(from, v) {
            attacks.set(sq);
            match board.piece_at(sq) {
                None => {}
                Some(p) if p.kind == PieceKind::King && p.color != color => {}
                Some(_) => break,
            }
        }
    }
    attacks
}
