//! Move generation.
//!
//! Moves are generated per piece. [`pseudo_legal_moves`] respects blocking
//! and board edges only; [`legal_moves`] then drops every move that would
//! leave the own king attacked:
//!
//! - the king may not step onto an attacked square,
//! - a pinned piece may only move along its pin line,
//! - in check, a move must capture the checker or block the check ray, and
//!   in double check only the king may move,
//! - en passant is rejected when removing both pawns uncovers a slider.
//!
//! All of these rely on the attack sets cached in each [`Piece`](crate::Piece).

pub mod attacks;
pub mod perft;

use crate::{Bitboard, Board, Move, PieceId};
use chess_core::vector::{self, ray, squares_between};
use chess_core::{Color, MoveFlag, PieceKind, Square};

/// Generates the legal moves of one piece.
pub fn legal_moves(board: &Board, id: PieceId) -> Vec<Move> {
    let piece = board.piece(id);
    let mut moves = pseudo_legal_moves(board, id);

    if piece.kind == PieceKind::King {
        let them = piece.color.opposite();
        moves.retain(|m| m.is_castle() || !board.is_square_attacked(them, m.to));
        return moves;
    }

    restrict_to_pin_line(board, id, &mut moves);
    restrict_to_check_evasions(board, piece.color, &mut moves);
    moves
}

/// Generates the pseudo-legal moves of one piece.
pub fn pseudo_legal_moves(board: &Board, id: PieceId) -> Vec<Move> {
    let mut moves = Vec::new();
    match board.piece(id).kind {
        PieceKind::Pawn => generate_pawn_moves(board, id, &mut moves),
        PieceKind::Knight => generate_step_moves(board, id, &vector::KNIGHT, &mut moves),
        PieceKind::King => {
            generate_step_moves(board, id, &vector::KING, &mut moves);
            generate_castling_moves(board, id, &mut moves);
        }
        kind => generate_slider_moves(board, id, kind.ray_vectors(), &mut moves),
    }
    moves
}

/// The squares a pinned piece may still move to: the line between its king
/// and the pinning slider, pinner included. `None` if the piece is not
/// pinned.
pub fn pin_line(board: &Board, id: PieceId) -> Option<Bitboard> {
    let piece = board.piece(id);
    if piece.kind == PieceKind::King {
        return None;
    }
    let king = board.king_square(piece.color);

    for &v in &vector::QUEEN {
        if first_occupied(board, piece.square, v) != Some(king) {
            continue;
        }
        // The king lies along `v`, so no other direction can pin.
        let pinner_sq = first_occupied(board, piece.square, -v)?;
        let pinner = board.piece_at(pinner_sq)?;
        if pinner.color == piece.color || !pinner.kind.slides_along(v) {
            return None;
        }
        let mut line: Bitboard = squares_between(king, pinner_sq).collect();
        line.set(pinner_sq);
        return Some(line);
    }
    None
}

/// Drops every move that leaves the pin line of a pinned piece.
pub fn restrict_to_pin_line(board: &Board, id: PieceId, moves: &mut Vec<Move>) {
    if let Some(line) = pin_line(board, id) {
        moves.retain(|m| line.contains(m.to));
    }
}

/// Keeps only the moves of a non-king piece that answer a check on the
/// king of `color`.
fn restrict_to_check_evasions(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let king = board.king_square(color);
    match board.attackers(color.opposite(), king).as_slice() {
        [] => {}
        [checker] => {
            let checker_sq = board.piece(*checker).square;
            // Knights and adjacent pieces leave nothing in between.
            let mut targets: Bitboard = squares_between(checker_sq, king).collect();
            targets.set(checker_sq);
            moves.retain(|m| targets.contains(m.to) || m.captured == Some(*checker));
        }
        _ => moves.clear(),
    }
}

fn first_occupied(board: &Board, from: Square, v: i8) -> Option<Square> {
    ray(from, v).find(|&sq| board.piece_at(sq).is_some())
}

fn new_move(board: &Board, id: PieceId, to: Square, flag: MoveFlag) -> Move {
    let piece = board.piece(id);
    Move {
        from: piece.square,
        to,
        piece: id,
        captured: board.piece_id_at(to),
        flag,
        first_move: !piece.has_moved,
    }
}

fn generate_step_moves(board: &Board, id: PieceId, vectors: &[i8], moves: &mut Vec<Move>) {
    let piece = board.piece(id);
    for to in vectors.iter().filter_map(|&v| piece.square.offset(v)) {
        match board.piece_at(to) {
            Some(target) if target.color == piece.color => {}
            _ => moves.push(new_move(board, id, to, MoveFlag::Normal)),
        }
    }
}

fn generate_slider_moves(board: &Board, id: PieceId, vectors: &[i8], moves: &mut Vec<Move>) {
    let piece = board.piece(id);
    for &v in vectors {
        for to in ray(piece.square, v) {
            match board.piece_at(to) {
                None => moves.push(new_move(board, id, to, MoveFlag::Normal)),
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(new_move(board, id, to, MoveFlag::Normal));
                    }
                    break;
                }
            }
        }
    }
}

/// Castling on either side. The king must not have moved and not be in
/// check; the rook must stand unmoved in its corner with nothing in between;
/// the two squares the king crosses must not be attacked.
fn generate_castling_moves(board: &Board, id: PieceId, moves: &mut Vec<Move>) {
    let king = board.piece(id);
    if king.has_moved || board.is_king_in_check(king.color) {
        return;
    }
    let them = king.color.opposite();

    for (dir, flag) in [(1i8, MoveFlag::CastleKingside), (-1, MoveFlag::CastleQueenside)] {
        let path: Vec<Square> = ray(king.square, dir).collect();
        let Some((&corner, between)) = path.split_last() else {
            continue;
        };
        if between.len() < 2 {
            continue;
        }
        let rook_ready = board.piece_at(corner).is_some_and(|rook| {
            rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
        });
        if !rook_ready || between.iter().any(|&sq| board.piece_at(sq).is_some()) {
            continue;
        }
        if between[..2].iter().any(|&sq| board.is_square_attacked(them, sq)) {
            continue;
        }
        moves.push(new_move(board, id, between[1], flag));
    }
}

fn generate_pawn_moves(board: &Board, id: PieceId, moves: &mut Vec<Move>) {
    let pawn = board.piece(id);
    let forward = board.forward(pawn.color);

    // Pushes
    if let Some(one) = pawn.square.offset(forward) {
        if board.piece_at(one).is_none() {
            push_pawn_move(board, id, one, moves);
            if !pawn.has_moved {
                if let Some(two) = one.offset(forward) {
                    if board.piece_at(two).is_none() {
                        moves.push(new_move(board, id, two, MoveFlag::DoublePush));
                    }
                }
            }
        }
    }

    // Captures, en passant included
    for side in [-1i8, 1] {
        let Some(to) = pawn.square.offset(forward + side) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.color != pawn.color => push_pawn_move(board, id, to, moves),
            Some(_) => {}
            None => moves.extend(en_passant_move(board, id, side, to)),
        }
    }
}

/// A pawn move onto `to`, expanded into the four promotions on the last row.
fn push_pawn_move(board: &Board, id: PieceId, to: Square, moves: &mut Vec<Move>) {
    let color = board.piece(id).color;
    if to.row() != board.promotion_row(color) {
        moves.push(new_move(board, id, to, MoveFlag::Normal));
        return;
    }
    for kind in PieceKind::PROMOTIONS {
        if let Some(flag) = MoveFlag::promote_to(kind) {
            moves.push(new_move(board, id, to, flag));
        }
    }
}

/// En passant onto `to`, capturing the pawn beside the mover on `side`.
/// Only available on the ply right after that pawn's two-square advance.
fn en_passant_move(board: &Board, id: PieceId, side: i8, to: Square) -> Option<Move> {
    let pawn = board.piece(id);
    let victim_sq = pawn.square.offset(side)?;
    let victim_id = board.piece_id_at(victim_sq)?;
    let victim = board.piece(victim_id);

    let just_advanced = victim.two_step_ply.map(|ply| ply + 1) == Some(board.ply());
    if victim.color == pawn.color || victim.kind != PieceKind::Pawn || !just_advanced {
        return None;
    }
    if en_passant_exposes_king(board, pawn.color, pawn.square, victim_sq, to) {
        return None;
    }
    Some(Move {
        from: pawn.square,
        to,
        piece: id,
        captured: Some(victim_id),
        flag: MoveFlag::EnPassant,
        first_move: !pawn.has_moved,
    })
}

/// Whether the king of `color` would be attacked by a slider once both pawns
/// have left their squares and the capturer stands on `to`.
fn en_passant_exposes_king(
    board: &Board,
    color: Color,
    from: Square,
    victim: Square,
    to: Square,
) -> bool {
    let king = board.king_square(color);
    vector::QUEEN.iter().any(|&v| {
        for sq in ray(king, v) {
            if sq == to {
                return false;
            }
            if sq == from || sq == victim {
                continue;
            }
            if let Some(p) = board.piece_at(sq) {
                return p.color != color && p.kind.slides_along(v);
            }
        }
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    fn notations(moves: &[Move]) -> Vec<String> {
        let mut list: Vec<String> = moves.iter().map(Move::notation).collect();
        list.sort();
        list
    }

    fn moves_from(board: &Board, s: &str) -> Vec<String> {
        notations(&board.moves_from(sq(s)))
    }

    const CASTLING: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

    #[test]
    fn castling_both_sides() {
        let b = board(CASTLING);
        let king = moves_from(&b, "e1");
        assert!(king.contains(&"e1g1".to_string()));
        assert!(king.contains(&"e1c1".to_string()));
        let castles: Vec<Move> = b
            .moves_from(Square::E1)
            .into_iter()
            .filter(Move::is_castle)
            .collect();
        assert_eq!(castles.len(), 2);
    }

    #[test]
    fn castling_needs_unmoved_rook() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
        let king = moves_from(&b, "e1");
        assert!(!king.contains(&"e1g1".to_string()));
        assert!(king.contains(&"e1c1".to_string()));
    }

    #[test]
    fn castling_needs_unmoved_king() {
        let mut b = board(CASTLING);
        let out = b.find_move("e1e2").unwrap();
        b.apply(&out);
        let reply = b.find_move("a8b8").unwrap();
        b.apply(&reply);
        let back = b.find_move("e2e1").unwrap();
        b.apply(&back);
        let pass = b.find_move("b8a8").unwrap();
        b.apply(&pass);
        assert!(b.moves_from(Square::E1).iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn castling_blocked_by_piece_in_between() {
        let b = board("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1");
        assert!(b.moves_from(Square::E1).iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn queenside_castling_allows_attacked_b_file() {
        // Only b1 is attacked; the king never crosses it.
        let b = board("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(moves_from(&b, "e1").contains(&"e1c1".to_string()));
    }

    #[test]
    fn castling_not_out_of_check() {
        let b = board("r3k2r/8/8/8/4r3/8/8/R3K2R w KQ - 0 1");
        assert!(b.moves_from(Square::E1).iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn castling_not_through_attacked_square() {
        // f1 is covered by the rook on f8.
        let b = board("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let king = moves_from(&b, "e1");
        assert!(!king.contains(&"e1g1".to_string()));
        assert!(king.contains(&"e1c1".to_string()));
    }

    #[test]
    fn castling_not_into_attacked_square() {
        // g1 is covered by the rook on g8.
        let b = board("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!moves_from(&b, "e1").contains(&"e1g1".to_string()));
    }

    #[test]
    fn double_push_only_from_start() {
        let b = Board::startpos();
        assert_eq!(moves_from(&b, "e2"), vec!["e2e3", "e2e4"]);
        let blocked = board("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(moves_from(&blocked, "e2").is_empty());
        let far_blocked = board("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
        assert_eq!(moves_from(&far_blocked, "e2"), vec!["e2e3"]);
    }

    #[test]
    fn promotion_yields_four_moves() {
        let b = board("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let moves = b.moves_from(sq("a7"));
        assert_eq!(moves.len(), 4);
        let kinds: Vec<PieceKind> = moves.iter().filter_map(Move::promotion).collect();
        assert_eq!(kinds, PieceKind::PROMOTIONS.to_vec());
        assert_eq!(notations(&moves), vec!["a7a8b", "a7a8n", "a7a8q", "a7a8r"]);
    }

    #[test]
    fn en_passant_only_on_the_next_ply() {
        let mut b = board("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
        let push = b.find_move("d7d5").unwrap();
        assert_eq!(push.flag(), MoveFlag::DoublePush);
        b.apply(&push);

        let capture = b.find_move("e5d6").unwrap();
        assert!(capture.is_en_passant());
        assert_eq!(capture.captured(), b.piece_id_at(sq("d5")));

        // One quiet move each and the chance is gone.
        let wait = b.find_move("e1e2").unwrap();
        b.apply(&wait);
        let reply = b.find_move("e8e7").unwrap();
        b.apply(&reply);
        assert!(b.find_move("e5d6").is_none());
    }

    #[test]
    fn en_passant_from_fen_target() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        assert!(b.find_move("e5d6").unwrap().is_en_passant());
    }

    #[test]
    fn en_passant_rejected_when_it_uncovers_a_rook() {
        // Both pawns leave the fifth rank, opening a5-h5 onto the king.
        let b = board("8/8/8/r2pP2K/8/8/8/4k3 w - d6 0 2");
        assert!(b.find_move("e5d6").is_none());
        assert!(b.find_move("e5e6").is_some());
    }

    #[test]
    fn en_passant_rejected_when_it_uncovers_a_bishop() {
        // The captured d5 pawn shields the b3 king from the f7 bishop.
        let b = board("4k3/5b2/8/3pP3/8/1K6/8/8 w - d6 0 2");
        assert!(!b.is_king_in_check(Color::White));
        assert!(b.find_move("e5d6").is_none());
        assert!(b.find_move("e5e6").is_some());
    }

    #[test]
    fn en_passant_capturer_pinned_on_diagonal() {
        // King a1, pawn e5, bishop h8.
        let b = board("4k2b/8/8/3pP3/8/8/8/K7 w - d6 0 2");
        assert!(b.find_move("e5d6").is_none());
        assert!(b.find_move("e5e6").is_none());
    }

    #[test]
    fn en_passant_can_capture_a_checking_pawn() {
        let b = board("8/8/8/3pP3/4K3/8/8/4k3 w - d6 0 2");
        assert!(b.is_king_in_check(Color::White));
        assert!(b.find_move("e5d6").unwrap().is_en_passant());
    }

    #[test]
    fn pinned_piece_moves_along_pin_line() {
        let b = board("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let id = b.piece_id_at(sq("e2")).unwrap();
        assert!(pin_line(&b, id).is_some());
        let rook = moves_from(&b, "e2");
        assert_eq!(rook, vec!["e2e3", "e2e4", "e2e5", "e2e6", "e2e7", "e2e8"]);
    }

    #[test]
    fn pinned_knight_cannot_move() {
        let b = board("6k1/8/8/b7/8/8/3N4/4K3 w - - 0 1");
        assert!(moves_from(&b, "d2").is_empty());
    }

    #[test]
    fn wrong_slider_does_not_pin() {
        // A bishop cannot pin along a file.
        let b = board("4b1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let id = b.piece_id_at(sq("e2")).unwrap();
        assert!(pin_line(&b, id).is_none());
        assert_eq!(b.moves_from(sq("e2")).len(), 13);
    }

    #[test]
    fn pin_along_row_near_board_edge() {
        // The a2 rook pins the g2 knight against the h2 king.
        let b = board("7k/8/8/8/8/8/r5NK/8 w - - 0 1");
        assert!(moves_from(&b, "g2").is_empty());
    }

    #[test]
    fn check_must_be_blocked_or_captured() {
        let b = board("4r1k1/8/8/8/8/8/1B6/4K2R w K - 0 1");
        // The bishop can block on e5; the h1 rook cannot reach the e-file.
        let moves = notations(&b.legal_moves());
        assert!(moves.contains(&"b2e5".to_string()));
        assert!(!moves.contains(&"h1h8".to_string()));
        assert!(!moves.contains(&"e1g1".to_string()));
        for m in b.legal_moves() {
            let mut after = b.clone();
            after.apply(&m);
            assert!(!after.is_king_in_check(Color::White), "{m} leaves king in check");
        }
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let b = board("4k3/8/8/8/8/5n2/8/R3K2r w - - 0 1");
        // Knight on f3 and rook on h1 both give check.
        assert_eq!(b.attacking_pieces(Color::Black, Square::E1).len(), 2);
        let moves = b.legal_moves();
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.from() == Square::E1));
    }

    #[test]
    fn king_cannot_retreat_along_check_ray() {
        let b = board("4k3/8/8/8/r3K3/8/8/8 w - - 0 1");
        let king = moves_from(&b, "e4");
        assert!(!king.contains(&"e4f4".to_string()));
        assert!(!king.contains(&"e4d4".to_string()));
        assert!(king.contains(&"e4e5".to_string()));
    }

    #[test]
    fn king_cannot_capture_defended_piece() {
        // The c3 bishop covers the checking queen.
        let defended = board("4k3/8/8/8/8/2b5/3q4/4K3 w - - 0 1");
        assert!(defended.is_king_in_check(Color::White));
        assert!(!moves_from(&defended, "e1").contains(&"e1d2".to_string()));
        let loose = board("4k3/8/8/8/8/8/3q4/4K3 w - - 0 1");
        assert!(moves_from(&loose, "e1").contains(&"e1d2".to_string()));
    }

    #[test]
    fn pseudo_legal_superset_of_legal() {
        let b = board("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
        let legal = b.legal_moves();
        let pseudo = b.pseudo_legal_moves(Color::White);
        assert_eq!(legal.len(), 44);
        assert!(legal.iter().all(|m| pseudo.contains(m)));
    }
}
