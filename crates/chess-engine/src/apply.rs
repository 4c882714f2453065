//! Applying and reversing moves in place.

use chess_core::{MoveFlag, PieceKind, Square};

use crate::board::square;
use crate::{Board, Move, PieceId};

impl Board {
    /// Plays `m`, which must have been generated for this position.
    pub fn apply(&mut self, m: &Move) {
        let color = self.piece(m.piece).color;
        let kind = self.piece(m.piece).kind;

        if m.is_en_passant() {
            if let Some(victim) = m.captured {
                let victim_sq = self.piece(victim).square;
                self.squares[victim_sq.index() as usize] = None;
            }
        }
        if m.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(m);
            if let Some(rook) = self.take(rook_from) {
                self.put(rook, rook_to);
                self.piece_mut(rook).has_moved = true;
            }
        }
        if m.flag == MoveFlag::DoublePush {
            self.piece_mut(m.piece).two_step_ply = Some(self.ply);
        }

        self.squares[m.from.index() as usize] = None;
        let placed = match m.promotion() {
            Some(promoted) => self.place(promoted, color, m.to),
            None => {
                self.put(m.piece, m.to);
                m.piece
            }
        };
        if kind == PieceKind::King {
            self.king_squares[color.index()] = m.to;
        }
        self.piece_mut(placed).has_moved = true;

        self.refresh_after_move(placed);
        self.ply += 1;
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Takes back `m`. Moves are reversed in the opposite order they were
    /// applied.
    pub fn reverse(&mut self, m: &Move) {
        self.ply -= 1;
        self.side_to_move = self.side_to_move.opposite();

        if m.promotion().is_some() {
            debug_assert_eq!(
                self.piece_id_at(m.to).map(PieceId::index),
                Some(self.pieces.len() - 1),
                "promoted piece must be the newest in the arena"
            );
            self.pieces.pop();
        }
        self.squares[m.to.index() as usize] = None;

        if let Some(victim) = m.captured {
            let victim_sq = self.piece(victim).square;
            self.squares[victim_sq.index() as usize] = Some(victim);
        }
        self.put(m.piece, m.from);

        let mover = self.piece_mut(m.piece);
        if m.first_move {
            mover.has_moved = false;
        }
        if m.flag == MoveFlag::DoublePush {
            mover.two_step_ply = None;
        }
        let (color, kind) = (mover.color, mover.kind);

        if m.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(m);
            if let Some(rook) = self.take(rook_to) {
                self.put(rook, rook_from);
                self.piece_mut(rook).has_moved = false;
            }
        }
        if kind == PieceKind::King {
            self.king_squares[color.index()] = m.from;
        }

        self.refresh_after_move(m.piece);
    }

    fn take(&mut self, sq: Square) -> Option<PieceId> {
        self.squares[sq.index() as usize].take()
    }

    fn put(&mut self, id: PieceId, sq: Square) {
        self.squares[sq.index() as usize] = Some(id);
        self.piece_mut(id).square = sq;
    }

    /// Sliders see every change in occupancy; other pieces only care about
    /// their own square.
    fn refresh_after_move(&mut self, moved: PieceId) {
        if !self.piece(moved).is_slider() {
            self.refresh_attacks(moved);
        }
        self.refresh_slider_attacks();
    }
}

/// Corner and destination of the rook in a castling move.
fn castle_rook_squares(m: &Move) -> (Square, Square) {
    let row = m.from.row();
    if m.to.col() > m.from.col() {
        (square(7, row), square(m.from.col() + 1, row))
    } else {
        (square(0, row), square(m.from.col() - 1, row))
    }
}
