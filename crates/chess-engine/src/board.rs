//! Board state: piece arena, square map, side to move, and ply.

use chess_core::{Color, File, MoveText, PieceKind, Rank, Square};
use std::fmt;

use crate::movegen::{self, attacks};
use crate::{GameStatus, Move, Piece, PieceId};

const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A chess position that is mutated in place.
///
/// The board is the single owner of every piece. Pieces live in an arena and
/// are referred to by [`PieceId`]; the square map points into the arena.
/// Captured pieces stay in the arena, off the square map, so that reversing
/// the capture puts the very same piece back.
///
/// Orientation is fixed by the *perspective* color, which sits on rows 6-7
/// and moves its pawns towards row 0. The other color sits on rows 0-1 and
/// moves its pawns towards row 7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) pieces: Vec<Piece>,
    pub(crate) squares: [Option<PieceId>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) ply: u32,
    pub(crate) king_squares: [Square; 2],
    pub(crate) perspective: Color,
}

impl Board {
    /// Creates the standard starting position seen from `perspective`.
    pub fn new(perspective: Color) -> Self {
        let mut board = Board::empty(perspective, Color::White, 1);
        let top = perspective.opposite();
        for (col, &kind) in BACK_ROW.iter().enumerate() {
            let col = col as u8;
            board.place(kind, top, square(col, 0));
            board.place(PieceKind::Pawn, top, square(col, 1));
            board.place(PieceKind::Pawn, perspective, square(col, 6));
            board.place(kind, perspective, square(col, 7));
        }
        board.refresh_all_attacks();
        board
    }

    /// Creates the standard starting position with White at the bottom.
    pub fn startpos() -> Self {
        Board::new(Color::White)
    }

    /// A board with no pieces. Callers must place both kings before handing
    /// the board out.
    pub(crate) fn empty(perspective: Color, side_to_move: Color, ply: u32) -> Self {
        Board {
            pieces: Vec::with_capacity(40),
            squares: [None; 64],
            side_to_move,
            ply,
            king_squares: [Square::E1, Square::E8],
            perspective,
        }
    }

    /// Adds a new piece to the arena and puts it on `sq`.
    pub(crate) fn place(&mut self, kind: PieceKind, color: Color, sq: Square) -> PieceId {
        let id = PieceId(self.pieces.len() as u16);
        self.pieces.push(Piece::new(kind, color, sq));
        self.squares[sq.index() as usize] = Some(id);
        if kind == PieceKind::King {
            self.king_squares[color.index()] = sq;
        }
        id
    }

    /// Returns the piece on the square with this index; `None` for an empty
    /// square or an index outside 0-63.
    #[inline]
    pub fn get_piece(&self, index: usize) -> Option<&Piece> {
        let id = (*self.squares.get(index)?)?;
        Some(&self.pieces[id.index()])
    }

    /// Returns the piece standing on `sq`.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.piece_id_at(sq).map(|id| &self.pieces[id.index()])
    }

    /// Returns the id of the piece standing on `sq`.
    #[inline]
    pub fn piece_id_at(&self, sq: Square) -> Option<PieceId> {
        self.squares[sq.index() as usize]
    }

    /// Looks up a piece by id. Ids come from this board, so they are always
    /// in range.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    #[inline]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Current ply, starting at 1 for White's first move.
    #[inline]
    pub const fn ply(&self) -> u32 {
        self.ply
    }

    /// The color sitting at the bottom of the board (rows 6-7).
    #[inline]
    pub const fn perspective(&self) -> Color {
        self.perspective
    }

    #[inline]
    pub const fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Pawn push direction for `color`: `-8` towards row 0, `+8` towards row 7.
    #[inline]
    pub fn forward(&self, color: Color) -> i8 {
        if color == self.perspective {
            -8
        } else {
            8
        }
    }

    /// The row a pawn of `color` promotes on.
    #[inline]
    pub fn promotion_row(&self, color: Color) -> u8 {
        if color == self.perspective {
            0
        } else {
            7
        }
    }

    /// The row the pawns of `color` start on.
    #[inline]
    pub fn pawn_row(&self, color: Color) -> u8 {
        if color == self.perspective {
            6
        } else {
            1
        }
    }

    /// The square the king of `color` starts on.
    #[inline]
    pub fn king_home(&self, color: Color) -> Square {
        let row = if color == self.perspective { 7 } else { 0 };
        square(4, row)
    }

    /// Ids of the pieces of `color` on the board, in ascending square order.
    pub fn piece_ids(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        self.squares
            .iter()
            .flatten()
            .copied()
            .filter(move |&id| self.pieces[id.index()].color == color)
    }

    /// Pieces of `color` on the board, in ascending square order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.piece_ids(color).map(|id| &self.pieces[id.index()])
    }

    /// Ids of the pieces of `by` whose attack set contains `sq`.
    pub(crate) fn attackers(&self, by: Color, sq: Square) -> Vec<PieceId> {
        self.piece_ids(by)
            .filter(|&id| self.pieces[id.index()].attacks.contains(sq))
            .collect()
    }

    /// Returns true if any piece of `by` attacks `sq`.
    pub fn is_square_attacked(&self, by: Color, sq: Square) -> bool {
        self.pieces(by).any(|p| p.attacks.contains(sq))
    }

    /// All pieces of `by` attacking `sq`. Two or more on a king square is a
    /// double check.
    pub fn attacking_pieces(&self, by: Color, sq: Square) -> Vec<&Piece> {
        self.pieces(by).filter(|p| p.attacks.contains(sq)).collect()
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(color.opposite(), self.king_square(color))
    }

    /// Returns true if `color` has at least one legal move. The king is tried
    /// first.
    pub fn has_legal_move(&self, color: Color) -> bool {
        let king = self.piece_id_at(self.king_square(color));
        if let Some(king) = king {
            if !movegen::legal_moves(self, king).is_empty() {
                return true;
            }
        }
        self.piece_ids(color)
            .filter(|&id| Some(id) != king)
            .any(|id| !movegen::legal_moves(self, id).is_empty())
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_king_in_check(color) && !self.has_legal_move(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_king_in_check(color) && !self.has_legal_move(color)
    }

    /// Whether the side to move is mated, stalemated, or can play on.
    pub fn status(&self) -> GameStatus {
        let us = self.side_to_move;
        if self.has_legal_move(us) {
            GameStatus::Ongoing
        } else if self.is_king_in_check(us) {
            GameStatus::Checkmate {
                winner: us.opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// Legal moves of the piece on `sq`; empty when the square is empty.
    pub fn moves_from(&self, sq: Square) -> Vec<Move> {
        match self.piece_id_at(sq) {
            Some(id) => movegen::legal_moves(self, id),
            None => Vec::new(),
        }
    }

    /// Every legal move of the side to move. Pieces are visited in ascending
    /// square order.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.piece_ids(self.side_to_move)
            .flat_map(|id| movegen::legal_moves(self, id))
            .collect()
    }

    /// Every pseudo-legal move of `color`: moves that respect blocking and
    /// board edges but may leave the own king in check.
    pub fn pseudo_legal_moves(&self, color: Color) -> Vec<Move> {
        self.piece_ids(color)
            .flat_map(|id| movegen::pseudo_legal_moves(self, id))
            .collect()
    }

    /// Finds the legal move matching `e2e4`-style notation.
    pub fn find_move(&self, notation: &str) -> Option<Move> {
        let text = MoveText::parse(notation)?;
        let piece = self.piece_at(text.from)?;
        if piece.color != self.side_to_move {
            return None;
        }
        self.moves_from(text.from)
            .into_iter()
            .find(|m| m.text() == text)
    }

    /// Recomputes the attack set of one piece.
    pub(crate) fn refresh_attacks(&mut self, id: PieceId) {
        let attacks = attacks::attacked_squares(self, self.piece(id));
        self.piece_mut(id).attacks = attacks;
    }

    /// Recomputes the attack sets of every slider on the board. Any move can
    /// open or close a ray, so this runs after every apply and reverse.
    pub(crate) fn refresh_slider_attacks(&mut self) {
        for index in 0..64 {
            if let Some(id) = self.squares[index] {
                if self.pieces[id.index()].is_slider() {
                    self.refresh_attacks(id);
                }
            }
        }
    }

    /// Recomputes every attack set on the board.
    pub(crate) fn refresh_all_attacks(&mut self) {
        for index in 0..64 {
            if let Some(id) = self.squares[index] {
                self.refresh_attacks(id);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = self.piece_at(square(col, row)).map_or('.', Piece::fen_char);
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

/// Square from column and row that are known to be in range.
#[inline]
pub(crate) fn square(col: u8, row: u8) -> Square {
    Square::new(File::ALL[col as usize], Rank::ALL[row as usize])
}
