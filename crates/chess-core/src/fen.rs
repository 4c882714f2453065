//! FEN (Forsyth-Edwards Notation) field parsing.

use thiserror::Error;

use crate::{Color, PieceKind, Square};

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("unrecognized piece letter '{letter}' in rank {rank}")]
    UnknownPiece { letter: char, rank: u8 },

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// One piece from the placement field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub square: Square,
    pub kind: PieceKind,
    pub color: Color,
}

/// The castling availability field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingField {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingField {
    /// Returns whether the field grants castling on one side.
    pub const fn allows(self, color: Color, kingside: bool) -> bool {
        match (color, kingside) {
            (Color::White, true) => self.white_kingside,
            (Color::White, false) => self.white_queenside,
            (Color::Black, true) => self.black_kingside,
            (Color::Black, false) => self.black_queenside,
        }
    }

    fn parse(field: &str) -> Result<Self, FenError> {
        let mut castling = CastlingField::default();
        if field == "-" {
            return Ok(castling);
        }
        for c in field.chars() {
            let flag = match c {
                'K' => &mut castling.white_kingside,
                'Q' => &mut castling.white_queenside,
                'k' => &mut castling.black_kingside,
                'q' => &mut castling.black_queenside,
                other => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        other
                    )))
                }
            };
            if *flag {
                return Err(FenError::InvalidCastlingRights(format!(
                    "duplicate character '{}'",
                    c
                )));
            }
            *flag = true;
        }
        Ok(castling)
    }
}

/// The six fields of a FEN string, validated and decoded.
///
/// The placement field is read top row first, so the first rank listed
/// (rank 8) lands on squares 0-7. Turning these fields into a playable board
/// is the engine's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    pub placements: Vec<Placement>,
    pub side_to_move: Color,
    pub castling: CastlingField,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Largest fullmove number whose ply still fits in a `u32`.
const MAX_FULLMOVE_NUMBER: u32 = u32::MAX / 2;

impl FenFields {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let placements = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = CastlingField::parse(fields[2])?;
        let en_passant = parse_en_passant(fields[3])?;

        let halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(fields[4].to_string()))?;

        let fullmove_number = fields[5]
            .parse::<u32>()
            .ok()
            .filter(|n| (1..=MAX_FULLMOVE_NUMBER).contains(n))
            .ok_or_else(|| FenError::InvalidFullmoveNumber(fields[5].to_string()))?;

        Ok(FenFields {
            placements,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Returns the ply number of the side to move, counting from 1 for
    /// White's first move.
    pub const fn ply(&self) -> u32 {
        let black = match self.side_to_move {
            Color::White => 0,
            Color::Black => 1,
        };
        (self.fullmove_number - 1) * 2 + 1 + black
    }
}

fn parse_placement(field: &str) -> Result<Vec<Placement>, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }

    let mut placements = Vec::with_capacity(32);
    for (row, rank) in ranks.iter().enumerate() {
        let printed_rank = 8 - row as u8;
        let mut file = 0u8;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as u8;
                if file > 8 {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "rank {} is too long",
                        printed_rank
                    )));
                }
                continue;
            }
            let (kind, color) = PieceKind::from_fen_char(c).ok_or(FenError::UnknownPiece {
                letter: c,
                rank: printed_rank,
            })?;
            let square = Square::from_coords(file, row as u8).map_err(|_| {
                FenError::InvalidPiecePlacement(format!("rank {} is too long", printed_rank))
            })?;
            placements.push(Placement {
                square,
                kind,
                color,
            });
            file += 1;
        }
        if file != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} has {} squares, expected 8",
                printed_rank, file
            )));
        }
    }

    Ok(placements)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    match Square::from_algebraic(field) {
        Some(sq) if matches!(sq.rank().to_char(), '3' | '6') => Ok(Some(sq)),
        _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
    }
}
