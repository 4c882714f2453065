//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a fixed depth,
//! which can be compared against known-correct values. The board is walked
//! in place: every move is applied, counted below, and reversed again.

use std::fmt;
use std::time::Instant;

use crate::{Board, GameError, PieceId};

/// Counts the leaf nodes at the given depth.
///
/// Depth 0 counts the position itself; depth 1 counts the legal moves
/// without applying them.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    let start = Instant::now();
    let nodes = count_nodes(board, depth);
    tracing::debug!(
        depth,
        nodes,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "perft finished"
    );
    nodes
}

fn count_nodes(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let ids: Vec<PieceId> = board.piece_ids(board.side_to_move()).collect();
    let mut nodes = 0u64;
    for id in ids {
        let moves = super::legal_moves(board, id);
        if depth == 1 {
            nodes += moves.len() as u64;
            continue;
        }
        for m in &moves {
            board.apply(m);
            nodes += count_nodes(board, depth - 1);
            board.reverse(m);
        }
    }
    nodes
}

/// Node counts below each root move, sorted by move notation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerftReport {
    pub nodes: u64,
    pub breakdown: Vec<(String, u64)>,
}

impl PerftReport {
    /// Node count below `notation`, if it was a root move.
    pub fn count_for(&self, notation: &str) -> Option<u64> {
        self.breakdown
            .iter()
            .find(|(m, _)| m == notation)
            .map(|&(_, n)| n)
    }
}

/// Renders the breakdown as `a2a3: 8457,a2a4: 9329,...`.
impl fmt::Display for PerftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (notation, nodes)) in self.breakdown.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}: {}", notation, nodes)?;
        }
        Ok(())
    }
}

/// Perft with divide: the node count at `depth` split by root move.
pub fn perft_divide(board: &mut Board, depth: u32) -> PerftReport {
    if depth == 0 {
        return PerftReport {
            nodes: 1,
            breakdown: Vec::new(),
        };
    }

    let start = Instant::now();
    let moves = board.legal_moves();
    let mut breakdown = Vec::with_capacity(moves.len());
    for m in &moves {
        board.apply(m);
        let nodes = count_nodes(board, depth - 1);
        board.reverse(m);
        breakdown.push((m.notation(), nodes));
    }
    breakdown.sort();

    let nodes = breakdown.iter().map(|&(_, n)| n).sum();
    tracing::debug!(
        depth,
        nodes,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "perft divide finished"
    );
    PerftReport { nodes, breakdown }
}

/// Plays `path` from the current position, runs [`perft_divide`] there, and
/// takes the moves back again.
///
/// On an unknown or illegal move in `path` the board is left as it was.
pub fn perft_divide_after(
    board: &mut Board,
    path: &[&str],
    depth: u32,
) -> Result<PerftReport, GameError> {
    let mut played = Vec::with_capacity(path.len());
    for notation in path {
        let Some(m) = board.find_move(notation) else {
            for m in played.iter().rev() {
                board.reverse(m);
            }
            return Err(GameError::IllegalMove((*notation).to_string()));
        };
        board.apply(&m);
        played.push(m);
    }

    let report = perft_divide(board, depth);
    for m in played.iter().rev() {
        board.reverse(m);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perft_startpos_shallow() {
        let mut board = Board::startpos();
        assert_eq!(perft(&mut board, 0), 1);
        assert_eq!(perft(&mut board, 1), 20);
        assert_eq!(perft(&mut board, 2), 400);
        assert_eq!(perft(&mut board, 3), 8902);
    }

    #[test]
    fn perft_leaves_board_unchanged() {
        let mut board = Board::startpos();
        let before = board.clone();
        perft(&mut board, 3);
        assert_eq!(board, before);
    }

    #[test]
    fn divide_sums_to_total() {
        let mut board = Board::startpos();
        let report = perft_divide(&mut board, 3);
        assert_eq!(report.nodes, 8902);
        assert_eq!(report.breakdown.len(), 20);
        assert_eq!(report.count_for("a2a3"), Some(380));
        assert_eq!(report.count_for("g1f3"), Some(440));
        assert_eq!(report.count_for("e2e5"), None);
    }

    #[test]
    fn perft_agrees_with_divide_total() {
        let mut board = Board::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        let before = board.clone();
        for depth in 0..=3 {
            let nodes = perft(&mut board, depth);
            assert_eq!(nodes, count_nodes(&mut board, depth));
            assert_eq!(nodes, perft_divide(&mut board, depth).nodes);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn divide_report_format() {
        let mut board = Board::startpos();
        let report = perft_divide(&mut board, 1);
        let text = report.to_string();
        assert!(text.starts_with("a2a3: 1,a2a4: 1,b1a3: 1"));
        assert!(text.ends_with("h2h4: 1"));
        assert_eq!(text.split(',').count(), 20);
    }

    #[test]
    fn divide_after_path() {
        let mut board = Board::startpos();
        let before = board.clone();
        let report = perft_divide_after(&mut board, &["e2e4", "e7e5"], 1).unwrap();
        assert_eq!(report.nodes, 29);
        assert_eq!(board, before);
    }

    #[test]
    fn divide_after_rejects_illegal_path() {
        let mut board = Board::startpos();
        let before = board.clone();
        let err = perft_divide_after(&mut board, &["e2e4", "e2e4"], 1).unwrap_err();
        assert_eq!(err, GameError::IllegalMove("e2e4".to_string()));
        assert_eq!(board, before);
    }
}
