//! Perft runner - counts leaf nodes of the legal move tree.
//!
//! Sets up a position, optionally plays a move sequence, and enumerates all
//! legal continuations to the requested depth.

use std::time::Instant;

use anyhow::Context;
use chess_core::Color;
use chess_engine::{perft, perft_divide, Board, Game};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Perft - counts the positions reachable in a number of plies.
#[derive(Parser)]
#[command(name = "perft")]
#[command(about = "Counts leaf nodes of the legal move tree")]
struct Args {
    /// Position to start from, in FEN [default: the standard start position]
    #[arg(long)]
    fen: Option<String>,

    /// Number of plies to enumerate
    #[arg(long, default_value = "4")]
    depth: u32,

    /// Print the node count below each root move
    #[arg(long)]
    divide: bool,

    /// Moves to play before enumerating, e.g. `e2e4,e7e5`
    #[arg(long, value_delimiter = ',')]
    moves: Vec<String>,

    /// Color at the bottom of the start position; ignored with --fen
    #[arg(long, value_enum, default_value = "white")]
    perspective: Perspective,
}

#[derive(Clone, Copy, ValueEnum)]
enum Perspective {
    White,
    Black,
}

impl From<Perspective> for Color {
    fn from(p: Perspective) -> Self {
        match p {
            Perspective::White => Color::White,
            Perspective::Black => Color::Black,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let board = match &args.fen {
        Some(fen) => Board::from_fen(fen).with_context(|| format!("invalid FEN: {fen}"))?,
        None => Board::new(args.perspective.into()),
    };

    let mut game = Game::from_board(board);
    for notation in &args.moves {
        game.play(notation)
            .with_context(|| format!("cannot play {notation}"))?;
    }
    let mut board = game.into_board();
    tracing::info!(depth = args.depth, side_to_move = %board.side_to_move(), "running perft");

    let start = Instant::now();
    let nodes = if args.divide {
        let report = perft_divide(&mut board, args.depth);
        for (notation, count) in &report.breakdown {
            println!("{notation}: {count}");
        }
        println!();
        report.nodes
    } else {
        perft(&mut board, args.depth)
    };
    let elapsed = start.elapsed();

    println!("Nodes searched: {nodes}");
    let nps = nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    tracing::info!(
        nodes,
        elapsed_ms = elapsed.as_millis() as u64,
        nps = nps as u64,
        "perft finished"
    );
    Ok(())
}
