//! Move generator validation via perft node counts.
//!
//! ```text
//! cargo run -p tools --bin perft -- --depth 6
//! cargo run -p tools --bin perft -- --fen "W:W31-50:B1-20" --depth 4
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rdraughts_core::{Position, Side, perft};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Count leaf nodes of the legal move tree")]
struct Cli {
    /// Maximum depth to count to
    #[arg(long, default_value_t = 6)]
    depth: u8,

    /// Start position in FEN; the initial position when omitted
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (pos, side) = match &cli.fen {
        Some(fen) => Position::from_fen(fen).context("invalid FEN")?,
        None => (Position::initial(), Side::Light),
    };

    for depth in 1..=cli.depth {
        let start = Instant::now();
        let nodes = perft(&pos, side, u32::from(depth));
        let elapsed = start.elapsed();
        println!(
            "perft({depth}) = {nodes} ({:.3}s, {:.0} nodes/s)",
            elapsed.as_secs_f64(),
            nodes as f64 / elapsed.as_secs_f64().max(1e-9)
        );
    }
    Ok(())
}
