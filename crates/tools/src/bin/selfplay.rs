//! Engine-vs-engine match runner.
//!
//! Plays a batch of games between two difficulty presets and writes one
//! JSON record per game to stdout (or a file), plus a summary to stderr.
//!
//! ```text
//! cargo run -p tools --bin selfplay -- --games 20 --light hard --dark medium
//! cargo run -p tools --bin selfplay -- --games 100 --out runs/selfplay.jsonl
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tools::selfplay::{GameOutcome, MatchConfig, parse_profile, play_game};

#[derive(Parser, Debug)]
#[command(about = "Draughts engine selfplay harness")]
struct Cli {
    /// Number of games to run
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Maximum plies per game before declaring the game unfinished
    #[arg(long, default_value_t = 300)]
    max_moves: u32,

    /// Difficulty preset for Light (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    light: String,

    /// Difficulty preset for Dark (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    dark: String,

    /// Transposition table size per engine (MiB)
    #[arg(long, default_value_t = 4)]
    hash_mb: usize,

    /// Base RNG seed; game i uses seed + 2*i
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Output path for JSONL records; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let light = parse_profile(&cli.light)?;
    let dark = parse_profile(&cli.dark)?;

    let mut sink: Box<dyn Write> = match &cli.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout().lock()),
    };

    let mut tally = [0u32; 4];
    for game in 0..cli.games {
        let config = MatchConfig {
            light,
            dark,
            max_plies: cli.max_moves,
            table_mb: cli.hash_mb,
            seed: cli.seed + 2 * game as u64,
        };
        let record = play_game(&config)?;
        log::info!("game {game}: {:?} in {} plies", record.outcome, record.plies);
        tally[match record.outcome {
            GameOutcome::LightWins => 0,
            GameOutcome::DarkWins => 1,
            GameOutcome::Draw => 2,
            GameOutcome::Unfinished => 3,
        }] += 1;
        serde_json::to_writer(&mut sink, &record)?;
        sink.write_all(b"\n")?;
    }
    sink.flush()?;

    eprintln!(
        "light {} dark {} draw {} unfinished {}",
        tally[0], tally[1], tally[2], tally[3]
    );
    Ok(())
}
