//! Engine-vs-engine game loop
//!
//! Drives two `SearchEngine` instances against each other under separate
//! difficulty profiles, threading the draw state between moves the same way
//! an embedding host would. Used by the `selfplay` binary and for strength
//! regression runs.

use anyhow::{Context, Result};
use rdraughts_core::{
    DifficultyProfile, DrawState, MoveDecision, Position, SearchEngine, Side,
};
use serde::Serialize;

/// How a single game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    LightWins,
    DarkWins,
    Draw,
    /// Ply cap reached before any result
    Unfinished,
}

/// Record of one completed game.
#[derive(Debug, Serialize)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub plies: u32,
    /// Moves in standard notation, in play order
    pub moves: Vec<String>,
    pub final_fen: String,
}

/// Per-side engine setup for a match.
pub struct MatchConfig {
    pub light: DifficultyProfile,
    pub dark: DifficultyProfile,
    pub max_plies: u32,
    pub table_mb: usize,
    pub seed: u64,
}

/// Play one game from the initial position and return its record.
pub fn play_game(config: &MatchConfig) -> Result<GameRecord> {
    let mut engines = [
        SearchEngine::with_seed(config.table_mb, config.seed),
        SearchEngine::with_seed(config.table_mb, config.seed.wrapping_add(1)),
    ];
    let profiles = [config.light, config.dark];

    let mut pos = Position::initial();
    let mut side = Side::Light;
    let mut draw = DrawState::opening(engines[0].position_hash(&pos, side));
    let mut moves = Vec::new();

    for ply in 0..config.max_plies {
        let engine = &mut engines[side.index()];
        match engine.request_move(&pos, side, &profiles[side.index()], &draw) {
            MoveDecision::NoLegalMoves => {
                let outcome = match side {
                    Side::Light => GameOutcome::DarkWins,
                    Side::Dark => GameOutcome::LightWins,
                };
                return Ok(record(outcome, ply, moves, &pos, side));
            }
            MoveDecision::Play(result) => {
                log::debug!("ply {ply}: {side} plays {} (score {})", result.mv, result.score);
                draw = engine
                    .advance_draw_state(&draw, &pos, side, &result.mv)
                    .context("engine returned an illegal move")?;
                moves.push(result.mv.to_string());
                pos = pos.apply(&result.mv, side);
                side = side.opponent();
            }
        }
        if draw.is_draw() {
            return Ok(record(GameOutcome::Draw, moves.len() as u32, moves, &pos, side));
        }
    }

    Ok(record(GameOutcome::Unfinished, config.max_plies, moves, &pos, side))
}

fn record(
    outcome: GameOutcome,
    plies: u32,
    moves: Vec<String>,
    pos: &Position,
    side: Side,
) -> GameRecord {
    GameRecord { outcome, plies, moves, final_fen: pos.to_fen(side) }
}

/// Parse a preset name from the command line.
pub fn parse_profile(name: &str) -> Result<DifficultyProfile> {
    match name.to_ascii_lowercase().as_str() {
        "easy" => Ok(DifficultyProfile::EASY),
        "medium" => Ok(DifficultyProfile::MEDIUM),
        "hard" => Ok(DifficultyProfile::HARD),
        other => anyhow::bail!("unknown difficulty preset: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        assert_eq!(parse_profile("Easy").unwrap(), DifficultyProfile::EASY);
        assert_eq!(parse_profile("HARD").unwrap(), DifficultyProfile::HARD);
        assert!(parse_profile("grandmaster").is_err());
    }

    #[test]
    fn test_short_game_runs_to_completion() {
        let config = MatchConfig {
            light: DifficultyProfile { max_depth: 2, time_limit_ms: 50, ..DifficultyProfile::EASY },
            dark: DifficultyProfile { max_depth: 2, time_limit_ms: 50, ..DifficultyProfile::EASY },
            max_plies: 30,
            table_mb: 1,
            seed: 11,
        };
        let record = play_game(&config).unwrap();
        assert!(record.plies <= 30);
        assert_eq!(record.moves.len() as u32, record.plies);
    }
}
