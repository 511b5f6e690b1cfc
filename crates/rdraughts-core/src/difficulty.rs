//! Difficulty profiles
//!
//! A profile is a plain configuration value consumed by the search and the
//! evaluator; it carries no behavior and is never mutated after
//! construction. Weaker profiles search shallower, see a scaled-down
//! positional evaluation, add noise at the leaves and occasionally play a
//! deliberately "glance-level" move at the root.

use serde::{Deserialize, Serialize};

/// Tunable strength settings for the automated opponent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Iterative deepening depth limit
    pub max_depth: u8,
    /// Time budget; checked only between completed depths
    pub time_limit_ms: u64,
    /// Half-width of the uniform noise added at leaf evaluation
    pub noise_amplitude: i32,
    /// Probability of replacing the searched move by a static-evaluation pick
    pub blunder_probability: f64,
    /// Static-evaluation deficit tolerated when blundering
    pub blunder_margin: i32,
    /// Positional evaluation weight in [0, 1]; material is always full
    pub feature_scale: f64,
}

impl DifficultyProfile {
    /// Shallow, noisy and blunder-prone
    pub const EASY: DifficultyProfile = DifficultyProfile {
        max_depth: 2,
        time_limit_ms: 200,
        noise_amplitude: 60,
        blunder_probability: 0.25,
        blunder_margin: 120,
        feature_scale: 0.3,
    };

    /// Club-player strength
    pub const MEDIUM: DifficultyProfile = DifficultyProfile {
        max_depth: 5,
        time_limit_ms: 800,
        noise_amplitude: 20,
        blunder_probability: 0.08,
        blunder_margin: 60,
        feature_scale: 0.7,
    };

    /// Full-strength local search
    pub const HARD: DifficultyProfile = DifficultyProfile {
        max_depth: 9,
        time_limit_ms: 2500,
        noise_amplitude: 0,
        blunder_probability: 0.0,
        blunder_margin: 0,
        feature_scale: 1.0,
    };
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        DifficultyProfile::MEDIUM
    }
}
