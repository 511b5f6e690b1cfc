//! Engine error taxonomy
//!
//! Only caller-input problems are reported as errors. Running out of the
//! time budget is not an error (the best completed-depth move is returned)
//! and a side with no legal moves is a game outcome, not a failure.

use thiserror::Error;

/// Errors reported to callers of the engine core.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A square index outside 1-50 (the playable dark squares).
    #[error("invalid square index {0}: playable squares are 1-50")]
    InvalidSquare(u8),

    /// A caller-supplied move that is not legal in the given position.
    /// The position is left untouched.
    #[error("move is not legal for the side to move")]
    IllegalMove,

    /// A transposition table buffer whose size is zero or not a multiple
    /// of the entry size. Rejected at construction time.
    #[error("transposition table buffer of {0} bytes is not a positive multiple of 16")]
    InvalidTableSize(usize),

    /// A malformed position or move string.
    #[error("malformed notation: {0}")]
    InvalidNotation(&'static str),
}
