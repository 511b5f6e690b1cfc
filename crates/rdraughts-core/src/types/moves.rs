//! Move representation
//!
//! A move is either a quiet move or a capture sequence. Captures carry the
//! full ordered step list, because the majority rule is decided on sequence
//! length and because two maximal sequences may share origin and destination
//! while capturing different pieces - both are distinct legal moves and the
//! caller disambiguates.

use super::square::Square;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// One jump within a capture sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureStep {
    /// Square the capturing piece jumps from
    pub from: Square,
    /// Square the capturing piece lands on
    pub to: Square,
    /// Square of the captured piece
    pub captured: Square,
}

/// A legal move: quiet step/slide, or a capture chain.
///
/// Invariant: within one capture sequence no square appears twice as
/// `captured`. The generator guarantees this; `Position::apply` asserts it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Quiet { from: Square, to: Square },
    Capture { steps: SmallVec<[CaptureStep; 4]> },
}

impl Move {
    /// Build a quiet move
    #[inline]
    pub fn quiet(from: Square, to: Square) -> Move {
        Move::Quiet { from, to }
    }

    /// Build a capture move from its steps. Must not be empty.
    #[inline]
    pub fn capture(steps: SmallVec<[CaptureStep; 4]>) -> Move {
        debug_assert!(!steps.is_empty());
        Move::Capture { steps }
    }

    /// Origin square
    #[inline]
    pub fn from(&self) -> Square {
        match self {
            Move::Quiet { from, .. } => *from,
            Move::Capture { steps } => steps[0].from,
        }
    }

    /// Final resting square
    #[inline]
    pub fn to(&self) -> Square {
        match self {
            Move::Quiet { to, .. } => *to,
            Move::Capture { steps } => steps[steps.len() - 1].to,
        }
    }

    /// Number of captured pieces (0 for quiet moves)
    #[inline]
    pub fn capture_count(&self) -> usize {
        match self {
            Move::Quiet { .. } => 0,
            Move::Capture { steps } => steps.len(),
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        matches!(self, Move::Capture { .. })
    }

    /// Squares of all captured pieces, in jump order
    pub fn captured_squares(&self) -> impl Iterator<Item = Square> + '_ {
        let steps: &[CaptureStep] = match self {
            Move::Quiet { .. } => &[],
            Move::Capture { steps } => steps,
        };
        steps.iter().map(|s| s.captured)
    }
}

/// Standard notation: `32-28` for quiet moves, `33x22x13` for captures
/// (origin and every landing square, joined by `x`).
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Quiet { from, to } => write!(f, "{from}-{to}"),
            Move::Capture { steps } => {
                write!(f, "{}", steps[0].from)?;
                for step in steps.iter() {
                    write!(f, "x{}", step.to)?;
                }
                Ok(())
            }
        }
    }
}
