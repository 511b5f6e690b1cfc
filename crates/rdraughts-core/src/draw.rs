//! Draw rule tracking
//!
//! `DrawState` is a persistent value: extending it after a move yields a new
//! state and never touches the original, so sibling search branches cannot
//! leak counter updates into each other. The search checks `draw_reason` at
//! every node, which lets it actively steer toward or away from a draw.

use crate::position::Position;
use crate::types::{Move, PieceKind, Side};
use serde::{Deserialize, Serialize};

/// A position/side pair repeated this many times is a draw
pub const REPETITION_LIMIT: usize = 3;
/// Consecutive non-capturing king moves (plies) before a draw
pub const QUIET_KING_MOVE_LIMIT: u32 = 50;
/// Plies a qualifying low-material endgame may persist unresolved
pub const ENDGAME_MOVE_LIMIT: u32 = 32;

/// Why a position is a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    /// The same position with the same side to move occurred three times
    Repetition,
    /// 25 moves per side with only quiet king moves
    QuietKingMoves,
    /// A bare-king endgame persisted past its move allowance
    EndgameMaterial,
}

/// Repetition and quiet-move counters, threaded through game play and
/// search as an immutable, copy-extended value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawState {
    /// Multiset of position hashes (side to move folded into the hash)
    history: Vec<u32>,
    quiet_king_moves: u32,
    endgame_moves: u32,
    endgame_active: bool,
}

impl DrawState {
    /// Fresh state with no history
    pub fn new() -> DrawState {
        DrawState::default()
    }

    /// State at the start of a game whose initial position hashes to `hash`
    pub fn opening(hash: u32) -> DrawState {
        DrawState { history: vec![hash], ..DrawState::default() }
    }

    /// Number of recorded positions
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// State after `side` played `mv`, where `moved` is the kind of the
    /// piece that moved (before any promotion), `pos_after` the resulting
    /// position and `hash_after` its hash with the opponent to move.
    pub fn after_move(
        &self,
        pos_after: &Position,
        mv: &Move,
        moved: PieceKind,
        hash_after: u32,
    ) -> DrawState {
        let mut next = self.clone();
        next.history.push(hash_after);

        if mv.is_capture() || moved == PieceKind::Man {
            next.quiet_king_moves = 0;
        } else {
            next.quiet_king_moves += 1;
        }

        if is_endgame_material(pos_after) {
            next.endgame_moves = if next.endgame_active { next.endgame_moves + 1 } else { 1 };
            next.endgame_active = true;
        } else {
            next.endgame_moves = 0;
            next.endgame_active = false;
        }
        next
    }

    /// The draw reason currently met, if any
    pub fn draw_reason(&self) -> Option<DrawReason> {
        if let Some(&current) = self.history.last() {
            let occurrences = self.history.iter().filter(|&&h| h == current).count();
            if occurrences >= REPETITION_LIMIT {
                return Some(DrawReason::Repetition);
            }
        }
        if self.quiet_king_moves >= QUIET_KING_MOVE_LIMIT {
            return Some(DrawReason::QuietKingMoves);
        }
        if self.endgame_active && self.endgame_moves >= ENDGAME_MOVE_LIMIT {
            return Some(DrawReason::EndgameMaterial);
        }
        None
    }

    /// Whether any draw rule is met
    pub fn is_draw(&self) -> bool {
        self.draw_reason().is_some()
    }
}

/// Qualifying low-material configuration for the endgame move allowance:
/// one side reduced to a bare king, the other holding at most three pieces
/// of which at least one is a king.
pub fn is_endgame_material(pos: &Position) -> bool {
    for side in [Side::Light, Side::Dark] {
        let opp = side.opponent();
        let bare_king = pos.king_count(side) == 1 && pos.man_count(side) == 0;
        let opp_qualifies = pos.piece_count(opp) <= 3 && pos.king_count(opp) >= 1;
        if bare_king && opp_qualifies {
            return true;
        }
    }
    false
}
