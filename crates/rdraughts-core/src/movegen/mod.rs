//! Legal move generation
//!
//! International draughts rules: men step diagonally forward, kings slide
//! any distance. Captures jump in all four diagonal directions (kings at any
//! distance, landing anywhere beyond) and chain; captured pieces stay on the
//! board as obstacles until the whole sequence commits, and no piece may be
//! captured twice. The majority rule makes capturing mandatory and keeps
//! only maximum-length sequences.
//!
//! Capture chains are explored with an exhaustive depth-first walk. The
//! origin square counts as vacated while exploring (a chain may return to
//! it); pending captures are tracked on the step stack itself.

use crate::error::EngineError;
use crate::position::Position;
use crate::types::{CaptureStep, Direction, Move, PieceKind, Side, Square};
use smallvec::SmallVec;

type StepList = SmallVec<[CaptureStep; 4]>;

/// All legal moves for `side`. If any capture exists, quiet moves are
/// illegal and only maximum-length capture sequences are returned; distinct
/// maximal sequences are all returned, even when they share origin and
/// destination.
pub fn generate_legal_moves(pos: &Position, side: Side) -> Vec<Move> {
    let captures = generate_captures(pos, side);
    if !captures.is_empty() {
        return captures;
    }
    generate_quiet_moves(pos, side)
}

/// Maximum-length capture sequences for `side` (empty when none exist)
pub fn generate_captures(pos: &Position, side: Side) -> Vec<Move> {
    let mut sequences = Vec::new();
    let mut steps = StepList::new();

    for (sq, piece) in pos.pieces() {
        if !piece.is_side(side) {
            continue;
        }
        match piece.kind {
            PieceKind::Man => extend_man_captures(pos, side, sq, sq, &mut steps, &mut sequences),
            PieceKind::King => extend_king_captures(pos, side, sq, sq, &mut steps, &mut sequences),
        }
        debug_assert!(steps.is_empty());
    }

    let max_len = sequences.iter().map(Move::capture_count).max().unwrap_or(0);
    sequences.retain(|mv| mv.capture_count() == max_len);
    sequences
}

/// Quiet (non-capturing) moves for `side`, ignoring the majority rule
pub fn generate_quiet_moves(pos: &Position, side: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    for (sq, piece) in pos.pieces() {
        if !piece.is_side(side) {
            continue;
        }
        match piece.kind {
            PieceKind::Man => {
                for dir in forward_dirs(side) {
                    if let Some(to) = sq.step(dir)
                        && pos.is_empty_at(to)
                    {
                        moves.push(Move::quiet(sq, to));
                    }
                }
            }
            PieceKind::King => {
                for dir in Direction::ALL {
                    let mut cursor = sq.step(dir);
                    while let Some(to) = cursor {
                        if !pos.is_empty_at(to) {
                            break;
                        }
                        moves.push(Move::quiet(sq, to));
                        cursor = to.step(dir);
                    }
                }
            }
        }
    }
    moves
}

/// Whether `side` has at least one capture available
pub fn has_capture(pos: &Position, side: Side) -> bool {
    for (sq, piece) in pos.pieces() {
        if !piece.is_side(side) {
            continue;
        }
        let found = match piece.kind {
            PieceKind::Man => man_can_jump(pos, side, sq),
            PieceKind::King => king_can_jump(pos, side, sq),
        };
        if found {
            return true;
        }
    }
    false
}

/// Quiet-move counts for `side`, split by piece kind (man moves, king moves).
/// Used by the evaluator's mobility feature.
pub fn side_mobility(pos: &Position, side: Side) -> (u32, u32) {
    let mut man_moves = 0;
    let mut king_moves = 0;
    for (sq, piece) in pos.pieces() {
        if !piece.is_side(side) {
            continue;
        }
        match piece.kind {
            PieceKind::Man => man_moves += quiet_move_count_from(pos, sq),
            PieceKind::King => king_moves += quiet_move_count_from(pos, sq),
        }
    }
    (man_moves, king_moves)
}

/// Number of quiet moves available to the piece on `sq` (0 if empty)
pub fn quiet_move_count_from(pos: &Position, sq: Square) -> u32 {
    let Some(piece) = pos.piece_at(sq) else {
        return 0;
    };
    let mut count = 0;
    match piece.kind {
        PieceKind::Man => {
            for dir in forward_dirs(piece.side) {
                if let Some(to) = sq.step(dir)
                    && pos.is_empty_at(to)
                {
                    count += 1;
                }
            }
        }
        PieceKind::King => {
            for dir in Direction::ALL {
                let mut cursor = sq.step(dir);
                while let Some(to) = cursor {
                    if !pos.is_empty_at(to) {
                        break;
                    }
                    count += 1;
                    cursor = to.step(dir);
                }
            }
        }
    }
    count
}

/// Resolve a move given in standard notation (`32-28`, `33x22x13`) against
/// the legal moves of the position. Capture notation names only landing
/// squares, so the captured pieces are recovered from the move list; when
/// several maximal sequences share the same notation the first generated
/// one is returned.
pub fn find_move(pos: &Position, side: Side, notation: &str) -> Result<Move, EngineError> {
    let wanted = notation.trim();
    if wanted.is_empty() {
        return Err(EngineError::InvalidNotation("empty move"));
    }
    generate_legal_moves(pos, side)
        .into_iter()
        .find(|mv| mv.to_string() == wanted)
        .ok_or(EngineError::IllegalMove)
}

/// Move-count walk over the legal move tree, for generator validation
pub fn perft(pos: &Position, side: Side, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal_moves(pos, side);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| perft(&pos.apply(mv, side), side.opponent(), depth - 1))
        .sum()
}

/// The two forward diagonal directions for a side's men
#[inline]
const fn forward_dirs(side: Side) -> [Direction; 2] {
    match side {
        Side::Light => [Direction::UpLeft, Direction::UpRight],
        Side::Dark => [Direction::DownLeft, Direction::DownRight],
    }
}

/// Landing availability during chain exploration: empty, or the vacated
/// origin square of the capturing piece.
#[inline]
fn landing_free(pos: &Position, sq: Square, origin: Square) -> bool {
    pos.is_empty_at(sq) || sq == origin
}

#[inline]
fn is_pending(steps: &StepList, sq: Square) -> bool {
    steps.iter().any(|s| s.captured == sq)
}

fn extend_man_captures(
    pos: &Position,
    side: Side,
    current: Square,
    origin: Square,
    steps: &mut StepList,
    out: &mut Vec<Move>,
) {
    let mut extended = false;
    for dir in Direction::ALL {
        let Some(over) = current.step(dir) else {
            continue;
        };
        let Some(victim) = pos.piece_at(over) else {
            continue;
        };
        if victim.is_side(side) || is_pending(steps, over) {
            continue;
        }
        let Some(landing) = over.step(dir) else {
            continue;
        };
        if !landing_free(pos, landing, origin) {
            continue;
        }
        extended = true;
        steps.push(CaptureStep { from: current, to: landing, captured: over });
        extend_man_captures(pos, side, landing, origin, steps, out);
        steps.pop();
    }
    if !extended && !steps.is_empty() {
        out.push(Move::capture(steps.clone()));
    }
}

fn extend_king_captures(
    pos: &Position,
    side: Side,
    current: Square,
    origin: Square,
    steps: &mut StepList,
    out: &mut Vec<Move>,
) {
    let mut extended = false;
    for dir in Direction::ALL {
        // Slide over empty squares to the first piece on this diagonal
        let mut cursor = current.step(dir);
        while let Some(sq) = cursor {
            if landing_free(pos, sq, origin) {
                cursor = sq.step(dir);
            } else {
                break;
            }
        }
        let Some(over) = cursor else {
            continue;
        };
        let victim = pos.piece_at(over).expect("scan stopped on an occupied square");
        // Own pieces block; a pending capture blocks its whole line and may
        // not be jumped again
        if victim.is_side(side) || is_pending(steps, over) {
            continue;
        }

        // Every empty square beyond the victim is a landing candidate
        let mut landing = over.step(dir);
        while let Some(to) = landing {
            if !landing_free(pos, to, origin) {
                break;
            }
            extended = true;
            steps.push(CaptureStep { from: current, to, captured: over });
            extend_king_captures(pos, side, to, origin, steps, out);
            steps.pop();
            landing = to.step(dir);
        }
    }
    if !extended && !steps.is_empty() {
        out.push(Move::capture(steps.clone()));
    }
}

fn man_can_jump(pos: &Position, side: Side, sq: Square) -> bool {
    for dir in Direction::ALL {
        if let Some(over) = sq.step(dir)
            && let Some(victim) = pos.piece_at(over)
            && !victim.is_side(side)
            && let Some(landing) = over.step(dir)
            && pos.is_empty_at(landing)
        {
            return true;
        }
    }
    false
}

fn king_can_jump(pos: &Position, side: Side, sq: Square) -> bool {
    for dir in Direction::ALL {
        let mut cursor = sq.step(dir);
        while let Some(scan) = cursor {
            match pos.piece_at(scan) {
                None => cursor = scan.step(dir),
                Some(victim) => {
                    if !victim.is_side(side)
                        && let Some(landing) = scan.step(dir)
                        && pos.is_empty_at(landing)
                    {
                        return true;
                    }
                    break;
                }
            }
        }
    }
    false
}
