//! Position evaluation
//!
//! Material is always scored at full weight. The positional terms are
//! summed separately and multiplied by the difficulty profile's
//! `feature_scale` in [0, 1], so weaker profiles literally see less of the
//! position. Every positional term is an own-minus-opponent differential.
//!
//! Search-time noise is injected by the search at leaf evaluation, not
//! here; `evaluate` itself is deterministic.

use crate::movegen::{quiet_move_count_from, side_mobility};
use crate::position::Position;
use crate::types::{Direction, PieceKind, Side, Square};

/// Material weight of a man
pub const MAN_VALUE: i32 = 100;
/// Material weight of a king
pub const KING_VALUE: i32 = 300;

const MOBILITY_KING_WEIGHT: i32 = 2;
const STRUCTURE_BONUS: i32 = 3;
const FIRST_PROMOTION_BONUS: i32 = 30;
const LOCKED_PENALTY: i32 = 5;
const RUNAWAY_BONUS: i32 = 15;
const LONG_DIAGONAL_BONUS: i32 = 2;
const ENDGAME_KING_BONUS: i32 = 20;
const BALANCE_PENALTY: i32 = 3;
const ENDGAME_PIECE_THRESHOLD: u32 = 6;

/// Score `pos` from the perspective of `side`.
pub fn evaluate(pos: &Position, side: Side, feature_scale: f64) -> i32 {
    let material = material_score(pos, side);
    if feature_scale <= 0.0 {
        return material;
    }

    let positional = mobility_term(pos, side)
        + structure_term(pos, side)
        + first_promotion_term(pos, side)
        + locked_term(pos, side)
        + runaway_term(pos, side)
        + long_diagonal_term(pos, side)
        + endgame_king_term(pos, side)
        + balance_term(pos, side);

    material + (positional as f64 * feature_scale.min(1.0)) as i32
}

/// Material term: 100 per man, 300 per king, own minus opponent
pub fn material_score(pos: &Position, side: Side) -> i32 {
    let opp = side.opponent();
    MAN_VALUE * (pos.man_count(side) as i32 - pos.man_count(opp) as i32)
        + KING_VALUE * (pos.king_count(side) as i32 - pos.king_count(opp) as i32)
}

fn mobility_term(pos: &Position, side: Side) -> i32 {
    let (own_man, own_king) = side_mobility(pos, side);
    let (opp_man, opp_king) = side_mobility(pos, side.opponent());
    (own_man as i32 - opp_man as i32)
        + MOBILITY_KING_WEIGHT * (own_king as i32 - opp_king as i32)
}

/// +3 per piece with a friendly piece diagonally behind it
fn structure_term(pos: &Position, side: Side) -> i32 {
    let mut term = 0;
    for (sq, piece) in pos.pieces() {
        let behind = match piece.side {
            Side::Light => [Direction::DownLeft, Direction::DownRight],
            Side::Dark => [Direction::UpLeft, Direction::UpRight],
        };
        let defended = behind.into_iter().any(|dir| {
            sq.step(dir)
                .and_then(|b| pos.piece_at(b))
                .is_some_and(|p| p.side == piece.side)
        });
        if defended {
            term += if piece.is_side(side) { STRUCTURE_BONUS } else { -STRUCTURE_BONUS };
        }
    }
    term
}

fn first_promotion_term(pos: &Position, side: Side) -> i32 {
    match pos.first_promotion() {
        Some(owner) if owner == side => FIRST_PROMOTION_BONUS,
        Some(_) => -FIRST_PROMOTION_BONUS,
        None => 0,
    }
}

/// -5 per piece with zero quiet moves. Captures do not count: the term is
/// a mobility shading, and a piece whose only move is a capture is still
/// scored as locked.
fn locked_term(pos: &Position, side: Side) -> i32 {
    let mut term = 0;
    for (sq, piece) in pos.pieces() {
        if quiet_move_count_from(pos, sq) == 0 {
            term += if piece.is_side(side) { -LOCKED_PENALTY } else { LOCKED_PENALTY };
        }
    }
    term
}

/// +15 per man with a fully empty forward diagonal ray to the promotion row
fn runaway_term(pos: &Position, side: Side) -> i32 {
    let mut term = 0;
    for (sq, piece) in pos.pieces() {
        if piece.kind != PieceKind::Man {
            continue;
        }
        if is_runaway(pos, sq, piece.side) {
            term += if piece.is_side(side) { RUNAWAY_BONUS } else { -RUNAWAY_BONUS };
        }
    }
    term
}

fn is_runaway(pos: &Position, sq: Square, side: Side) -> bool {
    let dirs = match side {
        Side::Light => [Direction::UpLeft, Direction::UpRight],
        Side::Dark => [Direction::DownLeft, Direction::DownRight],
    };
    'dirs: for dir in dirs {
        let mut cursor = sq.step(dir);
        while let Some(next) = cursor {
            if !pos.is_empty_at(next) {
                continue 'dirs;
            }
            if next.row() == side.promotion_row() {
                return true;
            }
            cursor = next.step(dir);
        }
        // Ray left the board before reaching the promotion row
    }
    false
}

/// +2 per piece holding the long diagonal
fn long_diagonal_term(pos: &Position, side: Side) -> i32 {
    let mut term = 0;
    for (sq, piece) in pos.pieces() {
        if sq.on_long_diagonal() {
            term +=
                if piece.is_side(side) { LONG_DIAGONAL_BONUS } else { -LONG_DIAGONAL_BONUS };
        }
    }
    term
}

/// +20 for holding more kings than the opponent, doubled once the board is
/// nearly empty and king superiority decides the endgame
fn endgame_king_term(pos: &Position, side: Side) -> i32 {
    let own = pos.king_count(side);
    let opp = pos.king_count(side.opponent());
    if own == opp {
        return 0;
    }
    let sign = if own > opp { 1 } else { -1 };
    let amplifier = if pos.total_pieces() < ENDGAME_PIECE_THRESHOLD { 2 } else { 1 };
    sign * ENDGAME_KING_BONUS * amplifier
}

/// -3 per unit of left/right imbalance of a side's own pieces
fn balance_term(pos: &Position, side: Side) -> i32 {
    let imbalance = |s: Side| {
        let mut left = 0i32;
        let mut right = 0i32;
        for (sq, piece) in pos.pieces() {
            if piece.is_side(s) {
                if sq.col() < 5 {
                    left += 1;
                } else {
                    right += 1;
                }
            }
        }
        (left - right).abs()
    };
    BALANCE_PENALTY * (imbalance(side.opponent()) - imbalance(side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn sq(n: u8) -> Square {
        Square::from_number(n)
    }

    #[test]
    fn test_feature_scale_zero_is_pure_material() {
        let mut pos = Position::empty();
        pos.set_piece(sq(28), Piece::man(Side::Light));
        pos.set_piece(sq(32), Piece::man(Side::Light));
        pos.set_piece(sq(46), Piece::king(Side::Light));
        pos.set_piece(sq(19), Piece::man(Side::Dark));

        let expected = MAN_VALUE * (2 - 1) + KING_VALUE;
        assert_eq!(evaluate(&pos, Side::Light, 0.0), expected);
        assert_eq!(evaluate(&pos, Side::Dark, 0.0), -expected);
    }

    #[test]
    fn test_initial_position_is_balanced() {
        let pos = Position::initial();
        assert_eq!(evaluate(&pos, Side::Light, 1.0), 0);
        assert_eq!(evaluate(&pos, Side::Dark, 1.0), 0);
    }

    #[test]
    fn test_score_is_negated_between_sides() {
        let (pos, _) = Position::from_fen("W:W28,32,K46:B1,2,19,K5").unwrap();
        let light = evaluate(&pos, Side::Light, 1.0);
        let dark = evaluate(&pos, Side::Dark, 1.0);
        assert_eq!(light, -dark);
    }

    #[test]
    fn test_first_promotion_bonus() {
        let mut pos = Position::empty();
        pos.set_piece(sq(6), Piece::man(Side::Light));
        pos.set_piece(sq(45), Piece::man(Side::Dark));
        let promoted = pos.apply(&crate::types::Move::quiet(sq(6), sq(1)), Side::Light);

        let before = evaluate(&pos, Side::Light, 0.0);
        let _ = before;
        let with = evaluate(&promoted, Side::Light, 1.0);
        let without_scale = evaluate(&promoted, Side::Light, 0.0);
        // The scaled score includes the one-time bonus for Light
        assert!(with > without_scale);
    }

    #[test]
    fn test_endgame_king_advantage_amplified() {
        // 5 pieces total: amplifier kicks in
        let (small, _) = Position::from_fen("W:WK28,31,32:B1,2").unwrap();
        // 7 pieces total: plain bonus
        let (large, _) = Position::from_fen("W:WK28,31,32,33:B1,2,3").unwrap();
        assert_eq!(endgame_king_term(&small, Side::Light), 2 * ENDGAME_KING_BONUS);
        assert_eq!(endgame_king_term(&large, Side::Light), ENDGAME_KING_BONUS);
        assert_eq!(endgame_king_term(&small, Side::Dark), -2 * ENDGAME_KING_BONUS);
    }

    #[test]
    fn test_capture_only_piece_counts_as_locked() {
        // Light man on 26: its single quiet step to 21 is occupied, so only
        // the jump 26x17 remains. The dark man on 21 still has 21-27.
        let (pos, _) = Position::from_fen("W:W26:B21").unwrap();
        assert_eq!(locked_term(&pos, Side::Light), -LOCKED_PENALTY);
        assert_eq!(locked_term(&pos, Side::Dark), LOCKED_PENALTY);
    }

    #[test]
    fn test_runaway_detection() {
        let mut pos = Position::empty();
        pos.set_piece(sq(8), Piece::man(Side::Light));
        assert!(is_runaway(&pos, sq(8), Side::Light));

        // Block both forward rays
        pos.set_piece(sq(2), Piece::man(Side::Dark));
        pos.set_piece(sq(3), Piece::man(Side::Dark));
        assert!(!is_runaway(&pos, sq(8), Side::Light));
    }
}
