//! Incremental position hashing
//!
//! Zobrist hashing over (square, piece) keys plus a side-to-move key. The
//! key table is generated from a fixed seed so hashes are reproducible
//! across runs and platforms, and it is an explicit owned value rather than
//! a process-wide global so it can travel into isolated execution contexts
//! together with the table that depends on it.
//!
//! Search code must maintain hashes incrementally via [`Zobrist::apply_move`]
//! (XOR out vacated and captured squares, XOR in the landing square, toggle
//! the side key); recomputing from scratch at every node is O(50) instead of
//! O(squares changed).

use crate::position::Position;
use crate::types::{Move, Piece, PieceKind, Side, Square};
use rand::RngCore;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Seed for the key table. Changing it invalidates stored hashes everywhere.
const KEY_TABLE_SEED: u64 = 0x8C5F_1A3E_D00D_2026;

/// Zobrist key table: one 32-bit key per (square, piece) pair plus one for
/// the side to move. 32 bits suffice for transposition indexing (entries are
/// verified against the full stored hash at probe time) and for repetition
/// detection over a single game's history.
pub struct Zobrist {
    piece_keys: [[u32; 4]; 51],
    side_key: u32,
}

impl Zobrist {
    /// Generate the key table from the fixed seed
    pub fn new() -> Zobrist {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(KEY_TABLE_SEED);
        let mut piece_keys = [[0u32; 4]; 51];
        for keys in piece_keys.iter_mut().skip(1) {
            for key in keys.iter_mut() {
                *key = rng.next_u32();
            }
        }
        let side_key = rng.next_u32();
        Zobrist { piece_keys, side_key }
    }

    /// Key for a piece on a square
    #[inline]
    pub fn piece_key(&self, sq: Square, piece: Piece) -> u32 {
        self.piece_keys[sq.index()][piece.index()]
    }

    /// Key toggled when Dark is to move
    #[inline]
    pub fn side_key(&self) -> u32 {
        self.side_key
    }

    /// Full hash of a position with the given side to move
    pub fn compute(&self, pos: &Position, side: Side) -> u32 {
        let mut hash = 0u32;
        for (sq, piece) in pos.pieces() {
            hash ^= self.piece_key(sq, piece);
        }
        if side == Side::Dark {
            hash ^= self.side_key;
        }
        hash
    }

    /// Hash after `side` plays `mv` on `pos`, derived incrementally from the
    /// hash of `(pos, side)`.
    pub fn apply_move(&self, hash: u32, pos: &Position, side: Side, mv: &Move) -> u32 {
        let from = mv.from();
        let to = mv.to();
        let piece = pos.piece_at(from).expect("move origin must be occupied");

        let mut hash = hash ^ self.piece_key(from, piece);
        for captured_sq in mv.captured_squares() {
            let captured = pos.piece_at(captured_sq).expect("captured square must be occupied");
            hash ^= self.piece_key(captured_sq, captured);
        }

        let placed = if piece.kind == PieceKind::Man && to.row() == side.promotion_row() {
            piece.promoted()
        } else {
            piece
        };
        hash ^= self.piece_key(to, placed);
        hash ^ self.side_key
    }
}

impl Default for Zobrist {
    fn default() -> Self {
        Zobrist::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::generate_legal_moves;

    #[test]
    fn test_hash_is_deterministic() {
        let a = Zobrist::new();
        let b = Zobrist::new();
        let pos = Position::initial();
        assert_eq!(a.compute(&pos, Side::Light), b.compute(&pos, Side::Light));
        assert_eq!(a.compute(&pos, Side::Light), a.compute(&pos, Side::Light));
    }

    #[test]
    fn test_side_to_move_changes_hash() {
        let z = Zobrist::new();
        let pos = Position::initial();
        let light = z.compute(&pos, Side::Light);
        let dark = z.compute(&pos, Side::Dark);
        assert_ne!(light, dark);
        assert_eq!(light ^ z.side_key(), dark);
    }

    #[test]
    fn test_incremental_matches_full_recompute() {
        let z = Zobrist::new();
        let mut pos = Position::initial();
        let mut side = Side::Light;
        let mut hash = z.compute(&pos, side);

        // Walk a handful of plies and verify the incremental hash at each
        for _ in 0..12 {
            let moves = generate_legal_moves(&pos, side);
            let Some(mv) = moves.first() else { break };
            hash = z.apply_move(hash, &pos, side, mv);
            pos = pos.apply(mv, side);
            side = side.opponent();
            assert_eq!(hash, z.compute(&pos, side));
        }
    }

    #[test]
    fn test_incremental_capture_and_promotion() {
        let z = Zobrist::new();
        let mut pos = Position::empty();
        pos.set_piece(Square::from_number(12), crate::types::Piece::man(Side::Light));
        pos.set_piece(Square::from_number(8), crate::types::Piece::man(Side::Dark));

        let moves = generate_legal_moves(&pos, Side::Light);
        assert_eq!(moves.len(), 1);
        let mv = &moves[0];
        assert!(mv.is_capture());

        // 12x3 lands on the back row and promotes
        let hash = z.compute(&pos, Side::Light);
        let next_hash = z.apply_move(hash, &pos, Side::Light, mv);
        let next = pos.apply(mv, Side::Light);
        assert_eq!(next_hash, z.compute(&next, Side::Dark));
    }
}
