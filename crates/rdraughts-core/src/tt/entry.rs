//! Packed transposition table entries
//!
//! One entry is exactly 16 bytes so the table is a dense, allocation-free
//! arena: full 32-bit hash for probe verification, 32-bit score, the index
//! of the best move in the canonical generated move list, search depth and
//! bound type.

/// Bound type of a stored score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Bound {
    /// Empty slot marker
    None = 0,
    /// Exact score (PV node)
    Exact = 1,
    /// Lower bound (fail-high)
    Lower = 2,
    /// Upper bound (fail-low)
    Upper = 3,
}

/// A 16-byte table slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct TTEntry {
    key: u32,
    score: i32,
    best_move_index: i16,
    depth: u8,
    bound: u8,
    _pad: [u8; 4],
}

/// Fixed 16-byte layout; the table sizes itself in entries per megabyte
pub const ENTRY_SIZE: usize = 16;
const _: () = assert!(std::mem::size_of::<TTEntry>() == ENTRY_SIZE);

impl TTEntry {
    /// An empty slot
    pub const EMPTY: TTEntry =
        TTEntry { key: 0, score: 0, best_move_index: -1, depth: 0, bound: 0, _pad: [0; 4] };

    pub const fn new(key: u32, score: i32, depth: u8, bound: Bound, best_move_index: i16) -> TTEntry {
        TTEntry { key, score, best_move_index, depth, bound: bound as u8, _pad: [0; 4] }
    }

    #[inline]
    pub const fn is_occupied(&self) -> bool {
        self.bound != Bound::None as u8
    }

    #[inline]
    pub const fn key(&self) -> u32 {
        self.key
    }

    #[inline]
    pub const fn score(&self) -> i32 {
        self.score
    }

    #[inline]
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub const fn best_move_index(&self) -> i16 {
        self.best_move_index
    }

    #[inline]
    pub fn bound(&self) -> Bound {
        match self.bound {
            1 => Bound::Exact,
            2 => Bound::Lower,
            3 => Bound::Upper,
            _ => Bound::None,
        }
    }
}

impl Default for TTEntry {
    fn default() -> Self {
        TTEntry::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_is_16_bytes() {
        assert_eq!(std::mem::size_of::<TTEntry>(), 16);
    }

    #[test]
    fn test_field_roundtrip() {
        let e = TTEntry::new(0xDEAD_BEEF, -123, 7, Bound::Lower, 4);
        assert!(e.is_occupied());
        assert_eq!(e.key(), 0xDEAD_BEEF);
        assert_eq!(e.score(), -123);
        assert_eq!(e.depth(), 7);
        assert_eq!(e.bound(), Bound::Lower);
        assert_eq!(e.best_move_index(), 4);
    }

    #[test]
    fn test_empty_entry() {
        let e = TTEntry::EMPTY;
        assert!(!e.is_occupied());
        assert_eq!(e.bound(), Bound::None);
        assert_eq!(e.best_move_index(), -1);
    }
}
