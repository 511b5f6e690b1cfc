//! Transposition table
//!
//! One contiguous buffer of 16-byte entries, addressed by `hash mod
//! entry_count`. Replacement is replace-always: under iterative deepening
//! the most recent result for a slot is the most valuable one, and the
//! policy keeps stores branch-free.
//!
//! The backing buffer is exclusively owned. Hosting code that runs searches
//! in an isolated context moves the whole table (or its buffer, via
//! [`TranspositionTable::into_buffer`]) in and out rather than copying it,
//! so cache warmth survives across successive move computations.

use super::entry::{Bound, ENTRY_SIZE, TTEntry};
use crate::error::EngineError;

/// Default table size in megabytes
pub const DEFAULT_TABLE_MB: usize = 4;

/// Bounded-memory search cache.
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
}

impl TranspositionTable {
    /// Create a table of `mb` megabytes (at least one entry)
    pub fn new(mb: usize) -> TranspositionTable {
        let count = (mb * 1024 * 1024 / ENTRY_SIZE).max(1);
        TranspositionTable { entries: vec![TTEntry::EMPTY; count] }
    }

    /// Create a table over exactly `bytes` bytes. Fails fast when the size
    /// is zero or not a multiple of the entry size.
    pub fn with_capacity_bytes(bytes: usize) -> Result<TranspositionTable, EngineError> {
        if bytes == 0 || bytes % ENTRY_SIZE != 0 {
            return Err(EngineError::InvalidTableSize(bytes));
        }
        Ok(TranspositionTable { entries: vec![TTEntry::EMPTY; bytes / ENTRY_SIZE] })
    }

    /// Adopt an existing buffer (ownership transfer back from a worker).
    /// An empty buffer is rejected.
    pub fn from_buffer(entries: Vec<TTEntry>) -> Result<TranspositionTable, EngineError> {
        if entries.is_empty() {
            return Err(EngineError::InvalidTableSize(0));
        }
        Ok(TranspositionTable { entries })
    }

    /// Release the backing buffer for transfer into another context
    pub fn into_buffer(self) -> Vec<TTEntry> {
        self.entries
    }

    /// Number of entry slots
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Look up `key`. An index collision (different full hash in the slot)
    /// is a miss, not an error.
    #[inline]
    pub fn probe(&self, key: u32) -> Option<TTEntry> {
        let entry = self.entries[self.slot(key)];
        (entry.is_occupied() && entry.key() == key).then_some(entry)
    }

    /// Store a result, unconditionally overwriting the slot
    #[inline]
    pub fn store(&mut self, key: u32, score: i32, depth: u8, bound: Bound, best_move_index: i16) {
        let slot = self.slot(key);
        self.entries[slot] = TTEntry::new(key, score, depth, bound, best_move_index);
    }

    /// Zero the whole buffer
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
    }

    #[inline]
    fn slot(&self, key: u32) -> usize {
        key as usize % self.entries.len()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(DEFAULT_TABLE_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let tt = TranspositionTable::default();
        assert_eq!(tt.entry_count(), 4 * 1024 * 1024 / 16);
    }

    #[test]
    fn test_store_probe_roundtrip() {
        let mut tt = TranspositionTable::new(1);
        assert!(tt.probe(42).is_none());

        tt.store(42, -500, 6, Bound::Exact, 3);
        let e = tt.probe(42).unwrap();
        assert_eq!(e.key(), 42);
        assert_eq!(e.score(), -500);
        assert_eq!(e.depth(), 6);
        assert_eq!(e.bound(), Bound::Exact);
        assert_eq!(e.best_move_index(), 3);
    }

    #[test]
    fn test_index_collision_is_a_miss() {
        let mut tt = TranspositionTable::with_capacity_bytes(16 * 8).unwrap();
        let count = tt.entry_count() as u32;

        tt.store(5, 100, 2, Bound::Exact, 0);
        // Same slot, different full hash
        assert!(tt.probe(5 + count).is_none());

        // Replace-always: the colliding store wins
        tt.store(5 + count, 200, 1, Bound::Upper, 1);
        assert!(tt.probe(5).is_none());
        assert_eq!(tt.probe(5 + count).unwrap().score(), 200);
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::new(1);
        tt.store(7, 9, 1, Bound::Lower, 0);
        tt.clear();
        assert!(tt.probe(7).is_none());
    }

    #[test]
    fn test_wrong_buffer_size_fails_fast() {
        assert_eq!(
            TranspositionTable::with_capacity_bytes(0).err(),
            Some(EngineError::InvalidTableSize(0))
        );
        assert_eq!(
            TranspositionTable::with_capacity_bytes(17).err(),
            Some(EngineError::InvalidTableSize(17))
        );
        assert!(TranspositionTable::with_capacity_bytes(16).is_ok());
        assert!(TranspositionTable::from_buffer(Vec::new()).is_err());
    }

    #[test]
    fn test_buffer_transfer_preserves_contents() {
        let mut tt = TranspositionTable::new(1);
        tt.store(99, 1234, 5, Bound::Exact, 2);

        let buffer = tt.into_buffer();
        let tt = TranspositionTable::from_buffer(buffer).unwrap();
        assert_eq!(tt.probe(99).unwrap().score(), 1234);
    }
}
