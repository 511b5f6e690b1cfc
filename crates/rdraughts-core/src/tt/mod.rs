//! Bounded-memory transposition table

mod entry;
mod table;

pub use entry::{Bound, ENTRY_SIZE, TTEntry};
pub use table::{DEFAULT_TABLE_MB, TranspositionTable};
