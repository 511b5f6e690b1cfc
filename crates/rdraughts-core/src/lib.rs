//! Core engine for 10x10 international draughts
//!
//! The crate provides the rules layer (board, legal move generation with
//! the majority capture rule, draw tracking) and a search layer (iterative
//! deepening alpha-beta with a bounded transposition table and tunable
//! playing strength). Everything is synchronous and allocation-light; the
//! engine is designed to be embedded in a host that owns the game loop.
//!
//! ```
//! use rdraughts_core::{
//!     DifficultyProfile, DrawState, MoveDecision, Position, SearchEngine, Side,
//! };
//!
//! let pos = Position::initial();
//! let mut engine = SearchEngine::with_seed(4, 7);
//! let draw = DrawState::opening(engine.position_hash(&pos, Side::Light));
//! match engine.request_move(&pos, Side::Light, &DifficultyProfile::MEDIUM, &draw) {
//!     MoveDecision::Play(result) => println!("playing {}", result.mv),
//!     MoveDecision::NoLegalMoves => println!("game over"),
//! }
//! ```

pub mod difficulty;
pub mod draw;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod position;
pub mod search;
pub mod tt;
pub mod types;
pub mod zobrist;

pub use difficulty::DifficultyProfile;
pub use draw::{DrawReason, DrawState};
pub use error::EngineError;
pub use movegen::{find_move, generate_legal_moves, perft};
pub use position::Position;
pub use search::{MoveDecision, SearchEngine, SearchResult};
pub use tt::{DEFAULT_TABLE_MB, TranspositionTable};
pub use types::{CaptureStep, Direction, Move, Piece, PieceKind, Side, Square};
pub use zobrist::Zobrist;
