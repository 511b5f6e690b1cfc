//! Core value types: sides, squares, pieces and moves

mod moves;
mod piece;
mod side;
mod square;

pub use moves::{CaptureStep, Move};
pub use piece::{Piece, PieceKind};
pub use side::Side;
pub use square::{Direction, Square};
