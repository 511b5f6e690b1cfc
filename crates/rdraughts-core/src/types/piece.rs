//! Pieces: men and kings

use super::side::Side;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Piece kinds. A man promotes to a king on the opponent's back row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Man = 0,
    King = 1,
}

/// An immutable piece value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, side: Side) -> Piece {
        Piece { kind, side }
    }

    #[inline]
    pub const fn man(side: Side) -> Piece {
        Piece::new(PieceKind::Man, side)
    }

    #[inline]
    pub const fn king(side: Side) -> Piece {
        Piece::new(PieceKind::King, side)
    }

    /// Compact index in 0-3 (side * 2 + kind), used for Zobrist keys
    #[inline]
    pub const fn index(self) -> usize {
        self.side as usize * 2 + self.kind as usize
    }

    /// Whether this piece belongs to `side`
    #[inline]
    pub const fn is_side(self, side: Side) -> bool {
        self.side as u8 == side as u8
    }

    /// Promoted version of this piece (kings stay kings)
    #[inline]
    pub const fn promoted(self) -> Piece {
        Piece::king(self.side)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match (self.side, self.kind) {
            (Side::Light, PieceKind::Man) => 'w',
            (Side::Light, PieceKind::King) => 'W',
            (Side::Dark, PieceKind::Man) => 'b',
            (Side::Dark, PieceKind::King) => 'B',
        };
        write!(f, "{c}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_index_is_unique() {
        let pieces = [
            Piece::man(Side::Light),
            Piece::king(Side::Light),
            Piece::man(Side::Dark),
            Piece::king(Side::Dark),
        ];
        let mut seen = [false; 4];
        for p in pieces {
            assert!(!seen[p.index()]);
            seen[p.index()] = true;
        }
    }

    #[test]
    fn test_promotion_keeps_side() {
        let p = Piece::man(Side::Dark).promoted();
        assert_eq!(p, Piece::king(Side::Dark));
        assert_eq!(Piece::king(Side::Light).promoted(), Piece::king(Side::Light));
    }
}
