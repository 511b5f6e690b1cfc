//! Board squares and diagonal geometry
//!
//! The board is the standard 10x10 international draughts board. Only the
//! 50 dark squares are playable; they are numbered 1-50 left to right, top
//! to bottom, five per row. Index 0 is reserved so array-backed layouts can
//! use the square number directly.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A playable dark square, numbered 1-50.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Square(u8);

/// One of the four diagonal directions.
///
/// "Up" is toward row 0 (the Dark back row), the direction Light men
/// advance in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::UpLeft, Direction::UpRight, Direction::DownLeft, Direction::DownRight];

    /// Row delta of one diagonal step
    #[inline]
    pub const fn row_delta(self) -> i8 {
        match self {
            Direction::UpLeft | Direction::UpRight => -1,
            Direction::DownLeft | Direction::DownRight => 1,
        }
    }

    /// Column delta of one diagonal step
    #[inline]
    pub const fn col_delta(self) -> i8 {
        match self {
            Direction::UpLeft | Direction::DownLeft => -1,
            Direction::UpRight | Direction::DownRight => 1,
        }
    }
}

impl Square {
    /// Number of playable squares
    pub const COUNT: usize = 50;

    /// Create a square from its 1-50 number
    #[inline]
    pub const fn new(number: u8) -> Result<Square, EngineError> {
        if number >= 1 && number <= 50 {
            Ok(Square(number))
        } else {
            Err(EngineError::InvalidSquare(number))
        }
    }

    /// Create a square from a number known to be in 1-50
    ///
    /// Panics in debug builds if the number is out of range.
    #[inline]
    pub const fn from_number(number: u8) -> Square {
        debug_assert!(number >= 1 && number <= 50);
        Square(number)
    }

    /// The 1-50 square number
    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Array index (1-50; index 0 of a 51-slot array is unused)
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Board row, 0 (top, Dark back row) to 9 (bottom, Light back row)
    #[inline]
    pub const fn row(self) -> u8 {
        (self.0 - 1) / 5
    }

    /// Board column, 0-9. Dark squares sit on odd columns in even rows and
    /// even columns in odd rows.
    #[inline]
    pub const fn col(self) -> u8 {
        let r = self.row();
        2 * ((self.0 - 1) % 5) + (1 - r % 2)
    }

    /// Square at the given board coordinates, if it is a playable dark square
    pub const fn from_coords(row: i8, col: i8) -> Option<Square> {
        if row < 0 || row > 9 || col < 0 || col > 9 {
            return None;
        }
        // Dark squares: odd column on even rows, even column on odd rows
        if (col % 2) as u8 != 1 - (row % 2) as u8 {
            return None;
        }
        Some(Square((row as u8) * 5 + (col as u8) / 2 + 1))
    }

    /// Diagonally adjacent square in the given direction, if on the board
    #[inline]
    pub const fn step(self, dir: Direction) -> Option<Square> {
        Square::from_coords(
            self.row() as i8 + dir.row_delta(),
            self.col() as i8 + dir.col_delta(),
        )
    }

    /// Whether this square lies on the long diagonal (squares 5 to 46)
    #[inline]
    pub const fn on_long_diagonal(self) -> bool {
        self.col() == 9 - self.row()
    }

    /// Iterate over all 50 playable squares
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=50).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Square {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Square::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(0).is_err());
        assert!(Square::new(51).is_err());
        assert_eq!(Square::new(0), Err(EngineError::InvalidSquare(0)));
        assert!(Square::new(1).is_ok());
        assert!(Square::new(50).is_ok());
    }

    #[test]
    fn test_coords_roundtrip() {
        for sq in Square::all() {
            let back = Square::from_coords(sq.row() as i8, sq.col() as i8);
            assert_eq!(back, Some(sq));
        }
    }

    #[test]
    fn test_known_coordinates() {
        // Row 0 holds squares 1-5 on odd columns
        assert_eq!(Square::from_number(1).col(), 1);
        assert_eq!(Square::from_number(5).col(), 9);
        assert_eq!(Square::from_number(6).col(), 0);
        assert_eq!(Square::from_number(28).row(), 5);
        assert_eq!(Square::from_number(28).col(), 4);
        assert_eq!(Square::from_number(50).row(), 9);
        assert_eq!(Square::from_number(50).col(), 8);
    }

    #[test]
    fn test_light_squares_rejected() {
        // (0, 0) is a light square
        assert_eq!(Square::from_coords(0, 0), None);
        assert_eq!(Square::from_coords(5, 5), None);
        assert_eq!(Square::from_coords(-1, 1), None);
        assert_eq!(Square::from_coords(10, 1), None);
    }

    #[test]
    fn test_diagonal_steps() {
        // Square 28 sits in the middle; its neighbours are 22, 23, 32, 33
        let sq = Square::from_number(28);
        assert_eq!(sq.step(Direction::UpLeft), Some(Square::from_number(22)));
        assert_eq!(sq.step(Direction::UpRight), Some(Square::from_number(23)));
        assert_eq!(sq.step(Direction::DownLeft), Some(Square::from_number(32)));
        assert_eq!(sq.step(Direction::DownRight), Some(Square::from_number(33)));

        // Edges fall off the board
        assert_eq!(Square::from_number(5).step(Direction::UpRight), None);
        assert_eq!(Square::from_number(46).step(Direction::DownLeft), None);
    }

    #[test]
    fn test_long_diagonal() {
        let expected = [5u8, 10, 14, 19, 23, 28, 32, 37, 41, 46];
        let actual: Vec<u8> = Square::all()
            .filter(|sq| sq.on_long_diagonal())
            .map(|sq| sq.number())
            .collect();
        assert_eq!(actual, expected);
    }
}
