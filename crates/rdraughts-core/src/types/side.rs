//! Side to move

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two players. Light starts on squares 31-50 and moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    Light = 0,
    Dark = 1,
}

impl Side {
    /// Get the opponent side
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    /// Index for table lookups (0 or 1)
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Row direction men of this side advance in (-1 for Light, +1 for Dark)
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::Light => -1,
            Side::Dark => 1,
        }
    }

    /// The row a man of this side promotes on
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Side::Light => 0,
            Side::Dark => 9,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Light => write!(f, "W"),
            Side::Dark => write!(f, "B"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Side::Light.opponent(), Side::Dark);
        assert_eq!(Side::Dark.opponent(), Side::Light);
    }

    #[test]
    fn test_forward_direction() {
        assert_eq!(Side::Light.forward(), -1);
        assert_eq!(Side::Dark.forward(), 1);
        assert_eq!(Side::Light.promotion_row(), 0);
        assert_eq!(Side::Dark.promotion_row(), 9);
    }
}
