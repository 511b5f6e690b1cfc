//! Board position
//!
//! A `Position` is an array of 51 optional piece slots (index 0 unused, so
//! the 1-50 square number indexes directly). Positions are values: applying
//! a move produces a new position, the old one is never mutated. This keeps
//! search branches and game history independent without undo bookkeeping.

use crate::error::EngineError;
use crate::types::{Move, Piece, PieceKind, Side, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable board position.
///
/// `first_promotion` records which side promoted first in the current game;
/// the evaluator pays a one-time bonus for it. It travels with the position
/// so evaluation stays a pure function of its inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    #[serde(with = "board_serde")]
    board: [Option<Piece>; 51],
    first_promotion: Option<Side>,
}

impl Position {
    /// Empty board
    pub const fn empty() -> Position {
        Position { board: [None; 51], first_promotion: None }
    }

    /// Standard initial position: Dark men on 1-20, Light men on 31-50
    pub fn initial() -> Position {
        let mut pos = Position::empty();
        for n in 1..=20u8 {
            pos.board[n as usize] = Some(Piece::man(Side::Dark));
        }
        for n in 31..=50u8 {
            pos.board[n as usize] = Some(Piece::man(Side::Light));
        }
        pos
    }

    /// Piece on a square, if any
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.board[sq.index()].is_none()
    }

    /// Place a piece during position setup
    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.board[sq.index()] = Some(piece);
    }

    /// Remove a piece during position setup
    pub fn remove_piece(&mut self, sq: Square) {
        self.board[sq.index()] = None;
    }

    /// Which side promoted first in this game, if any
    #[inline]
    pub fn first_promotion(&self) -> Option<Side> {
        self.first_promotion
    }

    /// Occupied squares with their pieces
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.board[sq.index()].map(|p| (sq, p)))
    }

    /// Count of men of a side
    pub fn man_count(&self, side: Side) -> u32 {
        self.pieces()
            .filter(|(_, p)| p.is_side(side) && p.kind == PieceKind::Man)
            .count() as u32
    }

    /// Count of kings of a side
    pub fn king_count(&self, side: Side) -> u32 {
        self.pieces()
            .filter(|(_, p)| p.is_side(side) && p.kind == PieceKind::King)
            .count() as u32
    }

    /// Count of all pieces of a side
    pub fn piece_count(&self, side: Side) -> u32 {
        self.pieces().filter(|(_, p)| p.is_side(side)).count() as u32
    }

    /// Count of all pieces on the board
    pub fn total_pieces(&self) -> u32 {
        self.pieces().count() as u32
    }

    /// Apply a move for `side`, returning the resulting position.
    ///
    /// The move is assumed legal; use [`Position::try_apply`] for
    /// caller-supplied moves. Captured pieces are removed only here, after
    /// the whole sequence - during generation they stay on the board.
    ///
    /// Panics if the capture sequence names the same captured square twice;
    /// that cannot arise from the generator and indicates a defect.
    pub fn apply(&self, mv: &Move, side: Side) -> Position {
        let from = mv.from();
        let to = mv.to();
        let piece = self.board[from.index()].expect("move origin must be occupied");
        debug_assert!(piece.is_side(side));

        let mut next = self.clone();
        next.board[from.index()] = None;
        for captured in mv.captured_squares() {
            assert!(
                next.board[captured.index()].is_some(),
                "capture sequence revisits square {captured}"
            );
            next.board[captured.index()] = None;
        }

        // Promotion happens only at the end of the move; a man passing over
        // the back row mid-sequence stays a man.
        let rests_on_back_row = to.row() == side.promotion_row();
        let placed = if piece.kind == PieceKind::Man && rests_on_back_row {
            if next.first_promotion.is_none() {
                next.first_promotion = Some(side);
            }
            piece.promoted()
        } else {
            piece
        };
        next.board[to.index()] = Some(placed);
        next
    }

    /// Apply a caller-supplied move after validating it against the legal
    /// move list. On failure the position is untouched.
    pub fn try_apply(&self, mv: &Move, side: Side) -> Result<Position, EngineError> {
        let legal = crate::movegen::generate_legal_moves(self, side);
        if !legal.contains(mv) {
            return Err(EngineError::IllegalMove);
        }
        Ok(self.apply(mv, side))
    }

    /// Render as draughts FEN, e.g. `W:W31-50:B1-20` (K prefixes kings).
    pub fn to_fen(&self, side_to_move: Side) -> String {
        let mut fen = format!("{side_to_move}");
        for side in [Side::Light, Side::Dark] {
            fen.push(':');
            fen.push_str(&side.to_string());
            let mut first = true;
            for (sq, piece) in self.pieces().filter(|(_, p)| p.is_side(side)) {
                if !first {
                    fen.push(',');
                }
                if piece.kind == PieceKind::King {
                    fen.push('K');
                }
                fen.push_str(&sq.to_string());
                first = false;
            }
        }
        fen
    }

    /// Parse draughts FEN. Accepts ranges (`31-50`) and `K` king prefixes;
    /// returns the position and the side to move.
    pub fn from_fen(fen: &str) -> Result<(Position, Side), EngineError> {
        let mut parts = fen.trim().split(':');
        let turn = match parts.next() {
            Some("W") => Side::Light,
            Some("B") => Side::Dark,
            _ => return Err(EngineError::InvalidNotation("expected W or B side to move")),
        };

        let mut pos = Position::empty();
        for part in parts {
            let (side, body) = match part.split_at_checked(1) {
                Some(("W", body)) => (Side::Light, body),
                Some(("B", body)) => (Side::Dark, body),
                _ => return Err(EngineError::InvalidNotation("expected W or B piece list")),
            };
            for item in body.split(',').filter(|s| !s.is_empty()) {
                let (kind, numbers) = match item.strip_prefix('K') {
                    Some(rest) => (PieceKind::King, rest),
                    None => (PieceKind::Man, item),
                };
                let (lo, hi) = match numbers.split_once('-') {
                    Some((a, b)) => (parse_square_number(a)?, parse_square_number(b)?),
                    None => {
                        let n = parse_square_number(numbers)?;
                        (n, n)
                    }
                };
                if lo > hi {
                    return Err(EngineError::InvalidNotation("descending square range"));
                }
                for n in lo..=hi {
                    pos.set_piece(Square::new(n)?, Piece::new(kind, side));
                }
            }
        }
        Ok((pos, turn))
    }
}

fn parse_square_number(s: &str) -> Result<u8, EngineError> {
    s.parse::<u8>().map_err(|_| EngineError::InvalidNotation("expected a square number"))
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..10i8 {
            for col in 0..10i8 {
                let cell = match Square::from_coords(row, col) {
                    Some(sq) => match self.piece_at(sq) {
                        Some(p) => p.to_string(),
                        None => ".".to_string(),
                    },
                    None => " ".to_string(),
                };
                write!(f, "{cell} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

mod board_serde {
    use crate::types::Piece;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        board: &[Option<Piece>; 51],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        board.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[Option<Piece>; 51], D::Error> {
        let slots: Vec<Option<Piece>> = Vec::deserialize(deserializer)?;
        slots
            .try_into()
            .map_err(|_| D::Error::custom("board must have exactly 51 slots"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    use crate::types::CaptureStep;

    fn sq(n: u8) -> Square {
        Square::from_number(n)
    }

    #[test]
    fn test_initial_position_counts() {
        let pos = Position::initial();
        assert_eq!(pos.man_count(Side::Dark), 20);
        assert_eq!(pos.man_count(Side::Light), 20);
        assert_eq!(pos.king_count(Side::Dark), 0);
        assert_eq!(pos.king_count(Side::Light), 0);
        assert_eq!(pos.total_pieces(), 40);
        assert_eq!(pos.piece_at(sq(1)), Some(Piece::man(Side::Dark)));
        assert_eq!(pos.piece_at(sq(50)), Some(Piece::man(Side::Light)));
        assert!(pos.is_empty_at(sq(25)));
    }

    #[test]
    fn test_apply_quiet_move() {
        let pos = Position::initial();
        let next = pos.apply(&Move::quiet(sq(32), sq(28)), Side::Light);

        // Old position untouched, new one updated
        assert_eq!(pos.piece_at(sq(32)), Some(Piece::man(Side::Light)));
        assert!(next.is_empty_at(sq(32)));
        assert_eq!(next.piece_at(sq(28)), Some(Piece::man(Side::Light)));
    }

    #[test]
    fn test_apply_capture_removes_after_sequence() {
        let mut pos = Position::empty();
        pos.set_piece(sq(33), Piece::man(Side::Light));
        pos.set_piece(sq(28), Piece::man(Side::Dark));
        pos.set_piece(sq(18), Piece::man(Side::Dark));

        let mv = Move::capture(smallvec![
            CaptureStep { from: sq(33), to: sq(22), captured: sq(28) },
            CaptureStep { from: sq(22), to: sq(13), captured: sq(18) },
        ]);
        let next = pos.apply(&mv, Side::Light);
        assert!(next.is_empty_at(sq(33)));
        assert!(next.is_empty_at(sq(28)));
        assert!(next.is_empty_at(sq(18)));
        assert_eq!(next.piece_at(sq(13)), Some(Piece::man(Side::Light)));
        assert_eq!(next.total_pieces(), 1);
    }

    #[test]
    fn test_promotion_at_rest_only() {
        let mut pos = Position::empty();
        pos.set_piece(sq(6), Piece::man(Side::Light));
        let next = pos.apply(&Move::quiet(sq(6), sq(1)), Side::Light);
        assert_eq!(next.piece_at(sq(1)), Some(Piece::king(Side::Light)));
        assert_eq!(next.first_promotion(), Some(Side::Light));

        // A capture passing over the back row does not promote
        let mut pos = Position::empty();
        pos.set_piece(sq(12), Piece::man(Side::Light));
        pos.set_piece(sq(8), Piece::man(Side::Dark));
        pos.set_piece(sq(9), Piece::man(Side::Dark));
        let mv = Move::capture(smallvec![
            CaptureStep { from: sq(12), to: sq(3), captured: sq(8) },
            CaptureStep { from: sq(3), to: sq(14), captured: sq(9) },
        ]);
        let next = pos.apply(&mv, Side::Light);
        assert_eq!(next.piece_at(sq(14)), Some(Piece::man(Side::Light)));
        assert_eq!(next.first_promotion(), None);
    }

    #[test]
    fn test_first_promotion_is_sticky() {
        let mut pos = Position::empty();
        pos.set_piece(sq(6), Piece::man(Side::Light));
        pos.set_piece(sq(44), Piece::man(Side::Dark));
        let pos = pos.apply(&Move::quiet(sq(6), sq(1)), Side::Light);
        let pos = pos.apply(&Move::quiet(sq(44), sq(50)), Side::Dark);
        assert_eq!(pos.first_promotion(), Some(Side::Light));
    }

    #[test]
    fn test_try_apply_rejects_illegal() {
        let pos = Position::initial();
        // Backward quiet move for a man
        let err = pos.try_apply(&Move::quiet(sq(32), sq(37)), Side::Light);
        assert_eq!(err, Err(EngineError::IllegalMove));
        // Position unchanged
        assert_eq!(pos, Position::initial());
    }

    #[test]
    #[should_panic(expected = "revisits")]
    fn test_double_capture_of_same_square_panics() {
        let mut pos = Position::empty();
        pos.set_piece(sq(33), Piece::king(Side::Light));
        pos.set_piece(sq(28), Piece::man(Side::Dark));
        let mv = Move::capture(smallvec![
            CaptureStep { from: sq(33), to: sq(22), captured: sq(28) },
            CaptureStep { from: sq(22), to: sq(33), captured: sq(28) },
        ]);
        let _ = pos.apply(&mv, Side::Light);
    }

    #[test]
    fn test_fen_roundtrip() {
        let pos = Position::initial();
        let fen = pos.to_fen(Side::Light);
        let (parsed, side) = Position::from_fen(&fen).unwrap();
        assert_eq!(parsed, pos);
        assert_eq!(side, Side::Light);
    }

    #[test]
    fn test_fen_ranges_and_kings() {
        let (pos, side) = Position::from_fen("B:WK28,31-33:B1-5,K50").unwrap();
        assert_eq!(side, Side::Dark);
        assert_eq!(pos.piece_at(sq(28)), Some(Piece::king(Side::Light)));
        assert_eq!(pos.man_count(Side::Light), 3);
        assert_eq!(pos.man_count(Side::Dark), 5);
        assert_eq!(pos.piece_at(sq(50)), Some(Piece::king(Side::Dark)));
    }

    #[test]
    fn test_fen_rejects_garbage() {
        assert!(Position::from_fen("X:W1").is_err());
        assert!(Position::from_fen("W:W0").is_err());
        assert!(Position::from_fen("W:W51").is_err());
        assert!(Position::from_fen("W:W9-3").is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let pos = Position::initial();
        let json = serde_json::to_string(&pos).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);
    }
}
