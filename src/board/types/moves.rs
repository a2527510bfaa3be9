//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

// Move flags (4 bits)
const FLAG_QUIET: u16 = 0;
const FLAG_DOUBLE_PAWN: u16 = 1;
const FLAG_CASTLE_KINGSIDE: u16 = 2;
const FLAG_CASTLE_QUEENSIDE: u16 = 3;
const FLAG_CAPTURE: u16 = 4;
const FLAG_EN_PASSANT: u16 = 5;
const FLAG_PROMO_KNIGHT: u16 = 8;
const FLAG_PROMO_BISHOP: u16 = 9;
const FLAG_PROMO_ROOK: u16 = 10;
const FLAG_PROMO_QUEEN: u16 = 11;
// A promotion that also captures sets this bit on top of the promotion flag
const FLAG_PROMO_CAPTURE_BIT: u16 = 4;

/// Compact 16-bit move.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-15: flags (move type)
///
/// A `Move` is a proposed transition; it says nothing about legality until it has been
/// matched against [`Board::legal_moves`](crate::board::Board::legal_moves).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

impl Move {
    #[inline]
    const fn with_flag(from: Square, to: Square, flag: u16) -> Self {
        Move(from.index() as u16 | ((to.index() as u16) << 6) | (flag << 12))
    }

    /// A non-capturing move with no special effect
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move::with_flag(from, to, FLAG_QUIET)
    }

    /// A capture of the piece standing on `to`
    #[inline]
    #[must_use]
    pub const fn capture(from: Square, to: Square) -> Self {
        Move::with_flag(from, to, FLAG_CAPTURE)
    }

    /// A pawn advancing two squares from its start rank
    #[inline]
    #[must_use]
    pub const fn double_pawn_push(from: Square, to: Square) -> Self {
        Move::with_flag(from, to, FLAG_DOUBLE_PAWN)
    }

    /// An en passant capture; `to` is the en passant target square
    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move::with_flag(from, to, FLAG_EN_PASSANT)
    }

    /// Castling, encoded as the king's two-square step
    #[inline]
    #[must_use]
    pub const fn castle(from: Square, to: Square, kingside: bool) -> Self {
        let flag = if kingside {
            FLAG_CASTLE_KINGSIDE
        } else {
            FLAG_CASTLE_QUEENSIDE
        };
        Move::with_flag(from, to, flag)
    }

    /// A pawn promotion; non-promotable piece types fall back to a queen
    #[inline]
    #[must_use]
    pub const fn promotion(from: Square, to: Square, piece: Piece, capture: bool) -> Self {
        let mut flag = match piece {
            Piece::Knight => FLAG_PROMO_KNIGHT,
            Piece::Bishop => FLAG_PROMO_BISHOP,
            Piece::Rook => FLAG_PROMO_ROOK,
            _ => FLAG_PROMO_QUEEN,
        };
        if capture {
            flag |= FLAG_PROMO_CAPTURE_BIT;
        }
        Move::with_flag(from, to, flag)
    }

    /// Get the source square
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index_unchecked((self.0 & 0x3F) as usize)
    }

    /// Get the destination square
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index_unchecked(((self.0 >> 6) & 0x3F) as usize)
    }

    #[inline]
    const fn flag(self) -> u16 {
        self.0 >> 12
    }

    /// Returns true if this move captures a piece (including en passant)
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        let f = self.flag();
        f == FLAG_CAPTURE
            || f == FLAG_EN_PASSANT
            || (f >= FLAG_PROMO_KNIGHT && f & FLAG_PROMO_CAPTURE_BIT != 0)
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.flag() == FLAG_EN_PASSANT
    }

    /// Returns true if this move is castling (kingside or queenside)
    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        let f = self.flag();
        f == FLAG_CASTLE_KINGSIDE || f == FLAG_CASTLE_QUEENSIDE
    }

    #[inline]
    #[must_use]
    pub const fn is_castle_kingside(self) -> bool {
        self.flag() == FLAG_CASTLE_KINGSIDE
    }

    #[inline]
    #[must_use]
    pub const fn is_double_pawn_push(self) -> bool {
        self.flag() == FLAG_DOUBLE_PAWN
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.flag() >= FLAG_PROMO_KNIGHT
    }

    /// Get the promotion piece, if this is a promotion move
    #[inline]
    #[must_use]
    pub const fn promotion_piece(self) -> Option<Piece> {
        if !self.is_promotion() {
            return None;
        }
        match self.flag() & !FLAG_PROMO_CAPTURE_BIT {
            FLAG_PROMO_KNIGHT => Some(Piece::Knight),
            FLAG_PROMO_BISHOP => Some(Piece::Bishop),
            FLAG_PROMO_ROOK => Some(Piece::Rook),
            _ => Some(Piece::Queen),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if self.is_capture() {
            write!(f, " cap")?;
        }
        if self.is_castle() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        write!(f, ")")
    }
}

/// Long algebraic notation: `e2e4`, `e7e8q`
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// Upper bound on the moves of any reachable position (218) with headroom
pub(crate) const MAX_MOVES: usize = 256;

/// List of moves with fixed-size backing array.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub(crate) fn new() -> Self {
        MoveList {
            moves: [Move(0); MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    /// Moves leaving `from`
    pub fn from_square(&self, from: Square) -> impl Iterator<Item = Move> + '_ {
        self.iter().copied().filter(move |m| m.from() == from)
    }

    /// Destination squares reachable from `from`, without duplicates
    #[must_use]
    pub fn destinations(&self, from: Square) -> Vec<Square> {
        let mut squares: Vec<Square> = self.from_square(from).map(Move::to).collect();
        squares.sort_unstable();
        squares.dedup();
        squares
    }

    /// Find the move matching a from/to pair and promotion choice
    #[must_use]
    pub fn find(&self, from: Square, to: Square, promotion: Option<Piece>) -> Option<Move> {
        self.iter()
            .copied()
            .find(|m| m.from() == from && m.to() == to && m.promotion_piece() == promotion)
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.list.len {
            let mv = self.list.moves[self.idx];
            self.idx += 1;
            Some(mv)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_encoding_keeps_squares() {
        let mv = Move::quiet(sq("g1"), sq("f3"));
        assert_eq!(mv.from(), sq("g1"));
        assert_eq!(mv.to(), sq("f3"));
        assert!(!mv.is_capture());
        assert_eq!(mv.to_string(), "g1f3");
    }

    #[test]
    fn test_promotion_flags() {
        let quiet = Move::promotion(sq("a7"), sq("a8"), Piece::Knight, false);
        let capture = Move::promotion(sq("a7"), sq("b8"), Piece::Rook, true);
        assert_eq!(quiet.promotion_piece(), Some(Piece::Knight));
        assert!(!quiet.is_capture());
        assert_eq!(capture.promotion_piece(), Some(Piece::Rook));
        assert!(capture.is_capture());
        assert_eq!(capture.to_string(), "a7b8r");
    }

    #[test]
    fn test_special_flags() {
        let ep = Move::en_passant(sq("e5"), sq("d6"));
        assert!(ep.is_en_passant() && ep.is_capture());
        let castle = Move::castle(Square::E1, Square::C1, false);
        assert!(castle.is_castle() && !castle.is_castle_kingside());
        assert_eq!(castle.promotion_piece(), None);
        assert!(Move::double_pawn_push(sq("e2"), sq("e4")).is_double_pawn_push());
    }

    #[test]
    fn test_move_list_queries() {
        let mut list = MoveList::new();
        list.push(Move::promotion(sq("b7"), sq("b8"), Piece::Queen, false));
        list.push(Move::promotion(sq("b7"), sq("b8"), Piece::Knight, false));
        list.push(Move::quiet(sq("a1"), sq("a2")));
        assert_eq!(list.len(), 3);
        assert_eq!(list.destinations(sq("b7")), vec![sq("b8")]);
        assert!(list
            .find(sq("b7"), sq("b8"), Some(Piece::Knight))
            .is_some());
        assert!(list.find(sq("b7"), sq("b8"), None).is_none());
        assert_eq!(list.into_iter().count(), 3);
    }
}
