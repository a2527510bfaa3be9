use std::fmt;

use crate::zobrist::ZOBRIST;

use super::error::PositionError;
use super::{Bitboard, CastlingRights, Color, Piece, Square};

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// An immutable snapshot of a chess position.
///
/// `Board` is `Copy`; every move produces a new value through [`Board::apply_move`] and the
/// original is never touched. Equality compares every field, including both counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64, // Zobrist key
}

impl Board {
    /// The standard starting position
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (file, piece) in BACK_RANK.iter().enumerate() {
            board.set_piece(Square::at(0, file), Color::White, *piece);
            board.set_piece(Square::at(7, file), Color::Black, *piece);
            board.set_piece(Square::at(1, file), Color::White, Piece::Pawn);
            board.set_piece(Square::at(6, file), Color::Black, Piece::Pawn);
        }
        board.castling_rights = CastlingRights::all();
        board.hash = board.compute_hash();
        board
    }

    /// An empty board with White to move. Not a valid position on its own.
    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            en_passant_target: None,
            castling_rights: CastlingRights::none(),
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// The square a pawn skipped over on the previous double step, if any
    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Plies since the last capture or pawn move
    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// 64-bit key over placement, side to move, castling rights and en passant file.
    ///
    /// Positions that differ only in their move counters share a key.
    #[inline]
    #[must_use]
    pub fn position_key(&self) -> u64 {
        self.hash
    }

    /// Squares holding `piece` of `color`
    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Squares holding any piece of `color`
    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if !self.all_occupied.contains(sq) {
            return None;
        }
        let color = if self.occupied[Color::White.index()].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        Piece::ALL
            .into_iter()
            .find(|p| self.pieces[color.index()][p.index()].contains(sq))
            .map(|p| (color, p))
    }

    /// The whole placement indexed by square, for renderers
    #[must_use]
    pub fn placement(&self) -> [Option<(Color, Piece)>; 64] {
        let mut grid = [None; 64];
        for sq in Square::all() {
            grid[sq.index()] = self.piece_at(sq);
        }
        grid
    }

    #[inline]
    pub(crate) fn is_empty(&self, sq: Square) -> bool {
        !self.all_occupied.contains(sq)
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).first()
    }

    /// Put a piece on an empty square, keeping the hash in step.
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.pieces[color.index()][piece.index()].insert(sq);
        self.occupied[color.index()].insert(sq);
        self.all_occupied.insert(sq);
        self.hash ^= ZOBRIST.piece(color, piece, sq);
    }

    /// Lift whatever stands on `sq`, keeping the hash in step.
    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<(Color, Piece)> {
        let (color, piece) = self.piece_at(sq)?;
        self.pieces[color.index()][piece.index()].remove(sq);
        self.occupied[color.index()].remove(sq);
        self.all_occupied.remove(sq);
        self.hash ^= ZOBRIST.piece(color, piece, sq);
        Some((color, piece))
    }

    /// Recompute the Zobrist key from scratch
    pub(crate) fn compute_hash(&self) -> u64 {
        let keys = &*ZOBRIST;
        let mut hash = 0;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces(color, piece).iter() {
                    hash ^= keys.piece(color, piece, sq);
                }
            }
        }
        hash ^ keys.side(self.side_to_move)
            ^ keys.castling(self.castling_rights)
            ^ keys.en_passant(self.en_passant_target)
    }

    /// Neither side has enough material left to force mate.
    ///
    /// True for bare kings, a single minor piece, or any number of bishops all standing on
    /// squares of one color with no knights on the board.
    #[must_use]
    pub fn has_insufficient_material(&self) -> bool {
        let heavy_or_pawn = [Piece::Pawn, Piece::Rook, Piece::Queen]
            .into_iter()
            .any(|p| !(self.pieces(Color::White, p) | self.pieces(Color::Black, p)).is_empty());
        if heavy_or_pawn {
            return false;
        }

        let knights = self.pieces(Color::White, Piece::Knight) | self.pieces(Color::Black, Piece::Knight);
        let bishops = self.pieces(Color::White, Piece::Bishop) | self.pieces(Color::Black, Piece::Bishop);

        if knights.popcount() + bishops.popcount() <= 1 {
            return true;
        }
        knights.is_empty() && bishops_all_same_color(bishops)
    }

    /// Check the Board State invariants.
    ///
    /// Exactly one king per color, at most 16 pieces per color, no pawn on rank 1 or 8, and an
    /// en passant target (if any) on the square behind a pawn that just double-stepped. The
    /// side not to move must not be in check, otherwise its king could be captured.
    pub fn validate(&self) -> Result<(), PositionError> {
        for color in Color::BOTH {
            let kings = self.pieces(color, Piece::King).popcount();
            if kings != 1 {
                return Err(PositionError::KingCount { color, found: kings });
            }
            let total = self.occupied_by(color).popcount();
            if total > 16 {
                return Err(PositionError::TooManyPieces { color, found: total });
            }
        }

        let waiting = self.side_to_move.opponent();
        if self.is_king_attacked(waiting) {
            return Err(PositionError::OpponentInCheck { color: waiting });
        }

        let pawns = self.pieces(Color::White, Piece::Pawn) | self.pieces(Color::Black, Piece::Pawn);
        if let Some(square) = pawns.iter().find(|sq| sq.rank() == 0 || sq.rank() == 7) {
            return Err(PositionError::PawnOnBackRank { square });
        }

        if let Some(square) = self.en_passant_target {
            // The pawn that double-stepped belongs to the side that just moved.
            let mover = self.side_to_move.opponent();
            let expected_rank = if mover == Color::White { 2 } else { 5 };
            let pawn_square = square.offset(mover.pawn_direction(), 0);
            let pawn_ok = pawn_square
                .is_some_and(|p| self.piece_at(p) == Some((mover, Piece::Pawn)));
            if square.rank() != expected_rank || !self.is_empty(square) || !pawn_ok {
                return Err(PositionError::InvalidEnPassant { square });
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// ASCII diagram, rank 8 at the top, `.` for empty squares
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self
                    .piece_at(Square::at(rank, file))
                    .map_or('.', |(color, piece)| piece.to_fen_char(color));
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    writeln!(f, "{c}")?;
                }
            }
        }
        write!(f, "  a b c d e f g h")
    }
}

fn bishops_all_same_color(bishops: Bitboard) -> bool {
    (bishops & Bitboard::LIGHT_SQUARES).is_empty() || (bishops & Bitboard::DARK_SQUARES).is_empty()
}
