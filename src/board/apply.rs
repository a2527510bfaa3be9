//! Move Executor: copy-make application of a single move.

use crate::zobrist::ZOBRIST;

use super::error::IllegalMoveError;
use super::{Board, Color, Move, Piece, Square};

impl Board {
    /// Apply `mv` and return the resulting position; `self` is left untouched.
    ///
    /// The move is assumed to come from [`Board::legal_moves`]. Handles the rook hop for
    /// castling, removal of the pawn captured en passant, promotion, and updates castling
    /// rights, en passant target, both counters and the side to move. A move whose origin
    /// square is empty yields an unchanged copy.
    #[must_use]
    pub fn apply_move(&self, mv: Move) -> Board {
        let mut next = *self;
        let keys = &*ZOBRIST;
        let us = self.side_to_move;
        let from = mv.from();
        let to = mv.to();

        let Some((_, moved)) = next.remove_piece(from) else {
            return next;
        };

        let captured = if mv.is_en_passant() {
            // the captured pawn sits beside the capturer, on the capturer's rank
            next.remove_piece(Square::at(from.rank(), to.file()))
        } else {
            next.remove_piece(to)
        };

        let placed = mv.promotion_piece().unwrap_or(moved);
        next.set_piece(to, us, placed);

        if mv.is_castle() {
            let rank = from.rank();
            let (rook_from, rook_to) = if mv.is_castle_kingside() {
                (Square::at(rank, 7), Square::at(rank, 5))
            } else {
                (Square::at(rank, 0), Square::at(rank, 3))
            };
            if let Some((color, rook)) = next.remove_piece(rook_from) {
                next.set_piece(rook_to, color, rook);
            }
        }

        next.hash ^= keys.castling(next.castling_rights);
        next.castling_rights.touch(from);
        next.castling_rights.touch(to);
        next.hash ^= keys.castling(next.castling_rights);

        next.hash ^= keys.en_passant(next.en_passant_target);
        next.en_passant_target = if mv.is_double_pawn_push() {
            Square::new((from.rank() + to.rank()) / 2, from.file())
        } else {
            None
        };
        next.hash ^= keys.en_passant(next.en_passant_target);

        if moved == Piece::Pawn || captured.is_some() {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }

        next.hash ^= keys.side(us) ^ keys.side(us.opponent());
        next.side_to_move = us.opponent();
        next
    }

    /// Apply `mv` only if it is a member of the legal move set.
    ///
    /// On failure the error names the first reason the move is rejected.
    pub fn try_apply_move(&self, mv: Move) -> Result<Board, IllegalMoveError> {
        if self.legal_moves().contains(mv) {
            return Ok(self.apply_move(mv));
        }
        // Resolve by squares to find out why; a resolvable but different move means the
        // flags of `mv` do not describe what the piece can do.
        match self.resolve_move(mv.from(), mv.to(), mv.promotion_piece()) {
            Err(e) => Err(e),
            Ok(_) => Err(IllegalMoveError::UnreachableSquare {
                from: mv.from(),
                to: mv.to(),
            }),
        }
    }
}
