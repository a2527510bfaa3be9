//! Move Generator: pseudo-legal moves and attack queries.
//!
//! Everything here ignores whether the mover's king ends up attacked; that is the job of the
//! legality filter in `board::legality`.

mod kings;
mod knights;
mod pawns;
mod sliders;

use sliders::SliderType;

use super::attack_tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use super::attack_tables::{bishop_attacks, rook_attacks};
use super::{Bitboard, Board, Color, Move, MoveList, Piece, Square};

impl Board {
    /// All pseudo-legal moves for the side to move.
    ///
    /// Castling is emitted whenever the right is held, the king and rook stand on their start
    /// squares and the squares between them are empty; check safety is not tested here.
    #[must_use]
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let color = self.side_to_move;

        for from in self.pieces(color, Piece::Pawn).iter() {
            self.generate_pawn_moves(from, &mut moves);
        }
        for from in self.pieces(color, Piece::Knight).iter() {
            self.generate_knight_moves(from, &mut moves);
        }
        for from in self.pieces(color, Piece::Bishop).iter() {
            self.generate_slider_moves(from, SliderType::Bishop, &mut moves);
        }
        for from in self.pieces(color, Piece::Rook).iter() {
            self.generate_slider_moves(from, SliderType::Rook, &mut moves);
        }
        for from in self.pieces(color, Piece::Queen).iter() {
            self.generate_slider_moves(from, SliderType::Queen, &mut moves);
        }
        for from in self.pieces(color, Piece::King).iter() {
            self.generate_king_moves(from, &mut moves);
        }
        moves
    }

    /// Push one quiet or capture move per target square
    fn push_targets(&self, from: Square, targets: Bitboard, moves: &mut MoveList) {
        let enemy = self.occupied_by(self.side_to_move.opponent());
        for to in targets.iter() {
            if enemy.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }

    /// Whether any piece of `attacker` attacks `square` in this position
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, attacker: Color) -> bool {
        let idx = square.index();
        let pieces = |p: Piece| self.pieces(attacker, p).0;

        // A pawn of `attacker` hits `square` iff a pawn of the other color on `square` would hit it.
        if pieces(Piece::Pawn) & PAWN_ATTACKS[attacker.opponent().index()][idx] != 0 {
            return true;
        }
        if pieces(Piece::Knight) & KNIGHT_ATTACKS[idx] != 0 {
            return true;
        }
        if pieces(Piece::King) & KING_ATTACKS[idx] != 0 {
            return true;
        }

        let occupancy = self.all_occupied.0;
        let queens = pieces(Piece::Queen);
        if rook_attacks(idx, occupancy) & (pieces(Piece::Rook) | queens) != 0 {
            return true;
        }
        bishop_attacks(idx, occupancy) & (pieces(Piece::Bishop) | queens) != 0
    }

    /// Whether the king of `color` is attacked. A position without that king is never in check.
    #[must_use]
    pub(crate) fn is_king_attacked(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|sq| self.is_square_attacked(sq, color.opponent()))
    }

    /// Whether the side to move is in check
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        self.is_king_attacked(self.side_to_move)
    }
}
