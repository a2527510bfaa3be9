use super::super::attack_tables::PAWN_ATTACKS;
use super::super::{Bitboard, Board, Move, MoveList, Square, PROMOTION_PIECES};

impl Board {
    pub(crate) fn generate_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.side_to_move;
        let promotion_rank = color.pawn_promotion_rank();

        if let Some(forward) = from.offset(color.pawn_direction(), 0) {
            if self.is_empty(forward) {
                if forward.rank() == promotion_rank {
                    for piece in PROMOTION_PIECES {
                        moves.push(Move::promotion(from, forward, piece, false));
                    }
                } else {
                    moves.push(Move::quiet(from, forward));
                    if from.rank() == color.pawn_start_rank() {
                        if let Some(double) = forward.offset(color.pawn_direction(), 0) {
                            if self.is_empty(double) {
                                moves.push(Move::double_pawn_push(from, double));
                            }
                        }
                    }
                }
            }
        }

        let enemy = self.occupied_by(color.opponent());
        let attacks = Bitboard(PAWN_ATTACKS[color.index()][from.index()]);
        for to in attacks.iter() {
            if enemy.contains(to) {
                if to.rank() == promotion_rank {
                    for piece in PROMOTION_PIECES {
                        moves.push(Move::promotion(from, to, piece, true));
                    }
                } else {
                    moves.push(Move::capture(from, to));
                }
            } else if Some(to) == self.en_passant_target {
                moves.push(Move::en_passant(from, to));
            }
        }
    }
}
