use super::super::attack_tables::KING_ATTACKS;
use super::super::{Bitboard, Board, Move, MoveList, Piece, Square};

impl Board {
    pub(crate) fn generate_king_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.side_to_move;
        let own = self.occupied_by(color);
        let targets = Bitboard(KING_ATTACKS[from.index()]) & !own;
        self.push_targets(from, targets, moves);

        let back_rank = color.back_rank();
        if from != Square::at(back_rank, 4) {
            return;
        }
        let rook = Some((color, Piece::Rook));

        if self.castling_rights.has(color, true)
            && self.is_empty(Square::at(back_rank, 5))
            && self.is_empty(Square::at(back_rank, 6))
            && self.piece_at(Square::at(back_rank, 7)) == rook
        {
            moves.push(Move::castle(from, Square::at(back_rank, 6), true));
        }
        if self.castling_rights.has(color, false)
            && self.is_empty(Square::at(back_rank, 1))
            && self.is_empty(Square::at(back_rank, 2))
            && self.is_empty(Square::at(back_rank, 3))
            && self.piece_at(Square::at(back_rank, 0)) == rook
        {
            moves.push(Move::castle(from, Square::at(back_rank, 2), false));
        }
    }
}
