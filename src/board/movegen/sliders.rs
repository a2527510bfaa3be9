use super::super::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::{Bitboard, Board, MoveList, Square};

/// Type of sliding piece for move generation
#[derive(Clone, Copy)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl Board {
    /// Sliding moves stop at the first occupied square, which is included when it holds an
    /// enemy piece.
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        slider: SliderType,
        moves: &mut MoveList,
    ) {
        let occupancy = self.all_occupied.0;
        let attacks = match slider {
            SliderType::Bishop => bishop_attacks(from.index(), occupancy),
            SliderType::Rook => rook_attacks(from.index(), occupancy),
            SliderType::Queen => queen_attacks(from.index(), occupancy),
        };
        let targets = Bitboard(attacks) & !self.occupied_by(self.side_to_move);
        self.push_targets(from, targets, moves);
    }
}
