//! Legality Filter: reduce pseudo-legal moves to legal ones.
//!
//! Each candidate is applied to a copy of the board and rejected when the mover's king is
//! attacked afterwards. Castling is additionally rejected when the king starts on, or passes
//! over, an attacked square.

use log::trace;

use super::error::IllegalMoveError;
use super::{Board, Move, MoveList, Piece, Square};

impl Board {
    /// All legal moves for the side to move
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let mut legal = MoveList::new();
        for &mv in self.pseudo_legal_moves().iter() {
            match self.check_candidate(mv) {
                Ok(()) => legal.push(mv),
                Err(reason) => trace!("discarding {mv}: {reason}"),
            }
        }
        legal
    }

    /// Whether the side to move has at least one legal move
    #[must_use]
    pub fn has_legal_moves(&self) -> bool {
        self.pseudo_legal_moves()
            .iter()
            .any(|&mv| self.check_candidate(mv).is_ok())
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_legal_moves()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_legal_moves()
    }

    /// Decide whether a pseudo-legal move survives the filter
    fn check_candidate(&self, mv: Move) -> Result<(), IllegalMoveError> {
        let us = self.side_to_move;
        let them = us.opponent();
        let (from, to) = (mv.from(), mv.to());

        if mv.is_castle() {
            let transit = Square::at(from.rank(), (from.file() + to.file()) / 2);
            if self.is_square_attacked(from, them) || self.is_square_attacked(transit, them) {
                return Err(IllegalMoveError::CastlesThroughCheck { from, to });
            }
        }

        if self.apply_move(mv).is_king_attacked(us) {
            return Err(if mv.is_castle() {
                IllegalMoveError::CastlesThroughCheck { from, to }
            } else {
                IllegalMoveError::LeavesKingInCheck { from, to }
            });
        }
        Ok(())
    }

    /// Turn a (from, to, promotion) proposal into the legal move it names.
    ///
    /// Errors are reported in the order a player would notice them: empty origin, wrong
    /// color, bad promotion piece, unreachable destination, promotion choice missing or
    /// extraneous, and finally king safety.
    pub fn resolve_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Move, IllegalMoveError> {
        let (color, _) = self
            .piece_at(from)
            .ok_or(IllegalMoveError::EmptySquare { square: from })?;
        if color != self.side_to_move {
            return Err(IllegalMoveError::WrongSideToMove {
                square: from,
                side_to_move: self.side_to_move,
            });
        }
        if let Some(piece) = promotion {
            if !piece.is_promotion_target() {
                return Err(IllegalMoveError::InvalidPromotionPiece { piece });
            }
        }

        let pseudo = self.pseudo_legal_moves();
        let mut candidates = pseudo.from_square(from).filter(|m| m.to() == to).peekable();
        let Some(&first) = candidates.peek() else {
            return Err(IllegalMoveError::UnreachableSquare { from, to });
        };

        let mv = match (first.is_promotion(), promotion) {
            (true, None) => return Err(IllegalMoveError::MissingPromotion { from, to }),
            (false, Some(_)) => return Err(IllegalMoveError::UnexpectedPromotion { from, to }),
            (false, None) => first,
            (true, Some(piece)) => candidates
                .find(|m| m.promotion_piece() == Some(piece))
                .ok_or(IllegalMoveError::InvalidPromotionPiece { piece })?,
        };

        self.check_candidate(mv)?;
        Ok(mv)
    }

    /// Like [`Board::resolve_move`] but over raw square indices (0 = a1, 63 = h8).
    pub fn resolve_move_index(
        &self,
        from: usize,
        to: usize,
        promotion: Option<Piece>,
    ) -> Result<Move, IllegalMoveError> {
        let square = |index| {
            Square::from_index(index).ok_or(IllegalMoveError::SquareOutOfRange { index })
        };
        self.resolve_move(square(from)?, square(to)?, promotion)
    }

    /// Validate and apply a proposed move in one step
    pub fn propose_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Board, IllegalMoveError> {
        let mv = self.resolve_move(from, to, promotion)?;
        Ok(self.apply_move(mv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial_position_has_twenty_moves() {
        let board = Board::new();
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 20);
        let pawn_moves = moves
            .iter()
            .filter(|m| board.piece_at(m.from()) == Some((Color::White, Piece::Pawn)))
            .count();
        assert_eq!(pawn_moves, 16);
    }

    #[test]
    fn test_pinned_piece_cannot_leave_line() {
        // the e2 knight is pinned by the e8 rook
        let board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(board.legal_moves().from_square(sq("e2")).next().is_none());
        assert_eq!(
            board.resolve_move(sq("e2"), sq("c3"), None),
            Err(IllegalMoveError::LeavesKingInCheck {
                from: sq("e2"),
                to: sq("c3")
            })
        );
    }

    #[test]
    fn test_castling_through_attacked_square_is_rejected() {
        // black rook on f8 covers f1
        let board = Board::from_fen("5rk1/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(board.pseudo_legal_moves().iter().any(|m| m.is_castle()));
        assert!(!board.legal_moves().iter().any(|m| m.is_castle()));
        assert_eq!(
            board.resolve_move(Square::E1, Square::G1, None),
            Err(IllegalMoveError::CastlesThroughCheck {
                from: Square::E1,
                to: Square::G1
            })
        );
    }

    #[test]
    fn test_castling_out_of_check_is_rejected() {
        let board = Board::from_fen("4r1k1/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(board.is_in_check());
        assert!(!board.legal_moves().iter().any(|m| m.is_castle()));
    }

    #[test]
    fn test_queenside_castle_allows_attacked_b_file() {
        // b1 may be attacked; only e1, d1 and c1 matter for the king
        let board = Board::from_fen("1r4k1/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(board.legal_moves().iter().any(|m| m.is_castle()));
    }

    #[test]
    fn test_resolve_reports_reasons() {
        let board = Board::new();
        assert_eq!(
            board.resolve_move(sq("e4"), sq("e5"), None),
            Err(IllegalMoveError::EmptySquare { square: sq("e4") })
        );
        assert_eq!(
            board.resolve_move(sq("e7"), sq("e5"), None),
            Err(IllegalMoveError::WrongSideToMove {
                square: sq("e7"),
                side_to_move: Color::White
            })
        );
        assert_eq!(
            board.resolve_move(sq("e2"), sq("e4"), Some(Piece::Queen)),
            Err(IllegalMoveError::UnexpectedPromotion {
                from: sq("e2"),
                to: sq("e4")
            })
        );
        assert_eq!(
            board.resolve_move_index(12, 64, None),
            Err(IllegalMoveError::SquareOutOfRange { index: 64 })
        );
        assert!(board.resolve_move_index(12, 28, None).is_ok());
    }

    #[test]
    fn test_promotion_choice_is_required() {
        let board = Board::from_fen("7k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            board.resolve_move(sq("e7"), sq("e8"), None),
            Err(IllegalMoveError::MissingPromotion {
                from: sq("e7"),
                to: sq("e8")
            })
        );
        assert_eq!(
            board.resolve_move(sq("e7"), sq("e8"), Some(Piece::King)),
            Err(IllegalMoveError::InvalidPromotionPiece { piece: Piece::King })
        );
        let mv = board.resolve_move(sq("e7"), sq("e8"), Some(Piece::Rook)).unwrap();
        assert_eq!(mv.promotion_piece(), Some(Piece::Rook));
    }

    #[test]
    fn test_mate_and_stalemate_detection() {
        let mated = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(mated.is_checkmate());
        assert!(!mated.is_stalemate());

        let stalemated = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(stalemated.is_stalemate());
        assert!(!stalemated.is_checkmate());
    }
}
