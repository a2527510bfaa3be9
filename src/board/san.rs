//! Standard Algebraic Notation (SAN) support.
//!
//! SAN is the notation of scoresheets and PGN files. Examples: "e4", "Nf3", "Bxc6+", "O-O",
//! "e8=Q#"
//!
//! # Examples
//! ```
//! use chess_rules::board::Board;
//!
//! let board = Board::new();
//! let mv = board.parse_san("e4").unwrap();
//! assert_eq!(board.move_to_san(mv), "e4");
//! ```

use super::error::SanError;
use super::{Board, Move, MoveList, Piece, Square};

impl Board {
    /// Format a legal move in Standard Algebraic Notation.
    #[must_use]
    pub fn move_to_san(&self, mv: Move) -> String {
        let mut san = String::new();

        if mv.is_castle() {
            san.push_str(if mv.is_castle_kingside() { "O-O" } else { "O-O-O" });
        } else {
            let piece = self.piece_at(mv.from()).map(|(_, p)| p);
            match piece {
                Some(Piece::Pawn) | None => {
                    if mv.is_capture() {
                        san.push(file_char(mv.from()));
                    }
                }
                Some(p) => {
                    san.push(p.to_char().to_ascii_uppercase());
                    let (needs_file, needs_rank) =
                        self.needs_disambiguation(&self.legal_moves(), mv, p);
                    if needs_file {
                        san.push(file_char(mv.from()));
                    }
                    if needs_rank {
                        san.push(rank_char(mv.from()));
                    }
                }
            }

            if mv.is_capture() {
                san.push('x');
            }
            san.push_str(&mv.to().to_string());

            if let Some(promo) = mv.promotion_piece() {
                san.push('=');
                san.push(promo.to_char().to_ascii_uppercase());
            }
        }

        let next = self.apply_move(mv);
        if next.is_checkmate() {
            san.push('#');
        } else if next.is_in_check() {
            san.push('+');
        }
        san
    }

    /// Returns (`needs_file`, `needs_rank`) for a non-pawn move.
    fn needs_disambiguation(&self, legal: &MoveList, mv: Move, piece: Piece) -> (bool, bool) {
        let rivals: Vec<Square> = legal
            .iter()
            .filter(|m| m.to() == mv.to() && m.from() != mv.from())
            .filter(|m| self.piece_at(m.from()).map(|(_, p)| p) == Some(piece))
            .map(|m| m.from())
            .collect();

        if rivals.is_empty() {
            return (false, false);
        }
        let same_file = rivals.iter().any(|sq| sq.file() == mv.from().file());
        let same_rank = rivals.iter().any(|sq| sq.rank() == mv.from().rank());
        match (same_file, same_rank) {
            (false, _) => (true, false),
            (true, false) => (false, true),
            (true, true) => (true, true),
        }
    }

    /// Parse a move in Standard Algebraic Notation.
    ///
    /// Accepts "e4", "Nf3", "Bxc6", "O-O", "e8=Q" (also "e8Q"), with optional check and
    /// annotation suffixes (`+`, `#`, `!`, `?`). Castling may be written with zeros.
    pub fn parse_san(&self, san: &str) -> Result<Move, SanError> {
        let trimmed = san.trim().trim_end_matches(['+', '#', '!', '?']);
        if trimmed.is_empty() {
            return Err(SanError::Empty);
        }
        let legal = self.legal_moves();

        match trimmed {
            "O-O" | "0-0" => return find_castle(&legal, true, san),
            "O-O-O" | "0-0-0" => return find_castle(&legal, false, san),
            _ => {}
        }

        let mut chars: Vec<char> = trimmed.chars().collect();

        let piece = match chars.first() {
            Some(&c) if c.is_ascii_uppercase() => {
                chars.remove(0);
                Piece::from_char(c).ok_or(SanError::InvalidPiece { char: c })?
            }
            _ => Piece::Pawn,
        };

        // Promotion suffix: "=Q" or a bare trailing piece letter
        let mut promotion = None;
        if let Some(&last) = chars.last() {
            if last.is_ascii_alphabetic() && !('a'..='h').contains(&last) {
                chars.pop();
                if chars.last() == Some(&'=') {
                    chars.pop();
                }
                promotion = match Piece::from_char(last) {
                    Some(p) if p.is_promotion_target() => Some(p),
                    _ => return Err(SanError::InvalidPromotion { char: last }),
                };
            }
        }

        if chars.len() < 2 {
            return Err(SanError::InvalidSquare {
                notation: chars.iter().collect(),
            });
        }
        let dest_text: String = chars[chars.len() - 2..].iter().collect();
        let dest: Square = dest_text
            .parse()
            .map_err(|_| SanError::InvalidSquare { notation: dest_text.clone() })?;

        let mut disambig_file = None;
        let mut disambig_rank = None;
        for &c in &chars[..chars.len() - 2] {
            match c {
                'a'..='h' => disambig_file = Some(c as usize - 'a' as usize),
                '1'..='8' => disambig_rank = Some(c as usize - '1' as usize),
                'x' | '-' | ':' => {}
                other => return Err(SanError::InvalidPiece { char: other }),
            }
        }

        let matching: Vec<Move> = legal
            .iter()
            .copied()
            .filter(|m| !m.is_castle() && m.to() == dest)
            .filter(|m| self.piece_at(m.from()).map(|(_, p)| p) == Some(piece))
            .filter(|m| m.promotion_piece() == promotion)
            .filter(|m| disambig_file.map_or(true, |f| m.from().file() == f))
            .filter(|m| disambig_rank.map_or(true, |r| m.from().rank() == r))
            .collect();

        match matching.as_slice() {
            [] => Err(SanError::NoMatchingMove { san: san.to_string() }),
            [mv] => Ok(*mv),
            _ => Err(SanError::AmbiguousMove { san: san.to_string() }),
        }
    }
}

fn find_castle(legal: &MoveList, kingside: bool, san: &str) -> Result<Move, SanError> {
    legal
        .iter()
        .copied()
        .find(|m| m.is_castle() && m.is_castle_kingside() == kingside)
        .ok_or_else(|| SanError::NoMatchingMove { san: san.to_string() })
}

fn file_char(sq: Square) -> char {
    (b'a' + sq.file() as u8) as char
}

fn rank_char(sq: Square) -> char {
    (b'1' + sq.rank() as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_and_knight_moves() {
        let board = Board::new();
        let mv = board.parse_san("e4").unwrap();
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(board.move_to_san(mv), "e4");

        let mv = board.parse_san("Nf3").unwrap();
        assert_eq!(mv.from(), Square::G1);
        assert_eq!(board.move_to_san(mv), "Nf3");
    }

    #[test]
    fn test_castling() {
        let board = Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let mv = board.parse_san("O-O").unwrap();
        assert!(mv.is_castle_kingside());
        assert_eq!(board.move_to_san(mv), "O-O");

        let mv = board.parse_san("0-0-0").unwrap();
        assert!(mv.is_castle() && !mv.is_castle_kingside());
        assert_eq!(board.move_to_san(mv), "O-O-O");
    }

    #[test]
    fn test_captures() {
        let board = Board::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        let mv = board.parse_san("exd5").unwrap();
        assert!(mv.is_capture());
        assert_eq!(board.move_to_san(mv), "exd5");
    }

    #[test]
    fn test_promotion() {
        let board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        let mv = board.parse_san("a8=Q").unwrap();
        assert_eq!(mv.promotion_piece(), Some(Piece::Queen));
        assert_eq!(board.move_to_san(mv), "a8=Q");
        assert_eq!(board.parse_san("a8N").unwrap().promotion_piece(), Some(Piece::Knight));
        assert_eq!(
            board.parse_san("a8=K"),
            Err(SanError::InvalidPromotion { char: 'K' })
        );
    }

    #[test]
    fn test_disambiguation() {
        let board = Board::from_fen("3k4/8/8/8/R6R/8/8/4K3 w - - 0 1");
        assert_eq!(board.parse_san("Rad4").unwrap().from().file(), 0);
        assert_eq!(board.parse_san("Rhd4").unwrap().from().file(), 7);
        assert!(matches!(board.parse_san("Rd4"), Err(SanError::AmbiguousMove { .. })));
        let mv = board.parse_san("Rad4").unwrap();
        assert_eq!(board.move_to_san(mv), "Rad4+");
    }

    #[test]
    fn test_rank_disambiguation() {
        let board = Board::from_fen("4k3/8/8/R7/8/R7/8/4K3 w - - 0 1");
        let mv = board.parse_san("R3a4").unwrap();
        assert_eq!(mv.from().rank(), 2);
        assert_eq!(board.move_to_san(mv), "R3a4");
    }

    #[test]
    fn test_check_and_mate_suffixes() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        let mv = board.parse_san("Rh8").unwrap();
        assert_eq!(board.move_to_san(mv), "Rh8+");

        let board = Board::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2");
        let mv = board.parse_san("Qh4").unwrap();
        assert_eq!(board.move_to_san(mv), "Qh4#");
    }

    #[test]
    fn test_illegal_san_is_rejected() {
        let board = Board::new();
        assert!(matches!(board.parse_san("e5"), Err(SanError::NoMatchingMove { .. })));
        assert_eq!(board.parse_san("  "), Err(SanError::Empty));
        assert!(matches!(board.parse_san("Nz9"), Err(SanError::InvalidSquare { .. })));
    }

    #[test]
    fn test_every_initial_move_round_trips() {
        let board = Board::new();
        for &mv in board.legal_moves().iter() {
            let san = board.move_to_san(mv);
            assert_eq!(board.parse_san(&san).unwrap(), mv);
        }
    }
}
