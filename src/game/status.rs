//! Game status and terminal-state detection.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::options::GameOptions;
use crate::board::{Board, Color};

/// Why a game ended in a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawReason {
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

/// Where a game stands. Every status but `InProgress` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    #[must_use]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// PGN result token ("1-0", "0-1", "1/2-1/2" or "*")
    #[must_use]
    pub const fn result_token(self) -> &'static str {
        match self {
            GameStatus::InProgress => "*",
            GameStatus::Checkmate {
                winner: Color::White,
            } => "1-0",
            GameStatus::Checkmate {
                winner: Color::Black,
            } => "0-1",
            GameStatus::Stalemate | GameStatus::Draw(_) => "1/2-1/2",
        }
    }
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::FiftyMoveRule => write!(f, "fifty-move rule"),
            DrawReason::ThreefoldRepetition => write!(f, "threefold repetition"),
            DrawReason::InsufficientMaterial => write!(f, "insufficient material"),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Draw(reason) => write!(f, "draw by {reason}"),
        }
    }
}

/// Classify `state`, given how many times its position has occurred so far (itself included).
///
/// Checks run in order: checkmate, stalemate, fifty-move rule, repetition, insufficient
/// material. A rule whose option is disabled (zero limit, or `false`) is skipped.
#[must_use]
pub fn evaluate(state: &Board, occurrences: u32, options: &GameOptions) -> GameStatus {
    if !state.has_legal_moves() {
        return if state.is_in_check() {
            GameStatus::Checkmate {
                winner: state.side_to_move().opponent(),
            }
        } else {
            GameStatus::Stalemate
        };
    }
    if options.fifty_move_plies > 0 && state.halfmove_clock() >= options.fifty_move_plies {
        return GameStatus::Draw(DrawReason::FiftyMoveRule);
    }
    if options.repetition_limit > 0 && occurrences >= options.repetition_limit {
        return GameStatus::Draw(DrawReason::ThreefoldRepetition);
    }
    if options.insufficient_material && state.has_insufficient_material() {
        return GameStatus::Draw(DrawReason::InsufficientMaterial);
    }
    GameStatus::InProgress
}

/// Status of `state` reached through `history`, under the standard rules.
///
/// `history` is the ordered sequence of states from the start of the game. It may end with
/// `state` itself (as [`crate::Game::history`] does) or stop just before it; either way the
/// current position is counted once.
#[must_use]
pub fn status(state: &Board, history: &[Board]) -> GameStatus {
    let key = state.position_key();
    let mut occurrences = history
        .iter()
        .filter(|b| b.position_key() == key)
        .count() as u32;
    if history.last() != Some(state) {
        occurrences += 1;
    }
    evaluate(state, occurrences, &GameOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_order_prefers_mate_over_clock() {
        // mated with the clock at 100: checkmate wins
        let board = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 80");
        let status = evaluate(&board, 1, &GameOptions::default());
        assert_eq!(
            status,
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
        assert_eq!(status.result_token(), "1-0");
    }

    #[test]
    fn test_fifty_move_boundary() {
        let options = GameOptions::default();
        let at_99 = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 99 60");
        assert_eq!(evaluate(&at_99, 1, &options), GameStatus::InProgress);
        let at_100 = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 100 60");
        assert_eq!(
            evaluate(&at_100, 1, &options),
            GameStatus::Draw(DrawReason::FiftyMoveRule)
        );
    }

    #[test]
    fn test_disabled_rules_are_skipped() {
        let options = GameOptions {
            fifty_move_plies: 0,
            repetition_limit: 0,
            insufficient_material: false,
        };
        let bare_kings = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 150 90");
        assert_eq!(evaluate(&bare_kings, 5, &options), GameStatus::InProgress);
        assert_eq!(
            evaluate(&bare_kings, 1, &GameOptions::default()),
            GameStatus::Draw(DrawReason::FiftyMoveRule)
        );
    }

    #[test]
    fn test_status_counts_current_position_once() {
        let start = Board::new();
        let history = vec![start];
        assert_eq!(status(&start, &history), GameStatus::InProgress);
        assert_eq!(status(&start, &[]), GameStatus::InProgress);
        // two earlier occurrences plus the current one
        let history = vec![start, start];
        assert_eq!(
            status(&start, &history),
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        );
    }

    #[test]
    fn test_terminal_and_display() {
        assert!(!GameStatus::InProgress.is_terminal());
        assert!(GameStatus::Stalemate.is_terminal());
        assert_eq!(GameStatus::Stalemate.winner(), None);
        assert_eq!(
            GameStatus::Draw(DrawReason::InsufficientMaterial).to_string(),
            "draw by insufficient material"
        );
    }
}
