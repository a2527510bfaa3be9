//! Stateless move service: one request carries the whole position as FEN.
//!
//! This is the shape a web front-end talks to. The caller keeps the FEN, sends it back with
//! the next move, and gets the new FEN plus the moves available to the other side.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Board, FenError, MoveParseError};
use crate::game::{self, GameStatus};

/// Result of a successfully played move
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveResponse {
    pub move_done: bool,
    /// Legal moves for the side now on move, in long algebraic notation
    pub available_moves: Vec<String>,
    pub fen: String,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The FEN could not be decoded
    InvalidFen(FenError),
    /// The move is not legal here; carries what would have been accepted
    IllegalMove {
        mv: String,
        reason: MoveParseError,
        available_moves: Vec<String>,
    },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            ServiceError::IllegalMove { mv, reason, .. } => {
                write!(f, "{mv} is not a legal move ({reason})")
            }
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::InvalidFen(e) => Some(e),
            ServiceError::IllegalMove { reason, .. } => Some(reason),
        }
    }
}

impl From<FenError> for ServiceError {
    fn from(e: FenError) -> Self {
        ServiceError::InvalidFen(e)
    }
}

impl ServiceError {
    /// Moves the caller may retry with (empty unless the move was illegal)
    #[must_use]
    pub fn available_moves(&self) -> &[String] {
        match self {
            ServiceError::IllegalMove {
                available_moves, ..
            } => available_moves,
            ServiceError::InvalidFen(_) => &[],
        }
    }
}

fn move_strings(board: &Board) -> Vec<String> {
    board.legal_moves().iter().map(ToString::to_string).collect()
}

/// Legal moves of the position described by `fen`
pub fn available_moves(fen: &str) -> Result<Vec<String>, ServiceError> {
    let board = Board::try_from_fen(fen)?;
    Ok(move_strings(&board))
}

/// Play `uci` (e.g. `e2e4`) in the position described by `fen`.
///
/// The status is judged on the resulting position alone, so repetition cannot be detected
/// here; keep a [`crate::Game`] for that.
pub fn make_move(fen: &str, uci: &str) -> Result<MoveResponse, ServiceError> {
    let board = Board::try_from_fen(fen)?;
    let mv = board
        .parse_move(uci)
        .map_err(|reason| ServiceError::IllegalMove {
            mv: uci.to_string(),
            reason,
            available_moves: move_strings(&board),
        })?;

    let next = board.apply_move(mv);
    let status = game::status(&next, &[]);
    Ok(MoveResponse {
        move_done: true,
        available_moves: move_strings(&next),
        fen: next.to_fen(),
        is_checkmate: matches!(status, GameStatus::Checkmate { .. }),
        is_stalemate: status == GameStatus::Stalemate,
        status,
    })
}
