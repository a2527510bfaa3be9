//! Chess rules core: board state, legal move generation, move execution and game status.
//!
//! The free functions below are the narrow interface a presentation layer needs. Anything
//! richer (history, undo, notation, draw options) goes through [`Game`].
//!
//! ```
//! use chess_rules::{initial_state, legal_moves, propose_move, status, GameStatus, Square};
//!
//! let start = initial_state();
//! assert_eq!(legal_moves(&start).len(), 20);
//!
//! let e2: Square = "e2".parse().unwrap();
//! let e4: Square = "e4".parse().unwrap();
//! let next = propose_move(&start, e2, e4, None).unwrap();
//! assert_eq!(status(&next, &[start]), GameStatus::InProgress);
//! ```

pub mod analyzer;
pub mod board;
pub mod game;
pub mod pgn;
pub mod protocol;
pub mod service;
mod zobrist;

pub use board::{
    Board, BoardBuilder, CastlingRights, Color, FenError, IllegalMoveError, Move, MoveList,
    MoveParseError, Piece, SanError, Square, START_FEN,
};
pub use game::{DrawReason, Game, GameOptions, GameStatus, SharedGame};

/// The standard starting position
#[must_use]
pub fn initial_state() -> Board {
    Board::new()
}

/// Validate `from`-`to` (with an optional promotion piece) against `state` and apply it.
///
/// `state` itself is never modified.
pub fn propose_move(
    state: &Board,
    from: Square,
    to: Square,
    promotion: Option<Piece>,
) -> Result<Board, IllegalMoveError> {
    state.propose_move(from, to, promotion)
}

/// Every legal move in `state`
#[must_use]
pub fn legal_moves(state: &Board) -> MoveList {
    state.legal_moves()
}

/// Status of `state` given the states that preceded it; see [`game::status`]
#[must_use]
pub fn status(state: &Board, history: &[Board]) -> GameStatus {
    game::status(state, history)
}
