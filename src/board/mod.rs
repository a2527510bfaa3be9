//! Chess board representation and rules.
//!
//! A [`Board`] is an immutable position. The rules pipeline runs leaf-first:
//! pseudo-legal generation (`movegen`), the legality filter (`legality`) and the move
//! executor (`apply`). Positions are built from FEN (`fen`), from a [`BoardBuilder`], or by
//! applying moves to [`Board::new`].
//!
//! # Example
//! ```
//! use chess_rules::board::{Board, Square};
//!
//! let board = Board::new();
//! let moves = board.legal_moves();
//! assert_eq!(moves.len(), 20);
//!
//! let e2 = "e2".parse::<Square>().unwrap();
//! let e4 = "e4".parse::<Square>().unwrap();
//! let next = board.propose_move(e2, e4, None).unwrap();
//! assert_eq!(next.en_passant_target(), "e3".parse().ok());
//! ```

mod apply;
mod attack_tables;
mod builder;
mod error;
mod fen;
mod legality;
mod movegen;
mod perft;
mod san;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::BoardBuilder;
pub use error::{FenError, IllegalMoveError, MoveParseError, PositionError, SanError, SquareError};
pub use fen::START_FEN;
pub use state::Board;
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece, Square,
};

pub(crate) use types::PROMOTION_PIECES;
