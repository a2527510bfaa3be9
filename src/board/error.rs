//! Error types for board operations.

use std::fmt;

use super::{Color, Piece, Square};

/// A move that is not in the legal set of the position it was proposed in.
///
/// Always recoverable: the state it was proposed against is left untouched and the caller
/// may retry with a different move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    /// A raw square index outside 0..64
    SquareOutOfRange { index: usize },
    /// Nothing stands on the origin square
    EmptySquare { square: Square },
    /// The piece on the origin square belongs to the side not on move
    WrongSideToMove { square: Square, side_to_move: Color },
    /// The piece cannot reach the destination under its movement rules
    UnreachableSquare { from: Square, to: Square },
    /// A pawn reaches the last rank but no promotion piece was chosen
    MissingPromotion { from: Square, to: Square },
    /// A promotion piece was supplied for a move that does not promote
    UnexpectedPromotion { from: Square, to: Square },
    /// Pawns may only promote to a knight, bishop, rook or queen
    InvalidPromotionPiece { piece: Piece },
    /// The move would leave the mover's king attacked
    LeavesKingInCheck { from: Square, to: Square },
    /// Castling out of, through, or into check
    CastlesThroughCheck { from: Square, to: Square },
    /// The game has already reached a terminal status
    GameOver,
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveError::SquareOutOfRange { index } => {
                write!(f, "Square index {index} out of range (must be 0-63)")
            }
            IllegalMoveError::EmptySquare { square } => {
                write!(f, "No piece on {square}")
            }
            IllegalMoveError::WrongSideToMove {
                square,
                side_to_move,
            } => {
                write!(f, "Piece on {square} does not belong to {side_to_move}, who is on move")
            }
            IllegalMoveError::UnreachableSquare { from, to } => {
                write!(f, "Piece on {from} cannot move to {to}")
            }
            IllegalMoveError::MissingPromotion { from, to } => {
                write!(f, "Move {from}{to} requires a promotion piece")
            }
            IllegalMoveError::UnexpectedPromotion { from, to } => {
                write!(f, "Move {from}{to} is not a promotion")
            }
            IllegalMoveError::InvalidPromotionPiece { piece } => {
                write!(f, "Cannot promote to {piece}")
            }
            IllegalMoveError::LeavesKingInCheck { from, to } => {
                write!(f, "Move {from}{to} leaves the king in check")
            }
            IllegalMoveError::CastlesThroughCheck { from, to } => {
                write!(f, "Castling {from}{to} passes through or out of check")
            }
            IllegalMoveError::GameOver => write!(f, "The game is over"),
        }
    }
}

impl std::error::Error for IllegalMoveError {}

/// Violations of the Board State invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Each color must have exactly one king
    KingCount { color: Color, found: u32 },
    /// At most 16 pieces per color
    TooManyPieces { color: Color, found: u32 },
    /// Pawns never stand on rank 1 or rank 8
    PawnOnBackRank { square: Square },
    /// The en passant square does not match the side to move
    InvalidEnPassant { square: Square },
    /// The side that just moved left its own king attacked
    OpponentInCheck { color: Color },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::KingCount { color, found } => {
                write!(f, "{color} must have exactly one king, found {found}")
            }
            PositionError::TooManyPieces { color, found } => {
                write!(f, "{color} has {found} pieces, at most 16 allowed")
            }
            PositionError::PawnOnBackRank { square } => {
                write!(f, "Pawn on back rank square {square}")
            }
            PositionError::InvalidEnPassant { square } => {
                write!(f, "En passant square {square} is not on the expected rank")
            }
            PositionError::OpponentInCheck { color } => {
                write!(f, "{color} is in check but it is not their move")
            }
        }
    }
}

impl std::error::Error for PositionError {}

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    TooFewParts { found: usize },
    /// FEN string has more than 6 fields
    TooManyParts { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// Placement does not have exactly 8 ranks
    InvalidRankCount { found: usize },
    /// A rank does not describe exactly 8 files
    InvalidRankLength { rank: usize, files: usize },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Halfmove clock is not a non-negative integer
    InvalidHalfmoveClock { found: String },
    /// Fullmove number is not a positive integer
    InvalidFullmoveNumber { found: String },
    /// Well-formed FEN describing an impossible position
    InvalidPosition(PositionError),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 fields, found {found}")
            }
            FenError::TooManyParts { found } => {
                write!(f, "FEN must have at most 6 fields, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::InvalidRankLength { rank, files } => {
                write!(f, "FEN rank {rank} describes {files} files, expected 8")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidHalfmoveClock { found } => {
                write!(f, "Invalid halfmove clock '{found}'")
            }
            FenError::InvalidFullmoveNumber { found } => {
                write!(f, "Invalid fullmove number '{found}'")
            }
            FenError::InvalidPosition(e) => write!(f, "Invalid position: {e}"),
        }
    }
}

impl std::error::Error for FenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FenError::InvalidPosition(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PositionError> for FenError {
    fn from(e: PositionError) -> Self {
        FenError::InvalidPosition(e)
    }
}

/// Error type for long algebraic move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Well-formed move that is not legal in the current position
    Illegal(IllegalMoveError),
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::Illegal(e) => write!(f, "Illegal move: {e}"),
        }
    }
}

impl std::error::Error for MoveParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveParseError::Illegal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IllegalMoveError> for MoveParseError {
    fn from(e: IllegalMoveError) -> Self {
        MoveParseError::Illegal(e)
    }
}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Index out of bounds (must be 0-63)
    IndexOutOfBounds { index: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::IndexOutOfBounds { index } => {
                write!(f, "Square index {index} out of bounds (must be 0-63)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for SAN (Standard Algebraic Notation) parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// Empty SAN string
    Empty,
    /// Invalid piece character
    InvalidPiece { char: char },
    /// Invalid square in SAN
    InvalidSquare { notation: String },
    /// Ambiguous move (multiple pieces can reach the target)
    AmbiguousMove { san: String },
    /// No matching legal move found
    NoMatchingMove { san: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// The game has already reached a terminal status
    GameOver,
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "Empty SAN string"),
            SanError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in SAN")
            }
            SanError::InvalidSquare { notation } => {
                write!(f, "Invalid square in SAN '{notation}'")
            }
            SanError::AmbiguousMove { san } => write!(f, "Ambiguous move '{san}'"),
            SanError::NoMatchingMove { san } => write!(f, "No legal move matches '{san}'"),
            SanError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            SanError::GameOver => write!(f, "The game is over"),
        }
    }
}

impl std::error::Error for SanError {}
