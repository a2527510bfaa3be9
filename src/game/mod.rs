//! Game Controller.
//!
//! [`Game`] owns the canonical [`Board`] and the append-only history of every state the game
//! has passed through. Moves enter through [`Game::propose_move`] (or one of the notation
//! front-ends), are validated by the Legality Filter, applied by the Move Executor, and the
//! resulting state is classified into a [`GameStatus`]. Once the status is terminal no
//! further moves are accepted; [`Game::undo`] is the only way back.

mod options;
mod repetition;
mod shared;
mod status;

pub use options::{parse_setoption, GameOptions, OptionError};
pub use shared::SharedGame;
pub use status::{evaluate, status, DrawReason, GameStatus};

use log::{debug, info};

use crate::board::{
    Board, FenError, IllegalMoveError, Move, MoveList, MoveParseError, Piece, SanError, Square,
};
use repetition::RepetitionTable;

/// One game from a starting position to (possibly) a terminal status
#[derive(Clone, Debug)]
pub struct Game {
    /// Every state so far; the last entry is the current state
    history: Vec<Board>,
    current: Board,
    /// Moves applied, `moves[i]` leading from `history[i]` to `history[i + 1]`
    moves: Vec<Move>,
    repetitions: RepetitionTable,
    status: GameStatus,
    options: GameOptions,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// A game from the standard starting position under the standard rules
    #[must_use]
    pub fn new() -> Self {
        Game::from_board(Board::new())
    }

    #[must_use]
    pub fn with_options(options: GameOptions) -> Self {
        Game::from_board_with_options(Board::new(), options)
    }

    /// A game starting from an arbitrary (valid) position
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Game::from_board_with_options(board, GameOptions::default())
    }

    #[must_use]
    pub fn from_board_with_options(board: Board, options: GameOptions) -> Self {
        let mut repetitions = RepetitionTable::new();
        let occurrences = repetitions.increment(board.position_key());
        let status = evaluate(&board, occurrences, &options);
        Game {
            history: vec![board],
            current: board,
            moves: Vec::new(),
            repetitions,
            status,
            options,
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Game::from_board(Board::try_from_fen(fen)?))
    }

    #[must_use]
    pub fn current_state(&self) -> &Board {
        &self.current
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Every state of the game in order, starting position first and current state last
    #[must_use]
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    /// Moves played so far, in order
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[must_use]
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Replace the rule configuration.
    ///
    /// A game in progress is re-classified under the new rules, so it may end here. A game
    /// that is already over keeps its result; the options only apply to later evaluations,
    /// such as after an [`undo`](Game::undo).
    pub fn set_options(&mut self, options: GameOptions) {
        self.options = options;
        if !self.status.is_terminal() {
            self.refresh_status();
        }
    }

    /// How many times the current position has occurred, itself included
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.get(self.current.position_key())
    }

    /// Legal moves in the current state; empty once the game is over
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        if self.status.is_terminal() {
            MoveList::default()
        } else {
            self.current.legal_moves()
        }
    }

    /// Validate a move given by its squares and, if legal, play it.
    ///
    /// On error nothing changes. Returns the new current state.
    pub fn propose_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Board, IllegalMoveError> {
        self.ensure_in_progress()?;
        let mv = self
            .current
            .resolve_move(from, to, promotion)
            .inspect_err(|e| debug!("rejected {from}{to}: {e}"))?;
        Ok(self.record(mv))
    }

    /// [`Game::propose_move`] over raw square indices (0 = a1, 63 = h8)
    pub fn propose_move_index(
        &mut self,
        from: usize,
        to: usize,
        promotion: Option<Piece>,
    ) -> Result<Board, IllegalMoveError> {
        self.ensure_in_progress()?;
        let mv = self
            .current
            .resolve_move_index(from, to, promotion)
            .inspect_err(|e| debug!("rejected {from}->{to}: {e}"))?;
        Ok(self.record(mv))
    }

    /// Play a move value, typically one taken from [`Game::legal_moves`]
    pub fn play_move(&mut self, mv: Move) -> Result<Board, IllegalMoveError> {
        self.ensure_in_progress()?;
        let next = self
            .current
            .try_apply_move(mv)
            .inspect_err(|e| debug!("rejected {mv}: {e}"))?;
        Ok(self.push_state(mv, next))
    }

    /// Play a move in long algebraic notation (`e2e4`, `e7e8q`)
    pub fn play_uci(&mut self, text: &str) -> Result<Move, MoveParseError> {
        self.ensure_in_progress()?;
        let mv = self
            .current
            .parse_move(text)
            .inspect_err(|e| debug!("rejected '{text}': {e}"))?;
        self.record(mv);
        Ok(mv)
    }

    /// Play a move in Standard Algebraic Notation (`Nf3`, `exd5`, `O-O`)
    pub fn play_san(&mut self, san: &str) -> Result<Move, SanError> {
        if self.status.is_terminal() {
            return Err(SanError::GameOver);
        }
        let mv = self
            .current
            .parse_san(san)
            .inspect_err(|e| debug!("rejected '{san}': {e}"))?;
        self.record(mv);
        Ok(mv)
    }

    /// Take back the last move, returning it, or `None` at the starting position.
    ///
    /// Works from terminal states too; the status is re-evaluated for the restored state.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        if let Some(undone) = self.history.pop() {
            self.repetitions.decrement(undone.position_key());
        }
        if let Some(&previous) = self.history.last() {
            self.current = previous;
        }
        self.refresh_status();
        debug!("undid {mv}");
        Some(mv)
    }

    fn ensure_in_progress(&self) -> Result<(), IllegalMoveError> {
        if self.status.is_terminal() {
            Err(IllegalMoveError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Apply an already-validated move and classify the result
    fn record(&mut self, mv: Move) -> Board {
        let next = self.current.apply_move(mv);
        self.push_state(mv, next)
    }

    fn push_state(&mut self, mv: Move, next: Board) -> Board {
        let occurrences = self.repetitions.increment(next.position_key());
        self.history.push(next);
        self.moves.push(mv);
        self.current = next;
        self.status = evaluate(&next, occurrences, &self.options);
        debug!("played {mv}, now {}", next.to_fen());
        if self.status.is_terminal() {
            info!("game over after {} plies: {}", self.moves.len(), self.status);
        }
        next
    }

    fn refresh_status(&mut self) {
        self.status = evaluate(&self.current, self.repetition_count(), &self.options);
    }
}

impl From<Board> for Game {
    fn from(board: Board) -> Self {
        Game::from_board(board)
    }
}
