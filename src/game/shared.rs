//! Cloneable handle for hosts that hand one game to several tasks.
//!
//! A [`Game`] is single-owner. `SharedGame` puts it behind a mutex so every call is
//! serialized; each method holds the lock for exactly one controller operation.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::{Game, GameStatus};
use crate::board::{Board, IllegalMoveError, Move, MoveParseError, Piece, Square};

#[derive(Clone, Debug, Default)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl SharedGame {
    #[must_use]
    pub fn new(game: Game) -> Self {
        SharedGame {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Exclusive access for a sequence of operations that must not interleave with others
    pub fn lock(&self) -> MutexGuard<'_, Game> {
        self.inner.lock()
    }

    /// Run `f` with the lock held
    pub fn with<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
        f(&mut self.inner.lock())
    }

    #[must_use]
    pub fn current_state(&self) -> Board {
        *self.inner.lock().current_state()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.inner.lock().status()
    }

    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.inner.lock().legal_moves().iter().copied().collect()
    }

    /// Snapshot of the history at the time of the call
    #[must_use]
    pub fn history(&self) -> Vec<Board> {
        self.inner.lock().history().to_vec()
    }

    pub fn propose_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Board, IllegalMoveError> {
        self.inner.lock().propose_move(from, to, promotion)
    }

    pub fn play_uci(&self, text: &str) -> Result<Move, MoveParseError> {
        self.inner.lock().play_uci(text)
    }

    pub fn undo(&self) -> Option<Move> {
        self.inner.lock().undo()
    }
}

impl From<Game> for SharedGame {
    fn from(game: Game) -> Self {
        SharedGame::new(game)
    }
}
