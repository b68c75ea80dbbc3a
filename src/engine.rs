//! The owned game engine: current state plus the store every successful
//! mutation is written to. This is the whole surface a front end needs.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::GameConfig;
use crate::error::StoreError;
use crate::game::{GameState, MoveError, Placement, PlayerId};
use crate::persistence::SnapshotStore;

/// What happened to a requested move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted(Placement),
    Rejected(MoveError),
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted(_))
    }
}

pub struct Engine<S> {
    config: GameConfig,
    state: GameState,
    store: S,
}

impl<S: SnapshotStore> Engine<S> {
    /// Create an engine in the canonical starting state. Nothing is read
    /// from or written to the store until asked.
    pub fn new(config: GameConfig, store: S) -> Self {
        let state = GameState::initial(config.board_size(), config.seats());
        Engine {
            config,
            state,
            store,
        }
    }

    /// Read-only view of the current game
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Throw away the current game and start over from the configured
    /// board size and players. Does not save.
    pub fn initialize(&mut self) {
        self.state = GameState::initial(self.config.board_size(), self.config.seats());
    }

    pub fn is_occupied(&self, x: i64, y: i64) -> bool {
        self.state.is_occupied(x, y)
    }

    pub fn compute_winner(&self) -> Option<PlayerId> {
        self.state.compute_winner()
    }

    /// Try to place the current player's piece at (x, y).
    ///
    /// A rejected move changes nothing and is not saved. An accepted move is
    /// saved before returning; if that save fails the error is returned and
    /// the in-memory move stands.
    pub fn make_move(&mut self, x: i64, y: i64) -> Result<MoveOutcome, StoreError> {
        let placement = match self.state.apply_move(x, y) {
            Ok(placement) => placement,
            Err(reason) => {
                tracing::debug!(x, y, %reason, "move rejected");
                return Ok(MoveOutcome::Rejected(reason));
            }
        };

        let mover = placement.piece.player_id;
        tracing::debug!(x, y, player = mover.index(), "move accepted");
        if let Some(winner) = placement.winner {
            tracing::info!(
                player = winner.index(),
                name = %self.state.player(winner).name,
                "game won"
            );
        }

        self.store.save(&self.state)?;
        Ok(MoveOutcome::Accepted(placement))
    }

    /// Start a fresh game and save it.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.initialize();
        tracing::info!("game reset");
        self.store.save(&self.state)
    }

    /// Replace the whole in-memory game with the stored one. Returns `false`
    /// and keeps the current game when nothing has been stored yet. A corrupt
    /// snapshot is reported and also leaves the current game in place.
    pub fn load(&mut self) -> Result<bool, StoreError> {
        match self.store.load()? {
            Some(state) => {
                tracing::info!(pieces = state.pieces().len(), "game loaded");
                self.state = state;
                Ok(true)
            }
            None => {
                tracing::info!("no saved game to load");
                Ok(false)
            }
        }
    }
}

/// An [`Engine`] behind one lock, for hosts that serve several callers.
/// Every operation holds the lock for its whole duration.
pub struct SharedEngine<S> {
    inner: Arc<Mutex<Engine<S>>>,
}

impl<S> Clone for SharedEngine<S> {
    fn clone(&self) -> Self {
        SharedEngine {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SnapshotStore> SharedEngine<S> {
    pub fn new(engine: Engine<S>) -> Self {
        SharedEngine {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Engine<S>> {
        // A panic mid-operation cannot leave the state half-written: moves
        // are validated before any field is touched.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current game
    pub fn state(&self) -> GameState {
        self.lock().state().clone()
    }

    pub fn make_move(&self, x: i64, y: i64) -> Result<MoveOutcome, StoreError> {
        self.lock().make_move(x, y)
    }

    pub fn reset(&self) -> Result<(), StoreError> {
        self.lock().reset()
    }

    pub fn load(&self) -> Result<bool, StoreError> {
        self.lock().load()
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine<S>) -> R) -> R {
        f(&mut self.lock())
    }
}
