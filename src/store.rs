use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{Result, UnoError};
use crate::game::Game;

/// The persistence collaborator the engine requires.
///
/// The engine itself is a pure state-transition function and takes no
/// locks; the store must guarantee at most one in-flight mutation per
/// game id. `with_game` expresses that as an atomic read-modify-write:
/// the closure runs with exclusive access to the game, and concurrent
/// calls for the same id are serialized by the implementation.
pub trait GameStore {
    /// Adds a game under its id, replacing any previous one.
    fn insert(&self, game: Game) -> Result<()>;

    /// Runs `f` with exclusive access to the game, or fails with
    /// `GameNotFound`.
    fn with_game<T>(&self, game_id: u64, f: impl FnOnce(&mut Game) -> Result<T>) -> Result<T>;

    fn remove(&self, game_id: u64) -> Result<()>;
}

/// In-memory reference store. A single mutex over the whole map is a
/// coarser serialization than per-game, which the contract permits.
#[derive(Default)]
pub struct MemoryStore {
    games: Mutex<BTreeMap<u64, Game>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryStore {
    fn insert(&self, game: Game) -> Result<()> {
        let mut games = self.games.lock().expect("game store lock poisoned");
        games.insert(game.id(), game);
        Ok(())
    }

    fn with_game<T>(&self, game_id: u64, f: impl FnOnce(&mut Game) -> Result<T>) -> Result<T> {
        let mut games = self.games.lock().expect("game store lock poisoned");
        let game = games
            .get_mut(&game_id)
            .ok_or(UnoError::GameNotFound(game_id))?;
        f(game)
    }

    fn remove(&self, game_id: u64) -> Result<()> {
        let mut games = self.games.lock().expect("game store lock poisoned");
        games
            .remove(&game_id)
            .map(|_| ())
            .ok_or(UnoError::GameNotFound(game_id))
    }
}
