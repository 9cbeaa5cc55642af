//! UNO turn/game engine: deck construction and dealing, turn-order
//! progression, play legality, action-card effect resolution, win
//! detection and the say-UNO/challenge protocol.
//!
//! The engine is a pure state-transition library. Every operation reads
//! the current [`game::Game`], computes the new state and the outcome,
//! and either commits the whole effect or fails with a typed
//! [`error::UnoError`] leaving the game untouched. Transport,
//! persistence and authentication live in the caller; the
//! [`store::GameStore`] trait states the one contract the engine needs
//! from them (serialized mutation per game id).

pub mod card;
pub mod constants;
pub mod dealing;
pub mod deck;
pub mod engine;
pub mod error;
pub mod game;
pub mod rules;
pub mod store;
pub mod turn;

pub use card::{Card, Color, Face};
pub use engine::{DealOutcome, Engine};
pub use error::{Result, UnoError};
pub use game::{Game, Seat};
pub use store::{GameStore, MemoryStore};
pub use turn::{
    ChallengeOutcome, Direction, DrawOutcome, GameStatus, PlayOutcome, TurnActionKind, TurnOutcome,
};
