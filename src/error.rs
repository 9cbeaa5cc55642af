use thiserror::Error;

use crate::card::{Card, Color};
use crate::turn::GameStatus;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UnoError {
    #[error("Not enough players")]
    NotEnoughPlayers,
    #[error("Too many players")]
    TooManyPlayers,
    #[error("Game {0} does not exist")]
    GameNotFound(u64),
    #[error("Player {0} has no seat in this game")]
    SeatNotFound(u64),
    #[error("Operation requires a started game, but the game is {0}")]
    InvalidGameState(GameStatus),
    #[error("It is not player {0}'s turn")]
    NotYourTurn(u64),
    #[error("Card {0} is not in the player's hand")]
    CardNotInHand(Card),
    #[error("Card {0} cannot be played on {1} while the color is {2}")]
    IllegalCard(Card, Card, Color),
    #[error("A wild card needs a chosen color")]
    MissingColorChoice,
    #[error("{0:?} is not a playable color")]
    InvalidColorChoice(String),
    #[error("The play-card action needs a card")]
    MissingCard,
    #[error("No cards left to draw in either the deck or the discard pile")]
    DeckExhausted,
    #[error("UNO can only be declared once, with exactly one card in hand")]
    InvalidUnoDeclaration,
    #[error("A player can only be challenged while holding exactly one card")]
    InvalidUnoChallenge,
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
