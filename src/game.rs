use rand::Rng;
use tracing::debug;

use crate::card::{Card, Color};
use crate::deck::{Deck, DiscardPile};
use crate::error::{Result, UnoError};
use crate::turn::{next_index, Direction, GameStatus};

/// A player's state within one game, distinct from their global account.
#[derive(Debug)]
pub struct Seat {
    player_id: u64,
    turn_order: usize,
    hand: Vec<Card>,
    is_current_turn: bool,
    said_uno: bool,
    score: u32,
}

impl Seat {
    pub(crate) fn new(player_id: u64, turn_order: usize) -> Self {
        Self {
            player_id,
            turn_order,
            hand: Vec::new(),
            is_current_turn: false,
            said_uno: false,
            score: 0,
        }
    }

    pub fn player_id(&self) -> u64 {
        self.player_id
    }

    pub fn turn_order(&self) -> usize {
        self.turn_order
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn is_current_turn(&self) -> bool {
        self.is_current_turn
    }

    pub fn said_uno(&self) -> bool {
        self.said_uno
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn card_index(&self, card: &Card) -> Option<usize> {
        self.hand.iter().position(|x| x == card)
    }

    /// Any change in hand size invalidates a standing UNO declaration.
    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
        self.said_uno = false;
    }

    pub fn remove_card(&mut self, index: usize) -> Card {
        let card = self.hand.remove(index);
        self.said_uno = false;
        card
    }

    pub(crate) fn declare_uno(&mut self) {
        self.said_uno = true;
    }

    pub(crate) fn take_hand(&mut self) -> Vec<Card> {
        self.said_uno = false;
        std::mem::take(&mut self.hand)
    }

    pub(crate) fn award_points(&mut self, points: u32) {
        self.score += points;
    }
}

/// The aggregate root: everything the engine mutates lives here. Callers
/// must serialize mutations per game (see [`crate::store::GameStore`]);
/// the game itself holds no locks.
#[derive(Debug)]
pub struct Game {
    id: u64,
    status: GameStatus,
    direction: Direction,
    current_player_index: usize,
    deck: Deck,
    discard: DiscardPile,
    current_color: Option<Color>,
    seats: Vec<Seat>,
}

impl Game {
    /// A fresh game in the `Waiting` state. `player_ids` fixes the turn
    /// order: position in the slice becomes `turn_order`.
    pub fn new(id: u64, player_ids: &[u64]) -> Self {
        let seats = player_ids
            .iter()
            .enumerate()
            .map(|(turn_order, player_id)| Seat::new(*player_id, turn_order))
            .collect();

        Self {
            id,
            status: GameStatus::Waiting,
            direction: Direction::Clockwise,
            current_player_index: 0,
            deck: Deck::default(),
            discard: DiscardPile::default(),
            current_color: None,
            seats,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current_color(&self) -> Option<Color> {
        self.current_color
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn discard(&self) -> &DiscardPile {
        &self.discard
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, player_id: u64) -> Option<&Seat> {
        self.seats.iter().find(|s| s.player_id == player_id)
    }

    pub fn current_player_id(&self) -> Option<u64> {
        (self.status == GameStatus::Started)
            .then(|| self.seats[self.current_player_index].player_id)
    }

    /// Total cards across deck, discard and hands. 108 from the moment
    /// the deal happens until the game is torn down.
    pub fn card_census(&self) -> usize {
        self.deck.len()
            + self.discard.len()
            + self.seats.iter().map(Seat::cards_count).sum::<usize>()
    }

    pub fn seat_mut(&mut self, player_id: u64) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.player_id == player_id)
    }

    pub(crate) fn seat_position(&self, player_id: u64) -> Option<usize> {
        self.seats.iter().position(|s| s.player_id == player_id)
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub(crate) fn set_current_color(&mut self, color: Color) {
        self.current_color = Some(color);
    }

    pub(crate) fn set_deck(&mut self, deck: Deck) {
        self.deck = deck;
    }

    pub(crate) fn set_discard(&mut self, discard: DiscardPile) {
        self.discard = discard;
    }

    pub(crate) fn discard_mut(&mut self) -> &mut DiscardPile {
        &mut self.discard
    }

    pub(crate) fn seats_mut(&mut self) -> &mut [Seat] {
        &mut self.seats
    }

    /// Points the turn at `index`, keeping the one-current-seat invariant.
    pub(crate) fn set_current_seat(&mut self, index: usize) {
        self.current_player_index = index;
        for (i, seat) in self.seats.iter_mut().enumerate() {
            seat.is_current_turn = i == index;
        }
    }

    pub(crate) fn clear_current_seat(&mut self) {
        for seat in &mut self.seats {
            seat.is_current_turn = false;
        }
    }

    /// Cards that a draw could still produce: the deck plus the discard
    /// pile minus its top card, which a reshuffle always keeps.
    pub(crate) fn drawable_cards(&self) -> usize {
        self.deck.len() + self.discard.len().saturating_sub(1)
    }

    /// Pops one card, recycling the discard pile (minus its top card)
    /// into a freshly shuffled deck first if the deck is empty.
    pub(crate) fn draw_from_deck<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card> {
        if self.deck.is_empty() {
            let recycled = self.discard.take_all_but_top();
            if recycled.is_empty() {
                return Err(UnoError::DeckExhausted);
            }
            debug!(game_id = self.id, cards = recycled.len(), "Reshuffling discard pile into deck");
            self.deck = Deck::from_cards(recycled).shuffled(rng);
        }

        self.deck.draw().ok_or(UnoError::DeckExhausted)
    }

    /// Deals a penalty to the seat at `index`, degrading to however many
    /// cards remain when deck and discard cannot cover the full amount.
    /// Returns the number actually drawn.
    pub(crate) fn penalty_draw<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        count: usize,
        rng: &mut R,
    ) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            let Ok(card) = self.draw_from_deck(rng) else {
                break;
            };
            self.seats[index].add_card(card);
            drawn += 1;
        }
        drawn
    }

    /// Removes a seat from the game. The leaver's cards slide under the
    /// deck so the 108-card census still holds. Returns the id of the
    /// attrition winner when only one seat remains in a started game.
    pub(crate) fn remove_seat(&mut self, position: usize) -> Option<u64> {
        let mut seat = self.seats.remove(position);
        let hand = seat.take_hand();
        if !hand.is_empty() {
            self.deck.place_under(hand);
        }

        for (i, seat) in self.seats.iter_mut().enumerate() {
            seat.turn_order = i;
        }

        if self.status != GameStatus::Started {
            return None;
        }

        if self.seats.len() == 1 {
            self.status = GameStatus::Finished;
            self.clear_current_seat();
            return Some(self.seats[0].player_id);
        }

        // Keep the turn pointing at the same seat, or, when the current
        // seat left, at whoever would have acted next in the direction
        // of play.
        if position == self.current_player_index {
            let successor = next_index(position, self.direction, self.seats.len() + 1, 1);
            self.current_player_index = if successor > position {
                successor - 1
            } else {
                successor
            };
        } else if position < self.current_player_index {
            self.current_player_index -= 1;
        }
        let index = self.current_player_index;
        self.set_current_seat(index);

        None
    }
}
