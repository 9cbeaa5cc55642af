use rand::{thread_rng, Rng};
use strum::{EnumCount, IntoEnumIterator};
use tracing::{debug, info};

use crate::card::{Card, Color};
use crate::constants::{
    DEFAULT_HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS, TOTAL_CARDS_IN_DECK, UNO_CHALLENGE_PENALTY,
};
use crate::dealing::{deal, select_initial_discard};
use crate::deck::{Deck, DiscardPile};
use crate::error::{Result, UnoError};
use crate::game::Game;
use crate::rules;
use crate::store::GameStore;
use crate::turn::{
    next_index, resolve_effect, ChallengeOutcome, DrawOutcome, GameStatus, PlayOutcome,
    TurnActionKind, TurnOutcome,
};

/// What the deal produced: who opens, and on top of what.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DealOutcome {
    pub first_player: u64,
    pub top_card: Card,
    pub current_color: Color,
}

impl Game {
    /// Shuffles a fresh 108-card deck, deals `cards_per_player` to every
    /// seat round-robin, flips the opening discard and starts the game
    /// with the seat at turn order 0.
    pub fn deal_initial_hands<R: Rng + ?Sized>(
        &mut self,
        cards_per_player: usize,
        rng: &mut R,
    ) -> Result<DealOutcome> {
        if self.status() != GameStatus::Waiting {
            return Err(UnoError::InvalidGameState(self.status()));
        }
        if self.seats().len() < MIN_PLAYERS {
            return Err(UnoError::NotEnoughPlayers);
        }
        if self.seats().len() > MAX_PLAYERS {
            return Err(UnoError::TooManyPlayers);
        }
        // At least one card must survive the deal to open the discard.
        if self.seats().len() * cards_per_player >= TOTAL_CARDS_IN_DECK as usize {
            return Err(UnoError::DeckExhausted);
        }

        let mut deck = Deck::standard().shuffled(rng);
        let players: Vec<u64> = self.seats().iter().map(|s| s.player_id()).collect();
        let mut hands = deal(&players, cards_per_player, &mut deck);

        for seat in self.seats_mut() {
            let hand = hands
                .remove(&seat.player_id())
                .expect("deal produced a hand for every seated player");
            for card in hand {
                seat.add_card(card);
            }
        }

        let top_card = select_initial_discard(&mut deck)
            .expect("the deal left at least one card in the deck");
        // A Wild can only open if the deck degenerated to all wilds; the
        // game still needs a real current color, so pick one at random.
        let current_color = top_card.color().unwrap_or_else(|| {
            Color::iter()
                .nth(rng.gen_range(0..Color::COUNT))
                .expect("index is within the color count")
        });

        self.set_deck(deck);
        self.set_discard(DiscardPile::start_with(top_card));
        self.set_current_color(current_color);
        self.set_status(GameStatus::Started);
        self.set_current_seat(0);

        let first_player = players[0];
        info!(
            game_id = self.id(),
            players = players.len(),
            first_player,
            top_card = %top_card,
            %current_color,
            "Dealt initial hands"
        );

        Ok(DealOutcome {
            first_player,
            top_card,
            current_color,
        })
    }

    /// Plays `card` from `player`'s hand onto the discard pile and
    /// resolves its effect. Checks run before any mutation, so a failure
    /// leaves the game exactly as it was.
    pub fn play_card<R: Rng + ?Sized>(
        &mut self,
        player: u64,
        card: Card,
        chosen_color: Option<Color>,
        rng: &mut R,
    ) -> Result<PlayOutcome> {
        if self.status() != GameStatus::Started {
            return Err(UnoError::InvalidGameState(self.status()));
        }
        let position = self
            .seat_position(player)
            .ok_or(UnoError::SeatNotFound(player))?;
        if !self.seats()[position].is_current_turn() {
            return Err(UnoError::NotYourTurn(player));
        }
        let hand_index = self.seats()[position]
            .card_index(&card)
            .ok_or(UnoError::CardNotInHand(card))?;

        let top = *self
            .discard()
            .top()
            .expect("a started game always has a discard top");
        let current_color = self
            .current_color()
            .expect("a started game always has a current color");

        if !rules::is_legal(&card, &top, current_color) {
            return Err(UnoError::IllegalCard(card, top, current_color));
        }

        let next_color = match (card.color(), chosen_color) {
            (Some(own), _) => own,
            (None, Some(chosen)) => chosen,
            (None, None) => return Err(UnoError::MissingColorChoice),
        };

        // All preconditions hold; from here the full effect commits.
        self.seats_mut()[position].remove_card(hand_index);
        self.discard_mut().push(card);
        self.set_current_color(next_color);

        debug!(game_id = self.id(), player, card = %card, color = %next_color, "Card played");

        if self.seats()[position].cards_count() == 0 {
            let points: u32 = self
                .seats()
                .iter()
                .filter(|s| s.player_id() != player)
                .flat_map(|s| s.hand().iter())
                .map(Card::point_value)
                .sum();
            self.seats_mut()[position].award_points(points);
            self.set_status(GameStatus::Finished);
            self.clear_current_seat();

            info!(game_id = self.id(), winner = player, points, "Game won");

            // The winning card's effect is never resolved; the game ends
            // first.
            return Ok(PlayOutcome {
                next_player: None,
                skipped_player: None,
                penalty_cards_drawn: 0,
                uno_warning: false,
                winner: Some(player),
                direction: self.direction(),
                current_color: next_color,
            });
        }

        let uno_warning = self.seats()[position].cards_count() == 1;

        let effect = resolve_effect(&card, self.direction(), position, self.seats().len());
        self.set_direction(effect.direction);

        let mut penalty_cards_drawn = 0;
        if let Some(skipped) = effect.skipped_index {
            if effect.penalty > 0 {
                penalty_cards_drawn = self.penalty_draw(skipped, effect.penalty, rng);
            }
        }
        self.set_current_seat(effect.next_index);

        Ok(PlayOutcome {
            next_player: Some(self.seats()[effect.next_index].player_id()),
            skipped_player: effect.skipped_index.map(|i| self.seats()[i].player_id()),
            penalty_cards_drawn,
            uno_warning,
            winner: None,
            direction: effect.direction,
            current_color: next_color,
        })
    }

    /// Voluntary draw: one card into the hand, then the turn passes to
    /// the next seat. Never skips anyone.
    pub fn draw_card<R: Rng + ?Sized>(&mut self, player: u64, rng: &mut R) -> Result<DrawOutcome> {
        if self.status() != GameStatus::Started {
            return Err(UnoError::InvalidGameState(self.status()));
        }
        let position = self
            .seat_position(player)
            .ok_or(UnoError::SeatNotFound(player))?;
        if !self.seats()[position].is_current_turn() {
            return Err(UnoError::NotYourTurn(player));
        }
        if self.drawable_cards() == 0 {
            return Err(UnoError::DeckExhausted);
        }

        let card = self.draw_from_deck(rng)?;
        self.seats_mut()[position].add_card(card);

        let next = next_index(position, self.direction(), self.seats().len(), 1);
        self.set_current_seat(next);

        debug!(game_id = self.id(), player, "Card drawn, turn passed");

        Ok(DrawOutcome {
            card,
            next_player: self.seats()[next].player_id(),
        })
    }

    /// Convenience wrapper dispatching on the wire-level action kind.
    pub fn execute_turn<R: Rng + ?Sized>(
        &mut self,
        player: u64,
        action: TurnActionKind,
        card: Option<Card>,
        chosen_color: Option<Color>,
        rng: &mut R,
    ) -> Result<TurnOutcome> {
        match action {
            TurnActionKind::PlayCard => {
                let card = card.ok_or(UnoError::MissingCard)?;
                self.play_card(player, card, chosen_color, rng)
                    .map(TurnOutcome::Played)
            }
            TurnActionKind::DrawCard => self.draw_card(player, rng).map(TurnOutcome::Drew),
        }
    }

    /// Every card `player` could legally play right now, in hand order.
    pub fn legal_cards(&self, player: u64) -> Result<Vec<Card>> {
        if self.status() != GameStatus::Started {
            return Err(UnoError::InvalidGameState(self.status()));
        }
        let seat = self.seat(player).ok_or(UnoError::SeatNotFound(player))?;
        let top = self
            .discard()
            .top()
            .expect("a started game always has a discard top");
        let current_color = self
            .current_color()
            .expect("a started game always has a current color");

        Ok(rules::legal_cards(seat.hand(), top, current_color)
            .copied()
            .collect())
    }

    /// Declares UNO for `player`. Only valid with exactly one card in
    /// hand and no standing declaration.
    pub fn say_uno(&mut self, player: u64) -> Result<()> {
        if self.status() != GameStatus::Started {
            return Err(UnoError::InvalidGameState(self.status()));
        }
        let seat = self
            .seat_mut(player)
            .ok_or(UnoError::SeatNotFound(player))?;
        if seat.cards_count() != 1 || seat.said_uno() {
            return Err(UnoError::InvalidUnoDeclaration);
        }
        seat.declare_uno();

        debug!(game_id = self.id(), player, "UNO declared");
        Ok(())
    }

    /// `challenger` claims that `challenged` reached one card without
    /// declaring UNO. A correct claim costs the challenged seat two
    /// penalty cards; an incorrect one is a failed (but legal) challenge.
    pub fn challenge_uno<R: Rng + ?Sized>(
        &mut self,
        challenger: u64,
        challenged: u64,
        rng: &mut R,
    ) -> Result<ChallengeOutcome> {
        if self.status() != GameStatus::Started {
            return Err(UnoError::InvalidGameState(self.status()));
        }
        self.seat(challenger)
            .ok_or(UnoError::SeatNotFound(challenger))?;
        let position = self
            .seat_position(challenged)
            .ok_or(UnoError::SeatNotFound(challenged))?;

        if self.seats()[position].cards_count() != 1 {
            return Err(UnoError::InvalidUnoChallenge);
        }

        if self.seats()[position].said_uno() {
            debug!(game_id = self.id(), challenger, challenged, "UNO challenge failed");
            return Ok(ChallengeOutcome::Failed);
        }

        let cards_drawn = self.penalty_draw(position, UNO_CHALLENGE_PENALTY, rng);

        info!(
            game_id = self.id(),
            challenger, challenged, cards_drawn, "UNO challenge succeeded"
        );

        Ok(ChallengeOutcome::Succeeded { cards_drawn })
    }

    /// Ends a started game without a winner.
    pub fn end(&mut self) -> Result<()> {
        if self.status() != GameStatus::Started {
            return Err(UnoError::InvalidGameState(self.status()));
        }
        self.set_status(GameStatus::Finished);
        self.clear_current_seat();

        info!(game_id = self.id(), "Game ended");
        Ok(())
    }

    /// Removes `player` from the game. Their cards go back under the
    /// deck; a started game finishes by attrition when one seat remains,
    /// and the attrition winner's id is returned.
    pub fn leave(&mut self, player: u64) -> Result<Option<u64>> {
        if self.status() == GameStatus::Finished {
            return Err(UnoError::InvalidGameState(self.status()));
        }
        let position = self
            .seat_position(player)
            .ok_or(UnoError::SeatNotFound(player))?;

        let winner = self.remove_seat(position);

        info!(game_id = self.id(), player, ?winner, "Player left");
        Ok(winner)
    }
}

/// Façade addressing games by id through a [`GameStore`]. Each operation
/// is one atomic read-modify-write; the store serializes operations that
/// share a game id, so the pure transitions above never race.
pub struct Engine<S> {
    store: S,
}

impl<S: GameStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new game in the `Waiting` state. `players` fixes the
    /// turn order.
    pub fn create_game(&self, game_id: u64, players: &[u64]) -> Result<()> {
        self.store.insert(Game::new(game_id, players))
    }

    pub fn deal_initial_hands(&self, game_id: u64) -> Result<DealOutcome> {
        self.deal_initial_hands_of(game_id, DEFAULT_HAND_SIZE)
    }

    pub fn deal_initial_hands_of(
        &self,
        game_id: u64,
        cards_per_player: usize,
    ) -> Result<DealOutcome> {
        self.store
            .with_game(game_id, |game| {
                game.deal_initial_hands(cards_per_player, &mut thread_rng())
            })
    }

    pub fn play_card(
        &self,
        game_id: u64,
        player: u64,
        card: Card,
        chosen_color: Option<Color>,
    ) -> Result<PlayOutcome> {
        self.store.with_game(game_id, |game| {
            game.play_card(player, card, chosen_color, &mut thread_rng())
        })
    }

    pub fn draw_card(&self, game_id: u64, player: u64) -> Result<DrawOutcome> {
        self.store
            .with_game(game_id, |game| game.draw_card(player, &mut thread_rng()))
    }

    pub fn execute_turn(
        &self,
        game_id: u64,
        player: u64,
        action: TurnActionKind,
        card: Option<Card>,
        chosen_color: Option<Color>,
    ) -> Result<TurnOutcome> {
        self.store.with_game(game_id, |game| {
            game.execute_turn(player, action, card, chosen_color, &mut thread_rng())
        })
    }

    pub fn get_legal_cards(&self, game_id: u64, player: u64) -> Result<Vec<Card>> {
        self.store
            .with_game(game_id, |game| game.legal_cards(player))
    }

    pub fn say_uno(&self, game_id: u64, player: u64) -> Result<()> {
        self.store.with_game(game_id, |game| game.say_uno(player))
    }

    pub fn challenge_uno(
        &self,
        game_id: u64,
        challenger: u64,
        challenged: u64,
    ) -> Result<ChallengeOutcome> {
        self.store.with_game(game_id, |game| {
            game.challenge_uno(challenger, challenged, &mut thread_rng())
        })
    }

    pub fn end_game(&self, game_id: u64) -> Result<()> {
        self.store.with_game(game_id, |game| game.end())
    }

    pub fn leave_game(&self, game_id: u64, player: u64) -> Result<Option<u64>> {
        self.store.with_game(game_id, |game| game.leave(player))
    }
}
