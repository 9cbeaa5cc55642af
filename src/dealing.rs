use std::collections::BTreeMap;

use crate::card::Card;
use crate::deck::Deck;

/// Deals `cards_per_player` rounds, one card at a time round-robin over
/// `players` (already ordered by turn order), popping from the top of the
/// deck. Deterministic for a fixed deck and player order.
///
/// If the deck runs out, dealing stops and later players simply hold
/// fewer cards; short decks never error here.
pub fn deal(
    players: &[u64],
    cards_per_player: usize,
    deck: &mut Deck,
) -> BTreeMap<u64, Vec<Card>> {
    let mut hands: BTreeMap<u64, Vec<Card>> = players
        .iter()
        .map(|id| (*id, Vec::with_capacity(cards_per_player)))
        .collect();

    'dealing: for _ in 0..cards_per_player {
        for player_id in players {
            let Some(card) = deck.draw() else {
                break 'dealing;
            };
            hands
                .get_mut(player_id)
                .expect("every player was given a hand above")
                .push(card);
        }
    }

    hands
}

/// Picks the game's opening discard and removes it from the deck.
///
/// Scans from the top for the first colored number card, so the game
/// never opens on an action card whose effect would need interpreting
/// before anyone has played. Falls back to the first colored card of any
/// face, and only if the whole deck is wilds takes whatever is on top.
pub fn select_initial_discard(deck: &mut Deck) -> Option<Card> {
    if deck.is_empty() {
        return None;
    }

    let position = deck
        .iter_from_top()
        .position(Card::is_number)
        .or_else(|| deck.iter_from_top().position(|card| !card.is_wild()))
        .unwrap_or(0);

    Some(deck.remove_from_top(position))
}
