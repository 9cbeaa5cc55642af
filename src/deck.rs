use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;

use crate::{
    card::{Card, Color, Face},
    constants::*,
};

/// The undealt draw pile. A LIFO stack: the top of the deck is the end of
/// the vector, and every draw pops from the end.
#[derive(Debug, Clone, Default)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// Builds the full 108-card deck in a fixed order. Pure; shuffling is
    /// a separate step so tests can rely on the construction order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK.into());

        for color in Color::iter() {
            for number in NUMBER_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, Face::Number(*number)));
            }

            for _ in 0..SKIP_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, Face::Skip));
            }

            for _ in 0..REVERSE_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, Face::Reverse));
            }

            for _ in 0..DRAW_TWO_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, Face::DrawTwo));
            }
        }

        for _ in 0..WILD_CARDS_IN_DECK {
            cards.push(Card::Wild);
        }

        for _ in 0..WILD_DRAW_FOUR_CARDS_IN_DECK {
            cards.push(Card::WildDrawFour);
        }

        Self(cards)
    }

    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    /// Fisher-Yates shuffle, consuming the deck and returning the
    /// reordered one. Uniform over permutations for a uniform `rng`.
    pub fn shuffled<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.0.shuffle(rng);
        self
    }

    /// Pops the top card, if any.
    pub(crate) fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }

    /// Slides cards under the deck, below everything still to be drawn.
    pub(crate) fn place_under(&mut self, cards: impl IntoIterator<Item = Card>) {
        let mut bottom: Vec<Card> = cards.into_iter().collect();
        bottom.extend(self.0.drain(..));
        self.0 = bottom;
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remaining cards, bottom of the deck first.
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    /// Removes and returns the card at `index` counted from the top
    /// (0 = top of the deck).
    pub(crate) fn remove_from_top(&mut self, index: usize) -> Card {
        let pos = self.0.len() - 1 - index;
        self.0.remove(pos)
    }

    /// Cards in draw order, top of the deck first.
    pub(crate) fn iter_from_top(&self) -> impl Iterator<Item = &Card> {
        self.0.iter().rev()
    }
}

/// The face-up pile of played cards. Its top card, together with the
/// game's current color, decides what is playable.
#[derive(Debug, Clone, Default)]
pub struct DiscardPile(Vec<Card>);

impl DiscardPile {
    pub(crate) fn start_with(card: Card) -> Self {
        Self(vec![card])
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.0.push(card);
    }

    pub fn top(&self) -> Option<&Card> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes everything except the top card, leaving a one-card pile.
    /// Used by reshuffle-on-empty; the caller turns the removed cards
    /// back into a deck.
    pub(crate) fn take_all_but_top(&mut self) -> Vec<Card> {
        if self.0.len() <= 1 {
            return Vec::new();
        }
        self.0.drain(..self.0.len() - 1).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn correct_card_count_new_deck() {
        assert_eq!(Deck::standard().len(), TOTAL_CARDS_IN_DECK as usize);
    }

    #[test]
    fn standard_deck_is_deterministic() {
        let a = Deck::standard();
        let b = Deck::standard();
        assert_eq!(a.cards(), b.cards());
    }

    #[test]
    fn shuffled_keeps_every_card() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let deck = Deck::standard().shuffled(&mut rng);
        assert_eq!(deck.len(), TOTAL_CARDS_IN_DECK as usize);

        let reference = Deck::standard();
        for card in reference.cards() {
            let expected = reference.cards().iter().filter(|c| *c == card).count();
            let actual = deck.cards().iter().filter(|c| *c == card).count();
            assert_eq!(expected, actual, "count mismatch for {card}");
        }
    }

    #[test]
    fn draw_pops_from_the_top() {
        let mut deck = Deck::from_cards(vec![
            Card::Colored(Color::Red, Face::Number(1)),
            Card::Colored(Color::Blue, Face::Number(2)),
        ]);
        assert_eq!(deck.draw(), Some(Card::Colored(Color::Blue, Face::Number(2))));
        assert_eq!(deck.draw(), Some(Card::Colored(Color::Red, Face::Number(1))));
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn place_under_goes_below_remaining_cards() {
        let mut deck = Deck::from_cards(vec![Card::Colored(Color::Red, Face::Number(1))]);
        deck.place_under(vec![Card::Wild]);
        assert_eq!(deck.draw(), Some(Card::Colored(Color::Red, Face::Number(1))));
        assert_eq!(deck.draw(), Some(Card::Wild));
    }

    #[test]
    fn take_all_but_top_leaves_single_card() {
        let mut pile = DiscardPile::start_with(Card::Colored(Color::Red, Face::Number(1)));
        pile.push(Card::Colored(Color::Blue, Face::Number(2)));
        pile.push(Card::Colored(Color::Green, Face::Skip));

        let removed = pile.take_all_but_top();
        assert_eq!(removed.len(), 2);
        assert_eq!(pile.len(), 1);
        assert_eq!(pile.top(), Some(&Card::Colored(Color::Green, Face::Skip)));
    }
}
