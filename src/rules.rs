use crate::card::{Card, Color};

/// Whether `card` may be played on `top` while `current_color` is in
/// force. Wild cards always may; otherwise the card must match the
/// current color, or match the top card's face exactly (number-to-number
/// or action-to-action), regardless of the top card's own color.
pub fn is_legal(card: &Card, top: &Card, current_color: Color) -> bool {
    if card.is_wild() {
        return true;
    }

    if card.color() == Some(current_color) {
        return true;
    }

    match (card.face(), top.face()) {
        (Some(face), Some(top_face)) => face == top_face,
        _ => false,
    }
}

/// Every playable card in `hand`, lazily, in hand order. Recomputed from
/// the hand on each call; never caches across calls.
pub fn legal_cards<'a>(
    hand: &'a [Card],
    top: &'a Card,
    current_color: Color,
) -> impl Iterator<Item = &'a Card> + 'a {
    hand.iter()
        .filter(move |card| is_legal(card, top, current_color))
}
