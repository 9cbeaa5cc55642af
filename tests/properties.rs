//! Invariant checks: card conservation, turn exclusivity, legality
//! soundness and shuffle uniformity, exercised over whole random games.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strum::IntoEnumIterator;

use uno_engine::constants::{DEFAULT_HAND_SIZE, TOTAL_CARDS_IN_DECK};
use uno_engine::deck::Deck;
use uno_engine::rules::is_legal;
use uno_engine::{Card, Color, Face, Game, GameStatus, UnoError};

fn assert_invariants(game: &Game) {
    assert_eq!(
        game.card_census(),
        TOTAL_CARDS_IN_DECK as usize,
        "cards must be conserved"
    );

    let current_seats = game
        .seats()
        .iter()
        .filter(|s| s.is_current_turn())
        .count();
    match game.status() {
        GameStatus::Started => assert_eq!(current_seats, 1, "exactly one seat acts at a time"),
        GameStatus::Waiting | GameStatus::Finished => assert_eq!(current_seats, 0),
    }

    if game.status() == GameStatus::Started {
        assert!(game.current_color().is_some());
        assert!(game.discard().top().is_some());
    }

    for seat in game.seats() {
        assert!(!seat.said_uno() || seat.cards_count() == 1);
    }

    let mut orders: Vec<usize> = game.seats().iter().map(|s| s.turn_order()).collect();
    orders.sort_unstable();
    assert_eq!(orders, (0..game.seats().len()).collect::<Vec<_>>());
}

/// Plays a full random game, checking every invariant after every
/// operation. Returns the number of turns taken.
fn drive_random_game(seed: u64, players: usize) -> usize {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let ids: Vec<u64> = (1..=players as u64).collect();
    let mut game = Game::new(seed, &ids);

    game.deal_initial_hands(DEFAULT_HAND_SIZE, &mut rng).unwrap();
    assert_invariants(&game);

    let mut turns = 0;
    while game.status() == GameStatus::Started {
        turns += 1;
        assert!(turns < 5_000, "random game failed to terminate");

        let player = game.current_player_id().unwrap();
        let legal = game.legal_cards(player).unwrap();

        if legal.is_empty() {
            match game.draw_card(player, &mut rng) {
                Ok(_) => {}
                Err(UnoError::DeckExhausted) => game.end().unwrap(),
                Err(other) => panic!("unexpected draw failure: {other}"),
            }
        } else {
            let card = legal[rng.gen_range(0..legal.len())];
            let chosen = card.is_wild().then(|| {
                let colors: Vec<Color> = Color::iter().collect();
                colors[rng.gen_range(0..colors.len())]
            });
            let outcome = game.play_card(player, card, chosen, &mut rng).unwrap();

            // Sometimes declare, so challenges meet both outcomes.
            if outcome.uno_warning && rng.gen_bool(0.5) {
                game.say_uno(player).unwrap();
            }
        }

        assert_invariants(&game);
    }

    turns
}

#[test]
fn random_games_conserve_cards_and_turn_exclusivity() {
    for seed in 0..20 {
        let players = 2 + (seed as usize % 5);
        let turns = drive_random_game(seed, players);
        assert!(turns > 0);
    }
}

#[test]
fn legality_matches_its_definition_for_every_card() {
    let full_deck = Deck::standard();
    let tops = [
        Card::Colored(Color::Red, Face::Number(5)),
        Card::Colored(Color::Blue, Face::Skip),
        Card::Colored(Color::Green, Face::DrawTwo),
        Card::Colored(Color::Yellow, Face::Reverse),
        Card::Wild,
    ];

    for card in full_deck.cards() {
        for top in &tops {
            for current_color in Color::iter() {
                let expected = card.is_wild()
                    || card.color() == Some(current_color)
                    || (card.face().is_some() && card.face() == top.face());
                assert_eq!(
                    is_legal(card, top, current_color),
                    expected,
                    "card {card} on {top} with color {current_color}"
                );
            }
        }
    }
}

#[test]
fn shuffle_spreads_a_card_uniformly_over_the_deck() {
    // There is exactly one Red 0 in the deck; across many shuffles its
    // position should be uniform. Quartile counts stay within five
    // standard deviations of a fair split for this fixed seed.
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let tracked = Card::Colored(Color::Red, Face::Number(0));
    let trials = 2_000usize;
    let deck_size = TOTAL_CARDS_IN_DECK as usize;

    let mut quartile_counts = [0usize; 4];
    let mut position_sum = 0usize;

    for _ in 0..trials {
        let deck = Deck::standard().shuffled(&mut rng);
        let position = deck
            .cards()
            .iter()
            .position(|c| c == &tracked)
            .expect("the Red 0 is always in a full deck");
        quartile_counts[position * 4 / deck_size] += 1;
        position_sum += position;
    }

    for count in quartile_counts {
        assert!(
            (400..=600).contains(&count),
            "quartile counts {quartile_counts:?} are not close to uniform"
        );
    }

    let mean = position_sum as f64 / trials as f64;
    let expected_mean = (deck_size as f64 - 1.0) / 2.0;
    assert!(
        (mean - expected_mean).abs() < 3.0,
        "mean position {mean} drifted from {expected_mean}"
    );
}

#[test]
fn dealing_is_deterministic_for_a_fixed_seed() {
    let deal = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = Game::new(1, &[1, 2, 3]);
        game.deal_initial_hands(DEFAULT_HAND_SIZE, &mut rng).unwrap();
        let hands: Vec<Vec<Card>> = game.seats().iter().map(|s| s.hand().to_vec()).collect();
        (hands, *game.discard().top().unwrap())
    };

    assert_eq!(deal(7), deal(7));
    assert_ne!(deal(7), deal(8), "different seeds deal different games");
}
