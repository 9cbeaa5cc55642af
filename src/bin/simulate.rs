//! Plays one full game of UNO against itself and logs every move.
//!
//! Usage: `simulate [seed]`; the same seed replays the same game.

use color_eyre::eyre::{eyre, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use uno_engine::constants::DEFAULT_HAND_SIZE;
use uno_engine::{Game, GameStatus, PlayOutcome, UnoError};

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let seed = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u64>())
        .transpose()?
        .unwrap_or(0);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let players: Vec<u64> = vec![1, 2, 3, 4];
    let mut game = Game::new(1, &players);
    let opening = game.deal_initial_hands(DEFAULT_HAND_SIZE, &mut rng)?;
    info!(
        first_player = opening.first_player,
        top_card = %opening.top_card,
        color = %opening.current_color,
        "Game on"
    );

    let mut turns = 0usize;
    while game.status() == GameStatus::Started {
        turns += 1;
        if turns > 10_000 {
            return Err(eyre!("game did not terminate within 10000 turns"));
        }

        let player = game
            .current_player_id()
            .ok_or_else(|| eyre!("started game without a current player"))?;

        let legal = game.legal_cards(player)?;
        let winner = match legal.first().copied() {
            Some(card) => {
                let chosen = card.is_wild().then(|| opening.current_color);
                let PlayOutcome {
                    uno_warning,
                    winner,
                    skipped_player,
                    ..
                } = game.play_card(player, card, chosen, &mut rng)?;

                if uno_warning {
                    game.say_uno(player)?;
                    info!(player, "UNO!");
                }
                if let Some(skipped) = skipped_player {
                    info!(player, skipped, card = %card, "Played");
                } else {
                    info!(player, card = %card, "Played");
                }
                winner
            }
            None => match game.draw_card(player, &mut rng) {
                Ok(drew) => {
                    info!(player, card = %drew.card, "Drew");
                    None
                }
                Err(UnoError::DeckExhausted) => {
                    info!("Every card is in a hand; calling the game");
                    game.end()?;
                    None
                }
                Err(other) => return Err(other.into()),
            },
        };

        if let Some(winner) = winner {
            let score = game
                .seat(winner)
                .ok_or_else(|| eyre!("winner has no seat"))?
                .score();
            info!(winner, score, turns, "Game over");
        }
    }

    Ok(())
}
