use strum_macros::{Display, EnumString};

use crate::card::{Card, Color, Face};

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    pub(crate) fn signum(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum GameStatus {
    Waiting,
    Started,
    Finished,
}

/// Modular seat arithmetic for turn advancement. `step` is 1 for a plain
/// advance and 2 when one seat gets skipped; wraparound is correct in
/// both directions for any table size.
pub fn next_index(current: usize, direction: Direction, total: usize, step: usize) -> usize {
    let total = total as i64;
    let offset = direction.signum() * step as i64;
    (((current as i64 + offset) % total + total) % total) as usize
}

/// What resolving an action card did to the table: the direction the game
/// now runs in, the seat index that acts next, the seat that got skipped
/// (if any), and how many penalty cards the skipped seat must draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Effect {
    pub direction: Direction,
    pub next_index: usize,
    pub skipped_index: Option<usize>,
    pub penalty: usize,
}

/// Dispatches on the rank of the played card. Pure: the caller applies
/// the returned effect (penalty draws, turn flags) to the game state.
pub(crate) fn resolve_effect(
    card: &Card,
    direction: Direction,
    current: usize,
    total: usize,
) -> Effect {
    match card {
        Card::Colored(_, Face::Number(_)) | Card::Wild => Effect {
            direction,
            next_index: next_index(current, direction, total, 1),
            skipped_index: None,
            penalty: 0,
        },
        Card::Colored(_, Face::Reverse) => {
            if total == 2 {
                // Head-to-head parity: the opponent is passed over and
                // the reverser acts again, exactly like a Skip.
                Effect {
                    direction: direction.flipped(),
                    next_index: current,
                    skipped_index: Some(next_index(current, direction, total, 1)),
                    penalty: 0,
                }
            } else {
                let direction = direction.flipped();
                Effect {
                    direction,
                    next_index: next_index(current, direction, total, 1),
                    skipped_index: None,
                    penalty: 0,
                }
            }
        }
        Card::Colored(_, Face::Skip) => Effect {
            direction,
            next_index: next_index(current, direction, total, 2),
            skipped_index: Some(next_index(current, direction, total, 1)),
            penalty: 0,
        },
        Card::Colored(_, Face::DrawTwo) => Effect {
            direction,
            next_index: next_index(current, direction, total, 2),
            skipped_index: Some(next_index(current, direction, total, 1)),
            penalty: crate::constants::DRAW_TWO_PENALTY,
        },
        Card::WildDrawFour => Effect {
            direction,
            next_index: next_index(current, direction, total, 2),
            skipped_index: Some(next_index(current, direction, total, 1)),
            penalty: crate::constants::WILD_DRAW_FOUR_PENALTY,
        },
    }
}

/// The two things a seat can do with its turn, as named on the wire.
#[derive(Clone, Copy, Debug, Display, EnumString, PartialEq, Eq)]
pub enum TurnActionKind {
    #[strum(serialize = "play-card")]
    PlayCard,
    #[strum(serialize = "draw-card")]
    DrawCard,
}

/// Result of a legal card play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Seat that acts next; `None` when the play ended the game.
    pub next_player: Option<u64>,
    /// Seat passed over by a Skip, Draw Two, Wild Draw Four, or a
    /// two-player Reverse.
    pub skipped_player: Option<u64>,
    /// Penalty cards the skipped seat actually drew.
    pub penalty_cards_drawn: usize,
    /// The acting seat is down to one card; clients surface this as the
    /// "UNO!" warning.
    pub uno_warning: bool,
    pub winner: Option<u64>,
    pub direction: Direction,
    pub current_color: Color,
}

/// Result of a voluntary draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Shown only to the drawing player by the transport layer.
    pub card: Card,
    pub next_player: u64,
}

/// Result of `execute_turn`, one variant per action kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Played(PlayOutcome),
    Drew(DrawOutcome),
}

/// Outcome of a UNO challenge. A failed challenge is a legitimate result,
/// not an error: the challenged player had already declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// The challenged seat had not declared; it drew the penalty.
    Succeeded { cards_drawn: usize },
    Failed,
}
