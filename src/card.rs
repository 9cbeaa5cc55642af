use core::fmt;
use std::fmt::Display;

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

use crate::error::{Result, UnoError};

/// One of the four real card colors. Wild cards have no color of their
/// own; the color a Wild imposes lives in the game's current color, not
/// on the card.
#[derive(Clone, Copy, Debug, Display, EnumString, EnumCountMacro, EnumIter, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    /// Parses a chosen color supplied by a caller at the string boundary,
    /// e.g. the color named when playing a Wild.
    pub fn parse_choice(s: &str) -> Result<Self> {
        s.parse()
            .map_err(|_| UnoError::InvalidColorChoice(s.to_string()))
    }
}

/// The face of a colored card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Card {
    Colored(Color, Face),
    Wild,
    WildDrawFour,
}

impl Card {
    pub fn color(&self) -> Option<Color> {
        match self {
            Card::Colored(color, _) => Some(*color),
            Card::Wild | Card::WildDrawFour => None,
        }
    }

    pub fn face(&self) -> Option<Face> {
        match self {
            Card::Colored(_, face) => Some(*face),
            Card::Wild | Card::WildDrawFour => None,
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild | Card::WildDrawFour)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Card::Colored(_, Face::Number(_)))
    }

    /// Standard UNO scoring value, tallied to the winner from the losers'
    /// remaining hands.
    pub fn point_value(&self) -> u32 {
        match self {
            Card::Colored(_, Face::Number(n)) => u32::from(*n),
            Card::Colored(_, _) => 20,
            Card::Wild | Card::WildDrawFour => 50,
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Colored(color, face) => {
                write!(f, "{} {}", color, {
                    match face {
                        Face::Number(number) => number.to_string(),
                        Face::Skip => "Skip".to_string(),
                        Face::Reverse => "Reverse".to_string(),
                        Face::DrawTwo => "Draw Two".to_string(),
                    }
                })
            }
            Card::Wild => write!(f, "Wild"),
            Card::WildDrawFour => write!(f, "Wild Draw Four"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_correct_string_for_number_card() {
        let red_3 = Card::Colored(Color::Red, Face::Number(3));
        assert_eq!(red_3.to_string(), "Red 3");

        let yellow_5 = Card::Colored(Color::Yellow, Face::Number(5));
        assert_eq!(yellow_5.to_string(), "Yellow 5");

        let blue_9 = Card::Colored(Color::Blue, Face::Number(9));
        assert_eq!(blue_9.to_string(), "Blue 9");
    }

    #[test]
    fn return_correct_string_for_action_cards() {
        let red_skip = Card::Colored(Color::Red, Face::Skip);
        assert_eq!(red_skip.to_string(), "Red Skip");

        let green_reverse = Card::Colored(Color::Green, Face::Reverse);
        assert_eq!(green_reverse.to_string(), "Green Reverse");

        let blue_draw_two = Card::Colored(Color::Blue, Face::DrawTwo);
        assert_eq!(blue_draw_two.to_string(), "Blue Draw Two");
    }

    #[test]
    fn return_correct_string_for_wild_cards() {
        assert_eq!(Card::Wild.to_string(), "Wild");
        assert_eq!(Card::WildDrawFour.to_string(), "Wild Draw Four");
    }

    #[test]
    fn parse_choice_accepts_real_colors_case_insensitively() {
        assert_eq!(Color::parse_choice("Green").unwrap(), Color::Green);
        assert_eq!(Color::parse_choice("yellow").unwrap(), Color::Yellow);
    }

    #[test]
    fn parse_choice_rejects_unknown_colors() {
        let err = Color::parse_choice("Purple").unwrap_err();
        assert!(matches!(err, UnoError::InvalidColorChoice(s) if s == "Purple"));
    }

    #[test]
    fn point_values_follow_standard_scoring() {
        assert_eq!(Card::Colored(Color::Red, Face::Number(0)).point_value(), 0);
        assert_eq!(Card::Colored(Color::Red, Face::Number(7)).point_value(), 7);
        assert_eq!(Card::Colored(Color::Blue, Face::Skip).point_value(), 20);
        assert_eq!(Card::Colored(Color::Green, Face::Reverse).point_value(), 20);
        assert_eq!(Card::Colored(Color::Yellow, Face::DrawTwo).point_value(), 20);
        assert_eq!(Card::Wild.point_value(), 50);
        assert_eq!(Card::WildDrawFour.point_value(), 50);
    }
}
