use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Label {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Label {
    pub const ORDERED: [Label; 13] = [
        Label::Ace,
        Label::Two,
        Label::Three,
        Label::Four,
        Label::Five,
        Label::Six,
        Label::Seven,
        Label::Eight,
        Label::Nine,
        Label::Ten,
        Label::Jack,
        Label::Queen,
        Label::King,
    ];

    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(Label::Ace),
            2 => Some(Label::Two),
            3 => Some(Label::Three),
            4 => Some(Label::Four),
            5 => Some(Label::Five),
            6 => Some(Label::Six),
            7 => Some(Label::Seven),
            8 => Some(Label::Eight),
            9 => Some(Label::Nine),
            10 => Some(Label::Ten),
            11 => Some(Label::Jack),
            12 => Some(Label::Queen),
            13 => Some(Label::King),
            _ => None,
        }
    }

    /// Counting value: Ace is 1, pips are face value, court cards are 10.
    pub const fn value(self) -> u8 {
        match self {
            Label::Jack | Label::Queen | Label::King => 10,
            other => other as u8,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Label::Ace => "Ace",
            Label::Two => "Two",
            Label::Three => "Three",
            Label::Four => "Four",
            Label::Five => "Five",
            Label::Six => "Six",
            Label::Seven => "Seven",
            Label::Eight => "Eight",
            Label::Nine => "Nine",
            Label::Ten => "Ten",
            Label::Jack => "Jack",
            Label::Queen => "Queen",
            Label::King => "King",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Label::Ace => "A",
            Label::Two => "2",
            Label::Three => "3",
            Label::Four => "4",
            Label::Five => "5",
            Label::Six => "6",
            Label::Seven => "7",
            Label::Eight => "8",
            Label::Nine => "9",
            Label::Ten => "10",
            Label::Jack => "J",
            Label::Queen => "Q",
            Label::King => "K",
        };
        f.write_str(text)
    }
}
