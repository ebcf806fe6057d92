use crate::model::label::Label;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Printed identity of a playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFace {
    pub label: Label,
    pub suit: Suit,
}

impl CardFace {
    pub const fn new(label: Label, suit: Suit) -> Self {
        Self { label, suit }
    }

    pub const fn value(self) -> u8 {
        self.label.value()
    }

    /// Long form, e.g. "Queen of Spades".
    pub fn name(self) -> String {
        format!("{} of {}", self.label.name(), self.suit.name())
    }
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label, self.suit)
    }
}
