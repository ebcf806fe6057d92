use crate::model::card::CardId;
use serde::{Deserialize, Serialize};

/// Which side of the card faces up once it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Up,
    Down,
}

impl Facing {
    pub const fn from_hidden(hidden: bool) -> Self {
        if hidden { Facing::Down } else { Facing::Up }
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Facing::Down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandCard {
    pub card: CardId,
    pub facing: Facing,
}

/// Cards dealt to one seat, in deal order. Append-only.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<HandCard>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn add(&mut self, card: CardId, facing: Facing) {
        self.cards.push(HandCard { card, facing });
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.cards.iter().any(|held| held.card == card)
    }

    pub fn get(&self, index: usize) -> Option<&HandCard> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandCard> {
        self.cards.iter()
    }

    pub fn card_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|held| held.card)
    }
}
