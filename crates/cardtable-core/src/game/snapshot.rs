use crate::game::table::Table;
use crate::model::hand::Facing;
use crate::model::player::Seat;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSnapshot {
    pub tick: u64,
    pub dealt: usize,
    pub remaining: usize,
    pub opening: String,
    pub seats: Vec<SeatSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatSnapshot {
    pub seat: Seat,
    pub card_area: Vec3,
    pub cards: Vec<CardSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardSnapshot {
    pub card: String,
    pub value: u8,
    pub facing: Facing,
    pub position: Vec3,
    pub floating: bool,
    pub moving: bool,
}

impl TableSnapshot {
    pub fn capture(table: &Table) -> Self {
        let deck = table.deck();
        let seats = table
            .players()
            .iter()
            .map(|player| {
                let player = player.borrow();
                let cards = player
                    .hand()
                    .iter()
                    .map(|held| {
                        let card = deck.card(held.card);
                        CardSnapshot {
                            card: card.face().to_string(),
                            value: card.face().value(),
                            facing: held.facing,
                            position: card.position(),
                            floating: card.is_floating(),
                            moving: card.is_moving(),
                        }
                    })
                    .collect();
                SeatSnapshot {
                    seat: player.seat(),
                    card_area: player.card_area().position,
                    cards,
                }
            })
            .collect();

        TableSnapshot {
            tick: deck.tick(),
            dealt: deck.dealt(),
            remaining: deck.remaining(),
            opening: table.opening_status().to_string(),
            seats,
        }
    }

    pub fn to_json(table: &Table) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(table))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
