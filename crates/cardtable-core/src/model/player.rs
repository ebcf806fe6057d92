use crate::model::card::CardId;
use crate::model::hand::{Facing, Hand};
use crate::motion::Transform;
use crate::scene::{SceneSink, VisualKind};
use core::f32::consts::FRAC_PI_2;
use core::fmt;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Horizontal spread between consecutive cards in a hand.
pub const CARD_SPREAD: f32 = 0.6;
/// Lift per card so later cards sit on top.
pub const CARD_LIFT: f32 = 0.05;
/// Depth offset of every card relative to the card area.
pub const CARD_DEPTH: f32 = -0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Player(usize),
    Dealer,
}

impl Seat {
    pub const fn is_dealer(self) -> bool {
        matches!(self, Seat::Dealer)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Player(index) => write!(f, "seat {index}"),
            Seat::Dealer => f.write_str("dealer"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    seat: Seat,
    card_area: Transform,
    hand: Hand,
}

impl Player {
    pub fn new(seat: Seat) -> Self {
        Self {
            seat,
            card_area: Transform {
                rotation: Quat::from_rotation_x(-FRAC_PI_2),
                ..Transform::IDENTITY
            },
            hand: Hand::new(),
        }
    }

    pub fn dealer() -> Self {
        Self::new(Seat::Dealer)
    }

    /// Registers the card area with the scene.
    pub fn init(&self, scene: &mut dyn SceneSink) {
        scene.add(VisualKind::CardArea(self.seat), &self.card_area);
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn is_dealer(&self) -> bool {
        self.seat.is_dealer()
    }

    pub fn set_card_area_position(&mut self, position: Vec3) {
        self.card_area.position = position;
    }

    pub fn card_area(&self) -> &Transform {
        &self.card_area
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn add_card(&mut self, card: CardId, facing: Facing) {
        self.hand.add(card, facing);
    }

    /// Slot for the next card, derived from the hand size.
    pub fn next_card_position(&self) -> Vec3 {
        let count = self.hand.len() as f32;
        self.card_area.position + Vec3::new(count * CARD_SPREAD, count * CARD_LIFT, CARD_DEPTH)
    }
}
