pub mod card;
pub mod deal;
pub mod deck;
pub mod face;
pub mod hand;
pub mod label;
pub mod player;
pub mod suit;
