use crate::model::card::CardId;
use futures::task::SpawnError;
use thiserror::Error;

/// Failures of the draw and deal protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    #[error("deck exhausted after {dealt} cards")]
    DeckExhausted { dealt: usize },
    #[error("shuffle requested after {dealt} cards were already drawn")]
    InvalidSequencing { dealt: usize },
    #[error("card {card} was dropped before it arrived")]
    ArrivalLost { card: CardId },
    #[error("no dealer is seated at the table")]
    MissingDealer,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Deal(#[from] DealError),
    #[error("failed to schedule the opening sequence: {0}")]
    Spawn(#[from] SpawnError),
    #[error("table is already initialized")]
    AlreadyInitialized,
}
