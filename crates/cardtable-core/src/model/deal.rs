use crate::error::DealError;
use crate::model::card::{CardId, Motion};
use crate::model::face::CardFace;
use crate::model::hand::Facing;
use crate::model::player::Seat;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::FutureExt;
use futures::channel::oneshot;
use serde::{Deserialize, Serialize};

/// Resolves when the dealt card first reaches its slot.
///
/// Any follow-up animation started on arrival (the dealer peek) is not
/// awaited.
#[derive(Debug)]
#[must_use = "a deal handle does nothing unless awaited"]
pub struct DealHandle {
    card: CardId,
    arrived: oneshot::Receiver<CardId>,
}

impl DealHandle {
    pub(crate) fn new(card: CardId, arrived: oneshot::Receiver<CardId>) -> Self {
        Self { card, arrived }
    }

    pub fn card(&self) -> CardId {
        self.card
    }
}

impl Future for DealHandle {
    type Output = Result<CardId, DealError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let card = self.card;
        self.arrived
            .poll_unpin(cx)
            .map(|result| result.map_err(|_| DealError::ArrivalLost { card }))
    }
}

/// One line of the deal transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRecord {
    pub sequence: usize,
    pub seat: Seat,
    pub card: CardId,
    pub face: CardFace,
    pub facing: Facing,
}

/// A motion observed during one deck tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEvent {
    pub tick: u64,
    pub card: CardId,
    pub motion: Motion,
}
