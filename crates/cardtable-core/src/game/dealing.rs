use crate::error::DealError;
use crate::model::deal::DealHandle;
use crate::model::deck::Deck;
use crate::model::hand::Facing;
use crate::model::player::Player;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

pub type SharedPlayer = Rc<RefCell<Player>>;

/// Deck handle shared between the frame loop and the dealing task.
///
/// Borrows are only taken for the duration of one call, never across an
/// await point.
#[derive(Debug, Clone, Default)]
pub struct SharedDeck(Rc<RefCell<Deck>>);

impl SharedDeck {
    pub fn new(deck: Deck) -> Self {
        Self(Rc::new(RefCell::new(deck)))
    }

    pub fn borrow(&self) -> Ref<'_, Deck> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Deck> {
        self.0.borrow_mut()
    }

    pub fn deal_to(&self, player: &SharedPlayer, facing: Facing) -> Result<DealHandle, DealError> {
        self.0.borrow_mut().deal_to(&mut player.borrow_mut(), facing)
    }

    /// One card to each non-dealer seat in order, each awaited before the
    /// next starts. With `to_dealer`, one more card goes to the dealer last.
    pub async fn deal_to_all(
        &self,
        players: &[SharedPlayer],
        to_dealer: bool,
        facing: Facing,
    ) -> Result<(), DealError> {
        for player in players {
            if player.borrow().is_dealer() {
                continue;
            }
            self.deal_to(player, facing)?.await?;
        }

        if to_dealer {
            let dealer = find_dealer(players)?;
            self.deal_to(&dealer, facing)?.await?;
        }

        Ok(())
    }
}

pub fn find_dealer(players: &[SharedPlayer]) -> Result<SharedPlayer, DealError> {
    players
        .iter()
        .find(|player| player.borrow().is_dealer())
        .cloned()
        .ok_or(DealError::MissingDealer)
}
