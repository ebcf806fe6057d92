use crate::error::{DealError, TableError};
use crate::game::dealing::{SharedDeck, SharedPlayer, find_dealer};
use crate::game::layout::{LayoutOverflow, SeatLayout};
use crate::game::snapshot::TableSnapshot;
use crate::model::deal::CardEvent;
use crate::model::deck::Deck;
use crate::model::hand::Facing;
use crate::model::player::{Player, Seat};
use crate::rng::RangeRng;
use crate::scene::{SceneSink, Viewpoint};
use core::fmt;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::{Level, event};

/// Stages of the opening deal, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningStep {
    FirstRound,
    HoleCard,
    SecondRound,
    DealerUpCard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpeningStatus {
    NotStarted,
    Dealing(OpeningStep),
    Complete,
    Aborted(DealError),
}

impl OpeningStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, OpeningStatus::Complete | OpeningStatus::Aborted(_))
    }
}

impl fmt::Display for OpeningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpeningStatus::NotStarted => f.write_str("not_started"),
            OpeningStatus::Dealing(step) => write!(f, "dealing:{step:?}"),
            OpeningStatus::Complete => f.write_str("complete"),
            OpeningStatus::Aborted(err) => write!(f, "aborted: {err}"),
        }
    }
}

/// Deck, seats and the task that runs the opening deal.
///
/// Everything runs on the caller's thread. `update` is the frame tick: it
/// steps every card and then lets the dealing task advance as far as the
/// arrivals allow.
pub struct Table {
    deck: SharedDeck,
    players: Vec<SharedPlayer>,
    layout: SeatLayout,
    viewpoint: Rc<dyn Viewpoint>,
    pool: LocalPool,
    opening: Rc<RefCell<OpeningStatus>>,
    overflow: Option<LayoutOverflow>,
}

impl Table {
    pub fn new(viewpoint: Rc<dyn Viewpoint>) -> Self {
        Self::with_layout(SeatLayout::default(), viewpoint)
    }

    pub fn with_layout(layout: SeatLayout, viewpoint: Rc<dyn Viewpoint>) -> Self {
        Self {
            deck: SharedDeck::new(Deck::standard()),
            players: Vec::new(),
            layout,
            viewpoint,
            pool: LocalPool::new(),
            opening: Rc::new(RefCell::new(OpeningStatus::NotStarted)),
            overflow: None,
        }
    }

    /// Seats `player_count` players and the dealer, shuffles, and starts the
    /// opening deal. The first card is already on its way when this returns.
    pub fn init<R: RangeRng + ?Sized>(
        &mut self,
        player_count: usize,
        scene: &mut dyn SceneSink,
        rng: &mut R,
    ) -> Result<(), TableError> {
        if !self.players.is_empty() {
            return Err(TableError::AlreadyInitialized);
        }

        let placement = self.layout.place(player_count);
        if let Some(overflow) = placement.overflow {
            event!(
                target: "cardtable::table",
                Level::WARN,
                requested = overflow.requested,
                capacity = overflow.capacity,
                strategy = ?overflow.strategy,
                "seat layout overflow"
            );
            self.overflow = Some(overflow);
        }

        for (index, anchor) in placement.seats.into_iter().enumerate() {
            let mut player = Player::new(Seat::Player(index));
            player.set_card_area_position(anchor);
            player.init(scene);
            self.players.push(Rc::new(RefCell::new(player)));
        }

        let mut dealer = Player::dealer();
        dealer.set_card_area_position(self.layout.dealer_area());
        dealer.init(scene);
        self.players.push(Rc::new(RefCell::new(dealer)));

        {
            let mut deck = self.deck.borrow_mut();
            deck.shuffle(rng)?;
            deck.place_in_shuffler();
            deck.add_to_scene(scene);
        }

        let task = run_opening(
            self.deck.clone(),
            self.players.clone(),
            Rc::clone(&self.opening),
        );
        self.pool.spawner().spawn_local(task)?;
        self.pool.run_until_stalled();

        event!(
            target: "cardtable::table",
            Level::INFO,
            players = player_count,
            "table initialized"
        );
        Ok(())
    }

    /// One frame.
    pub fn update(&mut self) {
        let eye = self.viewpoint.eye();
        self.deck.borrow_mut().update(eye);
        self.pool.run_until_stalled();
    }

    pub fn players(&self) -> &[SharedPlayer] {
        &self.players
    }

    pub fn dealer(&self) -> Option<SharedPlayer> {
        find_dealer(&self.players).ok()
    }

    pub fn deck(&self) -> Ref<'_, Deck> {
        self.deck.borrow()
    }

    pub fn opening_status(&self) -> OpeningStatus {
        self.opening.borrow().clone()
    }

    pub fn layout_overflow(&self) -> Option<&LayoutOverflow> {
        self.overflow.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<CardEvent> {
        self.deck.borrow_mut().drain_events()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::capture(self)
    }
}

async fn run_opening(
    deck: SharedDeck,
    players: Vec<SharedPlayer>,
    status: Rc<RefCell<OpeningStatus>>,
) {
    let outcome = opening_sequence(&deck, &players, &status).await;
    let finished = match outcome {
        Ok(()) => {
            event!(
                target: "cardtable::table",
                Level::INFO,
                dealt = deck.borrow().dealt(),
                "opening deal complete"
            );
            OpeningStatus::Complete
        }
        Err(err) => {
            event!(
                target: "cardtable::table",
                Level::ERROR,
                error = %err,
                "opening deal aborted"
            );
            OpeningStatus::Aborted(err)
        }
    };
    *status.borrow_mut() = finished;
}

async fn opening_sequence(
    deck: &SharedDeck,
    players: &[SharedPlayer],
    status: &RefCell<OpeningStatus>,
) -> Result<(), DealError> {
    let dealer = find_dealer(players)?;
    let enter = |step: OpeningStep| {
        event!(target: "cardtable::table", Level::DEBUG, step = ?step, "opening step");
        *status.borrow_mut() = OpeningStatus::Dealing(step);
    };

    enter(OpeningStep::FirstRound);
    deck.deal_to_all(players, false, Facing::Up).await?;

    enter(OpeningStep::HoleCard);
    deck.deal_to(&dealer, Facing::Down)?.await?;

    enter(OpeningStep::SecondRound);
    deck.deal_to_all(players, false, Facing::Up).await?;

    enter(OpeningStep::DealerUpCard);
    deck.deal_to(&dealer, Facing::Up)?.await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{OpeningStatus, OpeningStep, Table};
    use crate::error::TableError;
    use crate::rng::ModuloRng;
    use crate::scene::{FixedViewpoint, RecordingScene};
    use std::rc::Rc;

    fn table() -> Table {
        Table::new(Rc::new(FixedViewpoint::default()))
    }

    #[test]
    fn init_starts_first_round_immediately() {
        let mut table = table();
        let mut scene = RecordingScene::new();
        table.init(2, &mut scene, &mut ModuloRng::seeded(5)).unwrap();

        assert_eq!(table.opening_status(), OpeningStatus::Dealing(OpeningStep::FirstRound));
        assert_eq!(table.deck().dealt(), 1);
        assert_eq!(table.players()[0].borrow().hand().len(), 1);
        assert_eq!(table.players()[1].borrow().hand().len(), 0);
        assert_eq!(scene.card_count(), 52);
        assert_eq!(scene.card_area_count(), 3);
    }

    #[test]
    fn dealer_is_seated_last() {
        let mut table = table();
        table
            .init(3, &mut RecordingScene::new(), &mut ModuloRng::seeded(1))
            .unwrap();
        assert_eq!(table.players().len(), 4);
        assert!(table.players()[3].borrow().is_dealer());
        assert_eq!(
            table.players().iter().filter(|p| p.borrow().is_dealer()).count(),
            1
        );
    }

    #[test]
    fn second_init_is_rejected() {
        let mut table = table();
        let mut scene = RecordingScene::new();
        table.init(1, &mut scene, &mut ModuloRng::seeded(1)).unwrap();
        let err = table.init(1, &mut scene, &mut ModuloRng::seeded(1)).unwrap_err();
        assert!(matches!(err, TableError::AlreadyInitialized));
    }

    #[test]
    fn overflowing_layout_is_reported_not_fatal() {
        let mut table = table();
        table
            .init(6, &mut RecordingScene::new(), &mut ModuloRng::seeded(2))
            .unwrap();
        let overflow = table.layout_overflow().expect("overflow recorded");
        assert_eq!(overflow.requested, 6);
        assert_eq!(overflow.capacity, 5);
    }

    #[test]
    fn status_display_is_readable() {
        assert_eq!(OpeningStatus::Complete.to_string(), "complete");
        assert_eq!(
            OpeningStatus::Dealing(OpeningStep::HoleCard).to_string(),
            "dealing:HoleCard"
        );
    }
}
