use crate::error::DealError;
use crate::model::card::{Card, CardId};
use crate::model::deal::{CardEvent, DealHandle, DealRecord};
use crate::model::face::CardFace;
use crate::model::hand::Facing;
use crate::model::label::Label;
use crate::model::player::Player;
use crate::model::suit::Suit;
use crate::motion::SPEED;
use crate::rng::RangeRng;
use crate::scene::{SceneSink, VisualKind};
use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use futures::channel::oneshot;
use glam::{Quat, Vec3};
use tracing::{Level, event};

pub const DECK_SIZE: usize = 52;

/// First slot of the shuffler stack; each further card steps along +X.
pub const SHUFFLER_ORIGIN: Vec3 = Vec3::new(18.0, 1.0, -8.0);
pub const SHUFFLER_STEP: f32 = 0.1;

/// Cosmetic scale marking the dealer's cards.
pub const DEALER_SCALE: f32 = 1.3;

/// Height the dealer's face-up card rises to after landing.
pub const PEEK_HEIGHT: f32 = 1.0;

/// The 52 cards, their draw order and the draw cursor.
///
/// Cards are stored by `CardId` and never move in storage; shuffling only
/// permutes `order`. Everything before `dealt` in `order` has been drawn.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    order: Vec<CardId>,
    dealt: usize,
    tick: u64,
    events: Vec<CardEvent>,
    history: Vec<DealRecord>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

impl Deck {
    /// Unshuffled deck, suit-major in `Suit::ALL` order, Ace to King.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for label in Label::ORDERED.iter().copied() {
                let id = CardId(cards.len());
                cards.push(Card::new(id, CardFace::new(label, suit)));
            }
        }
        let order = cards.iter().map(Card::id).collect();
        Self {
            cards,
            order,
            dealt: 0,
            tick: 0,
            events: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn add_to_scene(&self, scene: &mut dyn SceneSink) {
        for card in &self.cards {
            scene.add(VisualKind::Card(card.id()), card.transform());
        }
    }

    /// Stacks the cards in draw order on the shuffler, face down.
    pub fn place_in_shuffler(&mut self) {
        for (slot, id) in self.order.iter().enumerate() {
            let transform = self.cards[id.index()].transform_mut();
            transform.position = SHUFFLER_ORIGIN + Vec3::new(slot as f32 * SHUFFLER_STEP, 0.0, 0.0);
            transform.set_euler_xyz(-FRAC_PI_2, FRAC_PI_2, 0.0);
        }
    }

    /// Fisher-Yates over the draw order, last index down to 1.
    ///
    /// Only valid before the first draw.
    pub fn shuffle<R: RangeRng + ?Sized>(&mut self, rng: &mut R) -> Result<(), DealError> {
        if self.dealt > 0 {
            return Err(DealError::InvalidSequencing { dealt: self.dealt });
        }
        for i in (1..self.order.len()).rev() {
            let j = rng.range(0, i + 1);
            self.order.swap(i, j);
        }
        event!(target: "cardtable::deck", Level::DEBUG, cards = self.order.len(), "shuffled");
        Ok(())
    }

    /// Takes the card under the cursor, or `None` once all 52 are out.
    pub fn draw(&mut self) -> Option<CardId> {
        let id = *self.order.get(self.dealt)?;
        self.dealt += 1;
        Some(id)
    }

    /// Starts one card travelling to `player`.
    ///
    /// The card joins the hand immediately; the returned handle resolves when
    /// it lands. A face-up card for the dealer rises and floats after landing.
    pub fn deal_to(&mut self, player: &mut Player, facing: Facing) -> Result<DealHandle, DealError> {
        let Some(id) = self.draw() else {
            event!(
                target: "cardtable::deck",
                Level::WARN,
                seat = %player.seat(),
                dealt = self.dealt,
                "deck exhausted"
            );
            return Err(DealError::DeckExhausted { dealt: self.dealt });
        };

        let dealer = player.is_dealer();
        let card = &mut self.cards[id.index()];
        card.set_target_position(player.next_card_position());
        match facing {
            Facing::Up => card.show(),
            Facing::Down => card.hide(),
        }
        if dealer {
            card.transform_mut().set_uniform_scale(DEALER_SCALE);
        }

        let (sender, receiver) = oneshot::channel();
        let peek = dealer && facing == Facing::Up;
        card.on_arrived(Box::new(move |card: &mut Card| {
            // The dealing sequence may have been dropped; the peek still runs.
            let _ = sender.send(card.id());
            if peek {
                start_peek(card);
            }
        }));

        let face = card.face();
        player.add_card(id, facing);
        let record = DealRecord {
            sequence: self.history.len(),
            seat: player.seat(),
            card: id,
            face,
            facing,
        };
        self.history.push(record);

        event!(
            target: "cardtable::deck",
            Level::DEBUG,
            sequence = record.sequence,
            seat = %record.seat,
            card = %face,
            facing = ?facing,
            "dealt"
        );

        Ok(DealHandle::new(id, receiver))
    }

    /// Advances every card by one frame and queues the motions it produced.
    pub fn update(&mut self, viewpoint: Vec3) {
        self.tick += 1;
        for card in &mut self.cards {
            if let Some(motion) = card.update(SPEED, viewpoint) {
                self.events.push(CardEvent {
                    tick: self.tick,
                    card: card.id(),
                    motion,
                });
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<CardEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id.index()]
    }

    /// Cards in current draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().map(|id| &self.cards[id.index()])
    }

    pub fn order(&self) -> &[CardId] {
        &self.order
    }

    pub fn dealt(&self) -> usize {
        self.dealt
    }

    pub fn remaining(&self) -> usize {
        self.order.len() - self.dealt
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn history(&self) -> &[DealRecord] {
        &self.history
    }

    /// True while any card still travels or turns on its own.
    ///
    /// A floating card's orientation follows the viewpoint, so its rotation
    /// target is ignored here.
    pub fn is_animating(&self) -> bool {
        self.cards
            .iter()
            .any(|card| card.is_moving() || (card.is_rotating() && !card.is_floating()))
    }
}

fn start_peek(card: &mut Card) {
    let landed = card.position();
    card.set_target_position(Vec3::new(landed.x, PEEK_HEIGHT, landed.z));
    card.set_floating(true);
    card.set_target_rotation(Quat::from_rotation_x(FRAC_PI_4));
}

#[cfg(test)]
mod tests {
    use super::{DECK_SIZE, DEALER_SCALE, Deck, PEEK_HEIGHT, SHUFFLER_ORIGIN};
    use crate::error::DealError;
    use crate::model::card::Motion;
    use crate::model::hand::Facing;
    use crate::model::player::{Player, Seat};
    use crate::rng::{ModuloRng, RangeRng};
    use crate::scene::RecordingScene;
    use futures::FutureExt;
    use glam::Vec3;
    use std::collections::HashSet;

    const EYE: Vec3 = Vec3::new(0.0, 10.0, 10.0);

    /// Always picks the lowest index.
    struct Lowest;

    impl RangeRng for Lowest {
        fn range(&mut self, min: usize, _max: usize) -> usize {
            min
        }
    }

    fn run_until_idle(deck: &mut Deck) {
        for _ in 0..2_000 {
            if !deck.is_animating() {
                return;
            }
            deck.update(EYE);
        }
        panic!("cards never settled");
    }

    #[test]
    fn standard_deck_has_52_unique_faces() {
        let deck = Deck::standard();
        let faces: HashSet<_> = deck.iter().map(|card| card.face()).collect();
        assert_eq!(deck.order().len(), DECK_SIZE);
        assert_eq!(faces.len(), DECK_SIZE);
    }

    #[test]
    fn shuffle_permutes_without_losing_cards() {
        let mut deck = Deck::standard();
        let before: HashSet<_> = deck.order().iter().copied().collect();
        deck.shuffle(&mut ModuloRng::seeded(7)).unwrap();
        let after: HashSet<_> = deck.order().iter().copied().collect();
        assert_eq!(before, after);
        assert_eq!(deck.order().len(), DECK_SIZE);
    }

    #[test]
    fn shuffle_follows_fisher_yates_swaps() {
        // Choosing index 0 at every step rotates the first card to the end.
        let mut deck = Deck::standard();
        let original = deck.order().to_vec();
        deck.shuffle(&mut Lowest).unwrap();
        assert_eq!(deck.order()[DECK_SIZE - 1], original[0]);
        assert_eq!(deck.order()[0], original[1]);
    }

    #[test]
    fn seeded_shuffles_repeat() {
        let mut a = Deck::standard();
        let mut b = Deck::standard();
        a.shuffle(&mut ModuloRng::seeded(99)).unwrap();
        b.shuffle(&mut ModuloRng::seeded(99)).unwrap();
        assert_eq!(a.order(), b.order());
    }

    #[test]
    fn draw_walks_the_order_then_runs_dry() {
        let mut deck = Deck::standard();
        deck.shuffle(&mut ModuloRng::seeded(3)).unwrap();
        let expected = deck.order().to_vec();

        let drawn: Vec<_> = (0..DECK_SIZE).map(|_| deck.draw().unwrap()).collect();
        assert_eq!(drawn, expected);
        assert_eq!(deck.draw(), None);
        assert_eq!(deck.dealt(), DECK_SIZE);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn shuffle_after_draw_is_rejected() {
        let mut deck = Deck::standard();
        deck.draw();
        let err = deck.shuffle(&mut ModuloRng::seeded(1)).unwrap_err();
        assert_eq!(err, DealError::InvalidSequencing { dealt: 1 });
    }

    #[test]
    fn deal_on_empty_deck_fails_loudly() {
        let mut deck = Deck::standard();
        while deck.draw().is_some() {}
        let mut player = Player::new(Seat::Player(0));
        let err = deck.deal_to(&mut player, Facing::Up).unwrap_err();
        assert_eq!(err, DealError::DeckExhausted { dealt: DECK_SIZE });
        assert!(player.hand().is_empty());
    }

    #[test]
    fn dealt_card_joins_hand_before_arrival() {
        let mut deck = Deck::standard();
        deck.place_in_shuffler();
        let mut player = Player::new(Seat::Player(0));
        player.set_card_area_position(Vec3::new(0.0, 0.05, 6.0));

        let mut handle = deck.deal_to(&mut player, Facing::Up).unwrap();
        assert_eq!(player.hand().len(), 1);
        assert!((&mut handle).now_or_never().is_none());

        run_until_idle(&mut deck);
        assert_eq!(handle.now_or_never(), Some(Ok(deck.order()[0])));
        let card = deck.card(deck.order()[0]);
        assert!(card.position().distance(Vec3::new(0.0, 0.05, 5.7)) < 0.01);
    }

    #[test]
    fn hidden_card_is_flipped_face_down() {
        let mut deck = Deck::standard();
        let mut player = Player::new(Seat::Player(0));
        let _ = deck.deal_to(&mut player, Facing::Down).unwrap();
        let card = deck.card(player.hand().get(0).unwrap().card);
        let target = card.target_rotation().expect("hide sets a rotation");
        assert!(target.abs_diff_eq(glam::Quat::from_rotation_x(core::f32::consts::FRAC_PI_2), 1e-5));
    }

    #[test]
    fn dealer_cards_are_scaled() {
        let mut deck = Deck::standard();
        let mut dealer = Player::dealer();
        let mut player = Player::new(Seat::Player(0));
        let to_dealer = deck.deal_to(&mut dealer, Facing::Down).unwrap().card();
        let to_player = deck.deal_to(&mut player, Facing::Up).unwrap().card();
        assert_eq!(deck.card(to_dealer).transform().scale, Vec3::splat(DEALER_SCALE));
        assert_eq!(deck.card(to_player).transform().scale, Vec3::ONE);
    }

    #[test]
    fn dealer_face_up_card_peeks_after_arrival() {
        let mut deck = Deck::standard();
        deck.place_in_shuffler();
        let mut dealer = Player::dealer();
        dealer.set_card_area_position(Vec3::new(0.0, 0.05, -8.0));
        let mut handle = deck.deal_to(&mut dealer, Facing::Up).unwrap();
        let id = handle.card();

        let mut resolved_at = None;
        for _ in 0..2_000 {
            deck.update(EYE);
            if (&mut handle).now_or_never().is_some() {
                resolved_at = Some(deck.tick());
                break;
            }
        }
        let resolved_at = resolved_at.expect("deal resolved");

        // Resolution happens on first landing, while the peek is still in flight.
        let card = deck.card(id);
        assert!(card.is_floating());
        assert!(card.is_moving());
        assert_eq!(card.target_position().unwrap().y, PEEK_HEIGHT);

        let events = deck.drain_events();
        let arrived = events
            .iter()
            .position(|e| e.card == id && e.motion == Motion::Arrived)
            .expect("arrival event");
        assert_eq!(events[arrived].tick, resolved_at);
        assert!(events[arrived + 1..].iter().all(|e| e.card != id || e.tick > resolved_at));

        run_until_idle(&mut deck);
        let card = deck.card(id);
        assert!((card.position().y - PEEK_HEIGHT).abs() < 0.01);
        assert!(card.is_floating());
    }

    #[test]
    fn dealer_hole_card_does_not_peek() {
        let mut deck = Deck::standard();
        let mut dealer = Player::dealer();
        let id = deck.deal_to(&mut dealer, Facing::Down).unwrap().card();
        run_until_idle(&mut deck);
        assert!(!deck.card(id).is_floating());
    }

    #[test]
    fn history_records_deals_in_order() {
        let mut deck = Deck::standard();
        let mut player = Player::new(Seat::Player(2));
        let mut dealer = Player::dealer();
        let _ = deck.deal_to(&mut player, Facing::Up).unwrap();
        let _ = deck.deal_to(&mut dealer, Facing::Down).unwrap();

        let history = deck.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sequence, 0);
        assert_eq!(history[0].seat, Seat::Player(2));
        assert_eq!(history[1].seat, Seat::Dealer);
        assert_eq!(history[1].facing, Facing::Down);
    }

    #[test]
    fn shuffler_stack_steps_along_x() {
        let mut deck = Deck::standard();
        deck.place_in_shuffler();
        let mut scene = RecordingScene::new();
        deck.add_to_scene(&mut scene);
        assert_eq!(scene.card_count(), DECK_SIZE);

        let positions: Vec<_> = deck.iter().map(|card| card.position()).collect();
        assert_eq!(positions[0], SHUFFLER_ORIGIN);
        assert!((positions[10].x - (SHUFFLER_ORIGIN.x + 1.0)).abs() < 1e-5);
    }

    #[test]
    fn events_are_drained_once() {
        let mut deck = Deck::standard();
        let mut player = Player::new(Seat::Player(0));
        player.set_card_area_position(Vec3::new(1.0, 0.0, 0.0));
        let _ = deck.deal_to(&mut player, Facing::Up).unwrap();
        deck.update(EYE);
        let events = deck.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].motion, Motion::Moved);
        assert!(deck.drain_events().is_empty());
    }
}
