use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cardtable_core::error::DealError;
use cardtable_core::game::{SharedDeck, SharedPlayer};
use cardtable_core::model::deck::Deck;
use cardtable_core::model::hand::Facing;
use cardtable_core::model::player::{Player, Seat};
use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;
use glam::Vec3;

const EYE: Vec3 = Vec3::new(0.0, 10.0, 10.0);

fn seat(seat: Seat, x: f32) -> SharedPlayer {
    let mut player = Player::new(seat);
    player.set_card_area_position(Vec3::new(x, 0.05, 6.0));
    Rc::new(RefCell::new(player))
}

fn table_players() -> Vec<SharedPlayer> {
    vec![
        seat(Seat::Player(0), 0.0),
        seat(Seat::Player(1), 7.0),
        seat(Seat::Dealer, 0.0),
    ]
}

fn hand_sizes(players: &[SharedPlayer]) -> Vec<usize> {
    players.iter().map(|p| p.borrow().hand().len()).collect()
}

#[test]
fn round_is_strictly_sequential() {
    let mut deck = Deck::standard();
    deck.place_in_shuffler();
    let deck = SharedDeck::new(deck);
    let players = table_players();
    let done = Rc::new(Cell::new(false));

    let mut pool = LocalPool::new();
    {
        let deck = deck.clone();
        let players = players.clone();
        let done = Rc::clone(&done);
        pool.spawner()
            .spawn_local(async move {
                deck.deal_to_all(&players, true, Facing::Down)
                    .await
                    .expect("round completes");
                done.set(true);
            })
            .unwrap();
    }

    pool.run_until_stalled();
    assert_eq!(hand_sizes(&players), vec![1, 0, 0]);

    let mut observed = vec![hand_sizes(&players)];
    for _ in 0..5_000 {
        deck.borrow_mut().update(EYE);
        pool.run_until_stalled();
        let sizes = hand_sizes(&players);
        if observed.last() != Some(&sizes) {
            observed.push(sizes);
        }
        if done.get() {
            break;
        }
    }

    assert!(done.get(), "round never finished");
    assert_eq!(
        observed,
        vec![vec![1, 0, 0], vec![1, 1, 0], vec![1, 1, 1]]
    );
    let dealer = players[2].borrow();
    assert_eq!(dealer.hand().get(0).unwrap().facing, Facing::Down);
}

#[test]
fn round_without_dealer_flag_skips_the_dealer() {
    let deck = SharedDeck::new(Deck::standard());
    let players = table_players();
    let mut pool = LocalPool::new();
    {
        let deck = deck.clone();
        let players = players.clone();
        pool.spawner()
            .spawn_local(async move {
                deck.deal_to_all(&players, false, Facing::Up).await.unwrap();
            })
            .unwrap();
    }

    for _ in 0..5_000 {
        deck.borrow_mut().update(EYE);
        pool.run_until_stalled();
    }

    assert_eq!(hand_sizes(&players), vec![1, 1, 0]);
    assert_eq!(deck.borrow().dealt(), 2);
}

#[test]
fn dealer_card_without_dealer_fails() {
    let deck = SharedDeck::new(Deck::standard());
    let err = block_on(deck.deal_to_all(&[], true, Facing::Up)).unwrap_err();
    assert_eq!(err, DealError::MissingDealer);
}

#[test]
fn exhausted_deck_fails_the_round() {
    let deck = SharedDeck::new(Deck::standard());
    while deck.borrow_mut().draw().is_some() {}
    let players = table_players();
    let err = block_on(deck.deal_to_all(&players, false, Facing::Up)).unwrap_err();
    assert_eq!(err, DealError::DeckExhausted { dealt: 52 });
    assert_eq!(hand_sizes(&players), vec![0, 0, 0]);
}
