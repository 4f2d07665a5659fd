//! Shared helpers for integration tests.
//!
//! `init_logging` installs a test subscriber once per binary. The level
//! comes from `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`.
//!
//! ```bash
//! TEST_LOG=debug cargo test --test turn_tests
//! ```

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use prsi_engine::{
    Card, CardId, Deck, DiscardPile, GameRng, PlayerHistory, PlayerId, PlayerRecord, Rank, Room,
    RoomId, RoomState, StandardRules, Suit,
};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize test logging. Safe to call from every test.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn pid(id: &str) -> PlayerId {
    PlayerId::from(id)
}

pub fn card(id: u32, rank: Rank, suit: Suit) -> Card {
    Card::new(CardId(id), rank, suit)
}

/// A hand-built table for scenario tests.
///
/// Seats are filled in the order given. The round is started with `top` as
/// the only discard and `current_suit` set from it; player 0 acts first.
pub struct Table {
    state: RoomState,
}

impl Table {
    pub fn new(top: Card) -> Self {
        let mut state = RoomState::new(RoomId::new("test"), GameRng::new(7));
        state.round.started = true;
        state.round.discard = DiscardPile::starting_with(top);
        state.round.current_suit = Some(top.suit);
        state.meta.starter = Some(pid("a"));
        state.meta.rounds_started = 1;
        Self { state }
    }

    /// Seat a player holding `hand`.
    pub fn seat(mut self, id: &str, hand: Vec<Card>) -> Self {
        let mut record = PlayerRecord::new(pid(id), id.to_uppercase());
        record.hand.extend(hand);
        self.state
            .history
            .insert(pid(id), PlayerHistory::new(id.to_uppercase()));
        self.state.seats.push(record);
        self
    }

    /// Deck contents, bottom first.
    pub fn deck(mut self, cards: Vec<Card>) -> Self {
        self.state.round.deck = Deck::from_cards(cards);
        self
    }

    /// `count` filler cards for the deck.
    pub fn filler_deck(self, count: u32) -> Self {
        let cards = (0..count)
            .map(|i| card(1000 + i, Rank::Eight, Suit::Diamonds))
            .collect();
        self.deck(cards)
    }

    pub fn with(mut self, f: impl FnOnce(&mut RoomState)) -> Self {
        f(&mut self.state);
        self
    }

    pub fn build(self) -> Room {
        Room::from_state(self.state, StandardRules::default())
    }
}

/// Hand of a seated player.
pub fn hand_of(room: &Room, id: &str) -> Vec<Card> {
    room.state()
        .seats
        .find(&pid(id))
        .map(|p| p.hand.to_vec())
        .unwrap_or_default()
}

/// Id of the player whose turn it is.
pub fn current(room: &Room) -> PlayerId {
    room.state()
        .current_player()
        .map(|p| p.id.clone())
        .expect("a round should be running")
}
