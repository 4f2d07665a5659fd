//! Room state: seats, cross-round memory, and the live round.
//!
//! ## RoundState
//!
//! Everything that is reset when a new round is dealt: deck, discard pile,
//! turn pointer, direction, draw stack, the active suit/value constraints,
//! and the round's result once it ends.
//!
//! ## RoomMeta
//!
//! What links one round to the next: who started the room's first round and
//! who lost the round just finished.
//!
//! ## RoomState
//!
//! The single authoritative structure for one room. Exactly one
//! `RoundState` is live per room at a time.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::entity::CardIdAllocator;
use super::player::{PlayerHistory, PlayerId, PlayerRecord, Seats};
use super::rng::GameRng;
use crate::cards::{Card, Deck, DiscardPile, Rank, Suit};
use crate::rules::RoundOutcome;

/// Room identifier supplied by the transport.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Increasing seat index.
    #[default]
    Forward,
    /// Decreasing seat index.
    Backward,
}

impl Direction {
    /// `+1` or `-1`.
    #[must_use]
    pub fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Seat index one step from `index` around a table of `seats`.
    #[must_use]
    pub fn step(self, index: usize, seats: usize) -> usize {
        debug_assert!(seats > 0);
        match self {
            Direction::Forward => (index + 1) % seats,
            Direction::Backward => (index + seats - 1) % seats,
        }
    }
}

/// State of the round being played.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Cards may be played.
    pub started: bool,

    pub deck: Deck,

    /// Never empty while `started`.
    pub discard: DiscardPile,

    /// Index into `Seats` of the player to act.
    pub current_player: usize,

    pub direction: Direction,

    /// Accumulated forced draw, capped by the room config.
    pub draw_stack: u8,

    /// Suit a plain card must follow.
    pub current_suit: Option<Suit>,

    /// Value lock set by a Jack. Overrides suit matching while set.
    pub current_value: Option<Rank>,

    /// The next turn advance skips a player.
    pub skip_next: bool,

    /// The top card is a skip/draw card whose effect is still fresh.
    pub last_play_was_special: bool,

    pub winner: Option<PlayerId>,

    pub result: Option<RoundOutcome>,
}

impl RoundState {
    /// The top card of the discard pile.
    #[must_use]
    pub fn top_card(&self) -> Option<&Card> {
        self.discard.top()
    }

    /// Cards held by the deck and discard pile together.
    #[must_use]
    pub fn cards_on_table(&self) -> usize {
        self.deck.len() + self.discard.len()
    }

    /// Clear per-round fields ahead of a new deal.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Memory that links consecutive rounds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMeta {
    /// Initiator of the room's first round, fixed for the room's lifetime.
    pub starter: Option<PlayerId>,

    /// Players tied at the highest non-zero score of the last round.
    pub previous_losers: Vec<PlayerId>,

    /// Rounds dealt so far, including ones that ended in elimination.
    pub rounds_started: u32,
}

/// The authoritative state of one room.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomState {
    pub id: RoomId,

    /// Seated players in turn order.
    pub seats: Seats,

    /// Score memory by player, kept while the room lives.
    pub history: FxHashMap<PlayerId, PlayerHistory>,

    pub meta: RoomMeta,

    pub round: RoundState,

    /// Source of all shuffles and tie-breaks.
    pub rng: GameRng,

    /// Card id source.
    pub card_ids: CardIdAllocator,
}

impl RoomState {
    /// Create an empty room.
    #[must_use]
    pub fn new(id: RoomId, rng: GameRng) -> Self {
        Self {
            id,
            seats: Seats::new(),
            history: FxHashMap::default(),
            meta: RoomMeta::default(),
            round: RoundState::default(),
            rng,
            card_ids: CardIdAllocator::new(),
        }
    }

    /// The player whose turn it is, if a round is running.
    #[must_use]
    pub fn current_player(&self) -> Option<&PlayerRecord> {
        if !self.round.started {
            return None;
        }
        self.seats.get(self.round.current_player)
    }

    /// Whether `player` holds the turn.
    #[must_use]
    pub fn is_current(&self, player: &PlayerId) -> bool {
        self.current_player().is_some_and(|p| &p.id == player)
    }

    /// History entry for a player, if they ever joined.
    #[must_use]
    pub fn history_of(&self, player: &PlayerId) -> Option<&PlayerHistory> {
        self.history.get(player)
    }

    /// Every card the room is tracking: hands, deck, and discard pile.
    #[must_use]
    pub fn card_total(&self) -> usize {
        self.seats.cards_in_hands() + self.round.cards_on_table()
    }
}
