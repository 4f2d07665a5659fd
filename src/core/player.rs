//! Player identification, seating, and cross-round history.
//!
//! ## PlayerId
//!
//! Opaque identifier handed to the room by the transport layer (a session or
//! connection id). The engine never interprets it.
//!
//! ## Seats
//!
//! Turn order is an explicit ordered sequence of seated players, separate
//! from any lookup structure. The turn pointer in `RoundState` indexes into
//! it.
//!
//! ## PlayerHistory
//!
//! Per-room score memory that survives between rounds: cumulative points,
//! rounds played, and the points of the round just finished.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{hand_points, Card};
use crate::core::CardId;

/// Player identifier supplied by the transport.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A player's cards. Hands rarely exceed eight cards, so they stay inline.
pub type Hand = SmallVec<[Card; 8]>;

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub hand: Hand,
    pub connected: bool,
}

impl PlayerRecord {
    /// A freshly joined, connected player with an empty hand.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Hand::new(),
            connected: true,
        }
    }

    /// Position of a card in this player's hand.
    #[must_use]
    pub fn find_card(&self, card_id: CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == card_id)
    }

    /// Remove a card by id.
    pub fn take_card(&mut self, card_id: CardId) -> Option<Card> {
        let pos = self.find_card(card_id)?;
        Some(self.hand.remove(pos))
    }

    /// Points currently held in hand.
    #[must_use]
    pub fn hand_points(&self) -> u32 {
        hand_points(&self.hand)
    }
}

/// Score memory kept for the lifetime of the room.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHistory {
    /// Display name at the time the player first joined.
    pub name: String,
    pub total_points: u32,
    pub rounds_played: u32,
    pub last_round_points: u32,
}

impl PlayerHistory {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fold one finished round into the history.
    pub fn record_round(&mut self, points: u32) {
        self.total_points += points;
        self.rounds_played += 1;
        self.last_round_points = points;
    }
}

/// Seated players in turn order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats {
    players: Vec<PlayerRecord>,
}

impl Seats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Seat a player at the end of the turn order.
    pub fn push(&mut self, record: PlayerRecord) {
        self.players.push(record);
    }

    /// Unseat a player, returning their former index and record.
    pub fn remove(&mut self, id: &PlayerId) -> Option<(usize, PlayerRecord)> {
        let index = self.index_of(id)?;
        Some((index, self.players.remove(index)))
    }

    #[must_use]
    pub fn index_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PlayerRecord> {
        self.players.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PlayerRecord> {
        self.players.get_mut(index)
    }

    #[must_use]
    pub fn find(&self, id: &PlayerId) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn find_mut(&mut self, id: &PlayerId) -> Option<&mut PlayerRecord> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlayerRecord> {
        self.players.iter_mut()
    }

    /// Player ids in turn order.
    pub fn ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.players.iter().map(|p| &p.id)
    }

    /// Total cards held across all hands.
    #[must_use]
    pub fn cards_in_hands(&self) -> usize {
        self.players.iter().map(|p| p.hand.len()).sum()
    }
}
