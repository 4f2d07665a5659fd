//! What players get to see.
//!
//! `PublicSnapshot` is broadcast to the whole room after every accepted
//! intent. `PlayerView` is private to one player and is the only place a
//! hand is ever exposed.

use serde::Serialize;

use crate::cards::{Card, Rank, Suit};
use crate::core::{CardId, PlayerId, RoomId, RoomState};
use crate::rules::RulesEngine;

/// Public information about one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
    pub connected: bool,
}

/// Room state as every player sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSnapshot {
    pub room_id: RoomId,
    pub players: Vec<PlayerSummary>,
    pub started: bool,
    pub current_player: usize,
    pub top_card: Option<Card>,
    pub current_suit: Option<Suit>,
    pub current_value: Option<Rank>,
    /// `1` or `-1`.
    pub direction: i8,
    pub deck_size: usize,
    pub discard_size: usize,
    pub draw_stack: u8,
    pub last_play_was_special: bool,
    pub winner: Option<PlayerId>,
}

impl PublicSnapshot {
    #[must_use]
    pub fn of(state: &RoomState) -> Self {
        let round = &state.round;
        Self {
            room_id: state.id.clone(),
            players: state
                .seats
                .iter()
                .map(|p| PlayerSummary {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    hand_size: p.hand.len(),
                    connected: p.connected,
                })
                .collect(),
            started: round.started,
            current_player: round.current_player,
            top_card: round.top_card().copied(),
            current_suit: round.current_suit,
            current_value: round.current_value,
            direction: round.direction.sign(),
            deck_size: round.deck.len(),
            discard_size: round.discard.len(),
            draw_stack: round.draw_stack,
            last_play_was_special: round.last_play_was_special,
            winner: round.winner.clone(),
        }
    }
}

/// One player's private view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub player: PlayerId,
    pub hand: Vec<Card>,
    /// Points currently held in hand.
    pub hand_points: u32,
    /// Cumulative points over finished rounds.
    pub total_points: u32,
    /// Cards in `hand` that can be played right now.
    pub playable: Vec<CardId>,
}

impl PlayerView {
    /// Build the view for a seated player.
    pub fn of<R: RulesEngine + ?Sized>(
        rules: &R,
        state: &RoomState,
        player: &PlayerId,
    ) -> Option<Self> {
        let record = state.seats.find(player)?;
        Some(Self {
            player: player.clone(),
            hand: record.hand.to_vec(),
            hand_points: record.hand_points(),
            total_points: state.history_of(player).map_or(0, |h| h.total_points),
            playable: rules.legal_plays(state, player),
        })
    }
}
