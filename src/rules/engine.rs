//! Rules engine trait.
//!
//! The room calls into a `RulesEngine` for its rule constants and for every
//! legality decision. `StandardRules` is the house rule set; variants
//! implement the trait and override the hooks they need.

use crate::cards::Card;
use crate::core::{CardId, PlayerId, RoomConfig, RoomState};

use super::legality::{self, Blocked};

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `check_play` is the one legality decision. Both the engine and
///   `legal_plays` go through it, so they can never disagree.
/// - `on_red_draw_two` runs after a red Seven has resolved.
pub trait RulesEngine {
    /// Get the room configuration.
    fn config(&self) -> &RoomConfig;

    /// Decide whether `player` may play `card` right now.
    fn check_play(&self, state: &RoomState, player: &PlayerId, card: &Card) -> Result<(), Blocked> {
        legality::check_play(&state.round, state.is_current(player), card)
    }

    /// Hook for the red-Seven house rule. Does nothing by default.
    fn on_red_draw_two(&self, _state: &mut RoomState, _player: &PlayerId) {}

    // === Convenience Methods ===

    /// Whether `player` may play `card` right now.
    fn is_playable(&self, state: &RoomState, player: &PlayerId, card: &Card) -> bool {
        self.check_play(state, player, card).is_ok()
    }

    /// Ids of the cards in `player`'s hand that can be played now.
    ///
    /// Empty when it is not their turn.
    fn legal_plays(&self, state: &RoomState, player: &PlayerId) -> Vec<CardId> {
        let Some(record) = state.seats.find(player) else {
            return Vec::new();
        };
        record
            .hand
            .iter()
            .filter(|card| self.is_playable(state, player, card))
            .map(|card| card.id)
            .collect()
    }
}

/// The standard rule set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StandardRules {
    config: RoomConfig,
}

impl StandardRules {
    #[must_use]
    pub fn new(config: RoomConfig) -> Self {
        Self { config }
    }
}

impl RulesEngine for StandardRules {
    fn config(&self) -> &RoomConfig {
        &self.config
    }
}
