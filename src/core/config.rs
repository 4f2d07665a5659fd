//! Room configuration.
//!
//! `RoomConfig` carries the rule constants of the house rules: seat limits,
//! hand sizes, the penalty-hand formula, and the draw-stack cap. Defaults
//! reproduce the standard rules; variants and tests tune them.
//!
//! ```
//! use prsi_engine::core::RoomConfig;
//!
//! let config = RoomConfig::default().with_seed(7).with_max_players(3);
//! assert!(config.validate().is_ok());
//!
//! let from_json = RoomConfig::from_json(r#"{"draw_stack_cap": 12}"#).unwrap();
//! assert_eq!(from_json.draw_stack_cap, 12);
//! assert_eq!(from_json.max_players, 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::DECK_SIZE;

/// Reasons a configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("min_players must be at least 2, got {0}")]
    TooFewSeats(usize),
    #[error("max_players ({max}) is below min_players ({min})")]
    SeatRange { min: usize, max: usize },
    #[error("{players} players with up to {hand} cards each leave no opening card in the deck")]
    DeckTooSmall { players: usize, hand: usize },
    #[error("draw_stack_cap must hold a draw-five card, got {0}")]
    DrawCapTooLow(u8),
    #[error("penalty_points_step must be positive")]
    ZeroPenaltyStep,
    #[error("invalid config JSON: {0}")]
    Parse(String),
}

/// Rule constants for one room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Seats available in the room.
    pub max_players: usize,

    /// Players needed to start a round.
    pub min_players: usize,

    /// Cards dealt to a player without a penalty.
    pub base_hand_size: usize,

    /// Starting point for a previous loser's hand before penalties.
    pub penalty_hand_size: usize,

    /// Each full step of last-round points costs a loser one card.
    pub penalty_points_step: u32,

    /// Maximum accumulated forced draw.
    pub draw_stack_cap: u8,

    /// Tens only reverse direction with at least this many seated players.
    pub reverse_min_players: usize,

    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_players: 4,
            min_players: 2,
            base_hand_size: 4,
            penalty_hand_size: 5,
            penalty_points_step: 50,
            draw_stack_cap: 10,
            reverse_min_players: 3,
            seed: None,
        }
    }
}

impl RoomConfig {
    /// Parse a JSON config, filling missing keys with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Pin the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the seat limit.
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    /// Set the draw-stack cap.
    #[must_use]
    pub fn with_draw_stack_cap(mut self, cap: u8) -> Self {
        self.draw_stack_cap = cap;
        self
    }

    /// Check that the constants describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 {
            return Err(ConfigError::TooFewSeats(self.min_players));
        }
        if self.max_players < self.min_players {
            return Err(ConfigError::SeatRange {
                min: self.min_players,
                max: self.max_players,
            });
        }
        let hand = self.base_hand_size.max(self.penalty_hand_size);
        // One card must remain to open the discard pile.
        if self.max_players * hand >= DECK_SIZE {
            return Err(ConfigError::DeckTooSmall {
                players: self.max_players,
                hand,
            });
        }
        if self.draw_stack_cap < 5 {
            return Err(ConfigError::DrawCapTooLow(self.draw_stack_cap));
        }
        if self.penalty_points_step == 0 {
            return Err(ConfigError::ZeroPenaltyStep);
        }
        Ok(())
    }

    /// Cards dealt to a previous-round loser who scored `last_round_points`.
    ///
    /// One card is removed per full `penalty_points_step`; zero means the
    /// player is eliminated.
    #[must_use]
    pub fn penalty_hand(&self, last_round_points: u32) -> usize {
        let penalty = (last_round_points / self.penalty_points_step) as usize;
        self.penalty_hand_size.saturating_sub(penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RoomConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_players, 4);
        assert_eq!(config.draw_stack_cap, 10);
    }

    #[test]
    fn test_penalty_hand() {
        let config = RoomConfig::default();
        assert_eq!(config.penalty_hand(1), 5);
        assert_eq!(config.penalty_hand(49), 5);
        assert_eq!(config.penalty_hand(50), 4);
        assert_eq!(config.penalty_hand(150), 2);
        assert_eq!(config.penalty_hand(249), 1);
        assert_eq!(config.penalty_hand(260), 0);
        assert_eq!(config.penalty_hand(1000), 0);
    }

    #[test]
    fn test_validate_rejects_bad_seats() {
        let config = RoomConfig {
            min_players: 1,
            ..RoomConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TooFewSeats(1)));

        let config = RoomConfig::default().with_max_players(7);
        assert!(matches!(config.validate(), Err(ConfigError::DeckTooSmall { .. })));
    }

    #[test]
    fn test_validate_rejects_low_cap() {
        let config = RoomConfig::default().with_draw_stack_cap(4);
        assert_eq!(config.validate(), Err(ConfigError::DrawCapTooLow(4)));
    }

    #[test]
    fn test_from_json_partial() {
        let config = RoomConfig::from_json(r#"{"seed": 99, "max_players": 3}"#).unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.max_players, 3);
        assert_eq!(config.base_hand_size, 4);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            RoomConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RoomConfig::from_json(r#"{"max_players": 1}"#),
            Err(ConfigError::SeatRange { .. })
        ));
    }
}
