//! Intents and the action log.
//!
//! An `Intent` is one thing a player asks the room to do. The room accepts
//! or rejects each intent atomically; accepted intents are appended to the
//! room's log as `ActionRecord`s for replay and debugging.

use serde::{Deserialize, Serialize};

use super::entity::CardId;
use super::player::PlayerId;
use crate::cards::{Rank, Suit};

/// A player's request to the room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Take a seat.
    Join { name: String },
    /// Leave the room.
    Leave,
    /// Connection dropped or came back.
    SetConnected { connected: bool },
    /// Start the next round.
    StartRound,
    /// Play a card from hand.
    PlayCard {
        card_id: CardId,
        chosen_suit: Option<Suit>,
        chosen_value: Option<Rank>,
    },
    /// Draw one card, or the whole draw stack.
    DrawCard,
    /// Turn the discard pile (minus its top) back into the deck.
    Reshuffle,
}

impl Intent {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Join { .. } => "join",
            Intent::Leave => "leave",
            Intent::SetConnected { .. } => "set_connected",
            Intent::StartRound => "start_round",
            Intent::PlayCard { .. } => "play_card",
            Intent::DrawCard => "draw_card",
            Intent::Reshuffle => "reshuffle",
        }
    }

    /// Whether the intent touches round state (as opposed to seating).
    #[must_use]
    pub fn is_round_action(&self) -> bool {
        matches!(
            self,
            Intent::StartRound | Intent::PlayCard { .. } | Intent::DrawCard | Intent::Reshuffle
        )
    }
}

/// An accepted intent with its position in the room's log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Position in the room log (starts at 0).
    pub sequence: u32,

    /// The player who acted.
    pub player: PlayerId,

    /// What they did.
    pub intent: Intent,

    /// Round counter at the time of the action.
    pub round: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(sequence: u32, player: PlayerId, intent: Intent, round: u32) -> Self {
        Self {
            sequence,
            player,
            intent,
            round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_names() {
        assert_eq!(Intent::DrawCard.name(), "draw_card");
        assert_eq!(
            Intent::Join {
                name: "Ann".into()
            }
            .name(),
            "join"
        );
    }

    #[test]
    fn test_round_actions() {
        assert!(Intent::StartRound.is_round_action());
        assert!(Intent::Reshuffle.is_round_action());
        assert!(!Intent::Leave.is_round_action());
        assert!(!Intent::SetConnected { connected: false }.is_round_action());
    }

    #[test]
    fn test_action_record() {
        let intent = Intent::PlayCard {
            card_id: CardId(5),
            chosen_suit: Some(Suit::Clubs),
            chosen_value: None,
        };
        let record = ActionRecord::new(3, PlayerId::new("p1"), intent.clone(), 2);

        assert_eq!(record.sequence, 3);
        assert_eq!(record.player, PlayerId::new("p1"));
        assert_eq!(record.intent, intent);
        assert_eq!(record.round, 2);
    }
}
