//! Rejection reasons for room intents.
//!
//! Every rejection is local to one intent: the room state is untouched and
//! the next intent is processed normally. Finished rounds are not errors;
//! they come back as `RoundOutcome` values.

use serde::Serialize;

use crate::cards::Card;
use crate::core::{CardId, PlayerId, RoomId};
use crate::rules::Blocked;

/// Broad class of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Room full, too few players, wrong round phase.
    Precondition,
    /// Not your turn, card not owned, card not playable, deck too small.
    IllegalAction,
    /// Missing or unknown suit/value choice.
    InvalidArgument,
    /// Unknown room or player.
    NotFound,
}

/// Why an intent was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("room is full ({capacity} players)")]
    RoomFull { capacity: usize },

    #[error("player {0} is already seated")]
    AlreadySeated(PlayerId),

    #[error("need at least {required} players to start, have {seated}")]
    NotEnoughPlayers { required: usize, seated: usize },

    #[error("a round is already in progress")]
    RoundInProgress,

    #[error("no round is in progress")]
    RoundNotStarted,

    #[error("discard pile has nothing under its top card")]
    NothingToReshuffle,

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("{0} is not in the player's hand")]
    CardNotInHand(CardId),

    #[error("{card} cannot be played: {reason}")]
    IllegalPlay { card: Card, reason: Blocked },

    #[error("deck holds {available} cards but {required} must be drawn; reshuffle first")]
    DeckTooSmall { required: usize, available: usize },

    #[error("{0} needs a chosen suit")]
    MissingSuit(Card),

    #[error("{0} needs a chosen value")]
    MissingValue(Card),

    #[error("unknown suit {0:?}")]
    InvalidSuit(String),

    #[error("unknown card value {0:?}")]
    InvalidValue(String),

    #[error("player {0} is not seated in this room")]
    NotSeated(PlayerId),

    #[error("room {0} does not exist")]
    RoomNotFound(RoomId),
}

/// A room checkpoint could not be written or read back.
#[derive(Debug, thiserror::Error)]
#[error("room checkpoint failed: {0}")]
pub struct CheckpointError(#[from] pub bincode::Error);

impl RulesError {
    /// Classify the rejection.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            RulesError::RoomFull { .. }
            | RulesError::AlreadySeated(_)
            | RulesError::NotEnoughPlayers { .. }
            | RulesError::RoundInProgress
            | RulesError::RoundNotStarted
            | RulesError::NothingToReshuffle => ErrorKind::Precondition,

            RulesError::NotYourTurn(_)
            | RulesError::CardNotInHand(_)
            | RulesError::IllegalPlay { .. }
            | RulesError::DeckTooSmall { .. } => ErrorKind::IllegalAction,

            RulesError::MissingSuit(_)
            | RulesError::MissingValue(_)
            | RulesError::InvalidSuit(_)
            | RulesError::InvalidValue(_) => ErrorKind::InvalidArgument,

            RulesError::NotSeated(_) | RulesError::RoomNotFound(_) => ErrorKind::NotFound,
        }
    }
}
