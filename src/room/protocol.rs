//! JSON message contract between the room and its transport.
//!
//! The transport decodes a `ClientMessage`, hands it to `Room::handle`
//! together with the sender's id, and delivers every returned `Envelope`.
//! Suits and values arrive as wire strings and are parsed here, so a bad
//! choice is rejected before it reaches the rules.

use serde::{Deserialize, Serialize};

use super::orchestrator::Room;
use crate::cards::{Card, Rank, Suit};
use crate::core::{CardId, Intent, PlayerId};
use crate::error::{ErrorKind, RulesError};
use crate::rules::{RoundOutcome, RulesEngine};

/// A message from a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    JoinRoom {
        name: String,
    },
    LeaveRoom,
    SetConnected {
        connected: bool,
    },
    StartGame,
    PlayCard {
        card_id: CardId,
        chosen_suit: Option<String>,
        chosen_value: Option<String>,
    },
    DrawCard,
    ReshuffleDiscardPile,
}

impl ClientMessage {
    /// Parse wire strings into an intent.
    pub fn into_intent(self) -> Result<Intent, RulesError> {
        let intent = match self {
            ClientMessage::JoinRoom { name } => Intent::Join { name },
            ClientMessage::LeaveRoom => Intent::Leave,
            ClientMessage::SetConnected { connected } => Intent::SetConnected { connected },
            ClientMessage::StartGame => Intent::StartRound,
            ClientMessage::PlayCard {
                card_id,
                chosen_suit,
                chosen_value,
            } => Intent::PlayCard {
                card_id,
                chosen_suit: chosen_suit.as_deref().map(str::parse::<Suit>).transpose()?,
                chosen_value: chosen_value.as_deref().map(str::parse::<Rank>).transpose()?,
            },
            ClientMessage::DrawCard => Intent::DrawCard,
            ClientMessage::ReshuffleDiscardPile => Intent::Reshuffle,
        };
        Ok(intent)
    }
}

/// A message to one or more clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    GameState(super::PublicSnapshot),
    /// The recipient's hand and the ids in it they may play now.
    PlayerHand {
        hand: Vec<Card>,
        playable: Vec<CardId>,
    },
    PlayerPoints { points: u32, total_points: u32 },
    RoundOver(RoundOutcome),
    Error { kind: ErrorKind, message: String },
}

impl From<&RulesError> for ServerMessage {
    fn from(err: &RulesError) -> Self {
        ServerMessage::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Who receives a message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    /// Everyone seated in the room.
    Room,
    Player(PlayerId),
}

/// A message and its audience.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub to: Recipient,
    pub message: ServerMessage,
}

impl Envelope {
    #[must_use]
    pub fn room(message: ServerMessage) -> Self {
        Self {
            to: Recipient::Room,
            message,
        }
    }

    #[must_use]
    pub fn player(player: PlayerId, message: ServerMessage) -> Self {
        Self {
            to: Recipient::Player(player),
            message,
        }
    }
}

impl<R: RulesEngine> Room<R> {
    /// Process one client message and produce everything to send back.
    ///
    /// A rejection yields a single `Error` to the sender. An accepted
    /// intent broadcasts the new snapshot, refreshes the private view of
    /// every player whose hand it touched, and broadcasts `RoundOver` when
    /// the round ended. When the turn may have moved, the player now on
    /// turn gets a fresh hand too, so their playable ids are current.
    pub fn handle(&mut self, actor: &PlayerId, message: ClientMessage) -> Vec<Envelope> {
        let result = message.into_intent().and_then(|intent| {
            let mut touched = self.touched_by(actor, &intent);
            let turn_may_move = intent.is_round_action() || matches!(intent, Intent::Leave);
            let update = self.apply(actor, intent)?;
            if turn_may_move && self.state().round.started {
                if let Some(next) = self.state().current_player().map(|p| p.id.clone()) {
                    if !touched.contains(&next) {
                        touched.push(next);
                    }
                }
            }
            Ok((update, touched))
        });

        let (update, touched) = match result {
            Ok(ok) => ok,
            Err(err) => return vec![Envelope::player(actor.clone(), ServerMessage::from(&err))],
        };

        let mut out = vec![Envelope::room(ServerMessage::GameState(update.snapshot))];
        for player in touched {
            if let Some(view) = self.player_view(&player) {
                out.push(Envelope::player(
                    player.clone(),
                    ServerMessage::PlayerHand {
                        hand: view.hand,
                        playable: view.playable,
                    },
                ));
                out.push(Envelope::player(
                    player,
                    ServerMessage::PlayerPoints {
                        points: view.hand_points,
                        total_points: view.total_points,
                    },
                ));
            }
        }
        if let Some(outcome) = update.outcome {
            out.push(Envelope::room(ServerMessage::RoundOver(outcome)));
        }
        out
    }

    /// Players whose private view changes when `intent` is accepted.
    fn touched_by(&self, actor: &PlayerId, intent: &Intent) -> Vec<PlayerId> {
        match intent {
            Intent::StartRound => self.state().seats.ids().cloned().collect(),
            Intent::Join { .. } | Intent::PlayCard { .. } | Intent::DrawCard => vec![actor.clone()],
            Intent::Leave | Intent::SetConnected { .. } | Intent::Reshuffle => Vec::new(),
        }
    }
}
