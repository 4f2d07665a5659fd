//! The room: one authoritative state and the only way to change it.
//!
//! Every mutating operation takes `&mut self`, so a room processes one
//! intent at a time. Each intent is either applied completely and recorded
//! in the action log, or rejected with the state untouched.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::view::{PlayerView, PublicSnapshot};
use crate::cards::{Rank, Suit};
use crate::core::{
    ActionRecord, CardId, ConfigError, GameRng, Intent, PlayerId, RoomConfig, RoomId, RoomState,
};
use crate::error::{CheckpointError, RulesError};
use crate::rules::{self, RoundOutcome, RoundStart, RulesEngine, StandardRules};

/// Result of an accepted intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update {
    /// Public state after the intent.
    pub snapshot: PublicSnapshot,
    /// Set when the intent ended the round.
    pub outcome: Option<RoundOutcome>,
}

#[derive(Serialize, Deserialize)]
struct Checkpoint {
    state: RoomState,
    log: Vector<ActionRecord>,
}

/// One game room.
#[derive(Clone, Debug)]
pub struct Room<R: RulesEngine = StandardRules> {
    state: RoomState,
    rules: R,
    log: Vector<ActionRecord>,
}

impl Room<StandardRules> {
    /// Create an empty room with the standard rules.
    pub fn new(id: RoomId, config: RoomConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rules(id, StandardRules::new(config)))
    }
}

impl<R: RulesEngine> Room<R> {
    /// Create an empty room with custom rules.
    ///
    /// The RNG is seeded from `rules.config().seed`, or from OS entropy.
    pub fn with_rules(id: RoomId, rules: R) -> Self {
        let rng = match rules.config().seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::from_state(RoomState::new(id, rng), rules)
    }

    /// Wrap an existing state.
    pub fn from_state(state: RoomState, rules: R) -> Self {
        Self {
            state,
            rules,
            log: Vector::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &RoomId {
        &self.state.id
    }

    #[must_use]
    pub fn state(&self) -> &RoomState {
        &self.state
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn config(&self) -> &RoomConfig {
        self.rules.config()
    }

    /// Accepted intents, oldest first.
    #[must_use]
    pub fn log(&self) -> &Vector<ActionRecord> {
        &self.log
    }

    /// No one is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.seats.is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> PublicSnapshot {
        PublicSnapshot::of(&self.state)
    }

    /// Private view for a seated player.
    #[must_use]
    pub fn player_view(&self, player: &PlayerId) -> Option<PlayerView> {
        PlayerView::of(&self.rules, &self.state, player)
    }

    // === Intents ===

    pub fn join(&mut self, player: PlayerId, name: impl Into<String>) -> Result<Update, RulesError> {
        self.apply(&player, Intent::Join { name: name.into() })
    }

    pub fn leave(&mut self, player: &PlayerId) -> Result<Update, RulesError> {
        self.apply(player, Intent::Leave)
    }

    pub fn set_connected(&mut self, player: &PlayerId, connected: bool) -> Result<Update, RulesError> {
        self.apply(player, Intent::SetConnected { connected })
    }

    pub fn start_round(&mut self, initiator: &PlayerId) -> Result<Update, RulesError> {
        self.apply(initiator, Intent::StartRound)
    }

    pub fn play_card(
        &mut self,
        player: &PlayerId,
        card_id: CardId,
        chosen_suit: Option<Suit>,
        chosen_value: Option<Rank>,
    ) -> Result<Update, RulesError> {
        self.apply(
            player,
            Intent::PlayCard {
                card_id,
                chosen_suit,
                chosen_value,
            },
        )
    }

    pub fn draw_card(&mut self, player: &PlayerId) -> Result<Update, RulesError> {
        self.apply(player, Intent::DrawCard)
    }

    pub fn reshuffle(&mut self, player: &PlayerId) -> Result<Update, RulesError> {
        self.apply(player, Intent::Reshuffle)
    }

    /// Apply one intent on behalf of `actor`.
    pub fn apply(&mut self, actor: &PlayerId, intent: Intent) -> Result<Update, RulesError> {
        let outcome = self.dispatch(actor, &intent).inspect_err(|err| {
            debug!(room = %self.state.id, player = %actor, intent = intent.name(), error = %err, "intent rejected");
        })?;

        let sequence = self.log.len() as u32;
        let round = self.state.meta.rounds_started;
        self.log
            .push_back(ActionRecord::new(sequence, actor.clone(), intent, round));
        trace!(room = %self.state.id, round = ?self.state.round, "state after intent");

        Ok(Update {
            snapshot: self.snapshot(),
            outcome,
        })
    }

    fn dispatch(&mut self, actor: &PlayerId, intent: &Intent) -> Result<Option<RoundOutcome>, RulesError> {
        let config = self.rules.config();
        let state = &mut self.state;
        match intent {
            Intent::Join { name } => {
                rules::seat_player(config, state, actor.clone(), name)?;
                Ok(None)
            }
            Intent::Leave => {
                rules::unseat(config, state, actor)?;
                Ok(None)
            }
            Intent::SetConnected { connected } => {
                let record = state
                    .seats
                    .find_mut(actor)
                    .ok_or_else(|| RulesError::NotSeated(actor.clone()))?;
                record.connected = *connected;
                Ok(None)
            }
            Intent::StartRound => match rules::start_round(config, state, actor)? {
                RoundStart::Dealt { .. } => Ok(None),
                RoundStart::Eliminated(sheet) => Ok(Some(RoundOutcome::Eliminated(sheet))),
            },
            Intent::PlayCard {
                card_id,
                chosen_suit,
                chosen_value,
            } => {
                let played = rules::apply_play(
                    &self.rules,
                    state,
                    actor,
                    *card_id,
                    *chosen_suit,
                    *chosen_value,
                )?;
                Ok(played.score.map(RoundOutcome::Won))
            }
            Intent::DrawCard => {
                rules::draw_card(state, actor)?;
                Ok(None)
            }
            Intent::Reshuffle => {
                rules::reshuffle(state, actor)?;
                Ok(None)
            }
        }
    }

    // === Checkpoints ===

    /// Encode the full room: state, RNG position, and action log.
    pub fn checkpoint(&self) -> Result<Vec<u8>, CheckpointError> {
        let checkpoint = Checkpoint {
            state: self.state.clone(),
            log: self.log.clone(),
        };
        Ok(bincode::serialize(&checkpoint)?)
    }

    /// Rebuild a room from `checkpoint` output.
    pub fn restore(bytes: &[u8], rules: R) -> Result<Self, CheckpointError> {
        let Checkpoint { state, log } = bincode::deserialize(bytes)?;
        Ok(Self { state, rules, log })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        let mut room = Room::new(RoomId::new("r"), RoomConfig::default().with_seed(5)).unwrap();
        room.join("a".into(), "Ann").unwrap();
        room.join("b".into(), "Bob").unwrap();
        room
    }

    #[test]
    fn test_intents_are_logged() {
        let mut room = room();
        room.start_round(&"a".into()).unwrap();

        let kinds: Vec<&str> = room.log().iter().map(|r| r.intent.name()).collect();
        assert_eq!(kinds, vec!["join", "join", "start_round"]);
        assert_eq!(room.log().last().unwrap().round, 1);
        assert_eq!(room.log().last().unwrap().sequence, 2);
    }

    #[test]
    fn test_rejected_intent_changes_nothing() {
        let mut room = room();
        room.start_round(&"a".into()).unwrap();
        let before = room.state().clone();

        let err = room.draw_card(&"b".into()).unwrap_err();
        assert_eq!(err, RulesError::NotYourTurn("b".into()));
        assert_eq!(room.state().round, before.round);
        assert_eq!(room.state().seats, before.seats);
        assert_eq!(room.log().len(), 3);
    }

    #[test]
    fn test_set_connected() {
        let mut room = room();
        let update = room.set_connected(&"b".into(), false).unwrap();
        assert!(!update.snapshot.players[1].connected);
        assert_eq!(
            room.set_connected(&"z".into(), false),
            Err(RulesError::NotSeated("z".into()))
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RoomConfig {
            min_players: 1,
            ..RoomConfig::default()
        };
        assert!(Room::new(RoomId::new("r"), config).is_err());
    }

    #[test]
    fn test_checkpoint_restores_identical_room() {
        let mut room = room();
        room.start_round(&"a".into()).unwrap();
        room.draw_card(&"a".into()).unwrap();

        let bytes = room.checkpoint().unwrap();
        let mut restored = Room::restore(&bytes, room.rules().clone()).unwrap();

        assert_eq!(restored.state().round, room.state().round);
        assert_eq!(restored.state().seats, room.state().seats);
        assert_eq!(restored.log(), room.log());

        // Both copies continue identically, RNG included.
        room.draw_card(&"b".into()).unwrap();
        restored.draw_card(&"b".into()).unwrap();
        assert_eq!(restored.state().round, room.state().round);
        assert_eq!(restored.state().rng.state(), room.state().rng.state());
    }
}
