//! Rooms by id.
//!
//! Each room sits behind its own mutex, so intents for one room are
//! serialized while different rooms run in parallel. A room is created by
//! the first join and dropped when its last player leaves.
//!
//! Lock order is map shard, then room. Joins run under the room's map
//! entry, so a room cannot be dropped between lookup and seating.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

use super::orchestrator::{Room, Update};
use super::protocol::{ClientMessage, Envelope, ServerMessage};
use crate::core::{ConfigError, PlayerId, RoomConfig, RoomId};
use crate::error::RulesError;
use crate::rules::StandardRules;

/// Shared handle to one room.
pub type SharedRoom = Arc<Mutex<Room>>;

/// All live rooms.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, SharedRoom>,
    config: RoomConfig,
}

impl RoomRegistry {
    /// Create a registry whose rooms all use `config`.
    pub fn new(config: RoomConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rooms: DashMap::new(),
            config,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &RoomId) -> Option<SharedRoom> {
        self.rooms.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Run `f` on the room registered under `id`, creating it if needed,
    /// while its map entry is held.
    fn in_entry<T>(&self, id: &RoomId, f: impl FnOnce(&mut Room<StandardRules>) -> T) -> T {
        let entry = self.rooms.entry(id.clone()).or_insert_with(|| {
            info!(room = %id, "room created");
            let rules = StandardRules::new(self.config.clone());
            Arc::new(Mutex::new(Room::with_rules(id.clone(), rules)))
        });
        let mut room = entry.value().lock();
        f(&mut room)
    }

    /// Drop the room if nobody is seated in it.
    fn remove_if_empty(&self, id: &RoomId) {
        if self
            .rooms
            .remove_if(id, |_, room| room.lock().is_empty())
            .is_some()
        {
            info!(room = %id, "room removed");
        }
    }

    /// Seat a player, creating the room if needed.
    pub fn join(
        &self,
        id: &RoomId,
        player: PlayerId,
        name: impl Into<String>,
    ) -> Result<Update, RulesError> {
        let result = self.in_entry(id, |room| room.join(player, name));
        if result.is_err() {
            self.remove_if_empty(id);
        }
        result
    }

    /// Unseat a player, dropping the room once it is empty.
    pub fn leave(&self, id: &RoomId, player: &PlayerId) -> Result<Update, RulesError> {
        let room = self
            .get(id)
            .ok_or_else(|| RulesError::RoomNotFound(id.clone()))?;
        let result = room.lock().leave(player);
        self.remove_if_empty(id);
        result
    }

    /// Route a client message to its room.
    pub fn handle(&self, id: &RoomId, actor: &PlayerId, message: ClientMessage) -> Vec<Envelope> {
        let out = if matches!(message, ClientMessage::JoinRoom { .. }) {
            self.in_entry(id, |room| room.handle(actor, message))
        } else {
            let Some(room) = self.get(id) else {
                let err = RulesError::RoomNotFound(id.clone());
                return vec![Envelope::player(actor.clone(), ServerMessage::from(&err))];
            };
            let out = room.lock().handle(actor, message);
            out
        };
        self.remove_if_empty(id);
        out
    }

    /// Run `f` against a room while holding its lock.
    pub fn with_room<T>(&self, id: &RoomId, f: impl FnOnce(&mut Room<StandardRules>) -> T) -> Option<T> {
        let room = self.get(id)?;
        let mut guard = room.lock();
        Some(f(&mut guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RoomRegistry {
        RoomRegistry::new(RoomConfig::default().with_seed(3)).unwrap()
    }

    #[test]
    fn test_join_creates_and_leave_removes() {
        let rooms = registry();
        let id = RoomId::new("table-1");

        rooms.join(&id, "a".into(), "Ann").unwrap();
        rooms.join(&id, "b".into(), "Bob").unwrap();
        assert_eq!(rooms.len(), 1);

        rooms.leave(&id, &"a".into()).unwrap();
        assert_eq!(rooms.len(), 1);
        rooms.leave(&id, &"b".into()).unwrap();
        assert!(rooms.is_empty());

        assert_eq!(
            rooms.leave(&id, &"b".into()),
            Err(RulesError::RoomNotFound(id))
        );
    }

    #[test]
    fn test_failed_first_join_leaves_no_room() {
        let config = RoomConfig {
            max_players: 2,
            ..RoomConfig::default()
        };
        let rooms = RoomRegistry::new(config).unwrap();
        let id = RoomId::new("t");

        rooms.join(&id, "a".into(), "Ann").unwrap();
        rooms.join(&id, "b".into(), "Bob").unwrap();
        assert_eq!(
            rooms.join(&id, "c".into(), "Cid"),
            Err(RulesError::RoomFull { capacity: 2 })
        );
        assert_eq!(rooms.len(), 1);
    }

    #[test]
    fn test_join_after_last_leave_registers_room() {
        let rooms = registry();
        let id = RoomId::new("t");

        rooms.join(&id, "b".into(), "Bob").unwrap();
        let stale = rooms.get(&id).unwrap();
        rooms.leave(&id, &"b".into()).unwrap();
        assert!(rooms.is_empty());

        rooms.join(&id, "a".into(), "Ann").unwrap();
        let live = rooms.get(&id).unwrap();
        assert!(!Arc::ptr_eq(&stale, &live));
        assert!(live.lock().state().seats.contains(&"a".into()));
        assert!(stale.lock().is_empty());
    }

    #[test]
    fn test_joined_player_stays_registered_under_churn() {
        let rooms = Arc::new(registry());
        let id = RoomId::new("busy");

        let churn = {
            let rooms = Arc::clone(&rooms);
            let id = id.clone();
            std::thread::spawn(move || {
                for _ in 0..500 {
                    rooms.join(&id, "a".into(), "Ann").unwrap();
                    rooms.leave(&id, &"a".into()).unwrap();
                }
            })
        };

        for _ in 0..500 {
            rooms.join(&id, "b".into(), "Bob").unwrap();
            let seated = rooms
                .with_room(&id, |room| room.state().seats.contains(&"b".into()))
                .unwrap_or(false);
            assert!(seated, "joined player must be in the registered room");
            rooms.leave(&id, &"b".into()).unwrap();
        }

        churn.join().unwrap();
        assert!(rooms.is_empty());
    }

    #[test]
    fn test_handle_unknown_room() {
        let rooms = registry();
        let out = rooms.handle(&RoomId::new("nope"), &"a".into(), ClientMessage::DrawCard);
        assert_eq!(out.len(), 1);
        assert!(rooms.is_empty());
    }

    #[test]
    fn test_rooms_are_independent_across_threads() {
        let rooms = Arc::new(registry());
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let rooms = Arc::clone(&rooms);
                std::thread::spawn(move || {
                    let id = RoomId::new(format!("room-{n}"));
                    rooms.join(&id, "a".into(), "Ann").unwrap();
                    rooms.join(&id, "b".into(), "Bob").unwrap();
                    rooms.with_room(&id, |room| room.start_round(&"a".into())).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
        assert_eq!(rooms.len(), 4);
    }
}
