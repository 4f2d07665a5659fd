//! Core engine types: card ids, players, RNG, configuration, intents, state.
//!
//! Everything here is plain data. The rules that mutate it live in
//! `crate::rules`; the orchestration that serializes access lives in
//! `crate::room`.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::{CardId, CardIdAllocator};
pub use player::{Hand, PlayerHistory, PlayerId, PlayerRecord, Seats};
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, RoomConfig};
pub use action::{ActionRecord, Intent};
pub use state::{Direction, RoomId, RoomMeta, RoomState, RoundState};
