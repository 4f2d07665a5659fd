//! # prsi-engine
//!
//! Authoritative rules engine for Prší, a Crazy-Eights-family card game
//! played in rooms of two to four players over many rounds.
//!
//! ## Design Principles
//!
//! 1. **One Legality Predicate**: the check that gates every play is the
//!    same one that produces client hints.
//!
//! 2. **Rooms Are Actors**: a `Room` owns its state and applies one intent
//!    at a time; an intent is applied fully or rejected with no change.
//!
//! 3. **Injectable Randomness**: shuffles and tie-breaks draw from the
//!    room's seeded `GameRng`, so a seeded room replays exactly.
//!
//! ## Modules
//!
//! - `core`: ids, players, RNG, configuration, intents, room state
//! - `cards`: card model, deck, discard pile
//! - `rules`: legality, effects, drawing, round lifecycle, `RulesEngine`
//! - `room`: the orchestrator, views, message contract, room registry
//! - `error`: rejection reasons
//!
//! ```
//! use prsi_engine::{Room, RoomConfig, RoomId};
//!
//! let mut room = Room::new(RoomId::new("table"), RoomConfig::default().with_seed(1)).unwrap();
//! room.join("ann".into(), "Ann").unwrap();
//! room.join("bob".into(), "Bob").unwrap();
//!
//! let update = room.start_round(&"ann".into()).unwrap();
//! assert!(update.snapshot.started);
//! assert_eq!(update.snapshot.current_player, 0);
//! assert_eq!(update.snapshot.players[1].hand_size, 4);
//! ```

pub mod core;
pub mod cards;
pub mod rules;
pub mod room;
pub mod error;

pub use crate::core::{
    ActionRecord, CardId, ConfigError, Direction, GameRng, GameRngState, Intent, PlayerHistory,
    PlayerId, PlayerRecord, RoomConfig, RoomId, RoomMeta, RoomState, RoundState,
};

pub use crate::cards::{Card, CardKind, Deck, DiscardPile, Rank, Suit, DECK_SIZE};

pub use crate::rules::{
    Blocked, EliminationSheet, PlayerScore, RoundOutcome, RulesEngine, ScoreSheet, StandardRules,
};

pub use crate::room::{
    ClientMessage, Envelope, PlayerView, PublicSnapshot, Recipient, Room, RoomRegistry,
    ServerMessage, Update,
};

pub use crate::error::{CheckpointError, ErrorKind, RulesError};
