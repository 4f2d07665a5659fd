//! Room orchestration: the authoritative room, its views, the message
//! contract, and the registry that maps ids to rooms.
//!
//! ## Key Types
//!
//! - `Room`: owns one `RoomState` and applies intents to it one at a time
//! - `PublicSnapshot` / `PlayerView`: broadcast and private state
//! - `ClientMessage` / `ServerMessage` / `Envelope`: the wire contract
//! - `RoomRegistry`: one lock per room, created on join, dropped when empty

mod orchestrator;
pub mod protocol;
pub mod registry;
pub mod view;

pub use orchestrator::{Room, Update};
pub use protocol::{ClientMessage, Envelope, Recipient, ServerMessage};
pub use registry::{RoomRegistry, SharedRoom};
pub use view::{PlayerSummary, PlayerView, PublicSnapshot};
