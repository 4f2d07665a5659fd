//! Game rules: legality, card effects, drawing, and the round lifecycle.
//!
//! The room calls into these functions but never interprets cards itself.
//!
//! - `legality`: the single "can this card be played" predicate
//! - `effects`: applying a validated play and advancing the turn
//! - `draw`: drawing and recycling the discard pile
//! - `lifecycle`: seating, dealing, scoring, elimination
//! - `engine`: the `RulesEngine` seam and the standard rule set

pub mod engine;
pub mod legality;
pub mod effects;
pub mod draw;
pub mod lifecycle;

pub use engine::{RulesEngine, StandardRules};
pub use legality::{check_play, is_playable, Blocked};
pub use effects::{advance_turn, apply_play, plan_effects, Effect, EffectBatch, PlayOutcome};
pub use draw::{draw_card, reshuffle};
pub use lifecycle::{
    dealt_hand_size, eliminate, score_round, seat_player, start_round, unseat,
    EliminationSheet, EliminationStanding, PlayerScore, RoundOutcome, RoundStart, ScoreSheet,
};
