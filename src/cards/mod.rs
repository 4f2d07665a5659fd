//! Card model: ranks, suits, point values, deck and discard pile.
//!
//! ## Key Types
//!
//! - `Card`: immutable card identity (id, value, suit)
//! - `CardKind`: what a card does when played
//! - `Deck`: shuffled draw pile
//! - `DiscardPile`: played cards, top card last

pub mod definition;
pub mod deck;

pub use definition::{hand_points, Card, CardKind, Rank, Suit};
pub use deck::{Deck, DiscardPile, DECK_SIZE};
