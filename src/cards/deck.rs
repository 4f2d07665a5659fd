//! Draw deck and discard pile.
//!
//! Both are ordered stacks backed by `Vec<Card>`; the top of each is the
//! last element. Cards are only ever drawn from the top of the deck.

use serde::{Deserialize, Serialize};

use super::definition::{Card, Rank, Suit};
use crate::core::{CardIdAllocator, GameRng};

/// Number of cards in a full pack.
pub const DECK_SIZE: usize = Suit::ALL.len() * Rank::ALL.len();

/// The face-down draw pile (top = end of vec).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a full 32-card pack with fresh ids and shuffle it.
    pub fn shuffled(ids: &mut CardIdAllocator, rng: &mut GameRng) -> Self {
        let mut cards: Vec<Card> = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| (rank, suit)))
            .map(|(rank, suit)| Card::new(ids.alloc(), rank, suit))
            .collect();
        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Build a deck from explicit cards (last element is the top).
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Draw the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw `count` cards, or nothing at all if the deck is too small.
    pub fn draw_exact(&mut self, count: usize) -> Option<Vec<Card>> {
        if self.cards.len() < count {
            return None;
        }
        let split = self.cards.len() - count;
        let mut drawn = self.cards.split_off(split);
        // Hand out in draw order: former top card first.
        drawn.reverse();
        Some(drawn)
    }

    /// Slide a card under the deck.
    pub fn put_bottom(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    /// Place recycled cards on top, keeping their order.
    pub fn stack_on_top(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }
}

/// The face-up pile of played cards (top = end of vec).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    /// A pile holding a single opening card.
    #[must_use]
    pub fn starting_with(card: Card) -> Self {
        Self { cards: vec![card] }
    }

    /// Build a pile from explicit cards (last element is the top).
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The authoritative top card.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Take everything under the top card, reversed, leaving only the top.
    ///
    /// Returns `None` when there is nothing under the top card.
    pub fn take_recyclable(&mut self) -> Option<Vec<Card>> {
        if self.cards.len() <= 1 {
            return None;
        }
        let top = self.cards.pop()?;
        let mut rest = std::mem::replace(&mut self.cards, vec![top]);
        rest.reverse();
        Some(rest)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
