//! Card identity.
//!
//! Every physical card dealt in a room gets a `CardId`. Ids are opaque to
//! clients: they only echo them back when playing a card.
//!
//! ## Allocation
//!
//! Ids come from a per-room `CardIdAllocator` that only counts upward, so an
//! id is never reused by a later round of the same room. A stale id sent by
//! a client after a re-deal simply fails the "card in hand" check.
//!
//! ```
//! use prsi_engine::core::{CardId, CardIdAllocator};
//!
//! let mut ids = CardIdAllocator::new();
//! let first = ids.alloc();
//! let second = ids.alloc();
//!
//! assert_eq!(first, CardId(0));
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};

/// Opaque unique identifier for one card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Monotonic card id source, one per room.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIdAllocator {
    next: u32,
}

impl CardIdAllocator {
    /// Create an allocator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn alloc(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_basics() {
        let id = CardId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Card(7)");
    }

    #[test]
    fn test_allocator_never_repeats() {
        let mut ids = CardIdAllocator::new();
        let batch: Vec<_> = (0..64).map(|_| ids.alloc()).collect();

        let mut sorted = batch.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 64);
        assert_eq!(ids.allocated(), 64);
    }

    #[test]
    fn test_card_id_serializes_as_number() {
        let json = serde_json::to_string(&CardId(12)).unwrap();
        assert_eq!(json, "12");
    }
}
