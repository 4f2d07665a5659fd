//! Card legality.
//!
//! This is the only implementation of "can this card be played now". The
//! engine enforces it before every play and `RulesEngine::legal_plays`
//! exposes it for client hints.
//!
//! Rules are checked in priority order; the first one that applies decides:
//!
//! 1. A pending draw stack only admits the green King/Seven counter pair.
//! 2. A Queen respects a value lock and may not land on a fresh skip/draw card.
//! 3. A Jack only respects a value lock.
//! 4. An Ace always goes on an Ace.
//! 5. Otherwise match the value lock if set, else the suit or the top value.

use crate::cards::{Card, Rank, Suit};
use crate::core::RoundState;

/// Why a card cannot be played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Blocked {
    /// No round is running.
    NotStarted,
    /// Someone else holds the turn.
    NotYourTurn,
    /// A draw stack is pending and this card does not counter it.
    DrawPending,
    /// A Jack locked a different value.
    ValueLocked(Rank),
    /// A Queen cannot cover a freshly played skip/draw card.
    FreshPenalty,
    /// Neither suit nor value matches.
    NoMatch,
}

impl std::fmt::Display for Blocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Blocked::NotStarted => f.write_str("no round is running"),
            Blocked::NotYourTurn => f.write_str("it is not the player's turn"),
            Blocked::DrawPending => f.write_str("the draw stack must be countered or drawn"),
            Blocked::ValueLocked(rank) => write!(f, "value is locked to {rank}"),
            Blocked::FreshPenalty => f.write_str("a Queen cannot cover a fresh skip or draw card"),
            Blocked::NoMatch => f.write_str("neither suit nor value matches"),
        }
    }
}

/// Check a candidate play, explaining a refusal.
pub fn check_play(round: &RoundState, owner_is_current: bool, card: &Card) -> Result<(), Blocked> {
    if !round.started {
        return Err(Blocked::NotStarted);
    }
    if !owner_is_current {
        return Err(Blocked::NotYourTurn);
    }
    let Some(top) = round.top_card() else {
        return Err(Blocked::NotStarted);
    };

    if round.draw_stack > 0 {
        return if counters_draw(top, card) {
            Ok(())
        } else {
            Err(Blocked::DrawPending)
        };
    }

    match card.rank {
        Rank::Queen => match round.current_value {
            Some(Rank::Queen) => Ok(()),
            Some(locked) => Err(Blocked::ValueLocked(locked)),
            None if round.last_play_was_special && top.kind().is_penalty() => {
                Err(Blocked::FreshPenalty)
            }
            None => Ok(()),
        },
        Rank::Jack => match round.current_value {
            Some(locked) if locked != Rank::Jack => Err(Blocked::ValueLocked(locked)),
            _ => Ok(()),
        },
        Rank::Ace if top.rank == Rank::Ace => Ok(()),
        _ => match round.current_value {
            Some(locked) if card.rank == locked => Ok(()),
            Some(locked) => Err(Blocked::ValueLocked(locked)),
            None if round.current_suit == Some(card.suit) || card.rank == top.rank => Ok(()),
            None => Err(Blocked::NoMatch),
        },
    }
}

/// Whether a card is playable now.
#[must_use]
pub fn is_playable(round: &RoundState, owner_is_current: bool, card: &Card) -> bool {
    check_play(round, owner_is_current, card).is_ok()
}

/// The green King and green Seven counter each other under a draw stack;
/// nothing else does.
fn counters_draw(top: &Card, card: &Card) -> bool {
    top.suit == Suit::DRAW_FIVE
        && card.suit == Suit::DRAW_FIVE
        && matches!(
            (top.rank, card.rank),
            (Rank::King, Rank::Seven) | (Rank::Seven, Rank::King)
        )
}
