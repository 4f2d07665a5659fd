//! Card effects and turn advancement.
//!
//! Playing a card is split in two phases:
//!
//! 1. `plan_effects` turns the card plus the player's choices into a small
//!    batch of `Effect`s. All argument validation happens here, before any
//!    state is touched.
//! 2. `resolve_effects` applies the batch to the round.
//!
//! `apply_play` wires both phases to the legality check, moves the card,
//! and either ends the round or advances the turn.

use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use super::engine::RulesEngine;
use super::lifecycle::{score_round, ScoreSheet};
use crate::cards::{Card, CardKind, Rank, Suit};
use crate::core::{CardId, PlayerId, RoomConfig, RoomState, RoundState};
use crate::error::RulesError;

/// One atomic change caused by a played card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// The next turn advance skips a player.
    SkipNext,
    /// Add to the draw stack (capped).
    AddDraw(u8),
    /// Flip the direction of play.
    Reverse,
    /// Set the suit to follow.
    SetSuit(Suit),
    /// Lock the value to follow.
    LockValue(Rank),
    /// The card's effect is fresh; a Queen may not cover it.
    MarkSpecial,
}

/// Effects of one play. Never more than three.
pub type EffectBatch = SmallVec<[Effect; 3]>;

/// Work out what a card does, validating the player's choices.
pub fn plan_effects(
    card: &Card,
    chosen_suit: Option<Suit>,
    chosen_value: Option<Rank>,
    seated: usize,
    config: &RoomConfig,
) -> Result<EffectBatch, RulesError> {
    let own_suit = Effect::SetSuit(card.suit);
    let batch = match card.kind() {
        CardKind::Skip => smallvec![Effect::SkipNext, own_suit, Effect::MarkSpecial],
        CardKind::DrawTwo => smallvec![Effect::AddDraw(2), own_suit, Effect::MarkSpecial],
        CardKind::DrawFive => smallvec![Effect::AddDraw(5), own_suit, Effect::MarkSpecial],
        CardKind::Reverse if seated >= config.reverse_min_players => {
            smallvec![Effect::Reverse, own_suit]
        }
        CardKind::Reverse | CardKind::Plain => smallvec![own_suit],
        CardKind::SuitWild => {
            let suit = chosen_suit.ok_or(RulesError::MissingSuit(*card))?;
            smallvec![Effect::SetSuit(suit)]
        }
        CardKind::ValueWild => {
            let value = chosen_value.ok_or(RulesError::MissingValue(*card))?;
            smallvec![Effect::LockValue(value)]
        }
    };
    Ok(batch)
}

/// Apply a batch of effects to the round.
pub fn resolve_effects(round: &mut RoundState, effects: &[Effect], draw_cap: u8) {
    for effect in effects {
        match *effect {
            Effect::SkipNext => round.skip_next = true,
            Effect::AddDraw(n) => {
                round.draw_stack = round.draw_stack.saturating_add(n).min(draw_cap);
            }
            Effect::Reverse => round.direction = round.direction.reversed(),
            Effect::SetSuit(suit) => round.current_suit = Some(suit),
            Effect::LockValue(value) => round.current_value = Some(value),
            Effect::MarkSpecial => round.last_play_was_special = true,
        }
    }
}

/// Pass the turn on, consuming a pending skip.
///
/// A consumed skip also clears `last_play_was_special`: the skipped turn
/// ages out the freshness of the skip card.
pub fn advance_turn(round: &mut RoundState, seats: usize) {
    if seats == 0 {
        return;
    }
    if round.skip_next {
        round.current_player = round.direction.step(round.current_player, seats);
        round.skip_next = false;
        round.last_play_was_special = false;
    }
    round.current_player = round.direction.step(round.current_player, seats);
}

/// Result of an accepted play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    /// The card now on top of the discard pile.
    pub card: Card,
    /// Scoring, when the play ended the round.
    pub score: Option<ScoreSheet>,
}

/// Play a card from `player`'s hand.
///
/// On any error the state is untouched.
pub fn apply_play<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &mut RoomState,
    player: &PlayerId,
    card_id: CardId,
    chosen_suit: Option<Suit>,
    chosen_value: Option<Rank>,
) -> Result<PlayOutcome, RulesError> {
    if !state.round.started {
        return Err(RulesError::RoundNotStarted);
    }
    let seat = state
        .seats
        .index_of(player)
        .ok_or_else(|| RulesError::NotSeated(player.clone()))?;
    if seat != state.round.current_player {
        return Err(RulesError::NotYourTurn(player.clone()));
    }
    let card = state
        .seats
        .get(seat)
        .and_then(|p| p.find_card(card_id).map(|pos| p.hand[pos]))
        .ok_or(RulesError::CardNotInHand(card_id))?;

    rules
        .check_play(state, player, &card)
        .map_err(|reason| RulesError::IllegalPlay { card, reason })?;
    let effects = plan_effects(
        &card,
        chosen_suit,
        chosen_value,
        state.seats.len(),
        rules.config(),
    )?;

    // Validated; from here on the play cannot fail.
    let hand_emptied = match state.seats.get_mut(seat) {
        Some(record) => {
            record.take_card(card_id);
            record.hand.is_empty()
        }
        None => false,
    };

    let round = &mut state.round;
    round.discard.push(card);
    round.last_play_was_special = false;
    if card.rank != Rank::Jack {
        round.current_value = None;
    }
    resolve_effects(round, &effects, rules.config().draw_stack_cap);

    debug!(
        room = %state.id,
        player = %player,
        card = %card,
        draw_stack = round.draw_stack,
        suit = ?round.current_suit,
        value = ?round.current_value,
        "card played"
    );

    if card.kind() == CardKind::DrawTwo && card.suit.is_red() {
        rules.on_red_draw_two(state, player);
    }

    if hand_emptied && card.rank == Rank::Queen {
        let sheet = score_round(state, player);
        return Ok(PlayOutcome {
            card,
            score: Some(sheet),
        });
    }
    if hand_emptied {
        trace!(player = %player, "hand emptied without a Queen; round continues");
    }

    let seats = state.seats.len();
    advance_turn(&mut state.round, seats);
    Ok(PlayOutcome { card, score: None })
}
