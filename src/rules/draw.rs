//! Drawing cards and recycling the discard pile.

use tracing::debug;

use super::effects::advance_turn;
use crate::core::{PlayerId, RoomState};
use crate::error::RulesError;

/// Draw the pending draw stack, or a single card, then pass the turn.
///
/// The draw is all-or-nothing: if the deck is too small the player must
/// reshuffle first and nothing changes. Returns the number of cards drawn.
pub fn draw_card(state: &mut RoomState, player: &PlayerId) -> Result<usize, RulesError> {
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

    let required = usize::from(state.round.draw_stack.max(1));
    let available = state.round.deck.len();
    let drawn = state
        .round
        .deck
        .draw_exact(required)
        .ok_or(RulesError::DeckTooSmall {
            required,
            available,
        })?;

    if let Some(record) = state.seats.get_mut(seat) {
        record.hand.extend(drawn);
    }
    state.round.draw_stack = 0;

    debug!(
        room = %state.id,
        player = %player,
        count = required,
        deck = state.round.deck.len(),
        "cards drawn"
    );

    let seats = state.seats.len();
    advance_turn(&mut state.round, seats);
    Ok(required)
}

/// Turn the discard pile, minus its top card, back into the deck.
///
/// The recycled cards are reversed, not shuffled, and land on the drawing
/// end of the deck.
///
/// Any seated player may do this at any time during a round. Returns the
/// number of cards moved.
pub fn reshuffle(state: &mut RoomState, player: &PlayerId) -> Result<usize, RulesError> {
    if !state.seats.contains(player) {
        return Err(RulesError::NotSeated(player.clone()));
    }
    if !state.round.started {
        return Err(RulesError::RoundNotStarted);
    }
    let recycled = state
        .round
        .discard
        .take_recyclable()
        .ok_or(RulesError::NothingToReshuffle)?;
    let moved = recycled.len();
    state.round.deck.stack_on_top(recycled);

    debug!(
        room = %state.id,
        player = %player,
        moved,
        deck = state.round.deck.len(),
        "discard pile recycled"
    );
    Ok(moved)
}
