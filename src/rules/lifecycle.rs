//! Round lifecycle: seating, dealing, scoring, elimination.
//!
//! ## Round start
//!
//! The starter is the initiator of the room's first round, then a random
//! previous loser who is still seated, then seat 0. Previous losers with
//! points last round are dealt a reduced hand; a player whose hand would be
//! empty is eliminated and the round never starts.
//!
//! ## Round end
//!
//! A round is won only by emptying a hand with a Queen. Every other seated
//! player scores the points left in hand, doubled when the winning card is
//! the Queen of hearts. Players tied at the highest non-zero score become
//! the losers that seed the next round.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::{Card, Deck};
use crate::core::{
    Direction, PlayerHistory, PlayerId, PlayerRecord, RoomConfig, RoomState,
};
use crate::error::RulesError;

/// How a round ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// A player went out with a Queen.
    Won(ScoreSheet),
    /// Dealing left a player without cards.
    Eliminated(EliminationSheet),
}

impl RoundOutcome {
    /// The player credited with the round.
    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        match self {
            RoundOutcome::Won(sheet) => Some(&sheet.winner),
            RoundOutcome::Eliminated(sheet) => sheet.winner.as_ref(),
        }
    }
}

/// One player's line in a won round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub id: PlayerId,
    pub name: String,
    pub points: u32,
    /// Cards left in hand.
    pub cards: usize,
    pub is_winner: bool,
    /// Points were doubled by a Queen-of-hearts finish.
    pub red_queen_penalty: bool,
}

/// Scoring of a won round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub winner: PlayerId,
    pub winner_points: u32,
    pub red_queen: bool,
    /// Seat order.
    pub players: Vec<PlayerScore>,
    pub losers: Vec<PlayerId>,
    pub max_points: u32,
}

impl ScoreSheet {
    /// Points scored by a player this round.
    #[must_use]
    pub fn points_of(&self, player: &PlayerId) -> Option<u32> {
        self.players.iter().find(|p| &p.id == player).map(|p| p.points)
    }
}

/// One player's line in an elimination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationStanding {
    pub id: PlayerId,
    pub name: String,
    pub total_points: u32,
    pub cards: usize,
    pub is_winner: bool,
    pub eliminated: bool,
}

/// Result of a round that ended while dealing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationSheet {
    pub eliminated: PlayerId,
    /// Lowest cumulative total among the others.
    pub winner: Option<PlayerId>,
    /// Seat order.
    pub players: Vec<EliminationStanding>,
}

/// What `start_round` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundStart {
    /// Hands are dealt and play begins.
    Dealt { starter: PlayerId, opener: Card },
    /// A player could not be dealt any cards.
    Eliminated(EliminationSheet),
}

/// Seat a player, creating their history on first join.
pub fn seat_player(
    config: &RoomConfig,
    state: &mut RoomState,
    id: PlayerId,
    name: &str,
) -> Result<(), RulesError> {
    if state.seats.contains(&id) {
        return Err(RulesError::AlreadySeated(id));
    }
    if state.seats.len() >= config.max_players {
        return Err(RulesError::RoomFull {
            capacity: config.max_players,
        });
    }
    state
        .history
        .entry(id.clone())
        .or_insert_with(|| PlayerHistory::new(name));
    state.seats.push(PlayerRecord::new(id, name));
    Ok(())
}

/// Remove a player from the room. Their history is kept.
///
/// During a round the leaver's cards go under the deck and the turn
/// pointer moves to the player who would have acted next. A round left
/// with too few players is abandoned without scoring.
pub fn unseat(
    config: &RoomConfig,
    state: &mut RoomState,
    player: &PlayerId,
) -> Result<PlayerRecord, RulesError> {
    let (index, mut record) = state
        .seats
        .remove(player)
        .ok_or_else(|| RulesError::NotSeated(player.clone()))?;
    let remaining = state.seats.len();
    let round = &mut state.round;

    if !round.started {
        if round.current_player >= remaining {
            round.current_player = 0;
        }
        return Ok(record);
    }

    for card in record.hand.drain(..) {
        round.deck.put_bottom(card);
    }

    let current = round.current_player;
    round.current_player = if remaining == 0 {
        0
    } else if index < current {
        current - 1
    } else if index == current {
        match round.direction {
            Direction::Forward => current % remaining,
            Direction::Backward => (current + remaining - 1) % remaining,
        }
    } else {
        current
    };

    if remaining < config.min_players {
        round.started = false;
        info!(room = %state.id, player = %player, remaining, "round abandoned");
    }
    Ok(record)
}

/// Cards a player is dealt at round start.
#[must_use]
pub fn dealt_hand_size(
    config: &RoomConfig,
    history: Option<&PlayerHistory>,
    was_loser: bool,
) -> usize {
    match history {
        Some(h) if was_loser && h.last_round_points > 0 => {
            config.penalty_hand(h.last_round_points)
        }
        _ => config.base_hand_size,
    }
}

/// Deal a new round, or end it at once in an elimination.
pub fn start_round(
    config: &RoomConfig,
    state: &mut RoomState,
    initiator: &PlayerId,
) -> Result<RoundStart, RulesError> {
    if state.round.started {
        return Err(RulesError::RoundInProgress);
    }
    if !state.seats.contains(initiator) {
        return Err(RulesError::NotSeated(initiator.clone()));
    }
    if state.seats.len() < config.min_players {
        return Err(RulesError::NotEnoughPlayers {
            required: config.min_players,
            seated: state.seats.len(),
        });
    }

    let starter = pick_starter(state, initiator);
    state.meta.rounds_started += 1;

    loop {
        state.round.reset();
        for record in state.seats.iter_mut() {
            record.hand.clear();
        }
        state.round.deck = Deck::shuffled(&mut state.card_ids, &mut state.rng);
        state.round.current_player = starter;

        if let Some(eliminated) = deal_hands(config, state) {
            let sheet = eliminate(state, &eliminated);
            return Ok(RoundStart::Eliminated(sheet));
        }

        if let Some(opener) = draw_opener(&mut state.round.deck) {
            let round = &mut state.round;
            round.discard.push(opener);
            round.current_suit = Some(opener.suit);
            round.started = true;

            let starter_id = state
                .seats
                .get(starter)
                .map(|p| p.id.clone())
                .unwrap_or_else(|| initiator.clone());
            info!(
                room = %state.id,
                round = state.meta.rounds_started,
                starter = %starter_id,
                opener = %opener,
                "round started"
            );
            debug!(deck = state.round.deck.len(), hands = state.seats.cards_in_hands(), "dealt");
            return Ok(RoundStart::Dealt {
                starter: starter_id,
                opener,
            });
        }

        warn!(room = %state.id, "no neutral opening card left after dealing; re-dealing");
    }
}

/// Seat index of the player who opens the next round.
fn pick_starter(state: &mut RoomState, initiator: &PlayerId) -> usize {
    if state.meta.starter.is_none() {
        state.meta.starter = Some(initiator.clone());
        return state.seats.index_of(initiator).unwrap_or(0);
    }

    let seated_losers: Vec<usize> = state
        .meta
        .previous_losers
        .iter()
        .filter_map(|id| state.seats.index_of(id))
        .collect();
    state.rng.choose(&seated_losers).copied().unwrap_or(0)
}

/// Deal every seat in order. Stops at the first player who would get no
/// cards and returns them.
fn deal_hands(config: &RoomConfig, state: &mut RoomState) -> Option<PlayerId> {
    let RoomState {
        seats,
        history,
        meta,
        round,
        ..
    } = state;

    for record in seats.iter_mut() {
        let was_loser = meta.previous_losers.contains(&record.id);
        let count = dealt_hand_size(config, history.get(&record.id), was_loser);
        if count == 0 {
            return Some(record.id.clone());
        }
        for _ in 0..count {
            match round.deck.draw() {
                Some(card) => record.hand.push(card),
                None => break,
            }
        }
        debug!(player = %record.id, cards = record.hand.len(), "hand dealt");
    }
    None
}

/// Draw until a card that may open the pile turns up. Rejected cards go
/// under the deck. `None` if the deck holds no such card.
fn draw_opener(deck: &mut Deck) -> Option<Card> {
    for _ in 0..deck.len() {
        let card = deck.draw()?;
        if card.kind().can_open() {
            return Some(card);
        }
        deck.put_bottom(card);
    }
    None
}

/// Score a round won by `winner` and close it.
pub fn score_round(state: &mut RoomState, winner: &PlayerId) -> ScoreSheet {
    let red_queen = state
        .round
        .top_card()
        .is_some_and(Card::is_red_queen);

    let mut players = Vec::with_capacity(state.seats.len());
    let mut losers = Vec::new();
    let mut max_points = 0;

    for record in state.seats.iter() {
        let is_winner = &record.id == winner;
        let penalised = red_queen && !is_winner;
        let mut points = record.hand_points();
        if penalised {
            points *= 2;
        }

        state
            .history
            .entry(record.id.clone())
            .or_insert_with(|| PlayerHistory::new(record.name.clone()))
            .record_round(points);

        if points > max_points {
            max_points = points;
            losers = vec![record.id.clone()];
        } else if points == max_points && points > 0 {
            losers.push(record.id.clone());
        }

        players.push(PlayerScore {
            id: record.id.clone(),
            name: record.name.clone(),
            points,
            cards: record.hand.len(),
            is_winner,
            red_queen_penalty: penalised,
        });
    }

    let winner_points = players
        .iter()
        .find(|p| p.is_winner)
        .map_or(0, |p| p.points);
    let sheet = ScoreSheet {
        winner: winner.clone(),
        winner_points,
        red_queen,
        players,
        losers,
        max_points,
    };

    state.meta.previous_losers = sheet.losers.clone();
    state.round.started = false;
    state.round.winner = Some(winner.clone());
    state.round.result = Some(RoundOutcome::Won(sheet.clone()));

    info!(
        room = %state.id,
        winner = %winner,
        red_queen,
        max_points,
        losers = sheet.losers.len(),
        "round won"
    );
    sheet
}

/// End the round because `eliminated` cannot be dealt a hand.
pub fn eliminate(state: &mut RoomState, eliminated: &PlayerId) -> EliminationSheet {
    let total_of = |id: &PlayerId| state.history.get(id).map_or(0, |h| h.total_points);

    let mut winner: Option<(&PlayerId, u32)> = None;
    for record in state.seats.iter() {
        let total = total_of(&record.id);
        if &record.id != eliminated && winner.map_or(true, |(_, best)| total < best) {
            winner = Some((&record.id, total));
        }
    }
    let winner = winner.map(|(id, _)| id.clone());

    let players = state
        .seats
        .iter()
        .map(|record| EliminationStanding {
            id: record.id.clone(),
            name: record.name.clone(),
            total_points: total_of(&record.id),
            cards: record.hand.len(),
            is_winner: winner.as_ref() == Some(&record.id),
            eliminated: &record.id == eliminated,
        })
        .collect();

    let sheet = EliminationSheet {
        eliminated: eliminated.clone(),
        winner: winner.clone(),
        players,
    };

    state.meta.previous_losers.clear();
    state.round.started = false;
    state.round.winner = winner;
    state.round.result = Some(RoundOutcome::Eliminated(sheet.clone()));

    info!(room = %state.id, eliminated = %eliminated, "player eliminated");
    sheet
}
