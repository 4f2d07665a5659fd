//! Card definitions: suits, ranks, and what each card does.
//!
//! The deck is the 32-card German-suited pack mapped onto French suits:
//! four suits, ranks `7` through `A`. A few rank/suit combinations carry
//! extra meaning:
//!
//! | Card          | Kind        | Effect                              |
//! |---------------|-------------|-------------------------------------|
//! | any `A`       | Skip        | next player loses a turn            |
//! | any `7`       | DrawTwo     | +2 to the draw stack                |
//! | `K` of spades | DrawFive    | +5 to the draw stack                |
//! | any `10`      | Reverse     | flips direction (3+ players)        |
//! | any `Q`       | SuitWild    | player names the next suit          |
//! | any `J`       | ValueWild   | player names the next value         |
//!
//! Point values feed end-of-round scoring.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::CardId;
use crate::error::RulesError;

/// The four suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in deck-building order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Suit of the draw-five King and its counter Seven ("green").
    pub const DRAW_FIVE: Suit = Suit::Spades;

    /// Suit of the high-value wildcard Queen ("red").
    pub const PENALTY: Suit = Suit::Hearts;

    /// Wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }

    /// Hearts and diamonds.
    #[must_use]
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Suit {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.as_str() == s)
            .ok_or_else(|| RulesError::InvalidSuit(s.to_string()))
    }
}

/// The eight card values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

impl Rank {
    /// All ranks in deck-building order.
    pub const ALL: [Rank; 8] = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    /// Base point value before the suit overrides.
    #[must_use]
    pub const fn base_points(self) -> u32 {
        match self {
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 1,
            Rank::Queen => 20,
            Rank::King => 2,
            Rank::Ace => 11,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::ALL
            .into_iter()
            .find(|rank| rank.as_str() == s)
            .ok_or_else(|| RulesError::InvalidValue(s.to_string()))
    }
}

/// What a card does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Ace: the next player is skipped.
    Skip,
    /// Seven: adds two to the draw stack.
    DrawTwo,
    /// King of spades: adds five to the draw stack.
    DrawFive,
    /// Ten: reverses direction when enough players are seated.
    Reverse,
    /// Queen: the player picks the next suit.
    SuitWild,
    /// Jack: the player picks the next value.
    ValueWild,
    /// Everything else.
    Plain,
}

impl CardKind {
    /// Skip and draw cards. A Queen may not land on one of these while
    /// its effect is still fresh.
    #[must_use]
    pub fn is_penalty(self) -> bool {
        matches!(self, CardKind::Skip | CardKind::DrawTwo | CardKind::DrawFive)
    }

    /// Cards allowed to open the discard pile.
    #[must_use]
    pub fn can_open(self) -> bool {
        matches!(self, CardKind::Plain | CardKind::Reverse)
    }
}

/// One physical card. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(rename = "value")]
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(id: CardId, rank: Rank, suit: Suit) -> Self {
        Self { id, rank, suit }
    }

    /// Classify the card.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self.rank {
            Rank::Ace => CardKind::Skip,
            Rank::Seven => CardKind::DrawTwo,
            Rank::King if self.suit == Suit::DRAW_FIVE => CardKind::DrawFive,
            Rank::Ten => CardKind::Reverse,
            Rank::Queen => CardKind::SuitWild,
            Rank::Jack => CardKind::ValueWild,
            _ => CardKind::Plain,
        }
    }

    /// Point value left in a loser's hand.
    #[must_use]
    pub fn points(&self) -> u32 {
        match (self.rank, self.suit) {
            (Rank::King, Suit::DRAW_FIVE) => 50,
            (Rank::Queen, Suit::PENALTY) => 40,
            (rank, _) => rank.base_points(),
        }
    }

    /// The Queen of hearts. Winning with it doubles everyone else's points.
    #[must_use]
    pub fn is_red_queen(&self) -> bool {
        self.rank == Rank::Queen && self.suit == Suit::PENALTY
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Sum of point values.
pub fn hand_points<'a>(cards: impl IntoIterator<Item = &'a Card>) -> u32 {
    cards.into_iter().map(Card::points).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(CardId(0), rank, suit)
    }

    #[test]
    fn test_point_table() {
        assert_eq!(card(Rank::Seven, Suit::Clubs).points(), 7);
        assert_eq!(card(Rank::Ten, Suit::Hearts).points(), 10);
        assert_eq!(card(Rank::Jack, Suit::Spades).points(), 1);
        assert_eq!(card(Rank::Queen, Suit::Clubs).points(), 20);
        assert_eq!(card(Rank::King, Suit::Hearts).points(), 2);
        assert_eq!(card(Rank::Ace, Suit::Diamonds).points(), 11);
    }

    #[test]
    fn test_point_overrides() {
        assert_eq!(card(Rank::King, Suit::Spades).points(), 50);
        assert_eq!(card(Rank::Queen, Suit::Hearts).points(), 40);
    }

    #[test]
    fn test_full_deck_is_worth_the_table() {
        let total: u32 = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| card(r, s).points()))
            .sum();
        // 4 * (7+8+9+10+1+20+2+11) + (50-2) + (40-20)
        assert_eq!(total, 4 * 68 + 48 + 20);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(card(Rank::Ace, Suit::Hearts).kind(), CardKind::Skip);
        assert_eq!(card(Rank::Seven, Suit::Hearts).kind(), CardKind::DrawTwo);
        assert_eq!(card(Rank::King, Suit::Spades).kind(), CardKind::DrawFive);
        assert_eq!(card(Rank::King, Suit::Clubs).kind(), CardKind::Plain);
        assert_eq!(card(Rank::Ten, Suit::Clubs).kind(), CardKind::Reverse);
        assert_eq!(card(Rank::Queen, Suit::Clubs).kind(), CardKind::SuitWild);
        assert_eq!(card(Rank::Jack, Suit::Clubs).kind(), CardKind::ValueWild);
        assert_eq!(card(Rank::Nine, Suit::Clubs).kind(), CardKind::Plain);
    }

    #[test]
    fn test_openers() {
        assert!(card(Rank::Ten, Suit::Clubs).kind().can_open());
        assert!(card(Rank::King, Suit::Hearts).kind().can_open());
        assert!(!card(Rank::King, Suit::Spades).kind().can_open());
        assert!(!card(Rank::Jack, Suit::Hearts).kind().can_open());
    }

    #[test]
    fn test_parse_wire_names() {
        assert_eq!("spades".parse::<Suit>().unwrap(), Suit::Spades);
        assert_eq!("10".parse::<Rank>().unwrap(), Rank::Ten);
        assert_eq!("Q".parse::<Rank>().unwrap(), Rank::Queen);
        assert_eq!(
            "X".parse::<Rank>(),
            Err(RulesError::InvalidValue("X".to_string()))
        );
        assert_eq!(
            "stars".parse::<Suit>(),
            Err(RulesError::InvalidSuit("stars".to_string()))
        );
    }

    #[test]
    fn test_card_json_shape() {
        let c = Card::new(CardId(3), Rank::Ten, Suit::Diamonds);
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "value": "10", "suit": "diamonds"}));
        assert_eq!(c.to_string(), "10diamonds");
    }
}
