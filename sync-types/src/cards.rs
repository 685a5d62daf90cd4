//! Card types for the Swiss 36-card deck.
//!
//! Cards travel over the wire as `{"suit": "ROSEN", "rank": "KING", "value": 13}`.
//! The `value` field is informational and ignored on decode; a card has no
//! identity beyond its `(suit, rank)` pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::WireError;

/// One of the four Swiss-German suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Suit {
    /// Bells
    Schellen,
    /// Acorns
    Eicheln,
    /// Shields
    Schilten,
    /// Roses
    Rosen,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Schellen, Suit::Eicheln, Suit::Schilten, Suit::Rosen];

    /// Wire name of this suit.
    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Schellen => "SCHELLEN",
            Suit::Eicheln => "EICHELN",
            Suit::Schilten => "SCHILTEN",
            Suit::Rosen => "ROSEN",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Suit {
    type Err = WireError;

    /// Parse a suit name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Suit::ALL
            .into_iter()
            .find(|suit| suit.as_str() == upper)
            .ok_or_else(|| WireError::UnknownSuit(s.to_string()))
    }
}

/// Card rank, six through ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    /// 6
    Six,
    /// 7
    Seven,
    /// 8
    Eight,
    /// 9
    Nine,
    /// 10
    Ten,
    /// Under (jack)
    Jack,
    /// Ober (queen)
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 9] = [
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric value carried alongside the rank on the wire (6..=14).
    pub fn value(&self) -> u8 {
        match self {
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    /// Wire name of this rank.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Six => "SIX",
            Rank::Seven => "SEVEN",
            Rank::Eight => "EIGHT",
            Rank::Nine => "NINE",
            Rank::Ten => "TEN",
            Rank::Jack => "JACK",
            Rank::Queen => "QUEEN",
            Rank::King => "KING",
            Rank::Ace => "ACE",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = WireError;

    /// Parse a rank from its name (`king`, `KING`) or numeric value (`13`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u8>() {
            return Rank::ALL
                .into_iter()
                .find(|rank| rank.value() == value)
                .ok_or_else(|| WireError::UnknownRank(s.to_string()));
        }
        let upper = trimmed.to_ascii_uppercase();
        Rank::ALL
            .into_iter()
            .find(|rank| rank.as_str() == upper)
            .ok_or_else(|| WireError::UnknownRank(s.to_string()))
    }
}

/// A playing card. Compared by value, never by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// The card's suit
    pub suit: Suit,
    /// The card's rank
    pub rank: Rank,
}

impl Card {
    /// Create a card.
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// The full 36-card deck, suit-major.
    pub fn deck() -> Vec<Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(suit, rank)))
            .collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.rank, self.suit)
    }
}
