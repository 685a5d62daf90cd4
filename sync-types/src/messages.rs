//! Protocol messages exchanged with the game server.
//!
//! Every frame is a JSON object `{"event": "<kind>", "data": {...}}`. Inbound
//! frames decode into [`ServerEvent`]; outbound frames are built from
//! [`ClientRequest`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Card, GameId, PlayerId, Rank, Suit, WireError};

/// Upper bound for a guess: the most points a player can score in one round.
pub const MAX_GUESS: u16 = 157;

/// Score totals keyed by player.
pub type Scores = BTreeMap<PlayerId, i64>;

/// All events the server can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Transport-level greeting
    Connected(Connected),
    /// A new game was created for this client
    GameStarted(GameStarted),
    /// Cards were dealt for a new round
    RoundStart(RoundStart),
    /// The server is waiting for the local player's guess
    RequestGuess(RequestGuess),
    /// The server accepted the local player's guess
    GuessReceived(GuessReceived),
    /// Guess-versus-actual summary after a round
    RoundGuessResults(RoundGuessResults),
    /// A new trick begins
    TrickStart(TrickStart),
    /// The server is waiting for the local player's card
    RequestCard(RequestCard),
    /// Some player (local or opponent) played a card
    CardPlayed(CardPlayed),
    /// The trick was resolved
    TrickComplete(TrickComplete),
    /// Round totals after scoring
    RoundComplete(RoundComplete),
    /// The game is over
    GameComplete(GameComplete),
    /// Server-reported error
    Error(ServerError),
}

impl ServerEvent {
    /// Serialize to a JSON frame.
    pub fn to_json(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(WireError::Json)
    }
}

/// Greeting sent when the channel opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connected {
    /// Free-form server greeting
    #[serde(default)]
    pub message: String,
}

/// Game creation confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStarted {
    /// Session identifier for all later requests
    pub game_id: GameId,
    /// All seated players, local player included
    pub players: Vec<PlayerId>,
}

/// New deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStart {
    /// 1-based round number
    pub round: u32,
    /// Trump for this round
    pub trump_suit: Suit,
    /// The local player's cards
    pub hand: Vec<Card>,
}

/// Prompt for the local player's guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestGuess {
    /// Trump for this round
    pub trump_suit: Suit,
    /// The local player's cards as the server sees them
    pub hand: Vec<Card>,
}

/// Acknowledgement of an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessReceived {
    /// The guess the server recorded
    pub guess: u16,
}

/// One player's line in the round summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    /// Player
    pub player: PlayerId,
    /// What they guessed
    pub guess: u32,
    /// What they actually scored
    pub actual: u32,
    /// Absolute difference
    pub difference: u32,
}

/// Round number and running totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundData {
    /// 1-based round number
    pub round: u32,
    /// Totals after this round
    pub scores: Scores,
}

/// Round summary shown on the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundGuessResults {
    /// Per-player results
    pub results: Vec<GuessResult>,
    /// Round number and totals
    pub round_data: RoundData,
}

/// Start of a trick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickStart {
    /// 1-based trick number within the round
    pub trick_number: u32,
    /// Turn order for this trick, leader first
    pub player_order: Vec<PlayerId>,
}

/// One play within a trick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickEntry {
    /// Who played
    pub player: PlayerId,
    /// What they played
    pub card: Card,
}

/// Prompt for the local player's card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCard {
    /// The only cards the server will accept
    pub legal_cards: Vec<Card>,
    /// Cards already on the table
    #[serde(default)]
    pub current_trick: Vec<TrickEntry>,
    /// Suit led in this trick, if any card has been played
    #[serde(default)]
    pub leading_suit: Option<Suit>,
}

/// A confirmed play.
///
/// The server uses this event in three shapes:
/// - a room broadcast with `player`, `card` and usually `trick`;
/// - an announcement without a card (last-trick bonus) carrying only
///   `player` and `message`;
/// - a bare acknowledgement of the local player's own play, sent only to
///   that player, with `card_suit` and `card_rank` and no `player`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlayed {
    /// Who played (absent for the local acknowledgement)
    #[serde(default)]
    pub player: Option<PlayerId>,
    /// What they played (absent for announcements)
    #[serde(default)]
    pub card: Option<Card>,
    /// Suit of the acknowledged local card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_suit: Option<Suit>,
    /// Rank of the acknowledged local card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_rank: Option<Rank>,
    /// Full trick after this play
    #[serde(default)]
    pub trick: Option<Vec<TrickEntry>>,
    /// Announcement text
    #[serde(default)]
    pub message: Option<String>,
}

impl CardPlayed {
    /// Broadcast of a play by `player`.
    pub fn by(player: PlayerId, card: Card) -> Self {
        Self {
            player: Some(player),
            card: Some(card),
            card_suit: None,
            card_rank: None,
            trick: None,
            message: None,
        }
    }

    /// Acknowledgement of the local player's own play.
    pub fn acknowledged(card: Card) -> Self {
        Self {
            player: None,
            card: None,
            card_suit: Some(card.suit),
            card_rank: Some(card.rank),
            trick: None,
            message: None,
        }
    }

    /// Announcement text attributed to `player`, with no card.
    pub fn announcement(player: PlayerId, message: impl Into<String>) -> Self {
        Self {
            player: Some(player),
            card: None,
            card_suit: None,
            card_rank: None,
            trick: None,
            message: Some(message.into()),
        }
    }

    /// The played card, from either `card` or the split suit/rank fields.
    pub fn played_card(&self) -> Option<Card> {
        match (self.card, self.card_suit, self.card_rank) {
            (Some(card), _, _) => Some(card),
            (None, Some(suit), Some(rank)) => Some(Card::new(suit, rank)),
            _ => None,
        }
    }

    /// Whether this is the bare acknowledgement of a local play.
    pub fn is_acknowledgement(&self) -> bool {
        self.player.is_none() && self.played_card().is_some()
    }
}

/// Trick resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickComplete {
    /// Winner of the trick
    pub winner: PlayerId,
    /// The resolved trick
    #[serde(default)]
    pub trick: Vec<TrickEntry>,
}

/// Totals after a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundComplete {
    /// 1-based round number
    #[serde(default)]
    pub round: Option<u32>,
    /// Running totals
    pub scores: Scores,
}

/// End of game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameComplete {
    /// Final totals
    pub final_scores: Scores,
    /// Player with the lowest total
    pub winner: PlayerId,
}

/// Error reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerError {
    /// Human-readable message
    pub message: String,
}

/// All requests the client can send. Fire-and-forget: confirmation arrives
/// as a later [`ServerEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientRequest {
    /// Ask the server to create a game
    StartGame(StartGame),
    /// Submit the local player's guess
    MakeGuess(MakeGuess),
    /// Play a card from the local hand
    PlayCard(PlayCard),
}

impl ClientRequest {
    /// Serialize to a JSON frame.
    pub fn to_json(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(WireError::Json)
    }

    /// Deserialize from a JSON frame.
    pub fn from_json(text: &str) -> Result<Self, WireError> {
        serde_json::from_str(text).map_err(WireError::Json)
    }
}

/// Start a game under the given name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGame {
    /// Local player's display name
    pub player_name: String,
}

/// Submit a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeGuess {
    /// Session to address
    pub game_id: GameId,
    /// Predicted points, `0..=MAX_GUESS`
    pub guess: u16,
}

/// Play a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayCard {
    /// Session to address
    pub game_id: GameId,
    /// Suit of the played card
    pub card_suit: Suit,
    /// Rank of the played card
    pub card_rank: Rank,
}

impl PlayCard {
    /// The card this request plays.
    pub fn card(&self) -> Card {
        Card::new(self.card_suit, self.card_rank)
    }
}
