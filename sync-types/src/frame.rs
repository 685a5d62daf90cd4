//! Frame decoding for inbound server traffic.
//!
//! Decoding is split in two steps: the event name is read first, so that
//! kinds this client does not know about can be skipped without failing
//! the channel; known kinds are then decoded into a typed [`ServerEvent`].

use serde_json::Value;

use crate::{ServerEvent, WireError};

/// Discriminator for known inbound event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `connected`
    Connected,
    /// `game_started`
    GameStarted,
    /// `round_start`
    RoundStart,
    /// `request_guess`
    RequestGuess,
    /// `guess_received`
    GuessReceived,
    /// `round_guess_results`
    RoundGuessResults,
    /// `trick_start`
    TrickStart,
    /// `request_card`
    RequestCard,
    /// `card_played`
    CardPlayed,
    /// `trick_complete`
    TrickComplete,
    /// `round_complete`
    RoundComplete,
    /// `game_complete`
    GameComplete,
    /// `error`
    Error,
}

impl EventKind {
    /// Every known kind.
    pub const ALL: [EventKind; 13] = [
        EventKind::Connected,
        EventKind::GameStarted,
        EventKind::RoundStart,
        EventKind::RequestGuess,
        EventKind::GuessReceived,
        EventKind::RoundGuessResults,
        EventKind::TrickStart,
        EventKind::RequestCard,
        EventKind::CardPlayed,
        EventKind::TrickComplete,
        EventKind::RoundComplete,
        EventKind::GameComplete,
        EventKind::Error,
    ];

    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Connected => "connected",
            EventKind::GameStarted => "game_started",
            EventKind::RoundStart => "round_start",
            EventKind::RequestGuess => "request_guess",
            EventKind::GuessReceived => "guess_received",
            EventKind::RoundGuessResults => "round_guess_results",
            EventKind::TrickStart => "trick_start",
            EventKind::RequestCard => "request_card",
            EventKind::CardPlayed => "card_played",
            EventKind::TrickComplete => "trick_complete",
            EventKind::RoundComplete => "round_complete",
            EventKind::GameComplete => "game_complete",
            EventKind::Error => "error",
        }
    }

    /// Look up a kind by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl From<&ServerEvent> for EventKind {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::Connected(_) => EventKind::Connected,
            ServerEvent::GameStarted(_) => EventKind::GameStarted,
            ServerEvent::RoundStart(_) => EventKind::RoundStart,
            ServerEvent::RequestGuess(_) => EventKind::RequestGuess,
            ServerEvent::GuessReceived(_) => EventKind::GuessReceived,
            ServerEvent::RoundGuessResults(_) => EventKind::RoundGuessResults,
            ServerEvent::TrickStart(_) => EventKind::TrickStart,
            ServerEvent::RequestCard(_) => EventKind::RequestCard,
            ServerEvent::CardPlayed(_) => EventKind::CardPlayed,
            ServerEvent::TrickComplete(_) => EventKind::TrickComplete,
            ServerEvent::RoundComplete(_) => EventKind::RoundComplete,
            ServerEvent::GameComplete(_) => EventKind::GameComplete,
            ServerEvent::Error(_) => EventKind::Error,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A known event with a well-formed payload.
    Event(ServerEvent),
    /// An event kind this client does not recognize.
    Unknown {
        /// The unrecognized event name.
        kind: String,
    },
}

impl Inbound {
    /// Decode one JSON frame.
    ///
    /// Unknown event names are not an error; malformed JSON, a missing event
    /// name, or a known kind with a bad payload are.
    pub fn decode(text: &str) -> Result<Self, WireError> {
        let value: Value = serde_json::from_str(text)?;
        let name = value
            .get("event")
            .and_then(Value::as_str)
            .ok_or(WireError::MissingEventName)?;

        let Some(kind) = EventKind::from_name(name) else {
            return Ok(Inbound::Unknown {
                kind: name.to_string(),
            });
        };

        serde_json::from_value(value)
            .map(Inbound::Event)
            .map_err(|source| WireError::Payload {
                kind: kind.as_str(),
                source,
            })
    }
}
