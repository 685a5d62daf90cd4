//! # sync-types
//!
//! Wire format types for the Jass game synchronization client.
//!
//! This crate provides the foundational types used across all jass-sync crates:
//! - [`Suit`], [`Rank`], [`Card`] - The 36-card Swiss deck
//! - [`PlayerId`], [`GameId`] - Identity types assigned by the game server
//! - [`ServerEvent`] - Inbound events (server → client)
//! - [`ClientRequest`] - Outbound requests (client → server)
//! - [`Inbound`], [`EventKind`] - Frame decoding with forward-compatible unknown kinds
//! - [`WireError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cards;
mod error;
mod frame;
mod ids;
mod messages;

pub use cards::{Card, Rank, Suit};
pub use error::WireError;
pub use frame::{EventKind, Inbound};
pub use ids::{GameId, PlayerId};
pub use messages::{
    CardPlayed, ClientRequest, Connected, GameComplete, GameStarted, GuessReceived, GuessResult,
    MakeGuess, PlayCard, RequestCard, RequestGuess, RoundComplete, RoundData,
    RoundGuessResults, RoundStart, Scores, ServerError, ServerEvent, StartGame, TrickComplete,
    TrickEntry, TrickStart, MAX_GUESS,
};
