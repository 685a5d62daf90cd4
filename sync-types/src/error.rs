//! Error types for jass-sync wire handling.

use thiserror::Error;

/// Errors that can occur while encoding or decoding frames.
#[derive(Debug, Error)]
pub enum WireError {
    /// Frame is not valid JSON, or a request failed to serialize
    #[error("invalid JSON frame: {0}")]
    Json(#[from] serde_json::Error),

    /// Frame has no string `event` field
    #[error("frame has no event name")]
    MissingEventName,

    /// Known event kind whose payload does not match its schema
    #[error("malformed {kind} payload: {source}")]
    Payload {
        /// The event kind that failed to decode
        kind: &'static str,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Unrecognized suit name
    #[error("unknown suit: {0}")]
    UnknownSuit(String),

    /// Unrecognized rank name or value
    #[error("unknown rank: {0}")]
    UnknownRank(String),
}
