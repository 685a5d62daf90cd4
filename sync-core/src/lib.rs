//! # sync-core
//!
//! Pure logic for the Jass sync client (no I/O, instant tests).
//!
//! This crate mirrors a server-driven Differenzler session: the local hand,
//! the server's legality grant, turn order within a trick, and opponent
//! card counts, reconciled against the ordered event stream.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about state transitions
//!
//! The actual I/O (network, timers) is performed by `sync-client`, which
//! interprets the [`Action`]s produced by [`GameSync`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hand;
pub mod legality;
pub mod log;
pub mod opponents;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod turn;

pub use hand::Hand;
pub use legality::LegalityGate;
pub use log::{MessageLog, DEFAULT_LOG_CAPACITY};
pub use opponents::{Decrement, OpponentCounts};
pub use session::{Session, SessionPhase};
pub use snapshot::SyncSnapshot;
pub use state::{
    Action, GameSync, Inconsistency, Input, Notice, Rejection, SyncConfig,
    DEFAULT_HUMAN_MARKER, DEFAULT_TRICK_CLEAR_DELAY,
};
pub use turn::{Advance, TrickGeneration, TurnOrder};
