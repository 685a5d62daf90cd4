//! # sync-client
//!
//! Client library that keeps a local view of a server-driven Jass game.
//!
//! This is the main library that front-ends use to follow a Differenzler
//! session and act in it.
//!
//! ## Features
//!
//! - **Transport Abstraction**: Pluggable transport layer (TCP lines, mock)
//! - **Pure State Machine**: Uses sync-core for side-effect-free logic
//! - **Deferred Trick Clear**: A cancellable timer keeps the completed trick
//!   on the table for a moment before clearing it
//!
//! ## Example
//!
//! ```ignore
//! use jass_sync_client::{GameClient, LineTransport, SyncConfig};
//!
//! let client = GameClient::new(LineTransport::new(), SyncConfig::default());
//! client.connect("127.0.0.1:5000").await?;
//! client.start_reader().await;
//!
//! client.start_game("Alice").await?;
//! client.run().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod transport;

pub use client::{decode_input, ClientError, GameClient, NOTICE_CAPACITY};
pub use jass_sync_core::{Notice, SyncConfig, SyncSnapshot};
pub use transport::{LineTransport, MockTransport, Transport, TransportError, MAX_FRAME_LEN};
