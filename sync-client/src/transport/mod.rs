//! Transport abstraction for the Jass sync client.
//!
//! This module provides a pluggable transport layer that abstracts
//! the underlying connection to the game server (TCP lines, mock for testing).
//!
//! # Design
//!
//! The transport trait is async and connection-oriented, and carries one
//! JSON frame per call:
//! - `connect()` establishes a connection
//! - `send()` transmits one frame
//! - `recv()` receives one frame
//! - `close()` gracefully terminates
//!
//! Frames arrive in server-emission order over a single channel.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new();
//! transport.connect("127.0.0.1:5000").await?;
//! transport.send(r#"{"event":"start_game","data":{"player_name":"Alice"}}"#).await?;
//! let frame = transport.recv().await?;
//! ```

mod lines;
mod mock;

pub use lines::LineTransport;
pub use mock::MockTransport;

use async_trait::async_trait;
use thiserror::Error;

/// Largest accepted frame, in bytes.
pub const MAX_FRAME_LEN: usize = 64 * 1024;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Not connected.
    #[error("not connected")]
    NotConnected,

    /// Connection closed.
    #[error("connection closed")]
    ConnectionClosed,

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Receive failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// Frame exceeds [`MAX_FRAME_LEN`].
    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge {
        /// Size of the offending frame
        size: usize,
        /// Configured limit
        max: usize,
    },
}

/// Transport trait for exchanging protocol frames with the game server.
///
/// Implementations handle the underlying connection mechanism
/// (TCP, WebSocket, mock, etc).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Connect to the server at the given address.
    async fn connect(&self, address: &str) -> Result<(), TransportError>;

    /// Send one frame.
    async fn send(&self, frame: &str) -> Result<(), TransportError>;

    /// Receive one frame.
    ///
    /// Blocks until a frame is available or the connection closes.
    async fn recv(&self) -> Result<String, TransportError>;

    /// Check if currently connected.
    fn is_connected(&self) -> bool;

    /// Close the connection gracefully.
    async fn close(&self) -> Result<(), TransportError>;
}
