//! Scripted in-memory game server for tests.
//!
//! `recv()` plays back a script of steps: a server frame, or a receive
//! error. When the script runs out the server hangs up. Everything the
//! client sends lands in an outbox that tests read back as raw text or as
//! decoded [`ClientRequest`]s.

use super::{Transport, TransportError};
use async_trait::async_trait;
use jass_sync_types::{ClientRequest, ServerEvent, WireError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One scripted `recv()` outcome.
#[derive(Debug)]
enum Step {
    Frame(String),
    Fail(TransportError),
}

#[derive(Debug, Default)]
struct Script {
    open: bool,
    address: Option<String>,
    steps: VecDeque<Step>,
    outbox: Vec<String>,
    refuse_connect: Option<String>,
    break_send: Option<String>,
}

/// In-memory transport driven by a script.
///
/// Clones share the script, so a test keeps one handle while the client
/// owns another.
#[derive(Debug, Default, Clone)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    /// Create a server with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a raw frame to the script.
    pub fn queue_frame(&self, frame: impl Into<String>) {
        self.script().steps.push_back(Step::Frame(frame.into()));
    }

    /// Append an encoded server event to the script.
    pub fn queue_event(&self, event: &ServerEvent) -> Result<(), WireError> {
        let frame = event.to_json()?;
        self.queue_frame(frame);
        Ok(())
    }

    /// Append a receive error to the script.
    ///
    /// Steps after it are still played back on later calls.
    pub fn queue_failure(&self, error: TransportError) {
        self.script().steps.push_back(Step::Fail(error));
    }

    /// Script steps not yet played back.
    pub fn queued_len(&self) -> usize {
        self.script().steps.len()
    }

    /// Frames the client sent, oldest first.
    pub fn sent_frames(&self) -> Vec<String> {
        self.script().outbox.clone()
    }

    /// Frames the client sent, decoded.
    pub fn sent_requests(&self) -> Result<Vec<ClientRequest>, WireError> {
        self.script()
            .outbox
            .iter()
            .map(|frame| ClientRequest::from_json(frame))
            .collect()
    }

    /// Address of the last successful `connect()`.
    pub fn connected_address(&self) -> Option<String> {
        self.script().address.clone()
    }

    /// Refuse the next `connect()`.
    pub fn refuse_connect(&self, reason: &str) {
        self.script().refuse_connect = Some(reason.to_string());
    }

    /// Drop the next `send()` with an error.
    pub fn fail_next_send(&self, reason: &str) {
        self.script().break_send = Some(reason.to_string());
    }

    /// Forget the script, the outbox and the connection.
    pub fn reset(&self) {
        *self.script() = Script::default();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&self, address: &str) -> Result<(), TransportError> {
        let mut script = self.script();
        if let Some(reason) = script.refuse_connect.take() {
            return Err(TransportError::ConnectionFailed(reason));
        }
        script.open = true;
        script.address = Some(address.to_string());
        Ok(())
    }

    async fn send(&self, frame: &str) -> Result<(), TransportError> {
        let mut script = self.script();
        if !script.open {
            return Err(TransportError::NotConnected);
        }
        if let Some(reason) = script.break_send.take() {
            return Err(TransportError::SendFailed(reason));
        }
        script.outbox.push(frame.to_string());
        Ok(())
    }

    async fn recv(&self) -> Result<String, TransportError> {
        let mut script = self.script();
        if !script.open {
            return Err(TransportError::NotConnected);
        }
        match script.steps.pop_front() {
            Some(Step::Frame(frame)) => Ok(frame),
            Some(Step::Fail(error)) => Err(error),
            None => {
                script.open = false;
                Err(TransportError::ConnectionClosed)
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.script().open
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.script().open = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jass_sync_types::{Connected, StartGame};

    fn start_game() -> String {
        ClientRequest::StartGame(StartGame {
            player_name: "Alice".into(),
        })
        .to_json()
        .unwrap()
    }

    fn greeting() -> ServerEvent {
        ServerEvent::Connected(Connected {
            message: "Connected to Jass game server".into(),
        })
    }

    async fn open() -> MockTransport {
        let transport = MockTransport::new();
        transport.connect("127.0.0.1:5000").await.unwrap();
        transport
    }

    // ===========================================
    // Script Playback
    // ===========================================

    #[tokio::test]
    async fn plays_back_script_in_order() {
        let transport = open().await;
        transport.queue_event(&greeting()).unwrap();
        transport.queue_frame("raw");
        assert_eq!(transport.queued_len(), 2);

        let first = transport.recv().await.unwrap();
        assert_eq!(first, greeting().to_json().unwrap());
        assert_eq!(transport.recv().await.unwrap(), "raw");
        assert_eq!(transport.queued_len(), 0);
    }

    #[tokio::test]
    async fn scripted_failure_does_not_end_script() {
        let transport = open().await;
        transport.queue_failure(TransportError::FrameTooLarge { size: 9, max: 4 });
        transport.queue_frame("after");

        assert!(matches!(
            transport.recv().await,
            Err(TransportError::FrameTooLarge { size: 9, max: 4 })
        ));
        assert_eq!(transport.recv().await.unwrap(), "after");
    }

    #[tokio::test]
    async fn exhausted_script_hangs_up() {
        let transport = open().await;

        assert!(matches!(
            transport.recv().await,
            Err(TransportError::ConnectionClosed)
        ));
        assert!(!transport.is_connected());
        assert!(matches!(
            transport.recv().await,
            Err(TransportError::NotConnected)
        ));
    }

    // ===========================================
    // Outbox
    // ===========================================

    #[tokio::test]
    async fn sent_frames_decode_as_requests() {
        let transport = open().await;
        transport.send(&start_game()).await.unwrap();

        let requests = transport.sent_requests().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(matches!(&requests[0], ClientRequest::StartGame(s) if s.player_name == "Alice"));
    }

    #[tokio::test]
    async fn garbage_in_outbox_fails_decoding() {
        let transport = open().await;
        transport.send("not a request").await.unwrap();

        assert_eq!(transport.sent_frames(), vec!["not a request".to_string()]);
        assert!(transport.sent_requests().is_err());
    }

    #[tokio::test]
    async fn broken_send_drops_one_frame() {
        let transport = open().await;
        transport.fail_next_send("broken pipe");

        assert!(matches!(
            transport.send(&start_game()).await,
            Err(TransportError::SendFailed(_))
        ));
        transport.send(&start_game()).await.unwrap();
        assert_eq!(transport.sent_frames().len(), 1);
    }

    // ===========================================
    // Connection
    // ===========================================

    #[tokio::test]
    async fn refused_connect_stays_closed() {
        let transport = MockTransport::new();
        transport.refuse_connect("connection refused");

        assert!(matches!(
            transport.connect("127.0.0.1:5000").await,
            Err(TransportError::ConnectionFailed(_))
        ));
        assert!(!transport.is_connected());
        assert!(transport.connected_address().is_none());
    }

    #[tokio::test]
    async fn io_before_connect_fails() {
        let transport = MockTransport::new();
        assert!(matches!(
            transport.send(&start_game()).await,
            Err(TransportError::NotConnected)
        ));
        assert!(matches!(
            transport.recv().await,
            Err(TransportError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn clones_share_script_and_reset_forgets_it() {
        let transport = open().await;
        let other = transport.clone();
        other.queue_frame("shared");
        other.send("hello").await.unwrap();

        assert_eq!(transport.queued_len(), 1);
        assert_eq!(transport.sent_frames().len(), 1);

        transport.reset();
        assert!(!other.is_connected());
        assert_eq!(other.queued_len(), 0);
        assert!(other.sent_frames().is_empty());
        assert!(other.connected_address().is_none());
    }
}
