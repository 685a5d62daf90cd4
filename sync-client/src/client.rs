//! GameClient - the main interface for the Jass sync client.
//!
//! This module provides [`GameClient`], the primary API for applications
//! that mirror a server-driven Jass game.
//!
//! # Architecture
//!
//! GameClient uses a pure state machine (from sync-core) for game logic
//! and interprets its actions to perform actual I/O via the Transport trait.
//!
//! ```text
//! Server → Transport → reader task → input queue → GameClient → Transport → Server
//!                                         ↑              ↓
//!                               trick-clear timer   sync-core (pure state machine)
//! ```
//!
//! A reader task decodes frames into an unbounded input queue. The deferred
//! trick clear is a spawned sleep that pushes into the same queue and is
//! aborted when cancelled. Local actions take the core lock directly, so
//! they serialize with event handling.
//!
//! Snapshots are published on a `watch` channel and notices on a
//! `broadcast` channel.
//!
//! # Example
//!
//! ```ignore
//! use jass_sync_client::{GameClient, LineTransport, SyncConfig};
//!
//! let client = GameClient::new(LineTransport::new(), SyncConfig::default());
//! client.connect("127.0.0.1:5000").await?;
//! client.start_reader().await;
//! client.start_game("Alice").await?;
//! client.run().await?;
//! ```

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use jass_sync_core::{
    Action, GameSync, Input, Notice, Rejection, SyncConfig, SyncSnapshot, TrickGeneration,
};
use jass_sync_types::{Card, ClientRequest, Inbound, WireError};

use crate::transport::{Transport, TransportError};

/// Capacity of the notice broadcast channel.
pub const NOTICE_CAPACITY: usize = 256;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Outbound frame could not be encoded.
    #[error("encoding error: {0}")]
    Wire(#[from] WireError),

    /// Local action refused by the state machine.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

/// Entries in the input queue.
#[derive(Debug)]
enum Queued {
    Input(Input),
    Closed(Option<TransportError>),
}

/// Decode one server frame into a state machine input.
///
/// Unknown event kinds become [`Input::Unrecognized`].
pub fn decode_input(frame: &str) -> Result<Input, WireError> {
    Ok(match Inbound::decode(frame)? {
        Inbound::Event(event) => Input::Server(event),
        Inbound::Unknown { kind } => Input::Unrecognized { kind },
    })
}

/// The main game client.
///
/// Owns the state machine, the transport, and the trick-clear timer.
pub struct GameClient<T: Transport + 'static> {
    transport: Arc<T>,
    sync: Arc<Mutex<GameSync>>,
    queue_tx: mpsc::UnboundedSender<Queued>,
    queue_rx: Mutex<mpsc::UnboundedReceiver<Queued>>,
    reader: Mutex<Option<JoinHandle<()>>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    snapshots: watch::Sender<SyncSnapshot>,
    notices: broadcast::Sender<Notice>,
}

impl<T: Transport + 'static> GameClient<T> {
    /// Create a new GameClient.
    pub fn new(transport: T, config: SyncConfig) -> Self {
        let sync = GameSync::new(config);
        let (snapshots, _) = watch::channel(sync.snapshot());
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        Self {
            transport: Arc::new(transport),
            sync: Arc::new(Mutex::new(sync)),
            queue_tx,
            queue_rx: Mutex::new(queue_rx),
            reader: Mutex::new(None),
            timer: Mutex::new(None),
            snapshots,
            notices,
        }
    }

    /// Connect the transport to the game server.
    pub async fn connect(&self, address: &str) -> Result<(), ClientError> {
        self.transport
            .connect(address)
            .await
            .map_err(|e| ClientError::ConnectionFailed(e.to_string()))?;
        info!(%address, "connected to game server");
        Ok(())
    }

    /// Check if the transport is connected.
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Stop the reader, disarm the timer, and close the transport.
    pub async fn disconnect(&self) -> Result<(), ClientError> {
        if let Some(reader) = self.reader.lock().await.take() {
            reader.abort();
        }
        self.cancel_clear().await;
        self.transport.close().await?;
        Ok(())
    }

    /// Spawn the task that feeds server frames into the input queue.
    ///
    /// Replaces a running reader.
    pub async fn start_reader(&self) {
        let transport = Arc::clone(&self.transport);
        let queue = self.queue_tx.clone();
        let handle = tokio::spawn(read_frames(transport, queue));
        if let Some(previous) = self.reader.lock().await.replace(handle) {
            previous.abort();
        }
    }

    /// Process queued inputs until the connection closes.
    ///
    /// Returns `Ok(())` on a clean close and the transport error otherwise.
    pub async fn run(&self) -> Result<(), ClientError> {
        let mut queue = self.queue_rx.lock().await;
        while let Some(queued) = queue.recv().await {
            match queued {
                Queued::Input(input) => self.dispatch(input).await?,
                Queued::Closed(None) => return Ok(()),
                Queued::Closed(Some(error)) => return Err(error.into()),
            }
        }
        Ok(())
    }

    /// Process whatever is queued right now without waiting.
    ///
    /// Returns the number of inputs applied.
    pub async fn process_queued(&self) -> Result<usize, ClientError> {
        let mut queue = self.queue_rx.lock().await;
        let mut applied = 0;
        while let Ok(queued) = queue.try_recv() {
            match queued {
                Queued::Input(input) => {
                    self.dispatch(input).await?;
                    applied += 1;
                }
                Queued::Closed(None) => break,
                Queued::Closed(Some(error)) => return Err(error.into()),
            }
        }
        Ok(applied)
    }

    /// Decode and apply one server frame.
    ///
    /// Undecodable frames are logged and dropped.
    pub async fn handle_frame(&self, frame: &str) -> Result<(), ClientError> {
        match decode_input(frame) {
            Ok(input) => self.dispatch(input).await,
            Err(error) => {
                warn!(%error, "dropping undecodable frame");
                Ok(())
            }
        }
    }

    /// Apply one input and execute the resulting actions.
    pub async fn dispatch(&self, input: Input) -> Result<(), ClientError> {
        let mut sync = self.sync.lock().await;
        let actions = sync.on_input(input);
        self.apply(&mut sync, actions).await
    }

    // =========================================================================
    // Local actions
    // =========================================================================

    /// Ask the server for a new game.
    pub async fn start_game(&self, player_name: &str) -> Result<(), ClientError> {
        self.local(|sync| sync.start_game(player_name)).await
    }

    /// Submit a guess for the current round.
    pub async fn submit_guess(&self, guess: i64) -> Result<(), ClientError> {
        self.local(|sync| sync.submit_guess(guess)).await
    }

    /// Play a card from the local hand.
    pub async fn play_card(&self, card: Card) -> Result<(), ClientError> {
        self.local(|sync| sync.play_card(card)).await
    }

    /// Abandon the session locally.
    pub async fn reset(&self) -> Result<(), ClientError> {
        self.local(|sync| Ok(sync.reset())).await
    }

    async fn local<F>(&self, action: F) -> Result<(), ClientError>
    where
        F: FnOnce(&mut GameSync) -> Result<Vec<Action>, Rejection>,
    {
        let mut sync = self.sync.lock().await;
        match action(&mut sync) {
            Ok(actions) => self.apply(&mut sync, actions).await,
            Err(rejection) => {
                debug!(%rejection, "local action refused");
                let _ = self.notices.send(Notice::Rejected(rejection.clone()));
                Err(ClientError::Rejected(rejection))
            }
        }
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Current snapshot.
    pub async fn snapshot(&self) -> SyncSnapshot {
        self.sync.lock().await.snapshot()
    }

    /// Receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SyncSnapshot> {
        self.snapshots.subscribe()
    }

    /// Receiver for notices published from now on.
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Get a reference to the underlying transport (for testing).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // =========================================================================
    // Action execution
    // =========================================================================

    /// Execute actions; on failure undo an unsent play and republish.
    async fn apply(&self, sync: &mut GameSync, actions: Vec<Action>) -> Result<(), ClientError> {
        let played = actions.iter().find_map(|action| match action {
            Action::Send(ClientRequest::PlayCard(play)) => Some(play.card()),
            _ => None,
        });
        let result = self.execute(sync, actions).await;
        if result.is_err() {
            if let Some(card) = played {
                sync.play_not_sent(card);
            }
            self.publish(sync);
        }
        result
    }

    fn publish(&self, sync: &GameSync) {
        self.snapshots.send_replace(sync.snapshot());
        let _ = self.notices.send(Notice::StateChanged);
    }

    async fn execute(&self, sync: &GameSync, actions: Vec<Action>) -> Result<(), ClientError> {
        for action in actions {
            match action {
                Action::Send(request) => {
                    let frame = request.to_json()?;
                    self.transport.send(&frame).await?;
                    debug!(%frame, "request sent");
                }
                Action::ScheduleTrickClear { generation, delay } => {
                    self.schedule_clear(generation, delay).await;
                }
                Action::CancelTrickClear => self.cancel_clear().await,
                Action::Emit(Notice::StateChanged) => self.publish(sync),
                Action::Emit(notice) => {
                    let _ = self.notices.send(notice);
                }
            }
        }
        Ok(())
    }

    async fn schedule_clear(&self, generation: TrickGeneration, delay: Duration) {
        let queue = self.queue_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = queue.send(Queued::Input(Input::TrickClearElapsed { generation }));
        });
        if let Some(previous) = self.timer.lock().await.replace(handle) {
            previous.abort();
        }
        debug!(generation = generation.value(), ?delay, "trick clear scheduled");
    }

    async fn cancel_clear(&self) {
        if let Some(timer) = self.timer.lock().await.take() {
            timer.abort();
            debug!("trick clear cancelled");
        }
    }
}

impl<T: Transport + 'static> Drop for GameClient<T> {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.get_mut().take() {
            reader.abort();
        }
        if let Some(timer) = self.timer.get_mut().take() {
            timer.abort();
        }
    }
}

async fn read_frames<T: Transport>(transport: Arc<T>, queue: mpsc::UnboundedSender<Queued>) {
    loop {
        match transport.recv().await {
            Ok(frame) => match decode_input(&frame) {
                Ok(input) => {
                    if queue.send(Queued::Input(input)).is_err() {
                        break;
                    }
                }
                Err(error) => warn!(%error, "dropping undecodable frame"),
            },
            Err(error @ TransportError::FrameTooLarge { .. }) => {
                warn!(%error, "dropping oversized frame");
            }
            Err(TransportError::ConnectionClosed) => {
                info!("server closed the connection");
                let _ = queue.send(Queued::Closed(None));
                break;
            }
            Err(error) => {
                warn!(%error, "reader stopped");
                let _ = queue.send(Queued::Closed(Some(error)));
                break;
            }
        }
    }
}
