//! Newline-delimited JSON over TCP.
//!
//! One frame per line. Blank lines are skipped. Lines longer than
//! [`MAX_FRAME_LEN`] are rejected without buffering them: the rest of the
//! line is discarded and the next `recv()` starts at the following frame.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{Transport, TransportError, MAX_FRAME_LEN};

/// TCP transport framing one JSON object per line.
///
/// Read and write halves are locked separately, so a reader task can wait
/// on `recv()` while another task sends.
#[derive(Debug, Default)]
pub struct LineTransport {
    reader: Mutex<Option<BufReader<OwnedReadHalf>>>,
    writer: Mutex<Option<OwnedWriteHalf>>,
    connected: AtomicBool,
}

impl LineTransport {
    /// Create a disconnected transport.
    pub fn new() -> Self {
        Self::default()
    }

    fn mark_closed(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for LineTransport {
    async fn connect(&self, address: &str) -> Result<(), TransportError> {
        let stream = TcpStream::connect(address)
            .await
            .map_err(|e| TransportError::ConnectionFailed(format!("{}: {}", address, e)))?;
        let _ = stream.set_nodelay(true);

        let (read_half, write_half) = stream.into_split();
        *self.reader.lock().await = Some(BufReader::new(read_half));
        *self.writer.lock().await = Some(write_half);
        self.connected.store(true, Ordering::SeqCst);

        info!(%address, "connected");
        Ok(())
    }

    async fn send(&self, frame: &str) -> Result<(), TransportError> {
        if frame.len() > MAX_FRAME_LEN {
            return Err(TransportError::FrameTooLarge {
                size: frame.len(),
                max: MAX_FRAME_LEN,
            });
        }
        if frame.contains('\n') {
            return Err(TransportError::SendFailed("frame contains a newline".into()));
        }

        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(TransportError::NotConnected)?;

        let mut line = String::with_capacity(frame.len() + 1);
        line.push_str(frame);
        line.push('\n');

        if let Err(e) = writer.write_all(line.as_bytes()).await {
            self.mark_closed();
            return Err(TransportError::SendFailed(e.to_string()));
        }
        writer
            .flush()
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;

        debug!(bytes = frame.len(), "frame sent");
        Ok(())
    }

    async fn recv(&self) -> Result<String, TransportError> {
        let mut guard = self.reader.lock().await;
        let reader = guard.as_mut().ok_or(TransportError::NotConnected)?;

        loop {
            let mut line = Vec::new();
            let size = read_line_bounded(reader, &mut line)
                .await
                .map_err(|e| TransportError::ReceiveFailed(e.to_string()))?;

            let Some(size) = size else {
                self.mark_closed();
                return Err(TransportError::ConnectionClosed);
            };
            if line.last() == Some(&b'\r') && line.len() == size {
                line.pop();
            }
            if line.len() < size || line.len() > MAX_FRAME_LEN {
                return Err(TransportError::FrameTooLarge {
                    size,
                    max: MAX_FRAME_LEN,
                });
            }

            let frame = String::from_utf8_lossy(&line);
            if frame.trim().is_empty() {
                continue;
            }
            return Ok(frame.into_owned());
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn close(&self) -> Result<(), TransportError> {
        if let Some(mut writer) = self.writer.lock().await.take() {
            let _ = writer.shutdown().await;
        }
        self.reader.lock().await.take();
        self.mark_closed();
        Ok(())
    }
}

/// Read one line into `line`, keeping at most `MAX_FRAME_LEN + 1` bytes.
///
/// Returns the line's full length without the newline, or `None` at EOF
/// with nothing read. The whole line is consumed even when truncated.
async fn read_line_bounded<R>(
    reader: &mut R,
    line: &mut Vec<u8>,
) -> std::io::Result<Option<usize>>
where
    R: AsyncBufRead + Unpin,
{
    let mut size = 0;
    loop {
        let (used, done) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Ok((size > 0).then_some(size));
            }
            let (chunk, done) = match available.iter().position(|b| *b == b'\n') {
                Some(end) => (&available[..end], true),
                None => (available, false),
            };
            let room = (MAX_FRAME_LEN + 1).saturating_sub(line.len());
            line.extend_from_slice(&chunk[..chunk.len().min(room)]);
            size += chunk.len();
            (chunk.len() + usize::from(done), done)
        };
        reader.consume(used);
        if done {
            return Ok(Some(size));
        }
    }
}
