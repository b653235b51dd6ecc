//! [`ByteChannel`] over any tokio byte stream.
//!
//! Used for the TCP link between the nodes (`tokio::net::TcpStream`), for
//! in-memory links in tests (`tokio::io::duplex`), and for scripted firmware
//! in tests (`tokio_test::io::Mock`).

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use super::{ByteChannel, TransportError, DEFAULT_MAX_MESSAGE_LEN};

/// Wraps an `AsyncRead + AsyncWrite` stream as a [`ByteChannel`].
pub struct StreamChannel<S> {
    name: String,
    stream: S,
    max_message_len: usize,
}

impl<S> StreamChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wraps `stream`, using `name` in log lines and errors.
    pub fn new(name: impl Into<String>, stream: S) -> Self {
        Self {
            name: name.into(),
            stream,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }

    /// Overrides the per-read message cap (default [`DEFAULT_MAX_MESSAGE_LEN`]).
    pub fn with_max_message_len(mut self, max_message_len: usize) -> Self {
        self.max_message_len = max_message_len.max(1);
        self
    }

    /// Returns the wrapped stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    fn io_error(&self, source: std::io::Error) -> TransportError {
        if source.kind() == std::io::ErrorKind::UnexpectedEof {
            self.closed()
        } else {
            TransportError::Io {
                channel: self.name.clone(),
                source,
            }
        }
    }

    fn closed(&self) -> TransportError {
        TransportError::Closed {
            channel: self.name.clone(),
        }
    }
}

#[async_trait]
impl<S> ByteChannel for StreamChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read_byte(&mut self) -> Result<u8, TransportError> {
        let byte = self.stream.read_u8().await.map_err(|e| self.io_error(e))?;
        trace!(channel = %self.name, byte, "read byte");
        Ok(byte)
    }

    async fn read_message(&mut self) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; self.max_message_len];
        let n = self.stream.read(&mut buf).await.map_err(|e| self.io_error(e))?;
        if n == 0 {
            return Err(self.closed());
        }
        buf.truncate(n);
        trace!(channel = %self.name, len = n, "read message");
        Ok(buf)
    }

    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.stream
            .write_all(bytes)
            .await
            .map_err(|e| self.io_error(e))?;
        self.stream.flush().await.map_err(|e| self.io_error(e))?;
        trace!(channel = %self.name, len = bytes.len(), "wrote bytes");
        Ok(())
    }

    fn describe(&self) -> &str {
        &self.name
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
