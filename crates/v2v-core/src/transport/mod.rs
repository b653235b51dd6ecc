//! Duplex byte channels to the local firmware and to the peer node.
//!
//! Both engines are written against the [`ByteChannel`] trait, so the same
//! state machine runs over a serial port, a TCP socket, an in-memory
//! `tokio::io::duplex` pipe, or a scripted `tokio_test` mock.
//!
//! # Framing (read this before changing anything)
//!
//! The protocol has no length prefix and no delimiter.  A "message" is
//! whatever a single underlying read returns, capped at
//! [`DEFAULT_MAX_MESSAGE_LEN`] bytes.  This works on the deployed hardware
//! because each side writes one small payload and then waits for the other,
//! so the payload normally arrives in a single read.  A payload split across
//! two TCP segments, or two writes coalesced into one segment, would be
//! misread.  Both peers rely on the same assumption, so it is kept for wire
//! compatibility.
//!
//! # Blocking semantics
//!
//! Every read waits indefinitely.  There is no application-level timeout;
//! callers stop an engine by racing it against a shutdown signal.

use async_trait::async_trait;
use thiserror::Error;

pub mod serial;
pub mod stream;

pub use serial::{SerialChannel, SerialSettings};
pub use stream::StreamChannel;

/// Maximum number of bytes returned by one [`ByteChannel::read_message`] call.
///
/// Matches the receive buffer of the deployed peers.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 1024;

/// Errors raised by a [`ByteChannel`].  All of them are fatal to the engine
/// that owns the channel; recovery is a process restart.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The remote end closed the stream.
    #[error("{channel} closed by remote end")]
    Closed { channel: String },

    /// An I/O error occurred on an established channel.
    #[error("I/O error on {channel}: {source}")]
    Io {
        channel: String,
        #[source]
        source: std::io::Error,
    },

    /// The serial device could not be opened or configured.
    #[error("failed to open serial device {device}: {source}")]
    Serial {
        device: String,
        #[source]
        source: serialport::Error,
    },

    /// The blocking worker that performs serial I/O panicked.
    #[error("serial worker for {channel} panicked")]
    WorkerPanicked { channel: String },
}

/// A duplex byte channel.
///
/// Implementations must deliver bytes in order and must block (asynchronously)
/// until data is available.
#[async_trait]
pub trait ByteChannel: Send {
    /// Reads exactly one byte.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] at end of stream and
    /// [`TransportError::Io`] on any other failure.
    async fn read_byte(&mut self) -> Result<u8, TransportError>;

    /// Reads one logical message: whatever a single underlying read delivers.
    ///
    /// Never returns an empty vector.
    ///
    /// # Errors
    ///
    /// Same as [`read_byte`](Self::read_byte).
    async fn read_message(&mut self) -> Result<Vec<u8>, TransportError>;

    /// Writes all of `bytes` and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] if the write fails.
    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Writes a single byte and flushes.
    ///
    /// # Errors
    ///
    /// Same as [`write_all`](Self::write_all).
    async fn write_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        self.write_all(&[byte]).await
    }

    /// Short human-readable name used in log lines and errors.
    fn describe(&self) -> &str;
}

#[async_trait]
impl<C: ByteChannel + ?Sized> ByteChannel for Box<C> {
    async fn read_byte(&mut self) -> Result<u8, TransportError> {
        (**self).read_byte().await
    }

    async fn read_message(&mut self) -> Result<Vec<u8>, TransportError> {
        (**self).read_message().await
    }

    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write_all(bytes).await
    }

    async fn write_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        (**self).write_byte(byte).await
    }

    fn describe(&self) -> &str {
        (**self).describe()
    }
}
