//! Network infrastructure for the Controller Node.
//!
//! The Controller Node is the TCP client of the link.  It connects once at
//! startup and keeps that single connection for the life of the process.
//! There is no reconnect loop: if the Relay Node goes away the engine stops
//! with a transport error and the process exits.

use thiserror::Error;
use tokio::net::TcpStream;
use tracing::{debug, info};
use v2v_core::StreamChannel;

/// Errors raised while establishing the link to the Relay Node.
#[derive(Debug, Error)]
pub enum LinkError {
    /// TCP connection to the Relay Node failed.
    #[error("failed to connect to relay node at {addr}: {source}")]
    ConnectFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Connects to the Relay Node at `host:port`.
///
/// `host` may be an IP address or a resolvable name.
///
/// # Errors
///
/// Returns [`LinkError::ConnectFailed`] if resolution or the TCP handshake
/// fails.
pub async fn connect_to_relay(host: &str, port: u16) -> Result<StreamChannel<TcpStream>, LinkError> {
    let addr = format!("{host}:{port}");
    let stream = TcpStream::connect((host, port))
        .await
        .map_err(|source| LinkError::ConnectFailed {
            addr: addr.clone(),
            source,
        })?;

    // Requests are single bytes; send them immediately.
    if let Err(e) = stream.set_nodelay(true) {
        debug!("could not disable Nagle on relay socket: {e}");
    }
    info!("connected to relay node at {addr}");
    Ok(StreamChannel::new(format!("relay:{addr}"), stream))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
