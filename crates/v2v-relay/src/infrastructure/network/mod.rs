//! Network infrastructure for the Relay Node.
//!
//! The Relay Node is the TCP server of the link.  It binds one port, accepts
//! exactly one Controller Node for the lifetime of the process, and never
//! accepts again: if that peer goes away the engine stops and the process
//! exits, and a restart is the recovery path.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info};
use v2v_core::StreamChannel;

/// Error type for the listener.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("bind failed on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("accept failed on {addr}: {source}")]
    AcceptFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Binds `bind_addr` and waits for the single peer connection.
///
/// Returns the connected channel and the peer's address.  The listener is
/// dropped once the peer is accepted, so later connection attempts are
/// refused.
///
/// # Errors
///
/// Returns [`NetworkError::BindFailed`] if the port cannot be bound and
/// [`NetworkError::AcceptFailed`] if accepting fails.
pub async fn accept_peer(
    bind_addr: SocketAddr,
) -> Result<(StreamChannel<TcpStream>, SocketAddr), NetworkError> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|source| NetworkError::BindFailed {
            addr: bind_addr,
            source,
        })?;
    let local = listener.local_addr().unwrap_or(bind_addr);
    info!("waiting for controller node on {local}");
    accept_from(listener).await
}

/// Accepts the single peer from an already-bound listener.
///
/// # Errors
///
/// Returns [`NetworkError::AcceptFailed`] if accepting fails.
pub async fn accept_from(
    listener: TcpListener,
) -> Result<(StreamChannel<TcpStream>, SocketAddr), NetworkError> {
    let local = listener
        .local_addr()
        .map_err(|source| NetworkError::AcceptFailed {
            addr: SocketAddr::from(([0, 0, 0, 0], 0)),
            source,
        })?;
    let (stream, peer) = listener
        .accept()
        .await
        .map_err(|source| NetworkError::AcceptFailed { addr: local, source })?;

    // Payloads are a handful of bytes; do not let Nagle hold them back.
    if let Err(e) = stream.set_nodelay(true) {
        debug!("could not disable Nagle on peer socket: {e}");
    }
    info!("controller node connected from {peer}");
    Ok((StreamChannel::new(format!("peer:{peer}"), stream), peer))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use v2v_core::ByteChannel;

    #[tokio::test]
    async fn test_accept_from_returns_connected_channel() {
        // Arrange
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Act
        let (accepted, client) = tokio::join!(accept_from(listener), TcpStream::connect(addr));
        let (channel, peer) = accepted.expect("accept");
        let client = client.expect("connect");

        // Assert
        assert_eq!(peer, client.local_addr().unwrap());
        assert!(channel.describe().starts_with("peer:"));
    }

    #[tokio::test]
    async fn test_accept_peer_reports_bind_failure() {
        // Arrange – occupy a port first
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        // Act
        let result = accept_peer(addr).await;

        // Assert
        assert!(matches!(result, Err(NetworkError::BindFailed { .. })));
    }
}
