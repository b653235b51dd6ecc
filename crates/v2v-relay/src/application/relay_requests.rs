//! RelayEngine: the Relay Node's pass-through state machine.
//!
//! Each round trip walks the same four states and then starts over:
//!
//! ```text
//! WaitRequest ──► Forwarding ──► WaitResponse ──► Done ──┐
//!      ▲                                                  │
//!      └──────────────────────────────────────────────────┘
//! ```
//!
//! - `WaitRequest`: read one request byte from the peer.
//! - `Forwarding`: write the same byte to the firmware.
//! - `WaitResponse`: read the firmware's response payload.
//! - `Done`: write the payload back to the peer.
//!
//! There is no acknowledgement handshake on this node.  The only terminal
//! condition is a transport error (or the shutdown signal).

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use v2v_core::{ByteChannel, RequestCode, ShutdownListener, TransportError, WireVocabulary};

/// Behavioural switches for the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayOptions {
    /// When `false` (the deployed behaviour) every request byte is passed
    /// through.  When `true`, bytes other than the forward code are logged and
    /// dropped without touching the serial link.
    #[serde(default)]
    pub validate_requests: bool,
}

/// Result of one [`RelayEngine::relay_once`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The request reached the firmware and its response reached the peer.
    Relayed {
        request: RequestCode,
        response_len: usize,
    },
    /// The request was refused by validation; nothing was written anywhere.
    Dropped { request: RequestCode },
}

/// Running totals, reported when the engine stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub relayed: u64,
    pub dropped: u64,
}

/// The pass-through engine, generic over its two channels.
pub struct RelayEngine<N, S> {
    network: N,
    serial: S,
    vocab: WireVocabulary,
    options: RelayOptions,
    stats: RelayStats,
}

impl<N, S> RelayEngine<N, S>
where
    N: ByteChannel,
    S: ByteChannel,
{
    /// Creates an engine bridging `network` (the peer) and `serial` (the firmware).
    pub fn new(network: N, serial: S, vocab: WireVocabulary, options: RelayOptions) -> Self {
        Self {
            network,
            serial,
            vocab,
            options,
            stats: RelayStats::default(),
        }
    }

    /// Returns the totals accumulated so far.
    pub fn stats(&self) -> RelayStats {
        self.stats
    }

    /// Performs one full round trip.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`] from either channel; the engine
    /// must not be reused after that.
    pub async fn relay_once(&mut self) -> Result<RelayOutcome, TransportError> {
        // WaitRequest
        let byte = self.network.read_byte().await?;
        let request = RequestCode::decode(byte, &self.vocab);
        debug!(%request, "request received from peer");

        if self.options.validate_requests && request != RequestCode::Forward {
            warn!(%request, "dropping request that is not a forward");
            self.stats.dropped += 1;
            return Ok(RelayOutcome::Dropped { request });
        }

        // Forwarding
        self.serial.write_byte(byte).await?;

        // WaitResponse
        let response = self.serial.read_message().await?;
        debug!(len = response.len(), "response received from firmware");

        // Done
        self.network.write_all(&response).await?;
        self.stats.relayed += 1;

        Ok(RelayOutcome::Relayed {
            request,
            response_len: response.len(),
        })
    }

    /// Relays round trips until a transport error or shutdown.
    ///
    /// # Errors
    ///
    /// Returns the [`TransportError`] that ended the loop.  A shutdown returns
    /// `Ok` with the final totals.
    pub async fn run(mut self, mut shutdown: ShutdownListener) -> Result<RelayStats, TransportError> {
        info!(
            peer = self.network.describe(),
            firmware = self.serial.describe(),
            "relay engine started"
        );
        loop {
            tokio::select! {
                _ = shutdown.wait() => {
                    info!(relayed = self.stats.relayed, dropped = self.stats.dropped, "relay engine stopping");
                    return Ok(self.stats);
                }
                outcome = self.relay_once() => {
                    if let Err(e) = outcome {
                        warn!(
                            relayed = self.stats.relayed,
                            dropped = self.stats.dropped,
                            "relay engine terminated: {e}"
                        );
                        return Err(e);
                    }
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
