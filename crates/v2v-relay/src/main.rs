//! V2V Relay Node entry point.
//!
//! Loads configuration, opens the firmware UART, waits for the Controller
//! Node to connect, then runs the pass-through engine until the peer goes
//! away or Ctrl-C is pressed.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()            -- TOML file + CLI overrides
//!  └─ SerialChannel::open()    -- remote firmware UART
//!  └─ accept_peer()            -- the single Controller Node
//!  └─ RelayEngine::run()       -- until transport error or shutdown
//! ```
//!
//! # Usage
//!
//! ```text
//! v2v-relay [OPTIONS]
//!
//! Options:
//!   --config <PATH>       TOML configuration file [default: /etc/v2v/relay.toml]
//!   --bind <IP>           Override the listen address
//!   --port <PORT>         Override the listen port
//!   --device <PATH>       Override the serial device
//!   --baud-rate <BAUD>    Override the serial line speed
//!   --validate-requests   Drop request bytes other than the forward code
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use v2v_core::{SerialChannel, Shutdown};
use v2v_relay::application::relay_requests::RelayEngine;
use v2v_relay::infrastructure::network::accept_peer;
use v2v_relay::infrastructure::storage::config::{load_config, ConfigError, RelayConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// V2V Relay Node.
///
/// Bridges the Controller Node's TCP link to the remote firmware's UART.
#[derive(Debug, Parser)]
#[command(name = "v2v-relay", about = "V2V Relay Node", version)]
struct Cli {
    /// TOML configuration file.  A missing file means all defaults.
    #[arg(long, default_value = "/etc/v2v/relay.toml", env = "V2V_RELAY_CONFIG")]
    config: PathBuf,

    /// IP address to listen on.
    #[arg(long, env = "V2V_RELAY_BIND")]
    bind: Option<String>,

    /// TCP port to listen on.
    #[arg(long, env = "V2V_RELAY_PORT")]
    port: Option<u16>,

    /// Serial device attached to the remote firmware.
    #[arg(long, env = "V2V_SERIAL_DEVICE")]
    device: Option<String>,

    /// Serial line speed.
    #[arg(long, env = "V2V_SERIAL_BAUD")]
    baud_rate: Option<u32>,

    /// Drop request bytes other than the forward code instead of passing them through.
    #[arg(long)]
    validate_requests: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded file configuration.
    fn apply(self, mut cfg: RelayConfig) -> Result<RelayConfig, ConfigError> {
        if let Some(bind) = self.bind {
            cfg.network.bind_address = bind;
        }
        if let Some(port) = self.port {
            cfg.network.port = port;
        }
        if let Some(device) = self.device {
            cfg.serial.device = device;
        }
        if let Some(baud_rate) = self.baud_rate {
            cfg.serial.baud_rate = baud_rate;
        }
        if self.validate_requests {
            cfg.relay.validate_requests = true;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file_cfg = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let cfg = cli.apply(file_cfg).context("invalid configuration")?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cfg.node.log_level)),
        )
        .init();

    info!("V2V Relay Node starting");

    // ── Shutdown signal ───────────────────────────────────────────────────────
    let shutdown = Shutdown::new();
    let mut listener = shutdown.listener();
    tokio::spawn(shutdown.trigger_on(tokio::signal::ctrl_c()));

    // ── Links ─────────────────────────────────────────────────────────────────
    let serial = SerialChannel::open(&cfg.serial).context("failed to open firmware UART")?;
    let bind_addr = cfg.network.socket_addr()?;

    let peer = tokio::select! {
        _ = listener.wait() => {
            info!("V2V Relay Node stopped before a peer connected");
            return Ok(());
        }
        accepted = accept_peer(bind_addr) => accepted?,
    };
    let (network, _peer_addr) = peer;

    // ── Engine ────────────────────────────────────────────────────────────────
    let engine = RelayEngine::new(network, serial, cfg.vocabulary, cfg.relay.clone());
    let stats = engine.run(listener).await.context("relay link failed")?;

    info!(relayed = stats.relayed, dropped = stats.dropped, "V2V Relay Node stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
