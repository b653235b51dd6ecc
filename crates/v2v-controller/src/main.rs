//! V2V Controller Node entry point.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()              -- TOML file + CLI overrides
//!  └─ sleep(startup_delay)       -- let camera and firmware settle
//!  └─ SerialChannel::open()      -- main firmware UART
//!  └─ connect_to_relay()         -- the Relay Node
//!  └─ spawn DetectionTask::run() -- camera + classifier
//!  └─ ControllerEngine::run()    -- until transport error or shutdown
//! ```
//!
//! # Usage
//!
//! ```text
//! v2v-controller [OPTIONS]
//!
//! Options:
//!   --config <PATH>          TOML configuration file [default: /etc/v2v/controller.toml]
//!   --relay-host <HOST>      Override the Relay Node address
//!   --relay-port <PORT>      Override the Relay Node port
//!   --device <PATH>          Override the serial device
//!   --baud-rate <BAUD>       Override the serial line speed
//!   --query-policy <POLICY>  await-fresh | cached
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use v2v_controller::application::detect_objects::DetectionTask;
use v2v_controller::application::detection_slot::DetectionSlot;
use v2v_controller::application::serve_requests::{ControllerEngine, QueryPolicy};
use v2v_controller::infrastructure::camera::{CommandClassifier, CommandFrameSource};
use v2v_controller::infrastructure::network::connect_to_relay;
use v2v_controller::infrastructure::storage::config::{
    load_config, ConfigError, ControllerConfig,
};
use v2v_core::{SerialChannel, Shutdown};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Command-line spelling of [`QueryPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    AwaitFresh,
    Cached,
}

impl From<PolicyArg> for QueryPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::AwaitFresh => QueryPolicy::AwaitFresh,
            PolicyArg::Cached => QueryPolicy::Cached,
        }
    }
}

/// V2V Controller Node.
///
/// Drives the main firmware handshake, relays forward requests to the Relay
/// Node, and answers detection queries from the camera.
#[derive(Debug, Parser)]
#[command(name = "v2v-controller", about = "V2V Controller Node", version)]
struct Cli {
    /// TOML configuration file.  A missing file means all defaults.
    #[arg(long, default_value = "/etc/v2v/controller.toml", env = "V2V_CONTROLLER_CONFIG")]
    config: PathBuf,

    /// Relay Node host name or IP address.
    #[arg(long, env = "V2V_RELAY_HOST")]
    relay_host: Option<String>,

    /// Relay Node TCP port.
    #[arg(long, env = "V2V_RELAY_PORT")]
    relay_port: Option<u16>,

    /// Serial device attached to the main firmware.
    #[arg(long, env = "V2V_SERIAL_DEVICE")]
    device: Option<String>,

    /// Serial line speed.
    #[arg(long, env = "V2V_SERIAL_BAUD")]
    baud_rate: Option<u32>,

    /// Which detection result a query reports.
    #[arg(long, value_enum)]
    query_policy: Option<PolicyArg>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded file configuration.
    fn apply(self, mut cfg: ControllerConfig) -> Result<ControllerConfig, ConfigError> {
        if let Some(host) = self.relay_host {
            cfg.network.relay_host = host;
        }
        if let Some(port) = self.relay_port {
            cfg.network.relay_port = port;
        }
        if let Some(device) = self.device {
            cfg.serial.device = device;
        }
        if let Some(baud_rate) = self.baud_rate {
            cfg.serial.baud_rate = baud_rate;
        }
        if let Some(policy) = self.query_policy {
            cfg.engine.query_policy = policy.into();
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

    info!("V2V Controller Node starting");

    // ── Shutdown signal ───────────────────────────────────────────────────────
    let shutdown = Shutdown::new();
    let mut listener = shutdown.listener();
    let detection_listener = shutdown.listener();
    let engine_listener = shutdown.listener();
    tokio::spawn(shutdown.trigger_on(tokio::signal::ctrl_c()));

    // ── Settle ────────────────────────────────────────────────────────────────
    tokio::select! {
        _ = listener.wait() => {
            info!("V2V Controller Node stopped during startup delay");
            return Ok(());
        }
        _ = tokio::time::sleep(cfg.node.startup_delay()) => {}
    }

    // ── Links ─────────────────────────────────────────────────────────────────
    let serial = SerialChannel::open(&cfg.serial).context("failed to open firmware UART")?;
    let network = tokio::select! {
        _ = listener.wait() => {
            info!("V2V Controller Node stopped before connecting");
            return Ok(());
        }
        connected = connect_to_relay(&cfg.network.relay_host, cfg.network.relay_port) => connected?,
    };

    // ── Detection task ────────────────────────────────────────────────────────
    let slot = Arc::new(DetectionSlot::new());
    let task = DetectionTask::new(
        Arc::clone(&slot),
        CommandFrameSource::new(cfg.detection.capture.clone()),
        CommandClassifier::new(cfg.detection.classifier.clone()),
    );
    let detection = tokio::spawn(task.run(detection_listener));

    // ── Engine ────────────────────────────────────────────────────────────────
    let engine = ControllerEngine::new(serial, network, slot, cfg.vocabulary, cfg.engine.clone());
    let result = engine.run(engine_listener).await;

    // The engine only returns early on a transport error; stop the detector too.
    detection.abort();
    match detection.await {
        Ok(stats) => info!(cycles = stats.cycles, positives = stats.positives, "detection task stopped"),
        Err(e) if e.is_cancelled() => {}
        Err(e) => error!("detection task failed: {e}"),
    }

    let stats = result.context("controller link failed")?;
    info!(
        cycles = stats.cycles,
        forwards = stats.forwards,
        queries = stats.queries,
        mismatches = stats.mismatches,
        rejected = stats.rejected,
        "V2V Controller Node stopped"
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_leave_file_config_untouched() {
        // Arrange
        let cli = Cli::parse_from(["v2v-controller"]);

        // Act
        let cfg = cli.apply(ControllerConfig::default()).unwrap();

        // Assert
        assert_eq!(cfg, ControllerConfig::default());
    }

    #[test]
    fn test_cli_default_config_path() {
        let cli = Cli::parse_from(["v2v-controller"]);
        assert_eq!(cli.config, PathBuf::from("/etc/v2v/controller.toml"));
    }

    #[test]
    fn test_cli_overrides_link_settings_and_policy() {
        let cli = Cli::parse_from([
            "v2v-controller",
            "--relay-host",
            "10.1.1.1",
            "--relay-port",
            "4000",
            "--device",
            "/dev/ttyAMA0",
            "--baud-rate",
            "19200",
            "--query-policy",
            "cached",
        ]);

        let cfg = cli.apply(ControllerConfig::default()).unwrap();

        assert_eq!(cfg.network.relay_host, "10.1.1.1");
        assert_eq!(cfg.network.relay_port, 4000);
        assert_eq!(cfg.serial.device, "/dev/ttyAMA0");
        assert_eq!(cfg.serial.baud_rate, 19200);
        assert_eq!(cfg.engine.query_policy, QueryPolicy::Cached);
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        let result = Cli::try_parse_from(["v2v-controller", "--query-policy", "never"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_empty_host_is_invalid() {
        let cli = Cli::parse_from(["v2v-controller", "--relay-host", ""]);
        assert!(cli.apply(ControllerConfig::default()).is_err());
    }
}
