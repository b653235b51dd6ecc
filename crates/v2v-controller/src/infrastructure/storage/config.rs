//! TOML-based configuration for the Controller Node.
//!
//! The file is optional.  Defaults describe the deployed vehicle: the Relay
//! Node at `192.168.137.177:12345`, firmware on `/dev/serial0` at 9600 baud,
//! a one second settle delay, and 320x240 captures.
//!
//! ```toml
//! [node]
//! log_level = "info"
//! startup_delay_ms = 1000
//!
//! [network]
//! relay_host = "192.168.137.177"
//! relay_port = 12345
//!
//! [serial]
//! device = "/dev/serial0"
//! baud_rate = 9600
//!
//! [engine]
//! query_policy = "await_fresh"   # or "cached"
//! mismatch_alert_threshold = 100
//!
//! [detection.capture]
//! program = "libcamera-still"
//! args = ["--nopreview", "--width", "320", "--height", "240", "-o", "{image}"]
//! image_path = "/tmp/v2v-frame.jpg"
//!
//! [detection.classifier]
//! program = "v2v-detect"
//! args = ["--cascade", "cars.xml"]
//!
//! [vocabulary]
//! poll = "D"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use v2v_core::protocol::VocabularyError;
use v2v_core::{SerialSettings, WireVocabulary};

use crate::application::serve_requests::EngineOptions;
use crate::infrastructure::camera::{CaptureSettings, ClassifierSettings};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required setting is empty.
    #[error("{0} must not be empty")]
    Missing(&'static str),

    /// The configured byte vocabulary is ambiguous.
    #[error("invalid vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level Controller Node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ControllerConfig {
    #[serde(default)]
    pub node: NodeConfig,
    #[serde(default)]
    pub network: RelayLinkConfig,
    #[serde(default)]
    pub serial: SerialSettings,
    #[serde(default)]
    pub engine: EngineOptions,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub vocabulary: WireVocabulary,
}

/// Process-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeConfig {
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Pause before any link is opened, letting the camera and firmware settle.
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,
}

/// Where the Relay Node listens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayLinkConfig {
    #[serde(default = "default_relay_host")]
    pub relay_host: String,
    #[serde(default = "default_relay_port")]
    pub relay_port: u16,
}

/// The two detection collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DetectionConfig {
    #[serde(default)]
    pub capture: CaptureSettings,
    #[serde(default)]
    pub classifier: ClassifierSettings,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_startup_delay_ms() -> u64 {
    1000
}
fn default_relay_host() -> String {
    "192.168.137.177".to_string()
}
fn default_relay_port() -> u16 {
    12345
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            startup_delay_ms: default_startup_delay_ms(),
        }
    }
}

impl Default for RelayLinkConfig {
    fn default() -> Self {
        Self {
            relay_host: default_relay_host(),
            relay_port: default_relay_port(),
        }
    }
}

impl NodeConfig {
    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }
}

impl ControllerConfig {
    /// Checks constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.relay_host.trim().is_empty() {
            return Err(ConfigError::Missing("network.relay_host"));
        }
        if self.serial.device.trim().is_empty() {
            return Err(ConfigError::Missing("serial.device"));
        }
        if self.detection.capture.program.trim().is_empty() {
            return Err(ConfigError::Missing("detection.capture.program"));
        }
        if self.detection.classifier.program.trim().is_empty() {
            return Err(ConfigError::Missing("detection.classifier.program"));
        }
        self.vocabulary.validate()?;
        Ok(())
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parses configuration from TOML text and validates it.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed TOML and the validation
/// errors of [`ControllerConfig::validate`].
pub fn parse_config(content: &str) -> Result<ControllerConfig, ConfigError> {
    let cfg: ControllerConfig = toml::from_str(content)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Loads configuration from `path`, returning defaults if the file does not
/// exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// plus everything [`parse_config`] can return.
pub fn load_config(path: &Path) -> Result<ControllerConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ControllerConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
