//! TOML-based configuration for the Relay Node.
//!
//! The file is optional: when it is absent every setting takes its default,
//! which matches the deployed board (listen on every interface, port 12345,
//! firmware on `/dev/serial0` at 9600 baud).
//!
//! ```toml
//! [node]
//! log_level = "info"
//!
//! [network]
//! bind_address = "0.0.0.0"
//! port = 12345
//!
//! [serial]
//! device = "/dev/serial0"
//! baud_rate = 9600
//!
//! [relay]
//! validate_requests = false
//!
//! [vocabulary]
//! forward = "R"
//! ```
//!
//! # Serde default values
//!
//! Every section and field carries a `#[serde(default)]`, so a file only has
//! to mention what it changes.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use v2v_core::protocol::VocabularyError;
use v2v_core::{SerialSettings, WireVocabulary};

use crate::application::relay_requests::RelayOptions;

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

    /// The bind address is not an IP address.
    #[error("invalid bind address {0:?}")]
    InvalidBindAddress(String),

    /// The configured byte vocabulary is ambiguous.
    #[error("invalid vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level Relay Node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RelayConfig {
    #[serde(default)]
    pub node: NodeConfig,
    #[serde(default)]
    pub network: ListenConfig,
    #[serde(default)]
    pub serial: SerialSettings,
    #[serde(default)]
    pub relay: RelayOptions,
    #[serde(default)]
    pub vocabulary: WireVocabulary,
}

/// Process-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeConfig {
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where the Relay Node listens for the Controller Node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListenConfig {
    /// IP address to bind.  `"0.0.0.0"` binds all interfaces.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// TCP port shared with the Controller Node's configuration.
    #[serde(default = "default_port")]
    pub port: u16,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    12345
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl ListenConfig {
    /// Resolves the bind address and port into a socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddress`] if `bind_address` is not a
    /// literal IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(self.bind_address.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl RelayConfig {
    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.network.socket_addr()?;
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
/// errors of [`RelayConfig::validate`].
pub fn parse_config(content: &str) -> Result<RelayConfig, ConfigError> {
    let cfg: RelayConfig = toml::from_str(content)?;
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
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RelayConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_config_default_listens_on_all_interfaces_port_12345() {
        let cfg = RelayConfig::default();
        assert_eq!(
            cfg.network.socket_addr().unwrap(),
            "0.0.0.0:12345".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_relay_config_default_is_pass_through() {
        let cfg = RelayConfig::default();
        assert!(!cfg.relay.validate_requests);
        assert_eq!(cfg.node.log_level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg = parse_config("").expect("empty config is valid");
        assert_eq!(cfg, RelayConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[network]
port = 9000

[serial]
device = "/dev/ttyAMA0"

[relay]
validate_requests = true
"#;

        // Act
        let cfg = parse_config(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.network.port, 9000);
        assert_eq!(cfg.network.bind_address, "0.0.0.0");
        assert_eq!(cfg.serial.device, "/dev/ttyAMA0");
        assert_eq!(cfg.serial.baud_rate, 9600);
        assert!(cfg.relay.validate_requests);
    }

    #[test]
    fn test_invalid_bind_address_is_rejected() {
        let toml_str = r#"
[network]
bind_address = "not.an.ip"
"#;
        let result = parse_config(toml_str);
        assert!(matches!(result, Err(ConfigError::InvalidBindAddress(_))));
    }

    #[test]
    fn test_ambiguous_vocabulary_is_rejected() {
        let toml_str = r#"
[vocabulary]
forward = "C"
"#;
        let result = parse_config(toml_str);
        assert!(matches!(result, Err(ConfigError::Vocabulary(_))));
    }

    #[test]
    fn test_malformed_toml_returns_parse_error() {
        let result = parse_config("[[[ not valid toml");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_returns_default_when_file_absent() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/relay.toml");
        let cfg = load_config(&path).expect("missing file means defaults");
        assert_eq!(cfg, RelayConfig::default());
    }

    #[test]
    fn test_load_config_reads_file_from_disk() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("v2v_relay_cfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("relay.toml");
        std::fs::write(&path, "[network]\nport = 4242\n").unwrap();

        // Act
        let cfg = load_config(&path).expect("load");

        // Assert
        assert_eq!(cfg.network.port, 4242);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut cfg = RelayConfig::default();
        cfg.network.port = 7777;
        cfg.relay.validate_requests = true;

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let restored = parse_config(&text).expect("deserialize");

        assert_eq!(restored, cfg);
    }
}
