//! [`ByteChannel`] over a UART device.
//!
//! The `serialport` crate exposes a blocking API, so every read and write is
//! handed to tokio's blocking thread pool.  The port is opened with a short
//! read timeout (`poll_timeout_ms`) and reads that time out are simply
//! retried: to the engine a read still blocks until a byte arrives, but the
//! worker thread wakes up regularly and notices when the channel has been
//! dropped, so the process can exit without waiting on a silent device.

use std::io::{ErrorKind, Read, Write};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serialport::SerialPort;
use tracing::{debug, trace};

use super::{ByteChannel, TransportError, DEFAULT_MAX_MESSAGE_LEN};

/// How to open the serial link to the local firmware.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SerialSettings {
    /// Device path, e.g. `/dev/serial0`.
    #[serde(default = "default_device")]
    pub device: String,
    /// Line speed; the firmware UART is configured for 9600 baud.
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// How often a blocked read wakes up to check whether it was abandoned.
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
}

fn default_device() -> String {
    "/dev/serial0".to_string()
}
fn default_baud_rate() -> u32 {
    9600
}
fn default_poll_timeout_ms() -> u64 {
    200
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            device: default_device(),
            baud_rate: default_baud_rate(),
            poll_timeout_ms: default_poll_timeout_ms(),
        }
    }
}

/// A serial device exposed as a [`ByteChannel`].
pub struct SerialChannel {
    name: String,
    port: Arc<Mutex<Box<dyn SerialPort>>>,
    abandoned: Arc<AtomicBool>,
}

impl SerialChannel {
    /// Opens and configures the device described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Serial`] if the device cannot be opened.
    pub fn open(settings: &SerialSettings) -> Result<Self, TransportError> {
        let port = serialport::new(&settings.device, settings.baud_rate)
            .timeout(Duration::from_millis(settings.poll_timeout_ms.max(1)))
            .open()
            .map_err(|source| TransportError::Serial {
                device: settings.device.clone(),
                source,
            })?;
        debug!(
            device = %settings.device,
            baud_rate = settings.baud_rate,
            "serial device opened"
        );
        Ok(Self {
            name: format!("serial:{}", settings.device),
            port: Arc::new(Mutex::new(port)),
            abandoned: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Reads at least one and at most `max` bytes, retrying read timeouts.
    async fn read_up_to(&self, max: usize) -> Result<Vec<u8>, TransportError> {
        let port = Arc::clone(&self.port);
        let abandoned = Arc::clone(&self.abandoned);
        let name = self.name.clone();

        self.run_blocking(move || {
            let mut buf = vec![0u8; max];
            let mut port = port.lock().map_err(|_| TransportError::WorkerPanicked {
                channel: name.clone(),
            })?;
            loop {
                if abandoned.load(Ordering::Relaxed) {
                    return Err(TransportError::Closed { channel: name });
                }
                match port.read(&mut buf) {
                    Ok(0) => return Err(TransportError::Closed { channel: name }),
                    Ok(n) => {
                        buf.truncate(n);
                        return Ok(buf);
                    }
                    Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => {
                        continue
                    }
                    Err(source) => return Err(TransportError::Io { channel: name, source }),
                }
            }
        })
        .await
    }

    async fn run_blocking<T, F>(&self, f: F) -> Result<T, TransportError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, TransportError> + Send + 'static,
    {
        tokio::task::spawn_blocking(f)
            .await
            .map_err(|_| TransportError::WorkerPanicked {
                channel: self.name.clone(),
            })?
    }
}

impl Drop for SerialChannel {
    fn drop(&mut self) {
        // Lets a worker still blocked in `read_up_to` exit on its next timeout.
        self.abandoned.store(true, Ordering::Relaxed);
    }
}

#[async_trait]
impl ByteChannel for SerialChannel {
    async fn read_byte(&mut self) -> Result<u8, TransportError> {
        let bytes = self.read_up_to(1).await?;
        trace!(channel = %self.name, byte = bytes[0], "read byte");
        Ok(bytes[0])
    }

    async fn read_message(&mut self) -> Result<Vec<u8>, TransportError> {
        let bytes = self.read_up_to(DEFAULT_MAX_MESSAGE_LEN).await?;
        trace!(channel = %self.name, len = bytes.len(), "read message");
        Ok(bytes)
    }

    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let port = Arc::clone(&self.port);
        let name = self.name.clone();
        let data = bytes.to_vec();

        self.run_blocking(move || {
            let mut port = port.lock().map_err(|_| TransportError::WorkerPanicked {
                channel: name.clone(),
            })?;
            port.write_all(&data)
                .and_then(|()| port.flush())
                .map_err(|source| TransportError::Io { channel: name, source })
        })
        .await?;
        trace!(channel = %self.name, len = bytes.len(), "wrote bytes");
        Ok(())
    }

    fn describe(&self) -> &str {
        &self.name
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_settings_default_matches_firmware_uart() {
        let settings = SerialSettings::default();
        assert_eq!(settings.device, "/dev/serial0");
        assert_eq!(settings.baud_rate, 9600);
    }

    #[test]
    fn test_serial_settings_partial_toml_keeps_defaults() {
        // Arrange
        let toml_str = r#"device = "/dev/ttyUSB0""#;

        // Act
        let settings: SerialSettings = toml::from_str(toml_str).expect("deserialize");

        // Assert
        assert_eq!(settings.device, "/dev/ttyUSB0");
        assert_eq!(settings.baud_rate, 9600);
        assert_eq!(settings.poll_timeout_ms, 200);
    }

    #[test]
    fn test_open_missing_device_returns_serial_error() {
        // Arrange
        let settings = SerialSettings {
            device: "/nonexistent/v2v-test-device".to_string(),
            ..SerialSettings::default()
        };

        // Act
        let result = SerialChannel::open(&settings);

        // Assert
        match result {
            Err(TransportError::Serial { device, .. }) => {
                assert_eq!(device, "/nonexistent/v2v-test-device")
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("opening a missing device must fail"),
        }
    }
}
