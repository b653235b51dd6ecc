//! # v2v-core
//!
//! Shared library for the V2V link containing the serial wire vocabulary and
//! the byte-channel transports used by both nodes.
//!
//! # Architecture overview (for beginners)
//!
//! The V2V link connects two embedded controllers that cannot talk to each
//! other directly.  Each controller is attached over UART to a small Linux
//! board, and the two boards talk over TCP:
//!
//! ```text
//! main firmware ──UART── Controller Node ──TCP── Relay Node ──UART── remote firmware
//!                              │
//!                        Detection Task (camera + classifier)
//! ```
//!
//! This crate (`v2v-core`) is the shared foundation.  It defines:
//!
//! - **`protocol`** – The one-byte vocabulary spoken with the firmware: poll
//!   and ack bytes, request codes, detection result bytes.  Every byte is a
//!   configurable constant because the values are a private contract with the
//!   firmware build in use.
//!
//! - **`transport`** – The [`ByteChannel`] contract both engines are written
//!   against, plus the TCP/in-memory stream implementation and the serial
//!   port implementation.
//!
//! - **`shutdown`** – The signal every blocking loop races against so the
//!   process can stop cleanly on Ctrl-C.
//!
//! It has no knowledge of either engine's state machine.

pub mod protocol;
pub mod shutdown;
pub mod transport;

pub use protocol::{DetectionResult, RequestCode, WireVocabulary};
pub use shutdown::{Shutdown, ShutdownListener};
pub use transport::{ByteChannel, SerialChannel, SerialSettings, StreamChannel, TransportError};
