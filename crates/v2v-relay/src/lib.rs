//! v2v-relay library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the Relay Node do? (for beginners)
//!
//! The Relay Node sits next to the *remote* firmware.  It listens for the
//! Controller Node on TCP, and for every request byte that arrives it writes
//! the byte to the firmware's UART, waits for the firmware's reply, and sends
//! that reply back over TCP.  It has no handshake of its own and no state
//! between round trips.

pub mod application;
pub mod infrastructure;
