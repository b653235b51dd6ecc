//! v2v-controller library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the Controller Node do? (for beginners)
//!
//! The Controller Node sits next to the *main* firmware and drives the whole
//! conversation.  Over and over it:
//!
//! 1. Polls the firmware and waits for the poll acknowledgement.
//! 2. Reads a one-byte request code.
//! 3. For a **forward** request, relays one round trip through the Relay
//!    Node over TCP and hands the response back to the firmware.
//! 4. For a **query** request, asks the detection task for a fresh camera
//!    classification and reports it as a single byte.
//!
//! Every step is acknowledged by the firmware; a wrong acknowledgement
//! abandons the cycle and the next one starts from the poll.
//!
//! Two activities run concurrently: the protocol engine and the detection
//! task.  They share exactly one piece of state, the
//! [`application::detection_slot::DetectionSlot`].

pub mod application;
pub mod infrastructure;
