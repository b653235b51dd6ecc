//! Application layer use cases for the Relay Node.
//!
//! - **`relay_requests`** – The pass-through engine: network request in,
//!   serial request out, serial response in, network response out.  It
//!   depends only on the [`v2v_core::ByteChannel`] trait, so tests drive it
//!   with scripted streams instead of a socket and a UART.

pub mod relay_requests;
