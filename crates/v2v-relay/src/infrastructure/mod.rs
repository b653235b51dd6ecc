//! Infrastructure layer for the Relay Node.
//!
//! Contains the OS-facing adapters: the TCP listener that accepts the
//! Controller Node, and TOML configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and `v2v_core`,
//! but MUST NOT be imported by the `application` layer.

pub mod network;
pub mod storage;
