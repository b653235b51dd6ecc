//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module reads the Relay Node's TOML file and falls back to
//! defaults when no file exists, so a bare `v2v-relay` invocation works on the
//! deployed board.

pub mod config;
