//! Infrastructure layer for the Controller Node.
//!
//! Contains the OS-facing adapters:
//!
//! - **`network`** – TCP connection to the Relay Node.
//! - **`camera`** – Command-backed `FrameSource` and `ObjectClassifier`
//!   implementations, plus scripted mocks for tests.
//! - **`storage`** – TOML configuration loading.
//!
//! **Dependency rule**: this layer may depend on `application` and `v2v_core`,
//! but MUST NOT be imported by the `application` layer.

pub mod camera;
pub mod network;
pub mod storage;
