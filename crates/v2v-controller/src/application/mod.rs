//! Application layer use cases for the Controller Node.
//!
//! # Sub-modules
//!
//! - **`serve_requests`** – The ack-gated protocol engine.  It polls the
//!   firmware, dispatches forward and query requests, and restarts the cycle
//!   on any acknowledgement mismatch.
//!
//! - **`detection_slot`** – The synchronized rendezvous between the engine
//!   and the detection task: the pending trigger and the latest result.
//!
//! - **`detect_objects`** – The detection task and the two black-box
//!   collaborator traits it drives, `FrameSource` and `ObjectClassifier`.
//!
//! Nothing in this layer opens a socket, a serial port, or a camera; those are
//! injected from `infrastructure`.

pub mod detect_objects;
pub mod detection_slot;
pub mod serve_requests;
