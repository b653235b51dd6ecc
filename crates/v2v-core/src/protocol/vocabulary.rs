//! The configurable byte vocabulary of the firmware handshake.
//!
//! # What is the vocabulary? (for beginners)
//!
//! The serial protocol between a node and its firmware has no framing and no
//! message types: every step is a single ASCII byte whose meaning depends on
//! where in the handshake it appears.  A full Forward cycle on the Controller
//! Node looks like this with the default vocabulary:
//!
//! ```text
//! Node                     Firmware
//! ────                     ────────
//! 'D'  (poll)        ──►
//!                    ◄──   'A'  (poll ack)
//!                    ◄──   'R'  (forward request)
//! 'S'  (step ack)    ──►
//!                    ◄──   'S'  (step confirm)
//! <payload>          ──►
//!                    ◄──   'K'  (forward done)
//! ```
//!
//! The values are a private contract with a particular firmware build, so they
//! live in [`WireVocabulary`] rather than as literals in the engines.
//!
//! # TOML representation
//!
//! Each byte is written as a one-character ASCII string:
//!
//! ```toml
//! [vocabulary]
//! poll = "D"
//! poll_ack = "A"
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned by [`WireVocabulary::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabularyError {
    /// The forward and query request codes would be indistinguishable.
    #[error("forward and query request codes are both 0x{0:02X}")]
    AmbiguousRequestCodes(u8),

    /// The positive and negative detection bytes would be indistinguishable.
    #[error("positive and negative detection bytes are both 0x{0:02X}")]
    AmbiguousDetectionBytes(u8),
}

/// Every byte exchanged with the firmware, by protocol position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireVocabulary {
    /// Sent by the Controller Node to ask the firmware for a pending request.
    #[serde(default = "default_poll", with = "ascii_byte")]
    pub poll: u8,
    /// Expected reply to [`poll`](Self::poll).
    #[serde(default = "default_poll_ack", with = "ascii_byte")]
    pub poll_ack: u8,
    /// Request code: relay a payload round-trip through the Relay Node.
    #[serde(default = "default_forward", with = "ascii_byte")]
    pub forward: u8,
    /// Request code: report the latest detection result.
    #[serde(default = "default_query", with = "ascii_byte")]
    pub query: u8,
    /// Sent after a recognised request code.
    #[serde(default = "default_step_ack", with = "ascii_byte")]
    pub step_ack: u8,
    /// Expected reply to [`step_ack`](Self::step_ack).
    #[serde(default = "default_step_confirm", with = "ascii_byte")]
    pub step_confirm: u8,
    /// Expected after the forwarded response payload was delivered.
    #[serde(default = "default_forward_done", with = "ascii_byte")]
    pub forward_done: u8,
    /// Expected after the detection result byte was delivered.
    #[serde(default = "default_query_done", with = "ascii_byte")]
    pub query_done: u8,
    /// Sent when the request code is not recognised.
    #[serde(default = "default_negative_ack", with = "ascii_byte")]
    pub negative_ack: u8,
    /// Reported when the last detection cycle found an object.
    #[serde(default = "default_positive", with = "ascii_byte")]
    pub positive: u8,
    /// Reported when nothing was detected, and before any detection ran.
    #[serde(default = "default_negative", with = "ascii_byte")]
    pub negative: u8,
}

fn default_poll() -> u8 {
    b'D'
}
fn default_poll_ack() -> u8 {
    b'A'
}
fn default_forward() -> u8 {
    b'R'
}
fn default_query() -> u8 {
    b'C'
}
fn default_step_ack() -> u8 {
    b'S'
}
fn default_step_confirm() -> u8 {
    b'S'
}
fn default_forward_done() -> u8 {
    b'K'
}
fn default_query_done() -> u8 {
    b'F'
}
fn default_negative_ack() -> u8 {
    b'N'
}
fn default_positive() -> u8 {
    b'V'
}
fn default_negative() -> u8 {
    b'O'
}

impl Default for WireVocabulary {
    fn default() -> Self {
        Self {
            poll: default_poll(),
            poll_ack: default_poll_ack(),
            forward: default_forward(),
            query: default_query(),
            step_ack: default_step_ack(),
            step_confirm: default_step_confirm(),
            forward_done: default_forward_done(),
            query_done: default_query_done(),
            negative_ack: default_negative_ack(),
            positive: default_positive(),
            negative: default_negative(),
        }
    }
}

impl WireVocabulary {
    /// Checks that bytes which must be told apart on the wire are distinct.
    ///
    /// # Errors
    ///
    /// Returns [`VocabularyError`] naming the first ambiguous pair.
    pub fn validate(&self) -> Result<(), VocabularyError> {
        if self.forward == self.query {
            return Err(VocabularyError::AmbiguousRequestCodes(self.forward));
        }
        if self.positive == self.negative {
            return Err(VocabularyError::AmbiguousDetectionBytes(self.positive));
        }
        Ok(())
    }
}

/// Serde adapter storing a `u8` as a one-character ASCII string.
mod ascii_byte {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(byte: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        serializer.serialize_str(char::from(*byte).encode_utf8(&mut buf))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(D::Error::custom(format!(
                "expected a single ASCII character, got {s:?}"
            ))),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
