//! Typed views of the request and detection bytes.

use std::fmt;

use super::vocabulary::WireVocabulary;

/// A request code read from the firmware after a successful poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestCode {
    /// Relay a payload round-trip through the Relay Node.
    Forward,
    /// Report the latest cached detection result.
    Query,
    /// Any byte outside the known set; carries the raw value for logging.
    Unknown(u8),
}

impl RequestCode {
    /// Decodes a raw byte against the configured vocabulary.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use v2v_core::{RequestCode, WireVocabulary};
    ///
    /// let vocab = WireVocabulary::default();
    /// assert_eq!(RequestCode::decode(b'R', &vocab), RequestCode::Forward);
    /// assert_eq!(RequestCode::decode(b'x', &vocab), RequestCode::Unknown(b'x'));
    /// ```
    pub fn decode(byte: u8, vocab: &WireVocabulary) -> Self {
        if byte == vocab.forward {
            RequestCode::Forward
        } else if byte == vocab.query {
            RequestCode::Query
        } else {
            RequestCode::Unknown(byte)
        }
    }

    /// Returns the byte this code is sent as.
    pub fn to_byte(self, vocab: &WireVocabulary) -> u8 {
        match self {
            RequestCode::Forward => vocab.forward,
            RequestCode::Query => vocab.query,
            RequestCode::Unknown(b) => b,
        }
    }
}

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestCode::Forward => f.write_str("forward"),
            RequestCode::Query => f.write_str("query"),
            RequestCode::Unknown(b) => write!(f, "unknown(0x{b:02X})"),
        }
    }
}

/// Outcome of the most recently completed detection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionResult {
    /// An object was detected in the captured frame.
    Positive,
    /// Nothing was detected, or no detection has completed yet.
    #[default]
    Negative,
}

impl DetectionResult {
    /// Maps a classifier verdict onto a result.
    pub fn from_detected(detected: bool) -> Self {
        if detected {
            DetectionResult::Positive
        } else {
            DetectionResult::Negative
        }
    }

    /// Returns the byte reported to the firmware for this result.
    pub fn to_byte(self, vocab: &WireVocabulary) -> u8 {
        match self {
            DetectionResult::Positive => vocab.positive,
            DetectionResult::Negative => vocab.negative,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
