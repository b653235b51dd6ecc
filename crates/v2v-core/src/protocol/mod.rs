//! Wire vocabulary spoken between the nodes and their local firmware.

pub mod codes;
pub mod vocabulary;

pub use codes::{DetectionResult, RequestCode};
pub use vocabulary::{VocabularyError, WireVocabulary};
