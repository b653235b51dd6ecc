//! Scripted detection collaborators for tests and dry runs.
//!
//! Both types replay a fixed script and record what they were asked, so a
//! test can run the real `DetectionTask` without a camera or a detector.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::detect_objects::{DetectionError, Frame, FrameSource, ObjectClassifier};

/// A [`FrameSource`] that returns scripted frames in order.
///
/// Once the script is exhausted every call fails with a capture error.
#[derive(Debug, Default)]
pub struct ScriptedCamera {
    script: Mutex<VecDeque<Result<Frame, DetectionError>>>,
    captures: Mutex<u32>,
}

impl ScriptedCamera {
    /// Creates a camera that returns `frames` one per capture.
    pub fn new(frames: impl IntoIterator<Item = Result<Frame, DetectionError>>) -> Self {
        Self {
            script: Mutex::new(frames.into_iter().collect()),
            captures: Mutex::new(0),
        }
    }

    /// Returns how many captures were requested.
    pub fn captures(&self) -> u32 {
        *self.captures.lock().expect("lock poisoned")
    }
}

#[async_trait]
impl FrameSource for ScriptedCamera {
    async fn capture(&self) -> Result<Frame, DetectionError> {
        *self.captures.lock().expect("lock poisoned") += 1;
        self.script
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(DetectionError::Capture("camera script exhausted".into())))
    }
}

/// An [`ObjectClassifier`] that returns scripted verdicts in order and
/// records every frame it was shown.
#[derive(Debug, Default)]
pub struct ScriptedClassifier {
    verdicts: Mutex<VecDeque<Result<bool, DetectionError>>>,
    seen: Mutex<Vec<Frame>>,
}

impl ScriptedClassifier {
    /// Creates a classifier that answers with `verdicts` one per call.
    pub fn new(verdicts: impl IntoIterator<Item = Result<bool, DetectionError>>) -> Self {
        Self {
            verdicts: Mutex::new(verdicts.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every frame classified so far.
    pub fn seen(&self) -> Vec<Frame> {
        self.seen.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl ObjectClassifier for ScriptedClassifier {
    async fn classify(&self, frame: &Frame) -> Result<bool, DetectionError> {
        self.seen.lock().expect("lock poisoned").push(frame.clone());
        self.verdicts
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(DetectionError::Classify("classifier script exhausted".into())))
    }
}
