//! DetectionTask: runs one capture + classify cycle per trigger.
//!
//! The task owns the two black-box collaborators:
//!
//! - a [`FrameSource`] that produces one still image on demand, and
//! - an [`ObjectClassifier`] that decides whether that image contains the
//!   object of interest.
//!
//! It sleeps on [`DetectionSlot::next_trigger`] until the engine asks for a
//! detection, runs exactly one cycle, and publishes the verdict.
//!
//! # Failure policy
//!
//! A capture or classification failure never stops the task.  It is logged
//! and the cycle is published as `Negative`, so an engine waiting on the
//! result always wakes up.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};
use v2v_core::{DetectionResult, ShutdownListener};

use super::detection_slot::{DetectionCycle, DetectionSlot};

/// Error type for the detection collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// The frame source could not produce an image.
    #[error("frame capture failed: {0}")]
    Capture(String),
    /// The classifier could not reach a verdict.
    #[error("classification failed: {0}")]
    Classify(String),
}

/// One captured still image, in whatever encoding the source produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
}

impl Frame {
    /// Wraps encoded image bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Returns the encoded image bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the encoded size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the frame holds no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Produces one frame per call.
///
/// Infrastructure implementations drive a camera; test implementations return
/// scripted frames.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Captures a single frame.
    async fn capture(&self) -> Result<Frame, DetectionError>;
}

/// Decides whether a frame contains the object of interest.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectClassifier: Send + Sync {
    /// Returns `true` if the object was detected.
    async fn classify(&self, frame: &Frame) -> Result<bool, DetectionError>;
}

/// Running totals, reported when the task stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionStats {
    pub cycles: u64,
    pub positives: u64,
    pub failures: u64,
}

/// The detection activity of the Controller Node.
pub struct DetectionTask<F, C> {
    slot: Arc<DetectionSlot>,
    source: F,
    classifier: C,
    stats: DetectionStats,
}

impl<F, C> DetectionTask<F, C>
where
    F: FrameSource,
    C: ObjectClassifier,
{
    /// Creates a task that services triggers raised on `slot`.
    pub fn new(slot: Arc<DetectionSlot>, source: F, classifier: C) -> Self {
        Self {
            slot,
            source,
            classifier,
            stats: DetectionStats::default(),
        }
    }

    /// Returns the totals accumulated so far.
    pub fn stats(&self) -> DetectionStats {
        self.stats
    }

    /// Captures and classifies one frame without touching the slot.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's [`DetectionError`].
    pub async fn detect(&self) -> Result<DetectionResult, DetectionError> {
        let frame = self.source.capture().await?;
        debug!(bytes = frame.len(), "frame captured");
        let detected = self.classifier.classify(&frame).await?;
        Ok(DetectionResult::from_detected(detected))
    }

    /// Waits for the next trigger, runs one cycle, and publishes its result.
    pub async fn run_once(&mut self) -> (DetectionCycle, DetectionResult) {
        let cycle = self.slot.next_trigger().await;
        let result = match self.detect().await {
            Ok(result) => result,
            Err(e) => {
                warn!(cycle = cycle.number(), "detection failed, reporting negative: {e}");
                self.stats.failures += 1;
                DetectionResult::Negative
            }
        };
        self.slot.publish(cycle, result);

        self.stats.cycles += 1;
        if result == DetectionResult::Positive {
            self.stats.positives += 1;
        }
        debug!(cycle = cycle.number(), ?result, "detection cycle complete");
        (cycle, result)
    }

    /// Services triggers until the shutdown signal.
    pub async fn run(mut self, mut shutdown: ShutdownListener) -> DetectionStats {
        info!("detection task started");
        loop {
            tokio::select! {
                _ = shutdown.wait() => {
                    info!(
                        cycles = self.stats.cycles,
                        positives = self.stats.positives,
                        failures = self.stats.failures,
                        "detection task stopping"
                    );
                    return self.stats;
                }
                _ = self.run_once() => {}
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
