//! Command-backed detection collaborators.
//!
//! The camera and the classifier are black boxes to the rest of the node.
//! Here both are external programs, so any camera tool or detector can be
//! plugged in through configuration:
//!
//! - [`CommandFrameSource`] runs a capture command that writes a still image
//!   to `image_path`, then reads that file back as a [`Frame`].
//! - [`CommandClassifier`] runs a classifier command with the frame on its
//!   stdin and interprets the exit status: `0` means detected, `1` means not
//!   detected, anything else is an error.
//!
//! Arguments may contain the placeholder `{image}`, which is replaced by the
//! configured image path.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, trace};

use crate::application::detect_objects::{DetectionError, Frame, FrameSource, ObjectClassifier};

pub mod mock;

/// Placeholder substituted with the image path in command arguments.
pub const IMAGE_PLACEHOLDER: &str = "{image}";

// ── Settings ──────────────────────────────────────────────────────────────────

/// How to capture one frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptureSettings {
    #[serde(default = "default_capture_program")]
    pub program: String,
    #[serde(default = "default_capture_args")]
    pub args: Vec<String>,
    /// File the capture command writes and the node reads back.
    #[serde(default = "default_image_path")]
    pub image_path: PathBuf,
}

/// How to classify one frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifierSettings {
    #[serde(default = "default_classifier_program")]
    pub program: String,
    #[serde(default = "default_classifier_args")]
    pub args: Vec<String>,
}

fn default_capture_program() -> String {
    "libcamera-still".to_string()
}
fn default_capture_args() -> Vec<String> {
    ["--nopreview", "--width", "320", "--height", "240", "-o", IMAGE_PLACEHOLDER]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_image_path() -> PathBuf {
    PathBuf::from("/tmp/v2v-frame.jpg")
}
fn default_classifier_program() -> String {
    "v2v-detect".to_string()
}
fn default_classifier_args() -> Vec<String> {
    vec!["--cascade".to_string(), "cars.xml".to_string()]
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            program: default_capture_program(),
            args: default_capture_args(),
            image_path: default_image_path(),
        }
    }
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            program: default_classifier_program(),
            args: default_classifier_args(),
        }
    }
}

fn expand_args(args: &[String], image_path: &std::path::Path) -> Vec<String> {
    let image = image_path.display().to_string();
    args.iter()
        .map(|arg| arg.replace(IMAGE_PLACEHOLDER, &image))
        .collect()
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

// ── Frame source ──────────────────────────────────────────────────────────────

/// A [`FrameSource`] that shells out to a capture program.
#[derive(Debug, Clone)]
pub struct CommandFrameSource {
    settings: CaptureSettings,
}

impl CommandFrameSource {
    pub fn new(settings: CaptureSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl FrameSource for CommandFrameSource {
    async fn capture(&self) -> Result<Frame, DetectionError> {
        // A command that exits 0 without writing must not leave last cycle's
        // frame behind to be classified again.
        match tokio::fs::remove_file(&self.settings.image_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(DetectionError::Capture(format!(
                    "cannot remove stale {}: {e}",
                    self.settings.image_path.display()
                )))
            }
        }

        let args = expand_args(&self.settings.args, &self.settings.image_path);
        trace!(program = %self.settings.program, ?args, "running capture command");

        let status = Command::new(&self.settings.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                DetectionError::Capture(format!("cannot run {}: {e}", self.settings.program))
            })?;
        if !status.success() {
            return Err(DetectionError::Capture(format!(
                "{} failed with {}",
                self.settings.program,
                describe_status(status)
            )));
        }

        let data = tokio::fs::read(&self.settings.image_path).await.map_err(|e| {
            DetectionError::Capture(format!(
                "cannot read {}: {e}",
                self.settings.image_path.display()
            ))
        })?;
        if data.is_empty() {
            return Err(DetectionError::Capture(format!(
                "{} is empty",
                self.settings.image_path.display()
            )));
        }
        Ok(Frame::new(data))
    }
}

// ── Classifier ────────────────────────────────────────────────────────────────

/// An [`ObjectClassifier`] that pipes the frame into a classifier program.
#[derive(Debug, Clone)]
pub struct CommandClassifier {
    settings: ClassifierSettings,
}

impl CommandClassifier {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ObjectClassifier for CommandClassifier {
    async fn classify(&self, frame: &Frame) -> Result<bool, DetectionError> {
        let mut child = Command::new(&self.settings.program)
            .args(&self.settings.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DetectionError::Classify(format!("cannot run {}: {e}", self.settings.program))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(frame.as_bytes()).await {
                Ok(()) => {}
                // The classifier may decide without reading the whole frame.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    debug!("classifier closed stdin early");
                }
                Err(e) => {
                    return Err(DetectionError::Classify(format!(
                        "cannot write frame to {}: {e}",
                        self.settings.program
                    )))
                }
            }
        }

        let status = child.wait().await.map_err(|e| {
            DetectionError::Classify(format!("waiting for {}: {e}", self.settings.program))
        })?;
        match status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(DetectionError::Classify(format!(
                "{} failed with {}",
                self.settings.program,
                describe_status(status)
            ))),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
