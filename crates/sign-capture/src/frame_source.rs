//! Detector stream ingestion.
//!
//! The landmark detector is an external process; it writes one JSON
//! object per line on our stdin, at camera cadence (~30 Hz). Besides
//! per-frame observations the stream carries the manual controls a
//! capture UI exposes (label changes, force start/stop).

use crate::{AppResult, CaptureCommand};

use serde::Deserialize;
use sign_capture_core::{FrameFeatures, FrameObservation};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{mpsc, watch},
};
use tracing::{info, instrument, warn};

/// One NDJSON line on the detector stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub(crate) enum ControlMessage {
    /// Per-tick observation from the landmark detector.
    #[serde(rename_all = "camelCase")]
    Frame {
        /// Whether a hand was detected this frame.
        #[serde(default)]
        hand_detected: bool,
        /// Landmark payload; may be empty.
        #[serde(default)]
        features: FrameFeatures,
    },
    /// Set the label attached to subsequent samples.
    SetLabel {
        /// New label; may be empty.
        label: String,
    },
    /// Toggle automatic start/stop driven by hand presence.
    SetAutoFlow {
        /// New auto-flow value.
        value: bool,
    },
    /// Begin the countdown regardless of hand presence.
    ForceStart,
    /// Run the stop sequence immediately.
    ForceStop,
}

impl From<ControlMessage> for CaptureCommand {
    fn from(message: ControlMessage) -> Self {
        match message {
            ControlMessage::Frame {
                hand_detected,
                features,
            } => CaptureCommand::Frame(FrameObservation::new(hand_detected, features)),
            ControlMessage::SetLabel { label } => CaptureCommand::SetLabel(label),
            ControlMessage::SetAutoFlow { value } => CaptureCommand::SetAutoFlow(value),
            ControlMessage::ForceStart => CaptureCommand::ForceStart,
            ControlMessage::ForceStop => CaptureCommand::ForceStop,
        }
    }
}

/// Reads the detector stream from stdin and forwards it to the capture
/// event loop.
pub struct FrameSource {
    command_tx: mpsc::Sender<CaptureCommand>,
}

impl FrameSource {
    /// Create a source forwarding into the given command queue.
    pub fn new(command_tx: mpsc::Sender<CaptureCommand>) -> Self {
        Self { command_tx }
    }

    /// Run until stdin closes or a shutdown signal is received.
    ///
    /// Malformed lines are logged and skipped; a glitching detector
    /// must not take the capture loop down. End of stream means the
    /// detector process exited, so an orderly shutdown is requested.
    ///
    /// # Errors
    ///
    /// Returns an error only when reading stdin itself fails.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Frame source shutting down");
                    break;
                }
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        if !self.forward(&line).await {
                            break;
                        }
                    }
                    None => {
                        info!("Detector stream ended, requesting shutdown");
                        let _ = self.command_tx.send(CaptureCommand::Shutdown).await;
                        break;
                    }
                },
            }
        }

        Ok(())
    }

    /// Parse and forward one line; returns false when the event loop is
    /// gone and reading should stop.
    async fn forward(&self, line: &str) -> bool {
        match serde_json::from_str::<ControlMessage>(line) {
            Ok(message) => self.command_tx.send(message.into()).await.is_ok(),
            Err(e) => {
                warn!(error = %e, "Skipping malformed detector line");
                true
            }
        }
    }
}
