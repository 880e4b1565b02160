//! Capture event loop.
//!
//! Owns the [`GestureCaptureController`] and serializes everything that
//! touches it: detector frames, manual controls, and the one-second
//! countdown timer all arrive through a single `select!` loop, so the
//! controller never needs interior locking.

use crate::CaptureCommand;

use std::time::Duration;

use sign_capture_core::{
    CaptureSnapshot, CountdownOutcome, FrameOutcome, GestureCaptureController, RecordState,
    StopOutcome,
};
use tokio::{
    sync::{mpsc, watch},
    time,
};
use tracing::{debug, error, info, instrument, warn};

/// Cadence of the preparing countdown.
const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Drives the capture controller from the command queue.
pub struct App {
    controller: GestureCaptureController,
    command_rx: mpsc::Receiver<CaptureCommand>,
    snapshot_tx: watch::Sender<CaptureSnapshot>,
    shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Assemble the event loop around an already-configured controller.
    pub fn new(
        controller: GestureCaptureController,
        command_rx: mpsc::Receiver<CaptureCommand>,
        snapshot_tx: watch::Sender<CaptureSnapshot>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Self {
        Self {
            controller,
            command_rx,
            snapshot_tx,
            shutdown_tx,
        }
    }

    /// Run until a shutdown command arrives or the command queue closes.
    ///
    /// The countdown interval only fires while the controller is in
    /// [`RecordState::Preparing`]; it is reset whenever a command moves
    /// the controller into that state, so the first tick lands a full
    /// second after the countdown begins.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        let mut ticker = time::interval(COUNTDOWN_TICK);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        info!(state = ?self.controller.state(), "Capture loop started");

        loop {
            let preparing = self.controller.state() == RecordState::Preparing;

            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => {
                        if !self.handle_command(command).await {
                            break;
                        }
                        if !preparing && self.controller.state() == RecordState::Preparing {
                            ticker.reset();
                        }
                    }
                    None => {
                        debug!("Command queue closed");
                        break;
                    }
                },
                _ = ticker.tick(), if preparing => {
                    match self.controller.on_countdown_tick() {
                        CountdownOutcome::Ticking { remaining } => {
                            info!(remaining, "Countdown tick");
                        }
                        CountdownOutcome::RecordingStarted => {
                            info!("Recording started");
                        }
                        CountdownOutcome::Inactive => {}
                    }
                }
            }

            self.publish_snapshot();
        }

        self.flush().await;
        self.publish_snapshot();

        let _ = self.shutdown_tx.send(true);

        info!("Capture loop stopped");
    }

    /// Apply one command; returns false when the loop should exit.
    async fn handle_command(&mut self, command: CaptureCommand) -> bool {
        match command {
            CaptureCommand::Frame(observation) => match self.controller.on_frame(observation).await
            {
                Ok(outcome) => self.log_frame_outcome(&outcome),
                Err(e) => error!(error = %e, "Gesture delivery failed"),
            },
            CaptureCommand::ForceStart => {
                if self.controller.force_start() {
                    info!("Capture started manually");
                } else {
                    warn!(state = ?self.controller.state(), "Manual start ignored");
                }
            }
            CaptureCommand::ForceStop => match self.controller.force_stop().await {
                Ok(outcome) => self.log_stop_outcome(&outcome),
                Err(e) => error!(error = %e, "Gesture delivery failed"),
            },
            CaptureCommand::SetLabel(label) => {
                info!(label = %label, "Label updated");
                self.controller.set_label(label);
            }
            CaptureCommand::SetAutoFlow(value) => {
                info!(auto_flow = value, "Auto-flow updated");
                self.controller.set_auto_flow(value);
            }
            CaptureCommand::Shutdown => {
                info!("Shutdown requested");
                return false;
            }
        }

        true
    }

    fn log_frame_outcome(&self, outcome: &FrameOutcome) {
        match outcome {
            FrameOutcome::Observed => {}
            FrameOutcome::PreparingStarted => info!("Hand detected, countdown begins"),
            FrameOutcome::PreparingAborted => info!("Hand lost, countdown aborted"),
            FrameOutcome::FrameBuffered { buffered } => debug!(buffered, "Frame buffered"),
            FrameOutcome::GestureCompleted { frames } => {
                info!(frames, "Gesture completed and delivered");
            }
            FrameOutcome::NoDataCaptured => warn!("Recording ended with no frames"),
        }
    }

    fn log_stop_outcome(&self, outcome: &StopOutcome) {
        match outcome {
            StopOutcome::Completed { frames } => {
                info!(frames, "Gesture completed and delivered");
            }
            StopOutcome::NoData => warn!("Recording ended with no frames"),
            StopOutcome::Ignored => debug!("Stop ignored, nothing in progress"),
        }
    }

    /// Finish an in-flight recording before exiting so buffered frames
    /// are not lost on shutdown.
    async fn flush(&mut self) {
        if self.controller.state() == RecordState::Idle {
            return;
        }

        info!(state = ?self.controller.state(), "Flushing in-flight capture before shutdown");

        match self.controller.force_stop().await {
            Ok(outcome) => self.log_stop_outcome(&outcome),
            Err(e) => error!(error = %e, "Gesture delivery failed during shutdown"),
        }
    }

    fn publish_snapshot(&self) {
        let _ = self.snapshot_tx.send(self.controller.snapshot());
    }
}
