use crate::{
    CaptureResult, CaptureSettings, CaptureSnapshot, FrameObservation, GestureSample,
    GestureSender, RecordState,
    capture::{Countdown, CountdownStatus},
};

use std::mem;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// What processing one frame amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Frame consumed without a reportable state change.
    Observed,
    /// A hand entered while idle; the countdown is now running.
    PreparingStarted,
    /// The hand left during the countdown; the cycle was aborted.
    PreparingAborted,
    /// Frame features were appended to the gesture buffer.
    FrameBuffered {
        /// Frames buffered so far in this cycle.
        buffered: usize,
    },
    /// The no-hand threshold ended the recording and the sample was
    /// delivered.
    GestureCompleted {
        /// Frames carried by the delivered sample.
        frames: usize,
    },
    /// The no-hand threshold ended the recording but nothing had been
    /// buffered; no sample was built.
    NoDataCaptured,
}

/// Result of running the stop sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// A sample was built and delivered.
    Completed {
        /// Frames carried by the sample.
        frames: usize,
    },
    /// Nothing was buffered; no sample was built.
    NoData,
    /// The controller was already idle; nothing to stop.
    Ignored,
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// Countdown decremented; holds the ticks left to display.
    Ticking {
        /// Ticks left before recording starts.
        remaining: u32,
    },
    /// Countdown hit zero; recording is now active.
    RecordingStarted,
    /// No countdown is running.
    Inactive,
}

/// Per-frame state machine that turns a noisy detection stream into
/// discrete gesture samples.
///
/// Consumes one [`FrameObservation`] at a time, buffers feature frames
/// while recording, and hands each completed buffer to the injected
/// [`GestureSender`]. Hand presence is treated with hysteresis: a hand
/// must be absent for a run of consecutive frames before a recording
/// ends, so single-frame detection dropouts do not truncate a gesture.
///
/// # Thread Safety
///
/// The controller is not thread-safe and performs no internal locking.
/// It expects a single owner (the capture event loop) delivering frames,
/// countdown ticks, and commands one at a time. The stop
/// sequence awaits the sender inline, so no event can interleave with a
/// buffer flush.
pub struct GestureCaptureController {
    settings: CaptureSettings,
    sender: Box<dyn GestureSender + Send>,
    state: RecordState,
    auto_flow: bool,
    label: String,
    countdown: Option<Countdown>,
    captured_frames: Vec<crate::FrameFeatures>,
    no_hand_frames: u32,
    completed_gestures: u64,
    cycle_id: Option<Uuid>,
}

impl GestureCaptureController {
    /// Create a controller with the given thresholds and sample sender.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings fail [`CaptureSettings::validate`].
    #[track_caller]
    pub fn new(
        settings: CaptureSettings,
        sender: Box<dyn GestureSender + Send>,
    ) -> CaptureResult<Self> {
        settings.validate()?;

        info!(
            countdown_ticks = settings.countdown_ticks,
            no_hand_threshold = settings.no_hand_threshold,
            preparing_abort_threshold = settings.preparing_abort_threshold,
            "GestureCaptureController initialized"
        );

        Ok(Self {
            settings,
            sender,
            state: RecordState::Idle,
            auto_flow: true,
            label: String::new(),
            countdown: None,
            captured_frames: Vec::new(),
            no_hand_frames: 0,
            completed_gestures: 0,
            cycle_id: None,
        })
    }

    /// Current machine state.
    pub fn state(&self) -> RecordState {
        self.state
    }

    /// Replace the label attached to subsequent samples.
    pub fn set_label(&mut self, label: String) {
        debug!(label = %label, "Label updated");
        self.label = label;
    }

    /// Switch between automatic (hand-presence driven) and manual flow.
    pub fn set_auto_flow(&mut self, auto_flow: bool) {
        debug!(auto_flow, "Auto-flow updated");
        self.auto_flow = auto_flow;
    }

    /// Read-only view of the controller for a UI layer.
    pub fn snapshot(&self) -> CaptureSnapshot {
        CaptureSnapshot {
            state: self.state,
            countdown: self.countdown.as_ref().map_or(0, Countdown::remaining),
            buffered_frames: self.captured_frames.len(),
            completed_gestures: self.completed_gestures,
            label: self.label.clone(),
            auto_flow: self.auto_flow,
            cycle_id: self.cycle_id,
        }
    }

    /// Ingest one frame from the detector stream.
    ///
    /// This is the main entry point, called once per external tick. A
    /// completed gesture is delivered to the sender before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CaptureError::SendRejected`] when a frame completes a
    /// gesture but the sender fails; the controller is already idle and
    /// ready for a new cycle when that happens.
    pub async fn on_frame(&mut self, observation: FrameObservation) -> CaptureResult<FrameOutcome> {
        // The stop sequence owns the transition out of Stopped and runs
        // to completion before the next event is processed.
        if self.state == RecordState::Stopped {
            return Ok(FrameOutcome::Observed);
        }

        if !self.auto_flow {
            return self.on_frame_manual(observation).await;
        }

        match self.state {
            RecordState::Idle => {
                if observation.hand_detected {
                    self.begin_preparing();
                    Ok(FrameOutcome::PreparingStarted)
                } else {
                    Ok(FrameOutcome::Observed)
                }
            }
            RecordState::Preparing => Ok(self.observe_while_preparing(&observation)),
            RecordState::Recording => self.record_frame(observation).await,
            RecordState::Stopped => Ok(FrameOutcome::Observed),
        }
    }

    /// Manual flow: hand presence never starts or prepares a capture,
    /// but the no-hand threshold still force-stops an active recording
    /// as a safety net.
    async fn on_frame_manual(
        &mut self,
        observation: FrameObservation,
    ) -> CaptureResult<FrameOutcome> {
        match self.state {
            RecordState::Recording => self.record_frame(observation).await,
            _ => Ok(FrameOutcome::Observed),
        }
    }

    fn observe_while_preparing(&mut self, observation: &FrameObservation) -> FrameOutcome {
        if observation.hand_detected {
            self.no_hand_frames = 0;
            return FrameOutcome::Observed;
        }

        self.no_hand_frames += 1;
        if self.no_hand_frames >= self.settings.preparing_abort_threshold {
            info!(
                cycle_id = ?self.cycle_id,
                no_hand_frames = self.no_hand_frames,
                "Hand left during countdown, aborting capture"
            );
            self.reset_countdown();
            self.state = RecordState::Idle;
            self.cycle_id = None;
            return FrameOutcome::PreparingAborted;
        }

        FrameOutcome::Observed
    }

    async fn record_frame(&mut self, observation: FrameObservation) -> CaptureResult<FrameOutcome> {
        if observation.hand_detected {
            self.no_hand_frames = 0;

            // Empty payloads count as a received frame but carry no data
            // worth keeping.
            if observation.features.is_empty() {
                return Ok(FrameOutcome::Observed);
            }

            self.captured_frames.push(observation.features);
            return Ok(FrameOutcome::FrameBuffered {
                buffered: self.captured_frames.len(),
            });
        }

        self.no_hand_frames += 1;
        if self.no_hand_frames >= self.settings.no_hand_threshold {
            info!(
                cycle_id = ?self.cycle_id,
                no_hand_frames = self.no_hand_frames,
                "No-hand threshold reached, stopping recording"
            );
            return match self.stop().await? {
                StopOutcome::Completed { frames } => Ok(FrameOutcome::GestureCompleted { frames }),
                StopOutcome::NoData => Ok(FrameOutcome::NoDataCaptured),
                StopOutcome::Ignored => Ok(FrameOutcome::Observed),
            };
        }

        Ok(FrameOutcome::Observed)
    }

    /// Advance the countdown by one tick.
    ///
    /// Called by the event loop once per second while preparing. When
    /// the countdown reaches zero, recording starts.
    pub fn on_countdown_tick(&mut self) -> CountdownOutcome {
        let Some(countdown) = self.countdown.as_mut() else {
            return CountdownOutcome::Inactive;
        };

        match countdown.tick() {
            CountdownStatus::Running(remaining) => {
                debug!(cycle_id = ?self.cycle_id, remaining, "Countdown tick");
                CountdownOutcome::Ticking { remaining }
            }
            CountdownStatus::Finished => {
                self.countdown = None;
                self.start_recording();
                CountdownOutcome::RecordingStarted
            }
        }
    }

    /// Begin the countdown regardless of hand presence.
    ///
    /// Returns `true` if a cycle was started, `false` if the controller
    /// was already mid-cycle and the request was ignored.
    pub fn force_start(&mut self) -> bool {
        if self.state != RecordState::Idle {
            debug!(state = ?self.state, "Ignoring start request, capture already active");
            return false;
        }

        self.begin_preparing();
        true
    }

    /// Run the stop sequence immediately.
    ///
    /// Cancels any pending countdown, flushes the buffer through the
    /// sender when non-empty, and returns to idle. Calling this while
    /// already idle is a no-op reported as [`StopOutcome::Ignored`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::CaptureError::SendRejected`] when the sender fails; the
    /// controller is already idle when the error surfaces.
    #[instrument(skip(self))]
    pub async fn force_stop(&mut self) -> CaptureResult<StopOutcome> {
        if self.state == RecordState::Idle {
            return Ok(StopOutcome::Ignored);
        }

        self.stop().await
    }

    /// The stop sequence: cancel the countdown, flush the buffer, and
    /// return to idle. Runs atomically with respect to frame delivery:
    /// the caller does not hand the controller another event until this
    /// resolves.
    async fn stop(&mut self) -> CaptureResult<StopOutcome> {
        let cycle_id = self.cycle_id;

        self.reset_countdown();
        self.no_hand_frames = 0;
        self.state = RecordState::Stopped;

        if self.captured_frames.is_empty() {
            warn!(cycle_id = ?cycle_id, "No frames captured, nothing to send");
            self.state = RecordState::Idle;
            self.cycle_id = None;
            return Ok(StopOutcome::NoData);
        }

        let sample = GestureSample {
            label: self.label.clone(),
            frames_data: mem::take(&mut self.captured_frames),
        };
        let frames = sample.frames_data.len();

        self.completed_gestures += 1;
        info!(
            cycle_id = ?cycle_id,
            frames,
            label = %sample.label,
            completed_gestures = self.completed_gestures,
            "Gesture complete, delivering sample"
        );

        let result = self.sender.send(sample).await;

        // Back to idle even when the send failed: a failed upload is the
        // caller's problem to retry, the controller must be ready for
        // the next gesture immediately.
        self.state = RecordState::Idle;
        self.cycle_id = None;

        result.map(|()| StopOutcome::Completed { frames })
    }

    fn begin_preparing(&mut self) {
        let cycle_id = Uuid::new_v4();

        self.captured_frames.clear();
        self.no_hand_frames = 0;
        self.countdown = Some(Countdown::new(self.settings.countdown_ticks));
        self.state = RecordState::Preparing;
        self.cycle_id = Some(cycle_id);

        info!(
            cycle_id = %cycle_id,
            countdown_ticks = self.settings.countdown_ticks,
            "Capture cycle started, counting down"
        );
    }

    fn start_recording(&mut self) {
        self.no_hand_frames = 0;
        self.state = RecordState::Recording;

        info!(cycle_id = ?self.cycle_id, "Recording started");
    }

    fn reset_countdown(&mut self) {
        self.countdown = None;
    }
}

impl std::fmt::Debug for GestureCaptureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureCaptureController")
            .field("state", &self.state)
            .field("auto_flow", &self.auto_flow)
            .field("label", &self.label)
            .field("buffered_frames", &self.captured_frames.len())
            .field("no_hand_frames", &self.no_hand_frames)
            .field("completed_gestures", &self.completed_gestures)
            .finish_non_exhaustive()
    }
}
