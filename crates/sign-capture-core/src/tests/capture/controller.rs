use crate::{
    CaptureError, CaptureResult, CaptureSettings, CountdownOutcome, FrameFeatures,
    FrameObservation, FrameOutcome, GestureCaptureController, GestureSample, GestureSender,
    Landmark, RecordState, StopOutcome,
};

use std::{
    panic::Location,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use error_location::ErrorLocation;

/// Fake sender that records every delivered sample.
struct RecordingSender {
    sent: Arc<Mutex<Vec<GestureSample>>>,
}

#[async_trait]
impl GestureSender for RecordingSender {
    async fn send(&mut self, sample: GestureSample) -> CaptureResult<()> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(sample);
        Ok(())
    }
}

/// Fake sender that rejects every sample.
struct FailingSender;

#[async_trait]
impl GestureSender for FailingSender {
    async fn send(&mut self, _sample: GestureSample) -> CaptureResult<()> {
        Err(CaptureError::SendRejected {
            reason: "connection refused".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

fn recording_controller(
    settings: CaptureSettings,
) -> (GestureCaptureController, Arc<Mutex<Vec<GestureSample>>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let sender = RecordingSender {
        sent: Arc::clone(&sent),
    };
    #[allow(clippy::unwrap_used)]
    let controller = GestureCaptureController::new(settings, Box::new(sender)).unwrap();
    (controller, sent)
}

/// Hand present with a single distinguishable right-hand point.
fn hand_frame(x: f32) -> FrameObservation {
    FrameObservation::new(
        true,
        FrameFeatures {
            right_hand: Some(vec![Landmark { x, y: 0.5, z: 0.0 }]),
            ..FrameFeatures::default()
        },
    )
}

/// Hand present but the detector produced no landmarks this frame.
fn hand_without_features() -> FrameObservation {
    FrameObservation::new(true, FrameFeatures::default())
}

fn no_hand() -> FrameObservation {
    FrameObservation::default()
}

/// Drive the countdown until recording starts.
fn run_countdown(controller: &mut GestureCaptureController) {
    while controller.state() == RecordState::Preparing {
        controller.on_countdown_tick();
    }
    assert_eq!(controller.state(), RecordState::Recording);
}

/// WHAT: A hand entering while idle starts the countdown
/// WHY: Auto-flow capture must begin without any manual command
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_idle_when_hand_detected_then_preparing_with_countdown() {
    // Given: An idle controller with default settings
    let (mut controller, sent) = recording_controller(CaptureSettings::default());

    // When: One frame with a detected hand arrives
    let outcome = controller.on_frame(hand_frame(0.1)).await.unwrap();

    // Then: The countdown is running and nothing was sent
    assert_eq!(outcome, FrameOutcome::PreparingStarted);
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.state, RecordState::Preparing);
    assert_eq!(snapshot.countdown, 2);
    assert_eq!(snapshot.buffered_frames, 0);
    assert!(snapshot.cycle_id.is_some());
    assert!(sent.lock().unwrap().is_empty());
}

/// WHAT: Countdown completion flips the machine into Recording
/// WHY: Recording must start exactly when the displayed count hits zero
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_preparing_when_countdown_elapses_then_recording() {
    // Given: A controller mid-countdown
    let (mut controller, _sent) = recording_controller(CaptureSettings::default());
    controller.on_frame(hand_frame(0.1)).await.unwrap();

    // When: Two one-second ticks elapse
    let first = controller.on_countdown_tick();
    let second = controller.on_countdown_tick();

    // Then: The first tick decrements, the second starts recording
    assert_eq!(first, CountdownOutcome::Ticking { remaining: 1 });
    assert_eq!(second, CountdownOutcome::RecordingStarted);
    assert_eq!(controller.state(), RecordState::Recording);
    assert_eq!(controller.snapshot().countdown, 0);

    // And a stray tick after completion is inert
    assert_eq!(controller.on_countdown_tick(), CountdownOutcome::Inactive);
}

/// WHAT: Losing the hand for half the threshold aborts the countdown
/// WHY: A capture should not start for a hand that already left
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_preparing_when_hand_absent_half_threshold_then_idle() {
    // Given: A preparing controller (threshold 10, abort at 5)
    let (mut controller, sent) = recording_controller(CaptureSettings::default());
    controller.on_frame(hand_frame(0.1)).await.unwrap();

    // When: Four no-hand frames arrive
    for _ in 0..4 {
        let outcome = controller.on_frame(no_hand()).await.unwrap();
        assert_eq!(outcome, FrameOutcome::Observed);
        assert_eq!(controller.state(), RecordState::Preparing);
    }

    // Then: The fifth aborts the cycle with an empty buffer and no send
    let outcome = controller.on_frame(no_hand()).await.unwrap();
    assert_eq!(outcome, FrameOutcome::PreparingAborted);
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.state, RecordState::Idle);
    assert_eq!(snapshot.countdown, 0);
    assert_eq!(snapshot.buffered_frames, 0);
    assert!(snapshot.cycle_id.is_none());
    assert!(sent.lock().unwrap().is_empty());
}

/// WHAT: A reappearing hand resets the no-hand counter while preparing
/// WHY: Brief detection dropouts must not abort the countdown
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_preparing_when_hand_flickers_then_countdown_survives() {
    // Given: A preparing controller one frame away from aborting
    let (mut controller, _sent) = recording_controller(CaptureSettings::default());
    controller.on_frame(hand_frame(0.1)).await.unwrap();
    for _ in 0..4 {
        controller.on_frame(no_hand()).await.unwrap();
    }

    // When: The hand reappears, then disappears for four more frames
    controller.on_frame(hand_frame(0.2)).await.unwrap();
    for _ in 0..4 {
        controller.on_frame(no_hand()).await.unwrap();
    }

    // Then: The counter restarted, so the cycle is still preparing
    assert_eq!(controller.state(), RecordState::Preparing);
}

/// WHAT: Ten consecutive no-hand frames deliver the gesture in order
/// WHY: This is the full capture contract: label "hola", five buffered
/// frames, exactly one send, frames in temporal order, back to idle
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_recording_when_threshold_reached_then_one_sample_sent_in_order() {
    // Given: A recording controller labelled "hola"
    let (mut controller, sent) = recording_controller(CaptureSettings::default());
    controller.set_label("hola".to_string());
    controller.on_frame(hand_frame(0.0)).await.unwrap();
    run_countdown(&mut controller);

    // When: Five feature frames arrive, then ten no-hand frames
    for i in 1..=5 {
        let outcome = controller.on_frame(hand_frame(i as f32)).await.unwrap();
        assert_eq!(outcome, FrameOutcome::FrameBuffered { buffered: i });
    }
    for _ in 0..9 {
        assert_eq!(
            controller.on_frame(no_hand()).await.unwrap(),
            FrameOutcome::Observed
        );
    }
    let outcome = controller.on_frame(no_hand()).await.unwrap();

    // Then: Exactly one sample, in capture order, and the cycle is done
    assert_eq!(outcome, FrameOutcome::GestureCompleted { frames: 5 });
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].label, "hola");
    let xs: Vec<f32> = sent[0]
        .frames_data
        .iter()
        .map(|f| f.right_hand.as_ref().unwrap()[0].x)
        .collect();
    assert_eq!(xs, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.state, RecordState::Idle);
    assert_eq!(snapshot.buffered_frames, 0);
    assert_eq!(snapshot.completed_gestures, 1);
}

/// WHAT: Frames with an empty payload are received but not buffered
/// WHY: "Frame received" and "data to keep" are different things
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_recording_when_features_empty_then_nothing_buffered() {
    // Given: A recording controller
    let (mut controller, _sent) = recording_controller(CaptureSettings::default());
    controller.on_frame(hand_without_features()).await.unwrap();
    run_countdown(&mut controller);

    // When: Hand frames arrive without any landmark group
    for _ in 0..3 {
        let outcome = controller.on_frame(hand_without_features()).await.unwrap();
        assert_eq!(outcome, FrameOutcome::Observed);
    }

    // Then: The buffer stays empty
    assert_eq!(controller.snapshot().buffered_frames, 0);
}

/// WHAT: Stopping with an empty buffer raises the no-data notice
/// WHY: An empty capture is a normal path back to idle, never a send
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_empty_buffer_when_threshold_reached_then_no_data_no_send() {
    // Given: A recording controller that never buffered a frame
    let (mut controller, sent) = recording_controller(CaptureSettings::default());
    controller.on_frame(hand_without_features()).await.unwrap();
    run_countdown(&mut controller);

    // When: Ten no-hand frames end the recording
    let mut last = FrameOutcome::Observed;
    for _ in 0..10 {
        last = controller.on_frame(no_hand()).await.unwrap();
    }

    // Then: No-data outcome, no sender call, counter untouched, idle
    assert_eq!(last, FrameOutcome::NoDataCaptured);
    assert!(sent.lock().unwrap().is_empty());
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.state, RecordState::Idle);
    assert_eq!(snapshot.completed_gestures, 0);
}

/// WHAT: force_stop is idempotent and never double-sends
/// WHY: A second stop request must find the controller idle and do nothing
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_double_force_stop_then_at_most_one_send() {
    // Given: A recording controller with one buffered frame
    let (mut controller, sent) = recording_controller(CaptureSettings::default());
    controller.on_frame(hand_frame(0.1)).await.unwrap();
    run_countdown(&mut controller);
    controller.on_frame(hand_frame(0.2)).await.unwrap();

    // When: Stopping twice in a row
    let first = controller.force_stop().await.unwrap();
    let second = controller.force_stop().await.unwrap();

    // Then: One delivery, the second call is a no-op
    assert_eq!(first, StopOutcome::Completed { frames: 1 });
    assert_eq!(second, StopOutcome::Ignored);
    assert_eq!(sent.lock().unwrap().len(), 1);

    // And frames arriving after the cycle find a clean idle machine
    assert_eq!(controller.state(), RecordState::Idle);
}

/// WHAT: force_stop during the countdown cancels without sending
/// WHY: Stopping an empty preparation is the no-data path, not an upload
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_preparing_when_force_stopped_then_no_data() {
    // Given: A controller mid-countdown
    let (mut controller, sent) = recording_controller(CaptureSettings::default());
    controller.on_frame(hand_frame(0.1)).await.unwrap();

    // When: A manual stop arrives
    let outcome = controller.force_stop().await.unwrap();

    // Then: No data, no send, countdown gone
    assert_eq!(outcome, StopOutcome::NoData);
    assert!(sent.lock().unwrap().is_empty());
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.state, RecordState::Idle);
    assert_eq!(snapshot.countdown, 0);
}

/// WHAT: A sender failure surfaces but leaves the controller idle
/// WHY: The caller decides on retries; the machine must accept the next
/// gesture immediately
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_failing_sender_when_gesture_completes_then_error_and_idle() {
    // Given: A recording controller whose sender always rejects
    let mut controller = GestureCaptureController::new(
        CaptureSettings::default(),
        Box::new(FailingSender),
    )
    .unwrap();
    controller.on_frame(hand_frame(0.1)).await.unwrap();
    run_countdown(&mut controller);
    controller.on_frame(hand_frame(0.2)).await.unwrap();

    // When: The no-hand threshold completes the gesture
    let mut result = Ok(FrameOutcome::Observed);
    for _ in 0..10 {
        result = controller.on_frame(no_hand()).await;
    }

    // Then: The rejection surfaces after the state already reverted
    assert!(matches!(result, Err(CaptureError::SendRejected { .. })));
    assert_eq!(controller.state(), RecordState::Idle);
    assert_eq!(controller.snapshot().completed_gestures, 1);

    // And a new cycle starts cleanly
    let outcome = controller.on_frame(hand_frame(0.3)).await.unwrap();
    assert_eq!(outcome, FrameOutcome::PreparingStarted);
}

/// WHAT: Manual mode ignores hand presence for starting
/// WHY: With auto-flow off, only explicit commands begin a capture, but
/// the no-hand threshold still force-stops a runaway recording
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_manual_mode_then_commands_drive_the_cycle() {
    // Given: A controller with auto-flow disabled
    let (mut controller, sent) = recording_controller(CaptureSettings::default());
    controller.set_auto_flow(false);

    // When: Hands appear without any command
    for _ in 0..5 {
        let outcome = controller.on_frame(hand_frame(0.1)).await.unwrap();
        assert_eq!(outcome, FrameOutcome::Observed);
    }

    // Then: Nothing starts
    assert_eq!(controller.state(), RecordState::Idle);

    // When: A manual start runs the same countdown path
    assert!(controller.force_start());
    assert!(!controller.force_start());
    run_countdown(&mut controller);
    controller.on_frame(hand_frame(0.2)).await.unwrap();

    // And the hand vanishes for the full threshold
    let mut last = FrameOutcome::Observed;
    for _ in 0..10 {
        last = controller.on_frame(no_hand()).await.unwrap();
    }

    // Then: The safety net completed the gesture
    assert_eq!(last, FrameOutcome::GestureCompleted { frames: 1 });
    assert_eq!(sent.lock().unwrap().len(), 1);
    assert_eq!(controller.state(), RecordState::Idle);
}
