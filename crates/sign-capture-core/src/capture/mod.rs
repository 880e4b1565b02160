mod controller;
mod countdown;
mod frame;
mod sender;
mod settings;
mod state;

pub(crate) use countdown::{Countdown, CountdownStatus};

pub use {
    controller::{CountdownOutcome, FrameOutcome, GestureCaptureController, StopOutcome},
    frame::{FrameFeatures, FrameObservation, GestureSample, Landmark},
    sender::GestureSender,
    settings::{CaptureSettings, DEFAULT_COUNTDOWN_TICKS, DEFAULT_NO_HAND_THRESHOLD},
    state::{CaptureSnapshot, RecordState},
};
