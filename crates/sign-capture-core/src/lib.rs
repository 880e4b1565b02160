//! Sign-capture Core Library
//!
//! Gesture-capture state machine for sign-language samples: watches a
//! per-frame stream of hand/pose/face landmark detections, decides when
//! a gesture begins and ends, buffers the frames that constitute it, and
//! hands the completed sequence to an injected sender.
//!
//! # Example
//!
//! ```no_run
//! use sign_capture_core::{
//!     CaptureResult, CaptureSettings, FrameObservation, GestureCaptureController,
//!     GestureSample, GestureSender,
//! };
//!
//! struct NullSender;
//!
//! #[async_trait::async_trait]
//! impl GestureSender for NullSender {
//!     async fn send(&mut self, _sample: GestureSample) -> CaptureResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> CaptureResult<()> {
//!     let mut controller =
//!         GestureCaptureController::new(CaptureSettings::default(), Box::new(NullSender))?;
//!     controller.set_label("hola".to_string());
//!
//!     // A hand entering the frame begins the countdown.
//!     controller
//!         .on_frame(FrameObservation::new(true, Default::default()))
//!         .await?;
//!     Ok(())
//! }
//! ```

mod capture;
mod error;

pub use {
    capture::{
        CaptureSettings, CaptureSnapshot, CountdownOutcome, DEFAULT_COUNTDOWN_TICKS,
        DEFAULT_NO_HAND_THRESHOLD, FrameFeatures, FrameObservation, FrameOutcome,
        GestureCaptureController, GestureSample, GestureSender, Landmark, RecordState,
        StopOutcome,
    },
    error::{CaptureError, Result as CaptureResult},
};
