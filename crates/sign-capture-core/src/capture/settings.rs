use crate::{CaptureError, CaptureResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Default countdown length, in one-second ticks.
pub const DEFAULT_COUNTDOWN_TICKS: u32 = 2;

/// Default number of consecutive no-hand frames that ends a recording.
pub const DEFAULT_NO_HAND_THRESHOLD: u32 = 10;

/// Tunable thresholds for the capture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSettings {
    /// One-second ticks counted down before recording starts.
    pub countdown_ticks: u32,

    /// Consecutive frames without a detected hand that end an active
    /// recording and trigger the stop sequence.
    pub no_hand_threshold: u32,

    /// Consecutive no-hand frames that abort the countdown while
    /// preparing.
    ///
    /// The capture flow aborts preparation after half the full threshold
    /// (rounded down); kept as its own knob rather than a hard-coded
    /// ratio.
    pub preparing_abort_threshold: u32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            countdown_ticks: DEFAULT_COUNTDOWN_TICKS,
            no_hand_threshold: DEFAULT_NO_HAND_THRESHOLD,
            preparing_abort_threshold: DEFAULT_NO_HAND_THRESHOLD / 2,
        }
    }
}

impl CaptureSettings {
    /// Check that every threshold permits its transition to fire.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::InvalidSettings`] when a counter could
    /// never reach its threshold or a countdown could never complete.
    #[track_caller]
    pub fn validate(&self) -> CaptureResult<()> {
        if self.countdown_ticks == 0 {
            return Err(CaptureError::InvalidSettings {
                reason: "countdown_ticks must be at least 1".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.no_hand_threshold == 0 {
            return Err(CaptureError::InvalidSettings {
                reason: "no_hand_threshold must be at least 1".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.preparing_abort_threshold == 0
            || self.preparing_abort_threshold > self.no_hand_threshold
        {
            return Err(CaptureError::InvalidSettings {
                reason: format!(
                    "preparing_abort_threshold must be between 1 and no_hand_threshold ({})",
                    self.no_hand_threshold
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
