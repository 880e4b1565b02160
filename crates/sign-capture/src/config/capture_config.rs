use serde::{Deserialize, Serialize};
use sign_capture_core::{CaptureSettings, DEFAULT_COUNTDOWN_TICKS, DEFAULT_NO_HAND_THRESHOLD};

/// State machine thresholds for the gesture-capture controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// One-second ticks counted down before recording starts.
    #[serde(default = "default_countdown_ticks")]
    pub countdown_ticks: u32,

    /// Consecutive no-hand frames that end an active recording.
    #[serde(default = "default_no_hand_threshold")]
    pub no_hand_threshold: u32,

    /// Consecutive no-hand frames that abort the countdown.
    ///
    /// Defaults to half the full threshold (rounded down) when absent.
    #[serde(default)]
    pub preparing_abort_threshold: Option<u32>,
}

fn default_countdown_ticks() -> u32 {
    DEFAULT_COUNTDOWN_TICKS
}

fn default_no_hand_threshold() -> u32 {
    DEFAULT_NO_HAND_THRESHOLD
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            countdown_ticks: DEFAULT_COUNTDOWN_TICKS,
            no_hand_threshold: DEFAULT_NO_HAND_THRESHOLD,
            preparing_abort_threshold: None,
        }
    }
}

impl CaptureConfig {
    /// Resolve the configured values into controller settings.
    pub fn settings(&self) -> CaptureSettings {
        CaptureSettings {
            countdown_ticks: self.countdown_ticks,
            no_hand_threshold: self.no_hand_threshold,
            preparing_abort_threshold: self
                .preparing_abort_threshold
                .unwrap_or(self.no_hand_threshold / 2),
        }
    }
}
