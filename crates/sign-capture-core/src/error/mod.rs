use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Gesture-capture errors with source location tracking.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The configured sender refused or failed to deliver a sample.
    ///
    /// The controller has already returned to idle when this surfaces;
    /// retrying is the caller's decision.
    #[error("Gesture upload rejected: {reason} {location}")]
    SendRejected {
        /// Human-readable reason for the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Capture settings describe an impossible state machine.
    #[error("Invalid capture settings: {reason} {location}")]
    InvalidSettings {
        /// Which setting is out of range and why.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CaptureError`].
pub type Result<T> = StdResult<T, CaptureError>;
