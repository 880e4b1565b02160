//! HTTP delivery of completed gesture samples.
//!
//! Implements the controller's sender seam against the capture backend:
//! one authenticated POST per completed gesture. Timeout policy lives
//! here, not in the controller: a stuck upload must fail this request,
//! not wedge the state machine forever.

use crate::{AppError, AppResult, config::ServerConfig};

use std::{panic::Location, time::Duration};

use async_trait::async_trait;
use error_location::ErrorLocation;
use sign_capture_core::{CaptureError, CaptureResult, GestureSample, GestureSender};
use tracing::{debug, info, instrument};

/// Sender that POSTs samples to the capture backend as JSON.
pub struct HttpGestureSender {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HttpGestureSender {
    /// Build a sender for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    #[track_caller]
    #[instrument(skip(config))]
    pub fn new(config: &ServerConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::HttpClientError {
                reason: format!("Failed to build client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let endpoint = format!("{}/captura/", config.base_url.trim_end_matches('/'));

        info!(endpoint = %endpoint, "HttpGestureSender initialized");

        Ok(Self {
            client,
            endpoint,
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl GestureSender for HttpGestureSender {
    #[instrument(skip(self, sample), fields(frames = sample.frames_data.len()))]
    async fn send(&mut self, sample: GestureSample) -> CaptureResult<()> {
        let frames = sample.frames_data.len();
        let label = sample.label.clone();

        let mut request = self.client.post(&self.endpoint).json(&sample);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CaptureError::SendRejected {
                reason: format!("Request failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CaptureError::SendRejected {
                reason: format!("Backend returned {}: {}", status, body),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!(status = %status, "Backend accepted sample");
        info!(label = %label, frames, "Gesture sample uploaded");

        Ok(())
    }
}
