use crate::config::{default_base_url, default_timeout_secs};

use serde::{Deserialize, Serialize};

/// Capture backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the capture backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with each upload, if the backend requires one.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Request timeout for uploads, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}
