use crate::config::default_auto_flow;

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Whether recording start/stop is driven by hand presence.
    #[serde(default = "default_auto_flow")]
    pub auto_flow: bool,

    /// Label attached to captured samples; may be empty.
    #[serde(default)]
    pub label: String,
}
