mod behaviour_config;
mod capture_config;
#[allow(clippy::module_inception)]
mod config;
mod server_config;

pub(crate) use {
    behaviour_config::BehaviourConfig, capture_config::CaptureConfig, config::Config,
    server_config::ServerConfig,
};

pub(crate) const DEFAULT_AUTO_FLOW: bool = true;
pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub(crate) fn default_auto_flow() -> bool {
    DEFAULT_AUTO_FLOW
}

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
