//! Configuration management for sign-capture.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{BehaviourConfig, CaptureConfig, ServerConfig},
};

use std::{fs, io::Write, panic::Location, path::PathBuf};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gesture-capture thresholds.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Capture backend settings.
    pub server: ServerConfig,
    /// Application behavior settings.
    pub behavior: BehaviourConfig,
}

impl Config {
    /// Load configuration from disk, creating a default if not found.
    ///
    /// Thresholds are not validated here; call [`Config::validate`]
    /// before building the controller.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to parse config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Validate thresholds and backend settings.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn validate(&self) -> AppResult<()> {
        self.capture
            .settings()
            .validate()
            .map_err(|e| AppError::ConfigError {
                reason: format!("Capture thresholds rejected: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if self.server.base_url.is_empty() {
            return Err(AppError::ConfigError {
                reason: "server.base_url cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent
    /// corruption if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("com", "sign-capture", "Sign-Capture").ok_or_else(|| {
                AppError::ConfigError {
                    reason: "Failed to get config directory".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let config = Config {
            capture: CaptureConfig::default(),
            server: ServerConfig {
                base_url: crate::config::default_base_url(),
                api_token: None,
                timeout_secs: crate::config::default_timeout_secs(),
            },
            behavior: BehaviourConfig {
                auto_flow: crate::config::DEFAULT_AUTO_FLOW,
                label: String::new(),
            },
        };

        config.save()?;

        Ok(config)
    }
}
