//! Client configuration loaded from TOML.

use crate::control::{ControlAssignment, ControlMode};
use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the configured server URL.
pub const SERVER_URL_ENV: &str = "TTT_SERVER_URL";

/// Configuration for a game client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the game service.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Polling driver period in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,

    /// Initial control mode of side A.
    #[serde(default = "default_side_a")]
    side_a: ControlMode,

    /// Initial control mode of side B.
    #[serde(default = "default_side_b")]
    side_b: ControlMode,
}

#[instrument]
fn default_server_url() -> String {
    "http://127.0.0.1:8884/".to_string()
}

#[instrument]
fn default_poll_interval_ms() -> u64 {
    100
}

#[instrument]
fn default_request_timeout_ms() -> u64 {
    5_000
}

#[instrument]
fn default_side_a() -> ControlMode {
    ControlAssignment::default().mode_for(crate::types::Side::A)
}

#[instrument]
fn default_side_b() -> ControlMode {
    ControlAssignment::default().mode_for(crate::types::Side::B)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            side_a: default_side_a(),
            side_b: default_side_b(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists (defaults otherwise), then applies the
    /// `TTT_SERVER_URL` environment override. A `.env` file is honored.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = if path.as_ref().exists() {
            Self::from_file(path.as_ref())?
        } else {
            info!(
                "Config file not found at {}, using defaults",
                path.as_ref().display()
            );
            Self::default()
        };

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            info!(url = %url, "Overriding server URL from environment");
            config.server_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Replaces the server URL.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// Replaces the polling period.
    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Replaces the initial control assignment.
    pub fn with_controls(mut self, side_a: ControlMode, side_b: ControlMode) -> Self {
        self.side_a = side_a;
        self.side_b = side_b;
        self
    }

    /// Checks values that would make the client unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.trim().is_empty() {
            return Err(ConfigError::new("server_url must not be empty"));
        }
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(ConfigError::new(format!(
                "server_url must be an http(s) URL, got {}",
                self.server_url
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::new("poll_interval_ms must be positive"));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::new("request_timeout_ms must be positive"));
        }
        Ok(())
    }

    /// Polling period as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Initial control assignment.
    pub fn controls(&self) -> ControlAssignment {
        ControlAssignment::new(self.side_a, self.side_b)
    }
}
