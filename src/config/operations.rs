//! Config loading, validation, and derived settings.

use super::model::Config;
use crate::api::EndpointConfig;
use crate::error::{LockingError, Result};
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LockingError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| LockingError::ConfigError(format!("failed to parse YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LockingError::ConfigError(format!("failed to serialize YAML: {}", e)))
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `ping_seconds` and `timeout_seconds` must be positive
    /// - either `api_base_url` or `api_url` must be non-empty
    /// - `controls` entries must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.ping_seconds == 0 {
            return Err(LockingError::ConfigError(
                "ping_seconds must be greater than 0".to_string(),
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(LockingError::ConfigError(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }

        let has_api_url = self.api_url.as_deref().is_some_and(|u| !u.trim().is_empty());
        if self.api_base_url.trim().is_empty() && !has_api_url {
            return Err(LockingError::ConfigError(
                "one of api_base_url or api_url must be set".to_string(),
            ));
        }

        if self.controls.iter().any(|c| c.trim().is_empty()) {
            return Err(LockingError::ConfigError(
                "controls entries must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Interval between lease renewals.
    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_seconds)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Endpoint settings consumed by [`crate::api::LockApi`].
    pub fn endpoint(&self) -> EndpointConfig {
        EndpointConfig {
            host_url: self.host_url.clone(),
            api_base_url: self.api_base_url.clone(),
            api_url: self.api_url.clone().filter(|u| !u.trim().is_empty()),
            release_mode: self.release_mode,
        }
    }
}
