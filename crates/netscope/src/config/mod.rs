//! Configuration module for the netscope service

mod probe;
mod server;
mod telemetry;

pub use probe::ProbeConfig;
pub use server::ServerConfig;
pub use speed_test::SpeedTestConfig;
pub use telemetry::TelemetryConfig;

use common::config::{load_config_with_options, load_from_file, LoadOptions};
use common::ConfigurationError as ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for netscope
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Reachability probe configuration
    pub probe: ProbeConfig,

    /// Speed test endpoints and limits
    pub speed_test: SpeedTestConfig,

    /// Telemetry configuration
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Load configuration from file and environment, then validate it
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Config = match config_path {
            Some(path) => load_from_file(path)?,
            None => load_config_with_options(LoadOptions::default())?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Generate example configuration file
    pub fn generate_example() -> Result<String, ConfigError> {
        let config = Self::default();
        toml::to_string_pretty(&config).map_err(|e| ConfigError::ParseError {
            details: format!("Failed to serialize config: {e}"),
        })
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.request_timeout == 0 {
            return Err(ConfigError::invalid_value(
                "server.request_timeout",
                0,
                "must be greater than zero",
            ));
        }

        if self.probe.ping_timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "probe.ping_timeout_secs",
                0,
                "must be greater than zero",
            ));
        }

        let speed = &self.speed_test;
        if speed.request_timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "speed_test.request_timeout_secs",
                0,
                "must be greater than zero",
            ));
        }
        validate_urls("speed_test.download_urls", &speed.download_urls)?;
        validate_urls("speed_test.upload_urls", &speed.upload_urls)?;
        if speed.upload_payload_sizes.is_empty() {
            return Err(ConfigError::validation_failed(
                "speed_test.upload_payload_sizes must not be empty",
            ));
        }
        if speed.upload_payload_sizes.contains(&0) {
            return Err(ConfigError::invalid_value(
                "speed_test.upload_payload_sizes",
                0,
                "payload sizes must be greater than zero",
            ));
        }

        if !self.telemetry.metrics_path.starts_with('/') {
            return Err(ConfigError::invalid_value(
                "telemetry.metrics_path",
                &self.telemetry.metrics_path,
                "must start with '/'",
            ));
        }

        Ok(())
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout)
    }

    /// Get ICMP echo timeout as Duration
    pub fn ping_timeout(&self) -> Duration {
        Duration::from_secs(self.probe.ping_timeout_secs)
    }
}

fn validate_urls(key: &str, urls: &[String]) -> Result<(), ConfigError> {
    if urls.is_empty() {
        return Err(ConfigError::validation_failed(format!(
            "{key} must not be empty"
        )));
    }

    for raw in urls {
        let parsed = url::Url::parse(raw)
            .map_err(|e| ConfigError::invalid_value(key, raw, e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::invalid_value(
                key,
                raw,
                "only http and https are supported",
            ));
        }
    }

    Ok(())
}
