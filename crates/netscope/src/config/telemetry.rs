//! Telemetry configuration

use common::journal::LogFormat;
use serde::{Deserialize, Serialize};

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Enable Prometheus metrics
    pub enable_metrics: bool,

    /// Metrics endpoint path
    pub metrics_path: String,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enable_metrics: true,
            metrics_path: "/metrics".to_string(),
            log_format: LogFormat::Json,
        }
    }
}
