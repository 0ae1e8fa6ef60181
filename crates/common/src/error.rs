//! Error handling for netscope
//!
//! This module defines the error types shared by every netscope crate:
//! - `NetscopeError` marker trait for consistent error handling
//! - `ConfigurationError` for configuration loading and validation
//! - `NetworkError` for failures while talking to the network or the OS
//!
//! Library errors use `thiserror`; binaries may wrap them in `anyhow`.

use thiserror::Error;

/// Base trait for all netscope-specific errors
///
/// Implementors are thread-safe, `'static` and implement `std::error::Error`,
/// so they can cross task boundaries and be boxed freely.
pub trait NetscopeError: std::error::Error + Send + Sync + 'static {}

/// Network-related errors
///
/// Raised by probes and OS queries. Callers that only need a best-effort
/// answer fold these into an absent value instead of propagating them.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Name resolution failed or returned no addresses
    #[error("Failed to resolve {host}: {details}")]
    ResolutionFailed { host: String, details: String },

    /// A raw socket could not be opened
    #[error("Failed to open {kind} socket: {source}")]
    SocketUnavailable {
        kind: String,
        #[source]
        source: std::io::Error,
    },

    /// Request timed out
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// A probe was sent but failed for a reason other than timeout
    #[error("Probe of {target} failed: {details}")]
    ProbeFailed { target: String, details: String },

    /// Interface enumeration or inspection failed
    #[error("Network interface error for {interface}: {details}")]
    InterfaceError { interface: String, details: String },

    /// HTTP specific error
    #[error("HTTP error {status_code} from {endpoint}")]
    HttpError { status_code: u16, endpoint: String },
}

impl NetscopeError for NetworkError {}

/// Configuration-related errors
///
/// These errors occur during configuration loading, parsing, or validation.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration parsing failed
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for {key}: {value} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {details}")]
    ValidationFailed { details: String },
}

impl NetscopeError for ConfigurationError {}

impl NetworkError {
    /// Create a resolution failure from any displayable cause
    pub fn resolution_failed(host: impl Into<String>, details: impl ToString) -> Self {
        Self::ResolutionFailed {
            host: host.into(),
            details: details.to_string(),
        }
    }

    /// Create a probe failure from any displayable cause
    pub fn probe_failed(target: impl Into<String>, details: impl ToString) -> Self {
        Self::ProbeFailed {
            target: target.into(),
            details: details.to_string(),
        }
    }

    /// Create an interface error from any displayable cause
    pub fn interface(interface: impl Into<String>, details: impl ToString) -> Self {
        Self::InterfaceError {
            interface: interface.into(),
            details: details.to_string(),
        }
    }
}

impl ConfigurationError {
    /// Create a validation failed error
    pub fn validation_failed(details: impl Into<String>) -> Self {
        Self::ValidationFailed {
            details: details.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = NetworkError::resolution_failed("example.invalid", "no such host");
        let display = format!("{err}");
        assert!(display.contains("example.invalid"));
        assert!(display.contains("no such host"));
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = NetworkError::SocketUnavailable {
            kind: "ICMP".to_string(),
            source: io_error,
        };

        assert!(err.source().is_some());
        assert!(err.to_string().contains("ICMP"));
    }

    #[test]
    fn test_netscope_error_trait() {
        fn accepts(_: impl NetscopeError) {}

        accepts(NetworkError::Timeout { timeout_ms: 10 });
        accepts(ConfigurationError::validation_failed("test"));
    }

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigurationError::invalid_value("speed_test.request_timeout_secs", 0, "must be > 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for speed_test.request_timeout_secs: 0 (must be > 0)"
        );
    }
}
