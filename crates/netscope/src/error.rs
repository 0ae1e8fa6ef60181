//! Error types for the netscope service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::NetscopeError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Main error type for the netscope service
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] common::ConfigurationError),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Malformed or missing request input
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Input that is well formed but names something unusable
    #[error("{message}")]
    InvalidArgument { message: String },

    /// Failure nobody planned for while serving a request
    #[error("Unexpected failure while {operation}: {source}")]
    Unexpected {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Internal server error
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl NetscopeError for Error {}

impl Error {
    /// Wrap an unexpected failure with the operation it interrupted
    pub fn unexpected(operation: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Error::Unexpected {
            operation,
            source: source.into(),
        }
    }

    /// Get error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config(_) => "NETSCOPE_CONFIG_ERROR",
            Error::HttpClient(_) => "NETSCOPE_HTTP_CLIENT_ERROR",
            Error::InvalidRequest { .. } => "NETSCOPE_INVALID_REQUEST",
            Error::InvalidArgument { .. } => "NETSCOPE_INVALID_ARGUMENT",
            Error::Unexpected { .. } => "NETSCOPE_UNEXPECTED_ERROR",
            Error::Internal { .. } => "NETSCOPE_INTERNAL_ERROR",
        }
    }

    /// Check if error is a client error
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidRequest { .. } | Error::InvalidArgument { .. }
        )
    }

    /// Message safe to show to the caller
    ///
    /// Client errors describe the problem; server errors stay generic.
    pub fn public_message(&self) -> String {
        match self {
            Error::InvalidRequest { .. } | Error::InvalidArgument { .. } => self.to_string(),
            Error::Unexpected { operation, .. } => {
                format!("Internal server error while {operation}")
            }
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!(code = self.error_code(), error = ?self, "Request failed: {self}");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.public_message(),
                "timestamp": chrono::Utc::now(),
            }
        }));

        (status, body).into_response()
    }
}

/// Error response structure for API documentation
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetails,
}

/// Error details structure
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorDetails {
    /// Error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// ISO 8601 timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
