//! # Netscope
//!
//! A small HTTP service for local network diagnostics.
//!
//! ## Features
//!
//! - **Interfaces**: list operationally up interfaces with their IPv4 details
//! - **URL analysis**: parse a URL, ping its host, resolve it and classify the address
//! - **Speed tests**: average download and upload bandwidth against public endpoints
//! - **OpenAPI documentation**: served through Swagger UI
//! - **Monitoring**: Prometheus metrics and structured logging

pub mod api;
pub mod config;
pub mod error;
pub mod network;
pub mod server;
pub mod services;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use server::{build_router, AppState, Server};

/// Version of the netscope crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }
}
