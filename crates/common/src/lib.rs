//! # Common Netscope
//!
//! Shared building blocks for the netscope crates.
//!
//! ## Key Features
//! - Error handling with the `NetscopeError` marker trait
//! - Layered configuration loading (defaults, TOML file, environment)
//! - Tracing subscriber setup for console and journald output
//! - Host address classification (loopback, private, public, domain)

pub mod config;
pub mod error;
pub mod journal;
pub mod network;

// Re-export commonly used types at the crate root for convenience
pub use config::*;
pub use error::*;
pub use network::address::{classify_host, AddressType};

/// Version of the common crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(VERSION.chars().any(|c| c.is_ascii_digit()));
    }
}
