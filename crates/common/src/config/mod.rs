//! # Configuration Abstractions
//!
//! Layered configuration loading shared by netscope components.

pub mod loader;

pub use loader::*;
