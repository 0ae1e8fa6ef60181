//! Logging setup using tracing, with optional systemd journald output
//!
//! Console output (plain text or JSON) is the default. Journald is used when
//! requested and available, falling back to console otherwise.

pub mod init;

pub use init::{init_logging, LogFormat};
