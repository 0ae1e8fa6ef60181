//! Reachability probe configuration

use serde::{Deserialize, Serialize};

/// ICMP probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Time to wait for an echo reply, in seconds
    pub ping_timeout_secs: u64,

    /// Echo request payload size in bytes
    pub ping_payload_size: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ping_timeout_secs: 5,
            ping_payload_size: 32,
        }
    }
}
