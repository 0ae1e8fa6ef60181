//! DNS resolver facade

use super::ProbeOutcome;
use async_trait::async_trait;
use common::NetworkError;
use std::net::IpAddr;
use tracing::{debug, warn, Instrument, Span};

/// Resolves a host name to its IP addresses
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolve `host` to every address it maps to, in resolver order
    async fn resolve(&self, host: &str) -> ProbeOutcome<Vec<IpAddr>>;
}

/// Resolver backed by the operating system (`getaddrinfo`)
#[derive(Debug, Clone)]
pub struct SystemResolver {
    span: Span,
}

impl SystemResolver {
    /// Create a resolver logging under `span`
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(tracing::info_span!("dns"))
    }
}

#[async_trait]
impl DnsResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> ProbeOutcome<Vec<IpAddr>> {
        let lookup = async {
            match lookup(host).await {
                Ok(addresses) => {
                    debug!(host, ?addresses, "Resolved host");
                    ProbeOutcome::Observed(addresses)
                }
                Err(err) => {
                    warn!(host, "DNS lookup failed: {err}");
                    ProbeOutcome::Unavailable(err)
                }
            }
        };
        lookup.instrument(self.span.clone()).await
    }
}

/// Strip the brackets URLs put around IPv6 literals
pub(crate) fn bare_host(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}

async fn lookup(host: &str) -> Result<Vec<IpAddr>, NetworkError> {
    let host = bare_host(host);
    let resolved = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|e| NetworkError::resolution_failed(host, e))?;

    // getaddrinfo repeats each address once per socket type
    let mut addresses: Vec<IpAddr> = Vec::new();
    for addr in resolved {
        if !addresses.contains(&addr.ip()) {
            addresses.push(addr.ip());
        }
    }

    if addresses.is_empty() {
        return Err(NetworkError::resolution_failed(host, "no addresses returned"));
    }

    Ok(addresses)
}
