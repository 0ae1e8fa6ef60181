//! ICMP reachability probe

use super::{dns::bare_host, DnsResolver, ProbeOutcome};
use async_trait::async_trait;
use common::NetworkError;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use surge_ping::{Client, Config, PingIdentifier, PingSequence, SurgeError, ICMP};
use tracing::{debug, info, warn, Instrument, Span};

/// Checks whether a host answers on the network
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReachabilityProber: Send + Sync {
    /// `Observed(true)` if the host replied, `Observed(false)` if it stayed silent
    async fn probe(&self, host: &str) -> ProbeOutcome<bool>;
}

/// Sends a single ICMP echo request and waits for the reply
///
/// Domain names are resolved first; the echo goes to the first address.
pub struct IcmpProber {
    resolver: Arc<dyn DnsResolver>,
    timeout: Duration,
    payload_size: usize,
    span: Span,
}

impl IcmpProber {
    /// Create a prober resolving names through `resolver`
    pub fn new(
        resolver: Arc<dyn DnsResolver>,
        timeout: Duration,
        payload_size: usize,
        span: Span,
    ) -> Self {
        Self {
            resolver,
            timeout,
            payload_size,
            span,
        }
    }

    async fn target(&self, host: &str) -> Result<IpAddr, NetworkError> {
        if let Ok(ip) = bare_host(host).parse::<IpAddr>() {
            return Ok(ip);
        }

        match self.resolver.resolve(host).await {
            ProbeOutcome::Observed(addresses) => addresses
                .into_iter()
                .next()
                .ok_or_else(|| NetworkError::resolution_failed(host, "no addresses returned")),
            ProbeOutcome::Unavailable(err) => Err(err),
        }
    }

    async fn echo(&self, ip: IpAddr) -> Result<bool, NetworkError> {
        let config = match ip {
            IpAddr::V4(_) => Config::default(),
            IpAddr::V6(_) => Config::builder().kind(ICMP::V6).build(),
        };
        let client = Client::new(&config).map_err(|source| NetworkError::SocketUnavailable {
            kind: "ICMP".to_string(),
            source,
        })?;

        let mut pinger = client.pinger(ip, PingIdentifier(rand::random())).await;
        pinger.timeout(self.timeout);

        let payload = vec![0u8; self.payload_size];
        match pinger.ping(PingSequence(0), &payload).await {
            Ok((_packet, rtt)) => {
                debug!(%ip, ?rtt, "Echo reply received");
                Ok(true)
            }
            Err(SurgeError::Timeout { .. }) => Ok(false),
            Err(e) => Err(NetworkError::probe_failed(ip.to_string(), e)),
        }
    }
}

#[async_trait]
impl ReachabilityProber for IcmpProber {
    async fn probe(&self, host: &str) -> ProbeOutcome<bool> {
        let probe = async {
            let result = match self.target(host).await {
                Ok(ip) => self.echo(ip).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(reachable) => {
                    info!(host, reachable, "Reachability probe finished");
                    ProbeOutcome::Observed(reachable)
                }
                Err(err) => {
                    warn!(host, "Reachability probe failed: {err}");
                    ProbeOutcome::Unavailable(err)
                }
            }
        };
        probe.instrument(self.span.clone()).await
    }
}
