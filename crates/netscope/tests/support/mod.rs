#![allow(dead_code)]

//! Deterministic network backends for router tests

use async_trait::async_trait;
use common::NetworkError;
use netscope::config::Config;
use netscope::network::{
    DnsResolver, InterfaceKind, InterfaceRecord, InterfaceSource, Ipv4Entry, OperationalStatus,
    ProbeOutcome, ReachabilityProber,
};
use netscope::AppState;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

pub struct StubInterfaces;

impl InterfaceSource for StubInterfaces {
    fn interfaces(&self) -> Result<Vec<InterfaceRecord>, NetworkError> {
        Ok(vec![
            InterfaceRecord {
                name: "lo".to_string(),
                description: "lo".to_string(),
                status: OperationalStatus::Up,
                kind: InterfaceKind::Loopback,
                mac: None,
                ipv4: vec![Ipv4Entry {
                    address: Ipv4Addr::LOCALHOST,
                    netmask: Some(Ipv4Addr::new(255, 0, 0, 0)),
                }],
            },
            InterfaceRecord {
                name: "eth0".to_string(),
                description: "Onboard Ethernet".to_string(),
                status: OperationalStatus::Up,
                kind: InterfaceKind::Ethernet,
                mac: Some("02:42:ac:11:00:02".to_string()),
                ipv4: vec![Ipv4Entry {
                    address: Ipv4Addr::new(192, 168, 1, 10),
                    netmask: Some(Ipv4Addr::new(255, 255, 255, 0)),
                }],
            },
            InterfaceRecord {
                name: "eth1".to_string(),
                description: "eth1".to_string(),
                status: OperationalStatus::Down,
                kind: InterfaceKind::Ethernet,
                mac: None,
                ipv4: vec![],
            },
        ])
    }

    fn link_speed(&self, name: &str) -> Result<Option<u64>, NetworkError> {
        Ok((name == "eth0").then_some(1_000_000_000))
    }
}

pub struct StubResolver;

#[async_trait]
impl DnsResolver for StubResolver {
    async fn resolve(&self, host: &str) -> ProbeOutcome<Vec<IpAddr>> {
        match host {
            "example.com" => ProbeOutcome::Observed(vec![IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34))]),
            _ => ProbeOutcome::Unavailable(NetworkError::resolution_failed(host, "not in stub")),
        }
    }
}

pub struct StubProber;

#[async_trait]
impl ReachabilityProber for StubProber {
    async fn probe(&self, host: &str) -> ProbeOutcome<bool> {
        ProbeOutcome::Observed(host == "example.com")
    }
}

pub fn state(config: Config) -> AppState {
    AppState::new(
        Arc::new(config),
        Arc::new(StubInterfaces),
        Arc::new(StubResolver),
        Arc::new(StubProber),
    )
}

/// Error text that must never reach a response body
pub const INTERNAL_DETAIL: &str = "permission denied reading /proc/net/dev";

pub struct FailingInterfaces;

impl InterfaceSource for FailingInterfaces {
    fn interfaces(&self) -> Result<Vec<InterfaceRecord>, NetworkError> {
        Err(NetworkError::interface("*", INTERNAL_DETAIL))
    }

    fn link_speed(&self, name: &str) -> Result<Option<u64>, NetworkError> {
        Err(NetworkError::interface(name, INTERNAL_DETAIL))
    }
}

pub struct PanickingResolver;

#[async_trait]
impl DnsResolver for PanickingResolver {
    async fn resolve(&self, host: &str) -> ProbeOutcome<Vec<IpAddr>> {
        panic!("resolver crashed on {host}: {INTERNAL_DETAIL}");
    }
}

/// State whose interface source fails and whose resolver panics
pub fn broken_state() -> AppState {
    AppState::new(
        Arc::new(Config::default()),
        Arc::new(FailingInterfaces),
        Arc::new(PanickingResolver),
        Arc::new(StubProber),
    )
}
