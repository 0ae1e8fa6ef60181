//! Operating system network interface source
//!
//! Interfaces come from `pnet`'s datalink enumeration. On Linux, operational
//! state, link type and link speed are read from `/sys/class/net`.

use common::NetworkError;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use utoipa::ToSchema;

/// Operational state reported by the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OperationalStatus {
    Up,
    Down,
    Dormant,
    NotPresent,
    LowerLayerDown,
    Testing,
    Unknown,
}

/// Link layer kind of an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum InterfaceKind {
    Loopback,
    Ethernet,
    Wireless,
    /// Point-to-point links such as VPN tunnels
    Tunnel,
    Unknown,
}

/// An IPv4 unicast address with its netmask, when known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Entry {
    pub address: Ipv4Addr,
    pub netmask: Option<Ipv4Addr>,
}

/// One interface as seen by the OS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub name: String,
    pub description: String,
    pub status: OperationalStatus,
    pub kind: InterfaceKind,
    /// Colon separated lowercase hex, `None` for interfaces without a hardware address
    pub mac: Option<String>,
    /// IPv4 unicast addresses in enumeration order
    pub ipv4: Vec<Ipv4Entry>,
}

impl InterfaceRecord {
    /// Returns true if the interface is operationally up
    pub fn is_up(&self) -> bool {
        self.status == OperationalStatus::Up
    }

    /// First IPv4 address in enumeration order
    pub fn primary_ipv4(&self) -> Option<&Ipv4Entry> {
        self.ipv4.first()
    }
}

/// Source of interface information
///
/// Calls block on OS queries; async callers should run them on the blocking pool.
pub trait InterfaceSource: Send + Sync {
    /// Every interface the OS knows about, whatever its state
    fn interfaces(&self) -> Result<Vec<InterfaceRecord>, NetworkError>;

    /// Link speed in bits per second, `None` when the OS reports none
    fn link_speed(&self, name: &str) -> Result<Option<u64>, NetworkError>;
}

/// Interface source backed by the running system
#[derive(Debug, Clone, Default)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<InterfaceRecord>, NetworkError> {
        Ok(datalink::interfaces().iter().map(to_record).collect())
    }

    fn link_speed(&self, name: &str) -> Result<Option<u64>, NetworkError> {
        platform::link_speed(name)
    }
}

fn to_record(iface: &NetworkInterface) -> InterfaceRecord {
    let ipv4 = iface
        .ips
        .iter()
        .filter_map(|network| match network {
            IpNetwork::V4(v4) => Some(Ipv4Entry {
                address: v4.ip(),
                netmask: Some(v4.mask()),
            }),
            IpNetwork::V6(_) => None,
        })
        .collect();

    let mac = iface
        .mac
        .filter(|mac| !mac.is_zero())
        .map(|mac| mac.to_string());

    let description = if iface.description.is_empty() {
        iface.name.clone()
    } else {
        iface.description.clone()
    };

    InterfaceRecord {
        name: iface.name.clone(),
        description,
        status: platform::operational_status(iface),
        kind: platform::interface_kind(iface),
        mac,
        ipv4,
    }
}

/// Map a sysfs `operstate` value
///
/// Loopback and tun devices report `unknown` while passing traffic, so
/// `unknown` counts as up when the UP and RUNNING flags are set.
pub fn parse_operstate(state: &str, up_and_running: bool) -> OperationalStatus {
    match state.trim() {
        "up" => OperationalStatus::Up,
        "down" => OperationalStatus::Down,
        "dormant" => OperationalStatus::Dormant,
        "notpresent" => OperationalStatus::NotPresent,
        "lowerlayerdown" => OperationalStatus::LowerLayerDown,
        "testing" => OperationalStatus::Testing,
        _ if up_and_running => OperationalStatus::Up,
        _ => OperationalStatus::Unknown,
    }
}

/// Parse a sysfs `speed` value (Mbit/s) into bits per second
///
/// Negative values mean the driver does not know the speed.
pub fn parse_link_speed(name: &str, raw: &str) -> Result<Option<u64>, NetworkError> {
    let mbits: i64 = raw
        .trim()
        .parse()
        .map_err(|e| NetworkError::interface(name, format!("invalid link speed {raw:?}: {e}")))?;

    Ok(u64::try_from(mbits).ok().map(|m| m * 1_000_000))
}

fn flags_status(iface: &NetworkInterface) -> OperationalStatus {
    if iface.is_up() && iface.is_running() {
        OperationalStatus::Up
    } else {
        OperationalStatus::Down
    }
}

fn flags_kind(iface: &NetworkInterface) -> Option<InterfaceKind> {
    if iface.is_loopback() {
        Some(InterfaceKind::Loopback)
    } else if iface.is_point_to_point() {
        Some(InterfaceKind::Tunnel)
    } else {
        None
    }
}

#[cfg(target_os = "linux")]
mod platform {
    use super::*;
    use std::io::ErrorKind;
    use std::path::PathBuf;

    /// ARPHRD_ETHER
    const ARPHRD_ETHER: &str = "1";

    fn sysfs(name: &str, attribute: &str) -> PathBuf {
        PathBuf::from("/sys/class/net").join(name).join(attribute)
    }

    pub fn operational_status(iface: &NetworkInterface) -> OperationalStatus {
        match std::fs::read_to_string(sysfs(&iface.name, "operstate")) {
            Ok(state) => parse_operstate(&state, iface.is_up() && iface.is_running()),
            Err(_) => flags_status(iface),
        }
    }

    pub fn interface_kind(iface: &NetworkInterface) -> InterfaceKind {
        if let Some(kind) = flags_kind(iface) {
            return kind;
        }
        if sysfs(&iface.name, "wireless").exists() {
            return InterfaceKind::Wireless;
        }
        match std::fs::read_to_string(sysfs(&iface.name, "type")) {
            Ok(kind) if kind.trim() == ARPHRD_ETHER => InterfaceKind::Ethernet,
            _ => InterfaceKind::Unknown,
        }
    }

    pub fn link_speed(name: &str) -> Result<Option<u64>, NetworkError> {
        match std::fs::read_to_string(sysfs(name, "speed")) {
            Ok(raw) => parse_link_speed(name, &raw),
            // Virtual devices have no speed file; down links answer EINVAL
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::InvalidInput) => {
                Ok(None)
            }
            Err(e) => Err(NetworkError::interface(name, e)),
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    use super::*;

    pub fn operational_status(iface: &NetworkInterface) -> OperationalStatus {
        flags_status(iface)
    }

    pub fn interface_kind(iface: &NetworkInterface) -> InterfaceKind {
        flags_kind(iface).unwrap_or(if iface.mac.is_some() {
            InterfaceKind::Ethernet
        } else {
            InterfaceKind::Unknown
        })
    }

    pub fn link_speed(_name: &str) -> Result<Option<u64>, NetworkError> {
        Ok(None)
    }
}
