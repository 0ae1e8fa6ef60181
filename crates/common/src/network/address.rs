//! Host address classification
//!
//! Maps a host string to loopback / private / public for IP literals and to
//! `Domain` for anything else. Private means the RFC1918 IPv4 blocks only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

/// Kind of address a host string denotes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressType {
    /// 127.0.0.0/8 or `::1`
    Loopback,
    /// 10.0.0.0/8, 172.16.0.0/12 or 192.168.0.0/16
    Private,
    /// Any other IP literal
    Public,
    /// Not an IP literal
    Domain,
    /// Not classified yet
    #[default]
    Unknown,
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressType::Loopback => "Loopback",
            AddressType::Private => "Private",
            AddressType::Public => "Public",
            AddressType::Domain => "Domain",
            AddressType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Classify a host string
///
/// Accepts the bracketed IPv6 form used in URLs (`[::1]`).
pub fn classify_host(host: &str) -> AddressType {
    let literal = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    match literal.parse::<IpAddr>() {
        Ok(ip) => classify_ip(ip),
        Err(_) => AddressType::Domain,
    }
}

/// Classify an IP address
pub fn classify_ip(ip: IpAddr) -> AddressType {
    let ip = match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        v4 => v4,
    };

    if ip.is_loopback() {
        return AddressType::Loopback;
    }

    match ip {
        IpAddr::V4(v4) if is_rfc1918(v4) => AddressType::Private,
        _ => AddressType::Public,
    }
}

/// RFC1918 private range check
pub fn is_rfc1918(ip: Ipv4Addr) -> bool {
    match ip.octets() {
        [10, ..] => true,
        [172, second, ..] => (16..=31).contains(&second),
        [192, 168, ..] => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_range() {
        assert_eq!(classify_host("127.0.0.1"), AddressType::Loopback);
        assert_eq!(classify_host("127.255.0.9"), AddressType::Loopback);
        assert_eq!(classify_host("::1"), AddressType::Loopback);
        assert_eq!(classify_host("[::1]"), AddressType::Loopback);
        assert_eq!(classify_host("::ffff:127.0.0.1"), AddressType::Loopback);
    }

    #[test]
    fn test_private_ranges() {
        assert_eq!(classify_host("10.0.0.1"), AddressType::Private);
        assert_eq!(classify_host("10.255.255.255"), AddressType::Private);
        assert_eq!(classify_host("172.16.0.1"), AddressType::Private);
        assert_eq!(classify_host("172.31.255.254"), AddressType::Private);
        assert_eq!(classify_host("192.168.1.10"), AddressType::Private);
        assert_eq!(classify_host("::ffff:192.168.0.1"), AddressType::Private);
    }

    #[test]
    fn test_range_edges_are_public() {
        assert_eq!(classify_host("172.15.255.255"), AddressType::Public);
        assert_eq!(classify_host("172.32.0.0"), AddressType::Public);
        assert_eq!(classify_host("192.169.0.1"), AddressType::Public);
        assert_eq!(classify_host("11.0.0.1"), AddressType::Public);
    }

    #[test]
    fn test_public_literals() {
        assert_eq!(classify_host("8.8.8.8"), AddressType::Public);
        assert_eq!(classify_host("2606:4700:4700::1111"), AddressType::Public);
        assert_eq!(classify_host("[2001:db8::1]"), AddressType::Public);
    }

    #[test]
    fn test_non_ip_is_domain() {
        assert_eq!(classify_host("example.com"), AddressType::Domain);
        assert_eq!(classify_host("localhost"), AddressType::Domain);
        assert_eq!(classify_host("256.1.1.1"), AddressType::Domain);
        assert_eq!(classify_host(""), AddressType::Domain);
    }

    #[test]
    fn test_display_matches_serialized_name() {
        assert_eq!(AddressType::Private.to_string(), "Private");
        assert_eq!(AddressType::default().to_string(), "Unknown");
    }
}
