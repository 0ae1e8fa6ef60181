//! API types for the netscope service
//!
//! Everything here is serialized in camelCase.

use crate::network::{InterfaceKind, OperationalStatus};
use chrono::{DateTime, Utc};
use common::AddressType;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Sentinel used when an interface attribute is not available
pub const UNKNOWN: &str = "Unknown";

/// An operationally up interface with at least one IPv4 address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceInfo {
    /// Interface name
    pub name: String,

    /// OS description, the name when the OS has none
    pub description: String,

    /// First IPv4 address in enumeration order
    pub ip_address: String,

    /// Netmask of that address, or "Unknown"
    pub subnet_mask: String,

    /// Hardware address, or "Unknown"
    pub mac_address: String,

    /// Operational state
    pub operational_status: OperationalStatus,

    /// Link speed, null when the OS reports none
    pub speed_bits_per_second: Option<u64>,

    /// Link layer kind
    pub interface_type: InterfaceKind,
}

/// Status summary of one interface, whatever its state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceSummary {
    pub name: String,
    pub description: String,
    pub operational_status: OperationalStatus,
    pub interface_type: InterfaceKind,
    pub speed_bits_per_second: Option<u64>,
    pub is_up: bool,
    pub has_ipv4: bool,
}

/// Every interface known to the OS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceOverview {
    pub total_interfaces: usize,
    pub interfaces: Vec<InterfaceSummary>,
}

/// One `name[=value]` pair from a query string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameter {
    /// Raw parameter name
    pub name: String,

    /// Percent-decoded value, null when the pair has no `=`
    pub value: Option<String>,
}

/// Result of analyzing a user supplied URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UrlAnalysisResult {
    /// Input exactly as received
    pub original_url: String,
    pub scheme: String,
    pub host: String,
    /// Explicit port or the scheme default
    pub port: Option<u16>,
    pub path: String,
    /// Raw query including the leading `?`, empty when absent
    pub query: String,
    pub query_parameters: Vec<QueryParameter>,
    /// Fragment including the leading `#`, empty when absent
    pub fragment: String,
    pub is_valid: bool,
    pub validation_error: Option<String>,
    /// Whether the host answered an ICMP echo
    pub is_available: bool,
    pub dns_records: Vec<String>,
    #[schema(value_type = String)]
    pub address_type: AddressType,
    pub timestamp: DateTime<Utc>,
    pub user_info: Option<String>,
    pub authority: Option<String>,
    pub absolute_uri: Option<String>,
    pub local_path: Option<String>,
    pub query_string: Option<String>,
    pub path_and_query: Option<String>,
}

impl UrlAnalysisResult {
    /// Result with every field at its pre-enrichment default
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            scheme: String::new(),
            host: String::new(),
            port: None,
            path: String::new(),
            query: String::new(),
            query_parameters: Vec::new(),
            fragment: String::new(),
            is_valid: false,
            validation_error: None,
            is_available: false,
            dns_records: Vec::new(),
            address_type: AddressType::Unknown,
            timestamp: Utc::now(),
            user_info: None,
            authority: None,
            absolute_uri: None,
            local_path: None,
            query_string: None,
            path_and_query: None,
        }
    }
}

/// Averaged bandwidth measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpeedTestResult {
    /// Mean download speed over successful probes, 0 if none succeeded
    pub download_speed_mbps: f64,

    /// Mean upload speed over successful probes, 0 if none succeeded
    pub upload_speed_mbps: f64,

    pub timestamp: DateTime<Utc>,
}

/// Query string of the URL analysis route
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyzeUrlQuery {
    /// URL to analyze; the scheme may be omitted
    pub url: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheckResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Current timestamp
    pub timestamp: DateTime<Utc>,
}
