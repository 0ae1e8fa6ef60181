//! Interface enumeration

use crate::api::types::{InterfaceOverview, InterfaceSummary, NetworkInterfaceInfo, UNKNOWN};
use crate::network::{InterfaceRecord, InterfaceSource};
use common::NetworkError;
use metrics::gauge;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lists local interfaces in API form
pub struct InterfaceEnumerator {
    source: Arc<dyn InterfaceSource>,
    span: tracing::Span,
}

impl InterfaceEnumerator {
    /// Create an enumerator reading from `source`
    pub fn new(source: Arc<dyn InterfaceSource>, span: tracing::Span) -> Self {
        Self { source, span }
    }

    /// Interfaces that are up and carry at least one IPv4 address
    ///
    /// An interface whose details cannot be read is logged and skipped.
    pub fn list_interfaces(&self) -> Result<Vec<NetworkInterfaceInfo>, NetworkError> {
        let _guard = self.span.enter();

        let records = self.source.interfaces()?;
        info!("Found {} network interfaces", records.len());

        let mut interfaces = Vec::new();
        for record in &records {
            if !record.is_up() {
                debug!(interface = %record.name, status = ?record.status, "Skipping interface that is not up");
                continue;
            }

            match self.describe(record) {
                Ok(Some(info)) => {
                    debug!(interface = %info.name, ip = %info.ip_address, "Added interface");
                    interfaces.push(info);
                }
                Ok(None) => {
                    debug!(interface = %record.name, "Interface has no IPv4 address");
                }
                Err(err) => {
                    warn!(interface = %record.name, "Skipping interface: {err}");
                }
            }
        }

        gauge!("netscope_interfaces_listed").set(interfaces.len() as f64);
        info!("Listed {} usable interfaces", interfaces.len());
        Ok(interfaces)
    }

    /// Every interface regardless of state, with up/IPv4 flags
    pub fn overview(&self) -> Result<InterfaceOverview, NetworkError> {
        let _guard = self.span.enter();

        let records = self.source.interfaces()?;
        let interfaces: Vec<InterfaceSummary> = records
            .into_iter()
            .map(|record| {
                let speed = match self.source.link_speed(&record.name) {
                    Ok(speed) => speed,
                    Err(err) => {
                        debug!(interface = %record.name, "Link speed unavailable: {err}");
                        None
                    }
                };
                InterfaceSummary {
                    is_up: record.is_up(),
                    has_ipv4: !record.ipv4.is_empty(),
                    operational_status: record.status,
                    interface_type: record.kind,
                    speed_bits_per_second: speed,
                    name: record.name,
                    description: record.description,
                }
            })
            .collect();

        Ok(InterfaceOverview {
            total_interfaces: interfaces.len(),
            interfaces,
        })
    }

    fn describe(
        &self,
        record: &InterfaceRecord,
    ) -> Result<Option<NetworkInterfaceInfo>, NetworkError> {
        let Some(primary) = record.primary_ipv4() else {
            return Ok(None);
        };

        let speed = self.source.link_speed(&record.name)?;

        Ok(Some(NetworkInterfaceInfo {
            name: record.name.clone(),
            description: record.description.clone(),
            ip_address: primary.address.to_string(),
            subnet_mask: primary
                .netmask
                .map(|mask| mask.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            mac_address: record.mac.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            operational_status: record.status,
            speed_bits_per_second: speed,
            interface_type: record.kind,
        }))
    }
}
