//! Low-level network probes and OS queries
//!
//! Everything here is best-effort: probes report failures through
//! [`ProbeOutcome`] rather than `Result`, so callers decide how to degrade.

pub mod dns;
pub mod interfaces;
pub mod outcome;
pub mod reachability;

pub use dns::{DnsResolver, SystemResolver};
pub use interfaces::{
    InterfaceKind, InterfaceRecord, InterfaceSource, Ipv4Entry, OperationalStatus,
    SystemInterfaces,
};
pub use outcome::ProbeOutcome;
pub use reachability::{IcmpProber, ReachabilityProber};
