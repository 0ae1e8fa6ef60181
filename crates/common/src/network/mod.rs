//! Network helpers shared across netscope crates

pub mod address;
