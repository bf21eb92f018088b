//! Error types for topology planning.
//!
//! Every variant is a planning-time validation failure. None are transient,
//! so callers should surface them rather than retry.

use thiserror::Error;

/// Result type for planning operations.
pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("Address space exhausted: cannot fit /{requested} (request #{index}) in {parent}")]
    AddressSpaceExhausted {
        parent: String,
        requested: u8,
        index: usize,
    },

    #[error("Insufficient zones: {requested} requested but only {available} available")]
    InsufficientZones { requested: usize, available: usize },

    #[error("Duplicate subnet group name: {0}")]
    DuplicateGroupName(String),

    #[error("No public subnet available: {requested} gateways requested, {available} public subnets")]
    NoPublicSubnetAvailable { requested: usize, available: usize },

    #[error("No NAT gateway in zone {az} for egress subnet group {group}")]
    NoGatewayInZone { group: String, az: String },

    #[error("Gateway {gateway} is not hosted on a public subnet ({subnet})")]
    GatewayNotOnPublicSubnet { gateway: String, subnet: String },

    #[error("No subnet matches the endpoint selector for service(s) {services}")]
    EmptySelection { services: String },

    #[error("Overlapping subnets: {0}")]
    SubnetOverlap(String),

    #[error("Invalid CIDR: {0}")]
    InvalidCidr(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Error reading configuration {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    #[error("Output error: {0}")]
    Output(String),
}

impl From<std::net::AddrParseError> for PlanError {
    fn from(e: std::net::AddrParseError) -> Self {
        PlanError::InvalidCidr(e.to_string())
    }
}
