//! Domain models for topology planning.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`AddressBlock`] - IPv4/IPv6 block with CIDR notation support
//! - [`Subnet`], [`SubnetGroupSpec`] - declared groups and planned subnets
//! - [`Topology`] - the ordered set of planned subnets
//! - [`Gateway`], [`EndpointAttachment`] - egress and service attachments

mod cidr;
mod endpoint;
mod gateway;
mod subnet;
mod topology;
mod zone;

// Re-export public types
pub use cidr::{
    addr_to_bits, bits_to_addr, get_cidr_mask, last_offset, max_length, AddressBlock,
    MAX_LENGTH_V4, MAX_LENGTH_V6,
};
pub use endpoint::{EndpointAttachment, EndpointKind, SecurityRule, ServiceId};
pub use gateway::{ElasticAddress, Gateway, GatewayId};
pub use subnet::{RouteTarget, Subnet, SubnetGroupSpec, SubnetKey, SubnetRole};
pub use topology::Topology;
pub use zone::AvailabilityZone;
