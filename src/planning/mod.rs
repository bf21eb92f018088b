//! Topology planning logic.
//!
//! Components, leaf to root:
//! - [`address`] - partition a parent block into child blocks
//! - [`zones`] - select availability zones and instantiate groups per zone
//! - [`topology`] - build the ordered subnet topology
//! - [`gateway`] - NAT gateway placement and egress binding
//! - [`naming`] - Name tags and well-known role tags
//! - [`endpoint`] - gateway and interface endpoint attachments
//! - [`pipeline`] - run all of the above from a configuration

pub mod address;
pub mod endpoint;
pub mod gateway;
pub mod naming;
pub mod pipeline;
pub mod topology;
pub mod zones;

// Re-export public functions
pub use address::partition;
pub use endpoint::{annotate_endpoints, attach, attach_gateway, security_rule, SubnetSelector};
pub use gateway::{bind_egress, plan as plan_gateways};
pub use naming::{subnet_tags, tag_name, tag_topology, topology_tags, Tags};
pub use pipeline::{plan_topology, remaining_capacity, TopologyPlan};
pub use topology::build;
pub use zones::{instances_per_group, select_zones, GroupInstances};
