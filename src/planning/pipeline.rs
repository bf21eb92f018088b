//! Full planning pipeline: configuration in, serializable plan out.

use super::naming::{self, Tags};
use super::{endpoint, gateway, topology, zones};
use crate::config::TopologyConfig;
use crate::error::Result;
use crate::models::{
    addr_to_bits, last_offset, EndpointAttachment, Gateway, RouteTarget, SecurityRule, SubnetKey,
    Topology,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the materialization layer needs to create or update resources.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopologyPlan {
    pub topology: Topology,
    pub gateways: Vec<Gateway>,
    pub gateway_endpoints: Vec<EndpointAttachment>,
    pub interface_endpoints: Vec<EndpointAttachment>,
    /// Shared ingress rule of the interface endpoints, if there are any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_rule: Option<SecurityRule>,
    pub topology_tags: Tags,
    pub subnet_tags: BTreeMap<SubnetKey, Tags>,
    pub routes: BTreeMap<SubnetKey, RouteTarget>,
}

/// Run every planner in order. Fails fast; no partial plan is returned.
pub fn plan_topology(config: &TopologyConfig) -> Result<TopologyPlan> {
    config.validate()?;

    let selected = zones::select_zones(&config.availability_zones, config.max_azs)?;
    let built = topology::build(&config.subnet_groups, &selected, &config.address_block)?;

    let gateways = gateway::plan(&built, config.nat_gateways())?;
    let bound = gateway::bind_egress(&built, &gateways)?;

    let selector = &config.endpoint_subnets;
    let gateway_endpoints = endpoint::attach_gateway(
        &bound,
        |s| selector.matches(s),
        &config.gateway_endpoint_services,
    )?;
    let ingress_cidr = config.ingress_cidr();
    let interface_endpoints = endpoint::attach(
        &bound,
        |s| selector.matches(s),
        &config.interface_endpoint_services,
        &ingress_cidr,
        config.allowed_ingress_port,
    )?;
    let security_rule = (!interface_endpoints.is_empty())
        .then(|| endpoint::security_rule(&ingress_cidr, config.allowed_ingress_port));

    let all_endpoints: Vec<EndpointAttachment> = gateway_endpoints
        .iter()
        .chain(interface_endpoints.iter())
        .cloned()
        .collect();
    let annotated = endpoint::annotate_endpoints(&bound, &all_endpoints);
    let tagged = naming::tag_topology(&annotated, &config.base_id);

    let routes = tagged
        .subnets
        .iter()
        .map(|s| (s.key(), s.route_target()))
        .collect();

    log::debug!(
        "Planned {} subnets, {} gateways, {} endpoint attachments",
        tagged.len(),
        gateways.len(),
        all_endpoints.len()
    );

    Ok(TopologyPlan {
        topology_tags: naming::topology_tags(&tagged),
        subnet_tags: naming::subnet_tags(&tagged),
        topology: tagged,
        gateways,
        gateway_endpoints,
        interface_endpoints,
        security_rule,
        routes,
    })
}

/// Number of further `/mask` blocks that fit after the planned subnets.
///
/// Uses the same aligned placement as [`super::address::partition`], so appending
/// that many `/mask` requests to the plan's requests would still succeed.
pub fn remaining_capacity(plan: &TopologyPlan, mask: u8) -> u128 {
    let parent = plan.topology.cidr.network();
    if mask < parent.mask || mask > parent.width() {
        return 0;
    }
    let base = addr_to_bits(parent.addr);
    let parent_last = last_offset(parent.host_bits());

    // Offset of the first address after the highest planned subnet.
    let cursor = plan
        .topology
        .subnets
        .iter()
        .map(|s| addr_to_bits(s.cidr.hi()) - base)
        .max()
        .map_or(Some(0), |end| end.checked_add(1));

    let child_last = last_offset(parent.width() - mask);
    let aligned = cursor
        .and_then(|next| next.checked_add(child_last))
        .map(|v| v & !child_last);
    match aligned {
        Some(start) if start <= parent_last => {
            let span = parent_last - start;
            span.checked_shr(u32::from(parent.width() - mask)).unwrap_or(0) + 1
        }
        _ => 0,
    }
}
