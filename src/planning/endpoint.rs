//! Gateway and interface endpoint attachment.

use crate::error::{PlanError, Result};
use crate::models::{
    AddressBlock, EndpointAttachment, EndpointKind, SecurityRule, ServiceId, Subnet, SubnetKey,
    SubnetRole, Topology,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Id of the single ingress rule shared by all interface endpoints.
pub const ENDPOINT_SECURITY_RULE_ID: &str = "endpoint-ingress";

/// Configurable subnet predicate for endpoint placement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SubnetSelector {
    All,
    Role(SubnetRole),
    Group(String),
}

impl SubnetSelector {
    pub fn matches(&self, subnet: &Subnet) -> bool {
        match self {
            SubnetSelector::All => true,
            SubnetSelector::Role(role) => subnet.role == *role,
            SubnetSelector::Group(name) => subnet.group_name == *name,
        }
    }
}

impl Default for SubnetSelector {
    fn default() -> Self {
        SubnetSelector::Role(SubnetRole::Isolated)
    }
}

fn select<F>(topology: &Topology, selector: F, services: &[ServiceId]) -> Result<BTreeSet<SubnetKey>>
where
    F: Fn(&Subnet) -> bool,
{
    let selected: BTreeSet<SubnetKey> = topology
        .subnets
        .iter()
        .filter(|s| selector(*s))
        .map(|s| s.key())
        .collect();
    if selected.is_empty() {
        let services: Vec<String> = services.iter().map(|s| s.to_string()).collect();
        return Err(PlanError::EmptySelection {
            services: services.join(", "),
        });
    }
    Ok(selected)
}

/// The ingress rule guarding all interface endpoints of a topology.
pub fn security_rule(allowed_cidr: &AddressBlock, allowed_port: u16) -> SecurityRule {
    SecurityRule {
        id: ENDPOINT_SECURITY_RULE_ID.to_string(),
        ingress_cidr: *allowed_cidr,
        port: allowed_port,
    }
}

/// Attach interface endpoints for `services` to every subnet matching `selector`.
///
/// Every attachment references the single rule built by [`security_rule`]
/// from `allowed_cidr` and `allowed_port`.
pub fn attach<F>(
    topology: &Topology,
    selector: F,
    services: &[ServiceId],
    allowed_cidr: &AddressBlock,
    allowed_port: u16,
) -> Result<Vec<EndpointAttachment>>
where
    F: Fn(&Subnet) -> bool,
{
    if services.is_empty() {
        return Ok(Vec::new());
    }
    let selected = select(topology, selector, services)?;
    let rule = security_rule(allowed_cidr, allowed_port);
    log::debug!(
        "Attaching {} interface endpoint(s) to {} subnet(s), rule {} ingress {}:{}",
        services.len(),
        selected.len(),
        rule.id,
        rule.ingress_cidr,
        rule.port
    );

    Ok(services
        .iter()
        .map(|service| EndpointAttachment {
            service_id: service.clone(),
            kind: EndpointKind::Interface,
            attached_subnets: selected.clone(),
            security_rule_id: Some(rule.id.clone()),
        })
        .collect())
}

/// Attach gateway endpoints for `services`. Gateway endpoints use no security rule.
pub fn attach_gateway<F>(
    topology: &Topology,
    selector: F,
    services: &[ServiceId],
) -> Result<Vec<EndpointAttachment>>
where
    F: Fn(&Subnet) -> bool,
{
    if services.is_empty() {
        return Ok(Vec::new());
    }
    let selected = select(topology, selector, services)?;
    Ok(services
        .iter()
        .map(|service| EndpointAttachment {
            service_id: service.clone(),
            kind: EndpointKind::Gateway,
            attached_subnets: selected.clone(),
            security_rule_id: None,
        })
        .collect())
}

/// Record on every subnet the services attached to it, in attachment order.
pub fn annotate_endpoints(topology: &Topology, attachments: &[EndpointAttachment]) -> Topology {
    let mut per_subnet: BTreeMap<SubnetKey, Vec<ServiceId>> = BTreeMap::new();
    for attachment in attachments {
        for key in &attachment.attached_subnets {
            per_subnet
                .entry(key.clone())
                .or_default()
                .push(attachment.service_id.clone());
        }
    }

    let mut annotated = topology.clone();
    for subnet in annotated.subnets.iter_mut() {
        subnet.endpoints = per_subnet.remove(&subnet.key()).unwrap_or_default();
    }
    annotated
}
