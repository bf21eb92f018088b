//! Topology building: zones x groups, partitioned in one pass.

use super::address::partition;
use super::zones::instances_per_group;
use crate::error::{PlanError, Result};
use crate::models::{AddressBlock, AvailabilityZone, Subnet, SubnetGroupSpec, Topology};
use std::collections::HashSet;

/// Build the topology for `groups` across `zones` inside `parent`.
///
/// The flattened (group, zone) list is partitioned in a single call so the
/// whole topology is globally non-overlapping, and identical inputs always
/// produce identical CIDRs.
pub fn build(
    groups: &[SubnetGroupSpec],
    zones: &[AvailabilityZone],
    parent: &AddressBlock,
) -> Result<Topology> {
    check_for_duplicate_groups(groups)?;

    let instances = instances_per_group(groups, zones);
    let pairs: Vec<(&SubnetGroupSpec, &AvailabilityZone)> = groups
        .iter()
        .zip(instances.iter())
        .flat_map(|(group, inst)| inst.zones.iter().map(move |az| (group, az)))
        .collect();

    let requests: Vec<u8> = pairs.iter().map(|(g, _)| g.cidr_mask).collect();
    let blocks = partition(parent, &requests)?;

    let mut subnets = Vec::with_capacity(pairs.len());
    let mut ordinal = 0;
    let mut previous_group: Option<&str> = None;
    for ((group, az), cidr) in pairs.into_iter().zip(blocks) {
        if previous_group != Some(group.name.as_str()) {
            ordinal = 0;
            previous_group = Some(group.name.as_str());
        }
        ordinal += 1;
        subnets.push(Subnet {
            group_name: group.name.clone(),
            role: group.role,
            az: az.clone(),
            cidr,
            ordinal,
            gateway_binding: None,
            endpoints: Vec::new(),
            name: None,
        });
    }

    log::debug!(
        "Built topology {} with {} subnets across {} zones",
        parent,
        subnets.len(),
        zones.len()
    );

    Ok(Topology {
        name: None,
        cidr: parent.network(),
        zones: zones.to_vec(),
        subnets,
    })
}

// return error if two groups share a name
fn check_for_duplicate_groups(groups: &[SubnetGroupSpec]) -> Result<()> {
    let mut seen = HashSet::new();
    for group in groups {
        if !seen.insert(group.name.as_str()) {
            return Err(PlanError::DuplicateGroupName(group.name.clone()));
        }
    }
    Ok(())
}
