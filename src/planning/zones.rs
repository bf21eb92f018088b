//! Availability zone selection and per-group instantiation.

use crate::error::{PlanError, Result};
use crate::models::{AvailabilityZone, SubnetGroupSpec};
use itertools::Itertools;

/// The zones one subnet group is instantiated in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInstances {
    pub group_name: String,
    pub zones: Vec<AvailabilityZone>,
}

/// Select the first `max_azs` distinct zones, keeping the provider's order.
///
/// Asking for more zones than the region reports is an error, never clamped.
pub fn select_zones(
    available: &[AvailabilityZone],
    max_azs: usize,
) -> Result<Vec<AvailabilityZone>> {
    let distinct: Vec<AvailabilityZone> = available.iter().unique().cloned().collect();
    if max_azs > distinct.len() {
        return Err(PlanError::InsufficientZones {
            requested: max_azs,
            available: distinct.len(),
        });
    }
    Ok(distinct.into_iter().take(max_azs).collect())
}

/// Every declared group once per selected zone, in group then zone order.
pub fn instances_per_group(
    groups: &[SubnetGroupSpec],
    zones: &[AvailabilityZone],
) -> Vec<GroupInstances> {
    groups
        .iter()
        .map(|g| GroupInstances {
            group_name: g.name.clone(),
            zones: zones.to_vec(),
        })
        .collect()
}
