//! Name tags and well-known role tags.
//!
//! Tagging is computed up front as a pure function of the topology, so
//! re-applying it always yields the same values.

use crate::models::{SubnetKey, SubnetRole, Topology};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

/// Tag key/value pairs of one resource.
pub type Tags = BTreeMap<String, String>;

pub const NAME_TAG: &str = "Name";
pub const SUBNET_GROUP_TAG: &str = "subnet-group";
pub const SUBNET_TYPE_TAG: &str = "subnet-type";
/// Marks subnets eligible for internal load balancers. Fixed external contract.
pub const INTERNAL_ELB_TAG: &str = "kubernetes.io/role/internal-elb";

lazy_static! {
    static ref TRAILING_ORDINAL: Regex = Regex::new(r"[-_]?[0-9]+$").expect("Invalid Regex?");
}

/// Group name with any trailing ordinal suffix removed (`public-subnet-1` -> `public-subnet`).
pub fn role_label(group_name: &str) -> &str {
    match TRAILING_ORDINAL.find(group_name) {
        Some(m) if m.start() > 0 => &group_name[..m.start()],
        _ => group_name,
    }
}

/// `"<base_id>-<role label>-<az>"`.
pub fn tag_name(base_id: &str, group_name: &str, az: &str) -> String {
    format!("{base_id}-{label}-{az}", label = role_label(group_name))
}

/// Set the Name of the topology and of every subnet. Re-tagging is a no-op.
pub fn tag_topology(topology: &Topology, base_id: &str) -> Topology {
    let mut tagged = topology.clone();
    tagged.name = Some(base_id.to_string());
    for subnet in tagged.subnets.iter_mut() {
        subnet.name = Some(tag_name(base_id, &subnet.group_name, subnet.az.as_str()));
    }
    tagged
}

pub fn topology_tags(topology: &Topology) -> Tags {
    let mut tags = Tags::new();
    if let Some(name) = &topology.name {
        tags.insert(NAME_TAG.to_string(), name.clone());
    }
    tags
}

/// Tags of every subnet, keyed by subnet.
pub fn subnet_tags(topology: &Topology) -> BTreeMap<SubnetKey, Tags> {
    topology
        .subnets
        .iter()
        .map(|subnet| {
            let mut tags = Tags::new();
            if let Some(name) = &subnet.name {
                tags.insert(NAME_TAG.to_string(), name.clone());
            }
            tags.insert(SUBNET_GROUP_TAG.to_string(), subnet.group_name.clone());
            tags.insert(
                SUBNET_TYPE_TAG.to_string(),
                subnet.role.type_label().to_string(),
            );
            if subnet.role == SubnetRole::Isolated {
                tags.insert(INTERNAL_ELB_TAG.to_string(), "1".to_string());
            }
            (subnet.key(), tags)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddressBlock, AvailabilityZone, SubnetGroupSpec};
    use crate::planning::topology::build;

    #[test]
    fn test_role_label() {
        assert_eq!(role_label("public-subnet-1"), "public-subnet");
        assert_eq!(role_label("private_subnet_12"), "private_subnet");
        assert_eq!(role_label("PublicSubnet2"), "PublicSubnet");
        assert_eq!(role_label("isolated"), "isolated");
        assert_eq!(role_label("2024"), "2024");
        assert_eq!(role_label(""), "");
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(
            tag_name("my-cdk-vpc", "public-subnet-1", "us-east-1a"),
            "my-cdk-vpc-public-subnet-us-east-1a"
        );
        // Same role in another zone shares the label.
        assert_eq!(
            tag_name("my-cdk-vpc", "public-subnet-2", "us-east-1b"),
            "my-cdk-vpc-public-subnet-us-east-1b"
        );
        assert_eq!(
            tag_name("vpc", "db", "a"),
            tag_name("vpc", "db", "a"),
        );
    }

    fn sample_topology() -> Topology {
        let groups = vec![
            SubnetGroupSpec::new("public-subnet-1", SubnetRole::Public, 24),
            SubnetGroupSpec::new("isolated-subnet-1", SubnetRole::Isolated, 28),
        ];
        let zones = vec![AvailabilityZone::new("a"), AvailabilityZone::new("b")];
        build(&groups, &zones, &AddressBlock::new("10.0.0.0/16").unwrap()).unwrap()
    }

    #[test]
    fn test_tag_topology_is_idempotent() {
        let topology = sample_topology();
        let once = tag_topology(&topology, "my-cdk-vpc");
        let twice = tag_topology(&once, "my-cdk-vpc");
        assert_eq!(once, twice);
        assert_eq!(once.name.as_deref(), Some("my-cdk-vpc"));
        assert_eq!(
            once.subnets[1].name.as_deref(),
            Some("my-cdk-vpc-public-subnet-b")
        );
    }

    #[test]
    fn test_subnet_tags() {
        let tagged = tag_topology(&sample_topology(), "my-cdk-vpc");
        let tags = subnet_tags(&tagged);
        assert_eq!(tags.len(), 4);

        let public = &tags[&SubnetKey::new("public-subnet-1", "a")];
        assert_eq!(public[NAME_TAG], "my-cdk-vpc-public-subnet-a");
        assert_eq!(public[SUBNET_TYPE_TAG], "Public");
        assert!(!public.contains_key(INTERNAL_ELB_TAG));

        let isolated = &tags[&SubnetKey::new("isolated-subnet-1", "b")];
        assert_eq!(isolated[INTERNAL_ELB_TAG], "1");
        assert_eq!(isolated[SUBNET_GROUP_TAG], "isolated-subnet-1");

        assert_eq!(topology_tags(&tagged)[NAME_TAG], "my-cdk-vpc");
        assert!(topology_tags(&sample_topology()).is_empty());
    }
}
