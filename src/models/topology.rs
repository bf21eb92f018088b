//! Planned network topology: the ordered set of subnets in one network.

use super::{AddressBlock, AvailabilityZone, Subnet, SubnetKey, SubnetRole};
use serde::{Deserialize, Serialize};

/// Ordered subnets of one network, unique on [`SubnetKey`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    /// Name tag of the network itself, set by the name tagger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub cidr: AddressBlock,
    pub zones: Vec<AvailabilityZone>,
    pub subnets: Vec<Subnet>,
}

impl Topology {
    pub fn get(&self, key: &SubnetKey) -> Option<&Subnet> {
        self.subnets
            .iter()
            .find(|s| s.group_name == key.group && s.az == key.az)
    }

    /// Subnets of `role`, in build order.
    pub fn subnets_with_role(&self, role: SubnetRole) -> impl Iterator<Item = &Subnet> {
        self.subnets.iter().filter(move |s| s.role == role)
    }

    pub fn public_subnets(&self) -> impl Iterator<Item = &Subnet> {
        self.subnets_with_role(SubnetRole::Public)
    }

    pub fn len(&self) -> usize {
        self.subnets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subnets.is_empty()
    }
}
