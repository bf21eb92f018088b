//! Subnet group declarations and planned subnet records.

use super::{AddressBlock, AvailabilityZone, GatewayId, ServiceId};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Routing role of a subnet group.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubnetRole {
    /// Routes to and from the internet through an internet gateway.
    Public,
    /// Outbound-only internet access through a NAT gateway.
    #[serde(alias = "PRIVATE_WITH_EGRESS")]
    PrivateEgress,
    /// No route to the internet in either direction.
    #[serde(alias = "PRIVATE_ISOLATED")]
    Isolated,
}

impl SubnetRole {
    /// Value of the `subnet-type` tag.
    pub fn type_label(&self) -> &'static str {
        match self {
            SubnetRole::Public => "Public",
            SubnetRole::PrivateEgress => "Private",
            SubnetRole::Isolated => "Isolated",
        }
    }
}

impl fmt::Display for SubnetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_label())
    }
}

/// A declared subnet group, instantiated once per selected zone.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetGroupSpec {
    pub name: String,
    pub role: SubnetRole,
    /// Prefix length of every subnet in this group.
    pub cidr_mask: u8,
}

impl SubnetGroupSpec {
    pub fn new(name: impl Into<String>, role: SubnetRole, cidr_mask: u8) -> Self {
        SubnetGroupSpec {
            name: name.into(),
            role,
            cidr_mask,
        }
    }
}

/// Unique key of a subnet within a topology.
///
/// Serialized as `"<group>@<az>"` so it can key JSON maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubnetKey {
    pub group: String,
    pub az: AvailabilityZone,
}

impl SubnetKey {
    pub fn new(group: impl Into<String>, az: impl Into<AvailabilityZone>) -> Self {
        SubnetKey {
            group: group.into(),
            az: az.into(),
        }
    }
}

impl fmt::Display for SubnetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.group, self.az)
    }
}

impl Serialize for SubnetKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SubnetKey {
    fn deserialize<D>(deserializer: D) -> Result<SubnetKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let (group, az) = s
            .rsplit_once('@')
            .ok_or_else(|| de::Error::custom(format!("invalid subnet key: {s}")))?;
        Ok(SubnetKey::new(group, AvailabilityZone::new(az)))
    }
}

/// Where a subnet's default route points.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "target")]
pub enum RouteTarget {
    InternetGateway,
    NatGateway(GatewayId),
    /// Routes within the network only.
    Local,
}

/// A planned subnet: one instance of a group in one zone.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    pub group_name: String,
    pub role: SubnetRole,
    pub az: AvailabilityZone,
    pub cidr: AddressBlock,
    /// 1-based position within its group.
    pub ordinal: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_binding: Option<GatewayId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<ServiceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Subnet {
    pub fn key(&self) -> SubnetKey {
        SubnetKey::new(self.group_name.clone(), self.az.clone())
    }

    pub fn route_target(&self) -> RouteTarget {
        match (self.role, &self.gateway_binding) {
            (SubnetRole::Public, _) => RouteTarget::InternetGateway,
            (SubnetRole::PrivateEgress, Some(gw)) => RouteTarget::NatGateway(gw.clone()),
            _ => RouteTarget::Local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_config_names() {
        let role: SubnetRole = serde_json::from_str("\"PRIVATE_WITH_EGRESS\"").unwrap();
        assert_eq!(role, SubnetRole::PrivateEgress);
        let role: SubnetRole = serde_json::from_str("\"PRIVATE_EGRESS\"").unwrap();
        assert_eq!(role, SubnetRole::PrivateEgress);
        let role: SubnetRole = serde_json::from_str("\"ISOLATED\"").unwrap();
        assert_eq!(role, SubnetRole::Isolated);
        assert!(serde_json::from_str::<SubnetRole>("\"DMZ\"").is_err());
    }

    #[test]
    fn test_subnet_key_string_form() {
        let key = SubnetKey::new("public-subnet-1", "us-east-1a");
        assert_eq!(key.to_string(), "public-subnet-1@us-east-1a");
        let json = serde_json::to_string(&key).unwrap();
        let back: SubnetKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_route_target() {
        let mut subnet = Subnet {
            group_name: "private-subnet-1".to_string(),
            role: SubnetRole::PrivateEgress,
            az: AvailabilityZone::new("a"),
            cidr: AddressBlock::new("10.0.4.0/24").unwrap(),
            ordinal: 1,
            gateway_binding: None,
            endpoints: vec![],
            name: None,
        };
        assert_eq!(subnet.route_target(), RouteTarget::Local);
        subnet.gateway_binding = Some(GatewayId::new("nat-gateway-1"));
        assert_eq!(
            subnet.route_target(),
            RouteTarget::NatGateway(GatewayId::new("nat-gateway-1"))
        );
        subnet.role = SubnetRole::Public;
        assert_eq!(subnet.route_target(), RouteTarget::InternetGateway);
    }
}
