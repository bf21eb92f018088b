//! NAT gateway model.

use super::SubnetKey;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct GatewayId(pub String);

impl GatewayId {
    pub fn new(id: impl Into<String>) -> Self {
        GatewayId(id.into())
    }
}

impl fmt::Display for GatewayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Elastic address allocated for a NAT gateway.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElasticAddress {
    pub id: String,
    /// Allocation domain, always `vpc` for NAT gateways.
    pub domain: String,
}

impl ElasticAddress {
    pub fn vpc(id: impl Into<String>) -> Self {
        ElasticAddress {
            id: id.into(),
            domain: "vpc".to_string(),
        }
    }
}

/// A NAT gateway hosted on a public subnet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Gateway {
    pub id: GatewayId,
    pub hosting_subnet: SubnetKey,
    pub elastic_address: ElasticAddress,
}

impl Gateway {
    /// Gateway for the 1-based placement `slot`.
    pub fn for_slot(slot: usize, hosting_subnet: SubnetKey) -> Self {
        Gateway {
            id: GatewayId::new(format!("nat-gateway-{slot}")),
            hosting_subnet,
            elastic_address: ElasticAddress::vpc(format!("eip-{slot}")),
        }
    }
}

impl fmt::Display for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {} ({})",
            self.id, self.hosting_subnet, self.elastic_address.id
        )
    }
}
