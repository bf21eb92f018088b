//! Gateway and interface endpoint attachments.

use super::{AddressBlock, SubnetKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque identifier of a managed service (e.g. `s3`, `ecr.api`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ServiceId(pub String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        ServiceId(id.into())
    }
}

impl From<&str> for ServiceId {
    fn from(id: &str) -> Self {
        ServiceId::new(id)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    /// Route-table based; no security group.
    Gateway,
    /// Network-interface based; guarded by the shared security rule.
    Interface,
}

/// Ingress rule shared by every interface endpoint. Planned once per topology.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRule {
    pub id: String,
    pub ingress_cidr: AddressBlock,
    pub port: u16,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointAttachment {
    pub service_id: ServiceId,
    pub kind: EndpointKind,
    pub attached_subnets: BTreeSet<SubnetKey>,
    /// Id of the shared [`SecurityRule`]; gateway endpoints have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_rule_id: Option<String>,
}
