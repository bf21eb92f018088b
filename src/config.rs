//! Topology configuration.
//!
//! The configuration is a JSON document with camelCase keys. Defaults
//! describe a two-zone network with two public and two private groups and a
//! single NAT gateway, whether the configuration is built in code or parsed
//! from JSON.

use crate::error::{PlanError, Result};
use crate::models::{AddressBlock, AvailabilityZone, ServiceId, SubnetGroupSpec, SubnetRole};
use crate::planning::SubnetSelector;
use serde::{Deserialize, Serialize};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "TOPOLOGY_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "topology.json";

pub const DEFAULT_ADDRESS_BLOCK: &str = "10.0.0.0/16";
pub const DEFAULT_MAX_AZS: usize = 2;
pub const DEFAULT_BASE_ID: &str = "my-cdk-vpc";
pub const DEFAULT_INGRESS_PORT: u16 = 443;
pub const DEFAULT_NAT_GATEWAY_COUNT: usize = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopologyConfig {
    #[serde(default = "default_address_block")]
    pub address_block: AddressBlock,
    #[serde(default = "default_max_azs")]
    pub max_azs: usize,
    /// Zones the provider reports for the target region, in provider order.
    pub availability_zones: Vec<AvailabilityZone>,
    #[serde(default = "default_subnet_groups")]
    pub subnet_groups: Vec<SubnetGroupSpec>,
    /// Ignored when no group is PRIVATE_EGRESS.
    #[serde(default = "default_nat_gateway_count")]
    pub nat_gateway_count: usize,
    #[serde(default)]
    pub gateway_endpoint_services: Vec<ServiceId>,
    #[serde(default)]
    pub interface_endpoint_services: Vec<ServiceId>,
    #[serde(default)]
    pub endpoint_subnets: SubnetSelector,
    /// Defaults to the address block itself.
    #[serde(default)]
    pub allowed_ingress_cidr: Option<AddressBlock>,
    #[serde(default = "default_ingress_port")]
    pub allowed_ingress_port: u16,
    #[serde(default = "default_base_id")]
    pub base_id: String,
}

fn default_address_block() -> AddressBlock {
    AddressBlock::new(DEFAULT_ADDRESS_BLOCK).expect("Invalid default address block?")
}

fn default_max_azs() -> usize {
    DEFAULT_MAX_AZS
}

fn default_nat_gateway_count() -> usize {
    DEFAULT_NAT_GATEWAY_COUNT
}

fn default_ingress_port() -> u16 {
    DEFAULT_INGRESS_PORT
}

fn default_base_id() -> String {
    DEFAULT_BASE_ID.to_string()
}

fn default_subnet_groups() -> Vec<SubnetGroupSpec> {
    vec![
        SubnetGroupSpec::new("public-subnet-1", SubnetRole::Public, 24),
        SubnetGroupSpec::new("public-subnet-2", SubnetRole::Public, 24),
        SubnetGroupSpec::new("private-subnet-1", SubnetRole::PrivateEgress, 24),
        SubnetGroupSpec::new("private-subnet-2", SubnetRole::PrivateEgress, 24),
    ]
}

impl Default for TopologyConfig {
    fn default() -> Self {
        TopologyConfig {
            address_block: default_address_block(),
            max_azs: DEFAULT_MAX_AZS,
            availability_zones: vec![
                AvailabilityZone::new("us-east-1a"),
                AvailabilityZone::new("us-east-1b"),
            ],
            subnet_groups: default_subnet_groups(),
            nat_gateway_count: default_nat_gateway_count(),
            gateway_endpoint_services: vec![],
            interface_endpoint_services: vec![],
            endpoint_subnets: SubnetSelector::default(),
            allowed_ingress_cidr: None,
            allowed_ingress_port: DEFAULT_INGRESS_PORT,
            base_id: default_base_id(),
        }
    }
}

impl TopologyConfig {
    /// Read and validate a configuration file.
    ///
    /// Parse errors report the JSON path of the offending field.
    pub fn load(path: &str) -> Result<TopologyConfig> {
        let json = std::fs::read_to_string(path).map_err(|e| PlanError::ConfigRead {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_json(&json).map_err(|e| match e {
            PlanError::ConfigRead { reason, .. } => PlanError::ConfigRead {
                path: path.to_string(),
                reason,
            },
            other => other,
        })?;
        log::debug!("Loaded topology configuration from {path}");
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<TopologyConfig> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let config: TopologyConfig = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| PlanError::ConfigRead {
                path: "<inline>".to_string(),
                reason: format!("path={} error={}", e.path(), e.inner()),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_azs == 0 {
            return Err(PlanError::InvalidConfig("maxAzs must be at least 1".into()));
        }
        if self.base_id.trim().is_empty() {
            return Err(PlanError::InvalidConfig("baseId must not be empty".into()));
        }
        if self.subnet_groups.is_empty() {
            return Err(PlanError::InvalidConfig("no subnet groups declared".into()));
        }
        if self.allowed_ingress_port == 0 {
            return Err(PlanError::InvalidConfig(
                "allowedIngressPort must be between 1 and 65535".into(),
            ));
        }
        Ok(())
    }

    pub fn ingress_cidr(&self) -> AddressBlock {
        self.allowed_ingress_cidr
            .unwrap_or_else(|| self.address_block.network())
    }

    /// Gateways to plan: the configured count, or none when nothing needs egress.
    pub fn nat_gateways(&self) -> usize {
        if self
            .subnet_groups
            .iter()
            .any(|g| g.role == SubnetRole::PrivateEgress)
        {
            self.nat_gateway_count
        } else {
            0
        }
    }
}
