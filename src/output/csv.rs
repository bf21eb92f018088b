//! CSV subnet table of a planned topology.

use super::terminal::{colored_role, format_field};
use crate::models::{Subnet, SubnetRole};
use crate::planning::TopologyPlan;
use colored::Colorize;

/// One row of the subnet table.
#[derive(Debug)]
pub struct PlanPrintRow {
    pub cnt: usize,
    pub name: String,
    pub cidr: String,
    pub broadcast: String,
    pub addresses: String,
    pub role: String,
    pub az: String,
    pub gateway: String,
    pub endpoints: String,
}

impl PlanPrintRow {
    fn from_subnet(cnt: usize, s: &Subnet) -> Self {
        PlanPrintRow {
            cnt,
            name: s.name.clone().unwrap_or_else(|| s.group_name.clone()),
            cidr: s.cidr.to_string(),
            broadcast: s.cidr.hi().to_string(),
            addresses: s
                .cidr
                .num_addresses()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "all".to_string()),
            role: s.role.type_label().to_string(),
            az: s.az.to_string(),
            gateway: s
                .gateway_binding
                .as_ref()
                .map(|g| g.to_string())
                .unwrap_or_else(|| "none".to_string()),
            endpoints: if s.endpoints.is_empty() {
                "none".to_string()
            } else {
                s.endpoints
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<String>>()
                    .join(";")
            },
        }
    }
}

pub fn plan_rows(plan: &TopologyPlan) -> Vec<PlanPrintRow> {
    plan.topology
        .subnets
        .iter()
        .enumerate()
        .map(|(i, s)| PlanPrintRow::from_subnet(i + 1, s))
        .collect()
}

pub fn format_csv_row(row: &PlanPrintRow) -> String {
    format!(
        r#"{cnt},{name},{cidr},{broadcast},{addresses},{role},{az},{gateway},{endpoints}"#,
        cnt = format_field(row.cnt, 5),
        name = format_field(&row.name, 40),
        cidr = format_field(&row.cidr, 18),
        broadcast = format_field(format!("{}_br", row.broadcast), 19),
        addresses = format_field(&row.addresses, 8),
        role = format_field(&row.role, 10),
        az = format_field(&row.az, 14),
        gateway = format_field(&row.gateway, 15),
        endpoints = format_field(&row.endpoints, 12),
    )
}

/// Print the planned subnets as CSV to stdout.
pub fn subnet_print(plan: &TopologyPlan) {
    log::info!(
        "#Start subnet_print() {} subnets in {}",
        plan.topology.len(),
        plan.topology.cidr
    );
    println!(
        r#""cnt",                                  "name",       "subnet_cidr",          "broadcast", "addrs",    "type",            "az",       "gateway",  "endpoints""#
    );
    for row in plan_rows(plan) {
        println!("{}", format_csv_row(&row));
    }
    for gw in &plan.gateways {
        println!("#{}# {gw}", "NAT".on_yellow());
    }
    println!(
        "#{}# {} {} {}",
        "TYPES".on_blue(),
        colored_role(SubnetRole::Public),
        colored_role(SubnetRole::PrivateEgress),
        colored_role(SubnetRole::Isolated)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TopologyConfig;
    use crate::planning::plan_topology;

    #[test]
    fn test_plan_rows() {
        let plan = plan_topology(&TopologyConfig::default()).unwrap();
        let rows = plan_rows(&plan);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].cnt, 1);
        assert_eq!(rows[0].name, "my-cdk-vpc-public-subnet-us-east-1a");
        assert_eq!(rows[0].broadcast, "10.0.0.255");
        assert_eq!(rows[0].addresses, "256");
        assert_eq!(rows[0].gateway, "none");
        assert_eq!(rows[4].gateway, "nat-gateway-1");
        assert_eq!(rows[4].role, "Private");
    }

    #[test]
    fn test_format_csv_row() {
        let plan = plan_topology(&TopologyConfig::default()).unwrap();
        let line = format_csv_row(&plan_rows(&plan)[0]);
        assert!(line.starts_with("  \"1\","));
        assert!(line.contains("\"10.0.0.0/24\""));
        assert!(line.contains("\"10.0.0.255_br\""));
        assert_eq!(line.split(',').count(), 9);
    }
}
