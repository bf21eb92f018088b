// cargo watch -x 'fmt' -x 'test'

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod planning;

pub use config::TopologyConfig;
pub use error::{PlanError, Result};
pub use planning::{plan_topology, TopologyPlan};

/// Load the configuration file and plan the topology.
///
/// # Arguments
/// * `config_file` - Path to the JSON configuration. If None, uses the
///   `TOPOLOGY_CONFIG` environment variable, then `topology.json`.
pub fn load_and_plan(config_file: Option<&str>) -> Result<TopologyPlan> {
    let path = match config_file {
        Some(file) => file.to_string(),
        None => std::env::var(config::CONFIG_ENV)
            .unwrap_or_else(|_| config::DEFAULT_CONFIG_FILE.to_string()),
    };
    log::info!("Using topology configuration: {path}");
    let config = TopologyConfig::load(&path)?;
    plan_topology(&config)
}

// return error if any two planned subnets overlap or leave the network
pub fn check_for_overlapping_subnets(plan: &TopologyPlan) -> Result<()> {
    let subnets = &plan.topology.subnets;
    for (i, a) in subnets.iter().enumerate() {
        if !plan.topology.cidr.contains(&a.cidr) {
            return Err(PlanError::SubnetOverlap(format!(
                "{} {} outside {}",
                a.key(),
                a.cidr,
                plan.topology.cidr
            )));
        }
        if let Some(b) = subnets.iter().skip(i + 1).find(|b| a.cidr.overlaps(&b.cidr)) {
            return Err(PlanError::SubnetOverlap(format!(
                "{} {} / {} {}",
                a.key(),
                a.cidr,
                b.key(),
                b.cidr
            )));
        }
    }
    Ok(())
}
