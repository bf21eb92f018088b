//! JSON rendering of a plan for the materialization layer.

use crate::error::{PlanError, Result};
use crate::planning::TopologyPlan;

pub fn plan_to_json(plan: &TopologyPlan) -> Result<String> {
    serde_json::to_string_pretty(plan)
        .map_err(|e| PlanError::Output(format!("Error serializing plan: {e}")))
}

/// Write the plan to `path`, replacing any previous plan.
pub fn write_plan(plan: &TopologyPlan, path: &str) -> Result<()> {
    let json = plan_to_json(plan)?;
    log::info!("Writing plan to file: {path}");
    std::fs::write(path, json)
        .map_err(|e| PlanError::Output(format!("Error writing plan file {path}: {e}")))
}
