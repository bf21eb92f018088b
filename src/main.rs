use std::error::Error;
use vpc_topology::check_for_overlapping_subnets;
use vpc_topology::load_and_plan;
use vpc_topology::output::{subnet_print, write_plan};

/// Environment variable naming the plan output file.
const PLAN_OUTPUT_ENV: &str = "TOPOLOGY_PLAN_OUTPUT";
const DEFAULT_PLAN_OUTPUT: &str = "topology_plan.json";

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())
        .map_err(|e| format!("Error initializing log4rs: {e}"))?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let plan = load_and_plan(None)?;
    check_for_overlapping_subnets(&plan)?;

    subnet_print(&plan);

    let output = std::env::var(PLAN_OUTPUT_ENV).unwrap_or_else(|_| DEFAULT_PLAN_OUTPUT.to_string());
    write_plan(&plan, &output)?;

    log::info!("#End main() plan written to {output}");
    Ok(())
}
