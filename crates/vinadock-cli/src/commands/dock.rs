use super::common;
use crate::cli::RunArgs;
use crate::config;
use crate::error::Result;
use tracing::info;
use vinadock::workflows;

pub fn run(args: RunArgs) -> Result<()> {
    info!("Building configuration for 'dock' command.");
    let app = config::build_config(&args)?;
    let outcome = common::execute(app, workflows::dock::run, "docked poses")?;
    println!(
        "Docked {} ligand(s) into {} pose(s).",
        outcome.ligands.len(),
        outcome.results.len()
    );
    Ok(())
}
