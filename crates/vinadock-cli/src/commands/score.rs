use super::common;
use crate::cli::RunArgs;
use crate::config;
use crate::error::Result;
use tracing::info;
use vinadock::workflows;

pub fn run(args: RunArgs) -> Result<()> {
    info!("Building configuration for 'score' command.");
    let app = config::build_config(&args)?;
    let outcome = common::execute(app, workflows::score::run, "scored ligands")?;
    if let Some(best) = outcome
        .results
        .iter()
        .filter_map(|m| m.data.get_f64("vina_affinity").map(|a| (a, &m.title)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
    {
        info!(title = %best.1, affinity = best.0, "Best scoring ligand");
    }
    println!("Scored {} ligand(s).", outcome.results.len());
    Ok(())
}
