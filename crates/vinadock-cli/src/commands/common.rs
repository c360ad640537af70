use crate::config::models::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::{CliProgressHandler, FinishedLigand};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};
use vinadock::core::io::{read_molecules, write_molecules};
use vinadock::core::models::molecule::Molecule;
use vinadock::engine::config::MoleculeSource;
use vinadock::engine::error::DockingError;
use vinadock::engine::progress::ProgressReporter;
use vinadock::engine::session::DockingSession;

/// Which batch pipeline a command runs.
pub type Workflow = fn(
    &mut DockingSession,
    &[Molecule],
    Option<MoleculeSource>,
    &ProgressReporter,
) -> std::result::Result<Vec<Molecule>, DockingError>;

/// What a batch run produced.
pub struct BatchOutcome {
    pub results: Vec<Molecule>,
    /// One entry per ligand with results, in result order.
    pub ligands: Vec<FinishedLigand>,
}

/// Loads the ligands, runs `workflow` in a fresh session, and writes the
/// results (and the optional summary table).
pub fn execute(app: AppConfig, workflow: Workflow, label: &str) -> Result<BatchOutcome> {
    let ligands = read_molecules(&app.ligands_path)?;
    if ligands.is_empty() {
        return Err(CliError::Argument(format!(
            "No ligands found in '{}'",
            app.ligands_path.display()
        )));
    }
    info!(count = ligands.len(), path = %app.ligands_path.display(), "Loaded ligands");

    let mut session = DockingSession::new(app.core_config)?;
    info!(
        version = session.executable().version(),
        args = ?session.engine_args(),
        "Session ready"
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let results = workflow(&mut session, &ligands, None, &reporter)?;

    let finished = progress_handler.finished();
    let skipped = progress_handler.skipped();
    if !skipped.is_empty() {
        warn!(count = skipped.len(), indices = ?skipped, "Some ligands were skipped");
    }
    if !session.autocleanup() {
        for dir in session.scratch_dirs() {
            info!(path = %dir.display(), "Keeping scratch directory");
        }
    }

    write_molecules(&app.output_path, &results)?;
    info!(
        count = results.len(),
        path = %app.output_path.display(),
        "Wrote {}",
        label
    );
    if let Some(summary_path) = &app.summary_path {
        write_summary(summary_path, &results, &finished)?;
        info!(path = %summary_path.display(), "Wrote summary table");
    }
    Ok(BatchOutcome {
        results,
        ligands: finished,
    })
}

/// One line of the summary table. Columns a workflow does not produce stay
/// empty.
#[derive(Debug, Serialize, PartialEq)]
pub struct SummaryRow<'a> {
    /// Zero-based position of the ligand in the input file.
    pub ligand: usize,
    pub title: &'a str,
    pub pose: usize,
    pub affinity: Option<f64>,
    pub rmsd_lb: Option<f64>,
    pub rmsd_ub: Option<f64>,
    pub rmsd_input: Option<f64>,
    pub rmsd_input_min: Option<f64>,
}

/// Builds summary rows, pairing results with the ligands that produced them.
///
/// `ligands` lists the pose count of every ligand in result order, so poses are
/// numbered from 1 within each ligand regardless of titles.
pub fn summary_rows<'a>(
    results: &'a [Molecule],
    ligands: &[FinishedLigand],
) -> Vec<SummaryRow<'a>> {
    let ranks = ligands
        .iter()
        .flat_map(|ligand| (1..=ligand.poses).map(move |pose| (ligand.index, pose)));
    results
        .iter()
        .zip(ranks)
        .map(|(molecule, (ligand, pose))| {
            let data = &molecule.data;
            SummaryRow {
                ligand,
                title: &molecule.title,
                pose,
                affinity: data.get_f64("vina_affinity"),
                rmsd_lb: data.get_f64("vina_rmsd_lb"),
                rmsd_ub: data.get_f64("vina_rmsd_ub"),
                rmsd_input: data.get_f64("vina_rmsd_input"),
                rmsd_input_min: data.get_f64("vina_rmsd_input_min"),
            }
        })
        .collect()
}

pub fn write_summary(
    path: &Path,
    results: &[Molecule],
    ligands: &[FinishedLigand],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in summary_rows(results, ligands) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
