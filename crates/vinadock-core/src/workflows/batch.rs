use crate::core::models::molecule::Molecule;
use crate::engine::config::MoleculeSource;
use crate::engine::error::DockingError;
use crate::engine::executable::EngineOutput;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::session::DockingSession;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::warn;

/// Receptor file and scratch directory for one batch.
pub(super) struct Batch {
    pub protein_file: PathBuf,
    /// Removed with everything in it when the batch ends, however it ends.
    pub dir: TempDir,
}

/// Swaps the receptor if asked, validates every ligand, and creates the
/// per-call directory. Nothing is written before all ligands pass.
pub(super) fn begin(
    session: &mut DockingSession,
    ligands: &[Molecule],
    protein: Option<MoleculeSource>,
) -> Result<Batch, DockingError> {
    if let Some(source) = protein {
        session.set_protein(source)?;
    }
    for (index, ligand) in ligands.iter().enumerate() {
        ligand
            .ensure_3d_coordinates()
            .map_err(|source| DockingError::UnusableLigand {
                index,
                title: ligand.title.clone(),
                source,
            })?;
    }
    let protein_file = session.require_protein_file()?.to_path_buf();
    let dir = session.call_dir()?;
    Ok(Batch { protein_file, dir })
}

/// Applies the session's failure policy to a non-zero engine exit.
///
/// Returns `Ok(())` when the ligand should be skipped.
pub(super) fn engine_failed(
    session: &DockingSession,
    index: usize,
    ligand: &Molecule,
    output: &EngineOutput,
    reporter: &ProgressReporter,
) -> Result<(), DockingError> {
    warn!(
        index,
        title = %ligand.title,
        status = %output.status,
        output = %output.combined_text().trim_end(),
        "Docking engine failed"
    );
    if session.skip_bad_mols() {
        reporter.report(Progress::LigandSkipped { index });
        Ok(())
    } else {
        Err(DockingError::EngineFailed {
            command: output.command_line.clone(),
        })
    }
}
