use super::batch;
use crate::core::models::molecule::Molecule;
use crate::engine::config::MoleculeSource;
use crate::engine::error::DockingError;
use crate::engine::prepare::write_vina_pdbqt;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::report::parse_scoring_report;
use crate::engine::session::DockingSession;
use std::ffi::OsString;
use tracing::{debug, info, instrument};

/// Scores each ligand in its current pose against the session's receptor.
///
/// Returns a clone of every ligand the engine accepted, with `vina_affinity`
/// and the individual `vina_<term>` values merged into its data. Ligands the
/// engine rejected are left out when the session skips bad molecules;
/// otherwise the first rejection aborts the batch with
/// [`DockingError::EngineFailed`].
///
/// Passing `protein` replaces the session's receptor before anything else.
#[instrument(skip_all, name = "scoring_workflow")]
pub fn run(
    session: &mut DockingSession,
    ligands: &[Molecule],
    protein: Option<MoleculeSource>,
    reporter: &ProgressReporter,
) -> Result<Vec<Molecule>, DockingError> {
    let batch = batch::begin(session, ligands, protein)?;
    info!(ligands = ligands.len(), "Scoring ligands");
    reporter.report(Progress::BatchStart {
        total: ligands.len(),
    });

    let mut scored = Vec::with_capacity(ligands.len());
    for (index, ligand) in ligands.iter().enumerate() {
        reporter.report(Progress::LigandStart {
            index,
            title: ligand.title.clone(),
        });

        let discriminator = index.to_string();
        let ligand_file =
            write_vina_pdbqt(ligand, batch.dir.path(), Some(discriminator.as_str()), true)?;
        let mut args: Vec<OsString> = vec![
            "--score_only".into(),
            "--receptor".into(),
            batch.protein_file.clone().into(),
            "--ligand".into(),
            ligand_file.into(),
        ];
        args.extend(session.engine_args().iter().map(OsString::from));

        let output = session.executable().run(&args)?;
        if !output.success() {
            batch::engine_failed(session, index, ligand, &output, reporter)?;
            continue;
        }

        let scores = parse_scoring_report(&output.combined)?;
        debug!(index, title = %ligand.title, ?scores, "Scored ligand");
        let mut annotated = ligand.clone();
        annotated.data.merge_scores(&scores);
        scored.push(annotated);
        reporter.report(Progress::LigandFinished { index, poses: 1 });
    }

    reporter.report(Progress::BatchFinish);
    info!(
        scored = scored.len(),
        skipped = ligands.len() - scored.len(),
        "Scoring finished"
    );
    Ok(scored)
}
