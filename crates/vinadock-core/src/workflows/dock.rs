use super::batch;
use crate::core::io::ordering::{read_write_order, restoring_order};
use crate::core::io::pdbqt::PdbqtFile;
use crate::core::io::traits::MolecularFile;
use crate::core::models::molecule::{Molecule, MoleculeError};
use crate::core::utils::rmsd::{RmsdMethod, compute_rmsd};
use crate::engine::config::MoleculeSource;
use crate::engine::error::DockingError;
use crate::engine::prepare::{reorders_atoms, write_vina_pdbqt};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::report::{PoseRecord, parse_docking_report};
use crate::engine::session::DockingSession;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Ligands are always written with a torsion tree for docking.
const FLEXIBLE: bool = true;

/// Docks each ligand into the session's receptor and search box.
///
/// Every pose the engine reports becomes a clone of its input ligand with the
/// pose coordinates, `vina_affinity`, `vina_rmsd_lb` and `vina_rmsd_ub`, plus
/// the heavy-atom RMSD to the input as `vina_rmsd_input` and its
/// symmetry-corrected minimum as `vina_rmsd_input_min`. Atoms keep their input
/// order even though the engine sees them in torsion-tree order. Results come
/// ligand by ligand, poses in the engine's ranking.
///
/// The skip-or-abort policy for engine failures is the same as for
/// [`score::run`](super::score::run).
#[instrument(skip_all, name = "docking_workflow")]
pub fn run(
    session: &mut DockingSession,
    ligands: &[Molecule],
    protein: Option<MoleculeSource>,
    reporter: &ProgressReporter,
) -> Result<Vec<Molecule>, DockingError> {
    let batch = batch::begin(session, ligands, protein)?;
    info!(ligands = ligands.len(), "Docking ligands");
    reporter.report(Progress::BatchStart {
        total: ligands.len(),
    });

    let cpu = session.parameters().cpu.to_string();
    let mut poses = Vec::new();
    let mut skipped = 0;
    for (index, ligand) in ligands.iter().enumerate() {
        reporter.report(Progress::LigandStart {
            index,
            title: ligand.title.clone(),
        });

        let discriminator = index.to_string();
        let ligand_file =
            write_vina_pdbqt(ligand, batch.dir.path(), Some(discriminator.as_str()), FLEXIBLE)?;
        let out_file = output_path(&ligand_file);
        let mut args: Vec<OsString> = vec![
            "--receptor".into(),
            batch.protein_file.clone().into(),
            "--ligand".into(),
            ligand_file.clone().into(),
            "--out".into(),
            out_file.clone().into(),
        ];
        args.extend(session.engine_args().iter().map(OsString::from));
        args.push("--cpu".into());
        args.push(cpu.clone().into());

        let output = session.executable().run(&args)?;
        if !output.success() {
            batch::engine_failed(session, index, ligand, &output, reporter)?;
            skipped += 1;
            continue;
        }

        let records = parse_docking_report(&output.combined)?;
        let restore = if reorders_atoms(FLEXIBLE) {
            Some(restoring_permutation(ligand, &ligand_file)?)
        } else {
            None
        };
        let docked = PdbqtFile::read_from_path(&out_file)?;
        if docked.len() != records.len() {
            return Err(DockingError::PoseCountMismatch {
                records: records.len(),
                poses: docked.len(),
            });
        }

        let mut reference = ligand.clone();
        reference.perceive_bonds_if_missing();
        for (record, pose) in records.iter().zip(docked) {
            poses.push(annotate_pose(ligand, &reference, pose, record, restore.as_deref())?);
        }
        debug!(index, title = %ligand.title, poses = records.len(), "Docked ligand");
        reporter.report(Progress::LigandFinished {
            index,
            poses: records.len(),
        });
    }

    reporter.report(Progress::BatchFinish);
    info!(poses = poses.len(), skipped, "Docking finished");
    Ok(poses)
}

/// `x.pdbqt` becomes `x_out.pdbqt` next to it.
fn output_path(ligand_file: &Path) -> PathBuf {
    let stem = ligand_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    ligand_file.with_file_name(format!("{}_out.pdbqt", stem))
}

fn restoring_permutation(
    ligand: &Molecule,
    ligand_file: &Path,
) -> Result<Vec<usize>, DockingError> {
    let write_order = read_write_order(ligand_file)?;
    if write_order.len() != ligand.atom_count() {
        return Err(DockingError::AtomCountMismatch {
            title: ligand.title.clone(),
            expected: ligand.atom_count(),
            found: write_order.len(),
        });
    }
    Ok(restoring_order(&write_order))
}

fn annotate_pose(
    ligand: &Molecule,
    reference: &Molecule,
    mut pose: Molecule,
    record: &PoseRecord,
    restore: Option<&[usize]>,
) -> Result<Molecule, DockingError> {
    let unmappable = |source: MoleculeError| DockingError::PoseReconciliation {
        title: ligand.title.clone(),
        source,
    };
    if let Some(order) = restore {
        pose.renumber_atoms(order).map_err(unmappable)?;
    }
    let mut annotated = ligand.clone();
    annotated.clone_coords_from(&pose).map_err(unmappable)?;
    annotated.data.merge_scores(&record.to_score_record()?);

    let plain = compute_rmsd(reference, &annotated, RmsdMethod::Plain);
    let minimal = compute_rmsd(reference, &annotated, RmsdMethod::MinSymmetry);
    match (plain, minimal) {
        (Ok(plain), Ok(minimal)) => {
            annotated.data.insert_number("vina_rmsd_input", plain);
            annotated.data.insert_number("vina_rmsd_input_min", minimal);
        }
        (Err(e), _) | (_, Err(e)) => {
            debug!(title = %ligand.title, error = %e, "RMSD to input unavailable");
        }
    }
    Ok(annotated)
}
