use super::config::{ConfigError, EngineParameters, MoleculeSource, VinaConfig};
use super::error::DockingError;
use super::executable::VinaExecutable;
use super::prepare::write_vina_pdbqt;
use super::progress::ProgressReporter;
use super::scratch::ScratchSpace;
use crate::core::io::{StructureFormat, read_first_molecule};
use crate::core::models::molecule::Molecule;
use crate::core::utils::geometry::round_point;
use crate::workflows;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};

/// A docking engine bound to one receptor and one search box.
///
/// The session owns the resolved executable, the precomputed engine arguments,
/// the receptor and its PDBQT file, and the scratch directories created on its
/// behalf. The scoring and docking pipelines live in [`crate::workflows`] and
/// take the session by mutable reference; [`score`](Self::score) and
/// [`dock`](Self::dock) are shortcuts for them.
#[derive(Debug)]
pub struct DockingSession {
    executable: VinaExecutable,
    parameters: EngineParameters,
    engine_args: Vec<String>,
    protein: Option<Molecule>,
    protein_file: Option<PathBuf>,
    scratch: ScratchSpace,
    autocleanup: bool,
    skip_bad_mols: bool,
}

impl DockingSession {
    pub fn new(config: VinaConfig) -> Result<Self, DockingError> {
        let VinaConfig {
            mut parameters,
            executable,
            scratch_root,
            autocleanup,
            skip_bad_mols,
            protein,
            auto_ligand,
        } = config;

        parameters.validate()?;

        if let Some(source) = auto_ligand {
            parameters.center = box_center_from(source)?;
            info!(center = ?parameters.center, "Centered search box on reference ligand");
        }

        let executable = VinaExecutable::locate(executable.as_deref())?;
        info!(
            path = %executable.path().display(),
            version = executable.version(),
            "Using docking engine"
        );

        let mut session = Self {
            engine_args: parameters.to_args(),
            executable,
            parameters,
            protein: None,
            protein_file: None,
            scratch: ScratchSpace::new(scratch_root),
            autocleanup,
            skip_bad_mols,
        };

        if let Some(source) = protein {
            session.set_protein(source)?;
        }

        if session.parameters.cpu > session.parameters.exhaustiveness {
            warn!(
                cpu = session.parameters.cpu,
                exhaustiveness = session.parameters.exhaustiveness,
                "More CPUs than exhaustiveness; the extra CPUs will sit idle"
            );
        }

        Ok(session)
    }

    /// Replaces the receptor.
    ///
    /// A `.pdbqt` path is loaded and used as-is. Any other path, or an
    /// in-memory molecule, is written as a rigid PDBQT into a fresh session
    /// directory. On error the previous receptor stays in place.
    pub fn set_protein(&mut self, source: MoleculeSource) -> Result<(), DockingError> {
        self.scratch.reset_session_dir();

        let (protein, file) = match source {
            MoleculeSource::Path(path) => {
                let mut protein = read_first_molecule(&path)?;
                protein.is_protein = true;
                let file = if StructureFormat::from_path(&path)? == StructureFormat::Pdbqt {
                    std::path::absolute(&path)?
                } else {
                    write_vina_pdbqt(&protein, self.scratch.session_dir()?, None, false)?
                };
                (protein, file)
            }
            MoleculeSource::Molecule(protein) => {
                let file = write_vina_pdbqt(&protein, self.scratch.session_dir()?, None, false)?;
                (protein, file)
            }
        };

        info!(
            title = %protein.title,
            atoms = protein.atom_count(),
            file = %file.display(),
            "Receptor set"
        );
        self.protein = Some(protein);
        self.protein_file = Some(file);
        Ok(())
    }

    pub fn protein(&self) -> Option<&Molecule> {
        self.protein.as_ref()
    }

    pub fn protein_file(&self) -> Option<&Path> {
        self.protein_file.as_deref()
    }

    /// The receptor file, or [`DockingError::NoReceptor`].
    pub fn require_protein_file(&self) -> Result<&Path, DockingError> {
        self.protein_file().ok_or(DockingError::NoReceptor)
    }

    pub fn executable(&self) -> &VinaExecutable {
        &self.executable
    }

    pub fn parameters(&self) -> &EngineParameters {
        &self.parameters
    }

    /// Box and search arguments shared by every engine call.
    pub fn engine_args(&self) -> &[String] {
        &self.engine_args
    }

    pub fn skip_bad_mols(&self) -> bool {
        self.skip_bad_mols
    }

    pub fn set_skip_bad_mols(&mut self, skip: bool) {
        self.skip_bad_mols = skip;
    }

    pub fn autocleanup(&self) -> bool {
        self.autocleanup
    }

    /// Every scratch directory this session created and has not cleaned yet.
    pub fn scratch_dirs(&self) -> &[PathBuf] {
        self.scratch.tracked()
    }

    /// A fresh directory for one scoring or docking call, removed when the
    /// returned guard drops.
    pub(crate) fn call_dir(&mut self) -> Result<TempDir, DockingError> {
        Ok(self.scratch.call_dir()?)
    }

    /// Scores each ligand in place against the receptor.
    ///
    /// See [`workflows::score::run`].
    pub fn score(
        &mut self,
        ligands: &[Molecule],
        protein: Option<MoleculeSource>,
    ) -> Result<Vec<Molecule>, DockingError> {
        workflows::score::run(self, ligands, protein, &ProgressReporter::new())
    }

    /// Docks each ligand and returns one annotated clone per pose.
    ///
    /// See [`workflows::dock::run`].
    pub fn dock(
        &mut self,
        ligands: &[Molecule],
        protein: Option<MoleculeSource>,
    ) -> Result<Vec<Molecule>, DockingError> {
        workflows::dock::run(self, ligands, protein, &ProgressReporter::new())
    }

    /// Scores a single ligand; `None` if the engine failed and the session
    /// skips bad molecules.
    pub fn predict_ligand(&mut self, ligand: &Molecule) -> Result<Option<Molecule>, DockingError> {
        Ok(self
            .score(std::slice::from_ref(ligand), None)?
            .into_iter()
            .next())
    }

    pub fn predict_ligands(&mut self, ligands: &[Molecule]) -> Result<Vec<Molecule>, DockingError> {
        self.score(ligands, None)
    }

    /// Removes every scratch directory created so far. Safe to call repeatedly.
    ///
    /// A receptor file that lived in scratch space is gone afterwards; set the
    /// receptor again before the next call.
    pub fn clean(&mut self) {
        let protein_in_scratch = self
            .protein_file
            .as_ref()
            .is_some_and(|file| self.scratch.tracked().iter().any(|dir| file.starts_with(dir)));
        self.scratch.clean();
        if protein_in_scratch {
            self.protein_file = None;
        }
    }
}

impl Drop for DockingSession {
    fn drop(&mut self) {
        if self.autocleanup {
            self.clean();
        }
    }
}

fn box_center_from(source: MoleculeSource) -> Result<[f64; 3], DockingError> {
    let ligand = match source {
        MoleculeSource::Path(path) => read_first_molecule(path)?,
        MoleculeSource::Molecule(molecule) => molecule,
    };
    let centroid = ligand.centroid().ok_or(ConfigError::InvalidParameter {
        name: "auto_ligand",
        reason: "reference ligand has no atoms".to_string(),
    })?;
    let center = round_point(&centroid, 3);
    Ok([center.x, center.y, center.z])
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::io::pdbqt::{PdbqtFile, WriteOptions};
    use crate::core::io::traits::MolecularFile;
    use crate::engine::config::VinaConfigBuilder;
    use crate::engine::testing::{FakeVina, branched_ligand, small_receptor};
    use serial_test::serial;

    fn builder(fake: &FakeVina, root: &Path) -> VinaConfigBuilder {
        VinaConfigBuilder::new()
            .executable(fake.path().to_path_buf())
            .scratch_root(root.to_path_buf())
    }

    #[test]
    #[serial]
    fn session_records_version_and_arguments() {
        let fake = FakeVina::new();
        let root = tempfile::tempdir().unwrap();
        let session = DockingSession::new(builder(&fake, root.path()).build().unwrap()).unwrap();

        assert_eq!(session.executable().version(), "1.1.2");
        assert_eq!(session.engine_args()[0], "--center_x");
        assert!(session.protein().is_none());
        assert!(matches!(
            session.require_protein_file(),
            Err(DockingError::NoReceptor)
        ));
    }

    #[test]
    fn num_modes_is_validated_before_the_executable_is_resolved() {
        let config = VinaConfig {
            parameters: EngineParameters {
                num_modes: 12,
                ..EngineParameters::default()
            },
            executable: Some(PathBuf::from("/definitely/not/a/vina")),
            ..VinaConfig::default()
        };
        assert!(matches!(
            DockingSession::new(config),
            Err(DockingError::Config(ConfigError::InvalidNumModes(12)))
        ));
    }

    #[test]
    fn missing_executable_is_a_configuration_error() {
        let config = VinaConfig {
            executable: Some(PathBuf::from("/definitely/not/a/vina")),
            ..VinaConfig::default()
        };
        assert!(matches!(
            DockingSession::new(config),
            Err(DockingError::Config(ConfigError::ExecutableNotFound(_)))
        ));
    }

    #[test]
    #[serial]
    fn auto_ligand_centroid_overrides_center() {
        let fake = FakeVina::new();
        let root = tempfile::tempdir().unwrap();
        let mut ligand = branched_ligand("ref");
        for atom in ligand.atoms_mut() {
            atom.position.x += 0.00049;
        }
        let config = builder(&fake, root.path())
            .center([100.0, 100.0, 100.0])
            .auto_ligand(MoleculeSource::Molecule(ligand.clone()))
            .build()
            .unwrap();
        let session = DockingSession::new(config).unwrap();

        let centroid = ligand.centroid().unwrap();
        let expected = [
            (centroid.x * 1000.0).round() / 1000.0,
            (centroid.y * 1000.0).round() / 1000.0,
            (centroid.z * 1000.0).round() / 1000.0,
        ];
        assert_eq!(session.parameters().center, expected);
        assert_eq!(session.engine_args()[1], expected[0].to_string());
    }

    #[test]
    #[serial]
    fn pdbqt_receptor_path_is_reused_without_rewriting() {
        let fake = FakeVina::new();
        let root = tempfile::tempdir().unwrap();
        let receptor_path = root.path().join("receptor.pdbqt");
        PdbqtFile::write_to_path(&small_receptor(), &WriteOptions::rigid(), &receptor_path)
            .unwrap();

        let config = builder(&fake, root.path())
            .protein(MoleculeSource::Path(receptor_path.clone()))
            .build()
            .unwrap();
        let session = DockingSession::new(config).unwrap();

        assert_eq!(session.protein_file(), Some(receptor_path.as_path()));
        assert!(session.protein().unwrap().is_protein);
        assert!(session.scratch_dirs().is_empty());
    }

    #[test]
    #[serial]
    fn in_memory_receptor_is_written_rigid_into_scratch() {
        let fake = FakeVina::new();
        let root = tempfile::tempdir().unwrap();
        let config = builder(&fake, root.path())
            .protein(MoleculeSource::Molecule(small_receptor()))
            .build()
            .unwrap();
        let session = DockingSession::new(config).unwrap();

        let file = session.protein_file().unwrap();
        assert!(file.starts_with(&session.scratch_dirs()[0]));
        let text = std::fs::read_to_string(file).unwrap();
        assert!(!text.contains("ROOT"));
        assert_eq!(text.lines().filter(|l| l.starts_with("ATOM")).count(), 4);
    }

    #[test]
    #[serial]
    fn failed_protein_swap_keeps_the_previous_receptor() {
        let fake = FakeVina::new();
        let root = tempfile::tempdir().unwrap();
        let config = builder(&fake, root.path())
            .protein(MoleculeSource::Molecule(small_receptor()))
            .build()
            .unwrap();
        let mut session = DockingSession::new(config).unwrap();
        let before = session.protein_file().unwrap().to_path_buf();

        let result = session.set_protein(MoleculeSource::Path(root.path().join("missing.pdb")));
        assert!(matches!(result, Err(DockingError::Format(_))));
        assert_eq!(session.protein_file(), Some(before.as_path()));
    }

    #[test]
    #[serial]
    fn clean_removes_scratch_and_is_idempotent() {
        let fake = FakeVina::new();
        let root = tempfile::tempdir().unwrap();
        let config = builder(&fake, root.path())
            .protein(MoleculeSource::Molecule(small_receptor()))
            .build()
            .unwrap();
        let mut session = DockingSession::new(config).unwrap();
        let dir = session.scratch_dirs()[0].clone();

        session.clean();
        assert!(!dir.exists());
        assert!(session.scratch_dirs().is_empty());
        assert!(session.protein_file().is_none());

        session.clean();
        assert!(session.scratch_dirs().is_empty());
    }

    #[test]
    #[serial]
    fn drop_cleans_only_with_autocleanup() {
        let fake = FakeVina::new();
        let root = tempfile::tempdir().unwrap();

        for autocleanup in [true, false] {
            let config = builder(&fake, root.path())
                .autocleanup(autocleanup)
                .protein(MoleculeSource::Molecule(small_receptor()))
                .build()
                .unwrap();
            let session = DockingSession::new(config).unwrap();
            let dir = session.scratch_dirs()[0].clone();
            drop(session);
            assert_eq!(dir.exists(), !autocleanup);
        }
    }
}
