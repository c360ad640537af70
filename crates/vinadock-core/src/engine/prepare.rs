use crate::core::io::error::FormatError;
use crate::core::io::pdbqt::{PdbqtFile, WriteOptions};
use crate::core::io::traits::MolecularFile;
use crate::core::models::molecule::Molecule;
use crate::core::utils::naming::file_stem;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Writes `molecule` as PDBQT into `directory` and returns the absolute path.
///
/// The file is named `[discriminator_]title.pdbqt` with the title sanitized.
/// Flexible output carries a torsion tree and may emit atoms out of index
/// order; rigid output is a single body in index order. Existing files are
/// overwritten.
pub fn write_vina_pdbqt(
    molecule: &Molecule,
    directory: &Path,
    discriminator: Option<&str>,
    flexible: bool,
) -> Result<PathBuf, FormatError> {
    let mut stem = file_stem(discriminator, &molecule.title);
    if stem.is_empty() {
        stem = "molecule".to_string();
    }
    let path = std::path::absolute(directory.join(format!("{}.pdbqt", stem)))?;
    let options = WriteOptions { flexible };
    PdbqtFile::write_to_path(molecule, &options, &path)?;
    trace!(path = %path.display(), flexible, "Wrote PDBQT");
    Ok(path)
}

/// Whether [`write_vina_pdbqt`] may change atom order for this mode.
pub fn reorders_atoms(flexible: bool) -> bool {
    PdbqtFile::reorders_atoms(&WriteOptions { flexible })
}
