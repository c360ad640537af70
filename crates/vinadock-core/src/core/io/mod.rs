//! Reading and writing molecular structure files.
//!
//! Every format implements [`traits::MolecularFile`]. The free functions here
//! pick the format from a path's extension, which is how the docking session
//! loads receptors and auto-centering ligands.

pub mod error;
pub mod ordering;
pub mod pdb;
pub mod pdbqt;
pub(crate) mod records;
pub mod sdf;
pub mod traits;

use crate::core::models::molecule::Molecule;
use error::FormatError;
use pdb::PdbFile;
use pdbqt::PdbqtFile;
use sdf::SdfFile;
use std::path::Path;
use traits::MolecularFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Pdbqt,
    Pdb,
    Sdf,
}

impl StructureFormat {
    /// Determines the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "pdbqt" => Ok(Self::Pdbqt),
            "pdb" | "ent" => Ok(Self::Pdb),
            "sdf" | "sd" | "mol" => Ok(Self::Sdf),
            _ => Err(FormatError::UnsupportedExtension(extension)),
        }
    }
}

/// Reads every molecule from `path`, choosing the format by extension.
///
/// Molecules without a title are named after the file stem.
pub fn read_molecules(path: impl AsRef<Path>) -> Result<Vec<Molecule>, FormatError> {
    let path = path.as_ref();
    let mut molecules = match StructureFormat::from_path(path)? {
        StructureFormat::Pdbqt => PdbqtFile::read_from_path(path)?,
        StructureFormat::Pdb => PdbFile::read_from_path(path)?,
        StructureFormat::Sdf => SdfFile::read_from_path(path)?,
    };
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    for molecule in molecules.iter_mut().filter(|m| m.title.is_empty()) {
        molecule.title = stem.clone();
    }
    Ok(molecules)
}

/// Reads the first molecule from `path`, choosing the format by extension.
pub fn read_first_molecule(path: impl AsRef<Path>) -> Result<Molecule, FormatError> {
    let path = path.as_ref();
    read_molecules(path)?.into_iter().next().ok_or_else(|| {
        FormatError::MissingRecord(format!("molecule in '{}'", path.display()))
    })
}

/// Writes `molecules` to `path`, choosing the format by extension.
///
/// PDBQT output is rigid; SDF output carries each molecule's data items.
pub fn write_molecules(path: impl AsRef<Path>, molecules: &[Molecule]) -> Result<(), FormatError> {
    let path = path.as_ref();
    match StructureFormat::from_path(path)? {
        StructureFormat::Pdbqt => {
            PdbqtFile::write_all_to_path(molecules, &pdbqt::WriteOptions::rigid(), path)
        }
        StructureFormat::Pdb => PdbFile::write_all_to_path(molecules, &(), path),
        StructureFormat::Sdf => SdfFile::write_all_to_path(molecules, &(), path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn format_is_chosen_by_extension() {
        assert_eq!(
            StructureFormat::from_path(Path::new("a/b/rec.PDBQT")).unwrap(),
            StructureFormat::Pdbqt
        );
        assert_eq!(
            StructureFormat::from_path(Path::new("1abc.ent")).unwrap(),
            StructureFormat::Pdb
        );
        assert_eq!(
            StructureFormat::from_path(Path::new("ligands.sdf")).unwrap(),
            StructureFormat::Sdf
        );
        assert!(matches!(
            StructureFormat::from_path(Path::new("ligand.mol2")),
            Err(FormatError::UnsupportedExtension(ext)) if ext == "mol2"
        ));
    }

    #[test]
    fn untitled_molecules_take_the_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crystal_ligand.pdb");
        fs::write(
            &path,
            "HETATM    1  C1  LIG A   1       0.000   0.000   0.000  1.00  0.00           C\n\
             HETATM    2  O1  LIG A   1       1.400   0.000   0.300  1.00  0.00           O\n",
        )
        .unwrap();

        let molecule = read_first_molecule(&path).unwrap();
        assert_eq!(molecule.title, "crystal_ligand");
        assert_eq!(molecule.atom_count(), 2);
    }

    #[test]
    fn written_sdf_keeps_titles_and_scores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poses.sdf");
        let mut first = two_atom_molecule("one");
        first.data.insert_number("vina_affinity", -7.25);
        let second = two_atom_molecule("two");

        write_molecules(&path, &[first, second]).unwrap();
        let back = read_molecules(&path).unwrap();

        assert_eq!(back.len(), 2);
        assert_eq!(back[0].title, "one");
        assert_eq!(back[0].data.get_f64("vina_affinity"), Some(-7.25));
        assert_eq!(back[1].title, "two");
        assert!(write_molecules(dir.path().join("poses.xyz"), &back).is_err());
    }

    fn two_atom_molecule(title: &str) -> Molecule {
        use crate::core::models::atom::{Atom, Element};
        use nalgebra::Point3;
        let mut molecule = Molecule::new(title);
        molecule.add_atom(Atom::new("C1", Element::C, Point3::new(0.0, 0.0, 0.0)));
        molecule.add_atom(Atom::new("O1", Element::O, Point3::new(1.4, 0.0, 0.3)));
        molecule
    }

    #[test]
    fn empty_file_has_no_first_molecule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.sdf");
        fs::write(&path, "").unwrap();
        assert!(matches!(
            read_first_molecule(&path),
            Err(FormatError::MissingRecord(_))
        ));
    }
}
