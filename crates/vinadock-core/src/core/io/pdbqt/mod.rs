//! AutoDock PDBQT files.
//!
//! PDBQT is PDB with two extra columns: a partial charge (71-76) and an
//! AutoDock atom type (78-79). Flexible ligands additionally carry a torsion
//! tree (ROOT/BRANCH/TORSDOF) that the docking engine uses to decide which
//! bonds it may rotate.
//!
//! Writing a flexible ligand groups atoms by torsion-tree fragment, so the
//! write order generally differs from the in-memory order. Serial numbers
//! always hold the in-memory index plus one, which is what
//! [`crate::core::io::ordering`] relies on to undo the permutation.

pub mod atom_types;
mod reader;
pub mod torsion;
mod writer;

use super::error::FormatError;
use super::traits::MolecularFile;
use crate::core::models::molecule::Molecule;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Write a torsion tree instead of one rigid body.
    pub flexible: bool,
}

impl WriteOptions {
    pub fn flexible() -> Self {
        Self { flexible: true }
    }

    pub fn rigid() -> Self {
        Self { flexible: false }
    }
}

pub struct PdbqtFile;

impl MolecularFile for PdbqtFile {
    type WriteOptions = WriteOptions;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Molecule>, FormatError> {
        reader::read_models(reader)
    }

    fn write_to(
        molecule: &Molecule,
        options: &Self::WriteOptions,
        writer: &mut impl Write,
    ) -> Result<(), FormatError> {
        writer::write_molecule(molecule, options, writer)
    }

    fn reorders_atoms(options: &Self::WriteOptions) -> bool {
        options.flexible
    }
}
