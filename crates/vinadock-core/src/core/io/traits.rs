use super::error::FormatError;
use crate::core::models::molecule::Molecule;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing molecular file formats.
///
/// Implementors handle format-specific parsing and serialization. Every format
/// may hold several molecules per file (PDBQT models, SDF records), so reading
/// always yields a list in file order.
pub trait MolecularFile {
    /// Format-specific writer switches.
    type WriteOptions: Default;

    /// Reads every molecule from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Molecule>, FormatError>;

    /// Writes one molecule to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the molecule cannot be represented in this format or
    /// writing fails.
    fn write_to(
        molecule: &Molecule,
        options: &Self::WriteOptions,
        writer: &mut impl Write,
    ) -> Result<(), FormatError>;

    /// Whether the writer may emit atoms in a different order than they have in
    /// memory when using `options`.
    ///
    /// Callers that read structures back (e.g., docked poses) must undo such a
    /// reordering before treating atoms index-by-index.
    fn reorders_atoms(_options: &Self::WriteOptions) -> bool {
        false
    }

    /// Writes several molecules to one writer, back to back.
    fn write_all_to(
        molecules: &[Molecule],
        options: &Self::WriteOptions,
        writer: &mut impl Write,
    ) -> Result<(), FormatError> {
        for molecule in molecules {
            Self::write_to(molecule, options, writer)?;
        }
        Ok(())
    }

    /// Reads every molecule from a file path.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Molecule>, FormatError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Reads the first molecule from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingRecord`] if the file holds no molecule.
    fn read_first_from_path<P: AsRef<Path>>(path: P) -> Result<Molecule, FormatError> {
        Self::read_from_path(path)?
            .into_iter()
            .next()
            .ok_or_else(|| FormatError::MissingRecord("molecule".into()))
    }

    /// Writes one molecule to a file path, replacing any existing file.
    fn write_to_path<P: AsRef<Path>>(
        molecule: &Molecule,
        options: &Self::WriteOptions,
        path: P,
    ) -> Result<(), FormatError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(molecule, options, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes several molecules to a file path, replacing any existing file.
    fn write_all_to_path<P: AsRef<Path>>(
        molecules: &[Molecule],
        options: &Self::WriteOptions,
        path: P,
    ) -> Result<(), FormatError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_all_to(molecules, options, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
