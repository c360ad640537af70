use super::WriteOptions;
use super::atom_types::assign_ad_types;
use super::torsion::{Branch, TorsionTree};
use crate::core::io::error::FormatError;
use crate::core::io::records::format_atom_record;
use crate::core::models::atom::Atom;
use crate::core::models::molecule::Molecule;
use std::borrow::Cow;
use std::io::Write;
use tracing::trace;

pub(super) fn write_molecule(
    molecule: &Molecule,
    options: &WriteOptions,
    writer: &mut impl Write,
) -> Result<(), FormatError> {
    let molecule = with_bonds(molecule);
    let ad_types = assign_ad_types(&molecule);

    if !molecule.title.is_empty() {
        writeln!(writer, "REMARK  Name = {}", molecule.title)?;
    }

    if !options.flexible {
        for (index, atom) in molecule.atoms().iter().enumerate() {
            let record = if atom.is_hetero { "HETATM" } else { "ATOM" };
            write_atom(writer, record, index, atom, &ad_types[index])?;
        }
        return Ok(());
    }

    let tree = TorsionTree::build(&molecule);
    trace!(
        title = %molecule.title,
        torsions = tree.torsion_count(),
        "Writing flexible PDBQT"
    );

    writeln!(writer, "ROOT")?;
    for &index in &tree.root {
        write_atom(writer, "ATOM", index, &molecule.atoms()[index], &ad_types[index])?;
    }
    writeln!(writer, "ENDROOT")?;
    write_branches(writer, &molecule, &ad_types, &tree.branches)?;
    writeln!(writer, "TORSDOF {}", tree.torsion_count())?;
    Ok(())
}

/// Bond perception needs a copy only when the molecule has no bonds yet.
fn with_bonds(molecule: &Molecule) -> Cow<'_, Molecule> {
    if molecule.bonds().is_empty() && molecule.atom_count() > 1 {
        let mut owned = molecule.clone();
        owned.perceive_bonds_if_missing();
        Cow::Owned(owned)
    } else {
        Cow::Borrowed(molecule)
    }
}

fn write_branches(
    writer: &mut impl Write,
    molecule: &Molecule,
    ad_types: &[String],
    branches: &[Branch],
) -> Result<(), FormatError> {
    for branch in branches {
        let (parent, child) = (branch.parent_atom + 1, branch.child_atom + 1);
        writeln!(writer, "BRANCH {:>3} {:>3}", parent, child)?;
        for &index in &branch.atoms {
            write_atom(writer, "ATOM", index, &molecule.atoms()[index], &ad_types[index])?;
        }
        write_branches(writer, molecule, ad_types, &branch.children)?;
        writeln!(writer, "ENDBRANCH {:>3} {:>3}", parent, child)?;
    }
    Ok(())
}

/// Serials are always the in-memory index plus one, whatever order the atoms
/// are written in.
fn write_atom(
    writer: &mut impl Write,
    record: &str,
    index: usize,
    atom: &Atom,
    ad_type: &str,
) -> Result<(), FormatError> {
    writeln!(
        writer,
        "{}    {:>6.3} {:<2}",
        format_atom_record(record, index + 1, atom),
        atom.partial_charge,
        ad_type
    )?;
    Ok(())
}
