use super::error::{FormatError, slice_and_trim};
use super::records::{finish_atom, format_atom_record, is_atom_record, parse_atom_record};
use super::traits::MolecularFile;
use crate::core::models::atom::Element;
use crate::core::models::builder::MoleculeBuilder;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Protein Data Bank files.
///
/// Each MODEL block becomes one molecule; files without MODEL records yield a
/// single molecule. Bonds come from CONECT records, or are perceived from
/// geometry when the file has none.
pub struct PdbFile;

impl MolecularFile for PdbFile {
    type WriteOptions = ();

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Molecule>, FormatError> {
        let mut molecules = Vec::new();
        let mut title = String::new();
        let mut builder = MoleculeBuilder::default();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if is_atom_record(&line) {
                let atom = parse_atom_record(&line, line_num)?;
                let symbol = slice_and_trim(&line, 76, 78);
                let element = (!symbol.is_empty()).then(|| Element::from_symbol(symbol));
                let atom = finish_atom(atom, element);
                if !builder.add_atom(atom) {
                    return Err(FormatError::Inconsistency(format!(
                        "Duplicate atom serial on line {}",
                        line_num
                    )));
                }
                continue;
            }

            match slice_and_trim(&line, 0, 6) {
                "COMPND" | "TITLE" if title.is_empty() => {
                    title = line.get(10..).unwrap_or("").trim().to_string();
                }
                "CONECT" => {
                    let serials = parse_conect(&line);
                    if let Some((&first, rest)) = serials.split_first() {
                        for &other in rest {
                            builder.add_bond(first, other, BondOrder::Single);
                        }
                    }
                }
                "ENDMDL" => {
                    let finished = std::mem::take(&mut builder);
                    if !finished.is_empty() {
                        molecules.push(finish_molecule(finished, &title));
                    }
                }
                "END" => break,
                _ => {}
            }
        }

        if !builder.is_empty() {
            molecules.push(finish_molecule(builder, &title));
        }
        Ok(molecules)
    }

    fn write_to(
        molecule: &Molecule,
        _options: &Self::WriteOptions,
        writer: &mut impl Write,
    ) -> Result<(), FormatError> {
        if !molecule.title.is_empty() {
            writeln!(writer, "COMPND    {}", molecule.title)?;
        }
        for (index, atom) in molecule.atoms().iter().enumerate() {
            let record = if atom.is_hetero { "HETATM" } else { "ATOM" };
            writeln!(
                writer,
                "{}          {:>2}",
                format_atom_record(record, index + 1, atom),
                atom.element.symbol().to_uppercase()
            )?;
        }

        let mut neighbors: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for bond in molecule.bonds() {
            neighbors.entry(bond.atom1 + 1).or_default().push(bond.atom2 + 1);
            neighbors.entry(bond.atom2 + 1).or_default().push(bond.atom1 + 1);
        }
        for (serial, partners) in &neighbors {
            for chunk in partners.chunks(4) {
                write!(writer, "CONECT{:>5}", serial)?;
                for partner in chunk {
                    write!(writer, "{:>5}", partner)?;
                }
                writeln!(writer)?;
            }
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}

/// CONECT serials live in 5-column fields starting at column 7.
fn parse_conect(line: &str) -> Vec<usize> {
    (0..5)
        .map(|k| slice_and_trim(line, 6 + 5 * k, 11 + 5 * k))
        .take_while(|field| !field.is_empty())
        .filter_map(|field| field.parse().ok())
        .collect()
}

fn finish_molecule(mut builder: MoleculeBuilder, title: &str) -> Molecule {
    builder.title(title);
    let (mut molecule, dangling) = builder.build();
    if !dangling.is_empty() {
        warn!(
            count = dangling.len(),
            "Ignoring CONECT records that reference unknown atoms"
        );
    }
    if molecule.perceive_bonds_if_missing() {
        debug!(
            bonds = molecule.bonds().len(),
            "Perceived bonds from geometry for PDB molecule"
        );
    }
    molecule
}
