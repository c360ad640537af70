use super::error::{FormatError, ParseErrorKind, parse_float_field, parse_int_field, slice_and_trim};
use super::traits::MolecularFile;
use crate::core::models::atom::{Atom, Element};
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use nalgebra::Point3;
use std::io::{BufRead, Write};

const RECORD_SEPARATOR: &str = "$$$$";

/// MDL SD files (V2000 connection tables plus data items).
pub struct SdfFile;

impl MolecularFile for SdfFile {
    type WriteOptions = ();

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Molecule>, FormatError> {
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
        let mut molecules = Vec::new();
        let mut cursor = 0;

        while cursor < lines.len() {
            if lines[cursor..].iter().all(|line| line.trim().is_empty()) {
                break;
            }
            let (molecule, next) = read_record(&lines, cursor)?;
            molecules.push(molecule);
            cursor = next;
        }
        Ok(molecules)
    }

    fn write_to(
        molecule: &Molecule,
        _options: &Self::WriteOptions,
        writer: &mut impl Write,
    ) -> Result<(), FormatError> {
        writeln!(writer, "{}", molecule.title)?;
        writeln!(writer, "  vinadock          3D")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000",
            molecule.atom_count(),
            molecule.bonds().len()
        )?;
        for atom in molecule.atoms() {
            writeln!(
                writer,
                "{:>10.4}{:>10.4}{:>10.4} {:<3} 0  0  0  0  0  0  0  0  0  0  0  0",
                atom.position.x,
                atom.position.y,
                atom.position.z,
                atom.element.symbol()
            )?;
        }
        for bond in molecule.bonds() {
            writeln!(
                writer,
                "{:>3}{:>3}{:>3}  0",
                bond.atom1 + 1,
                bond.atom2 + 1,
                bond.order as u8
            )?;
        }
        writeln!(writer, "M  END")?;
        for (key, value) in molecule.data.iter() {
            writeln!(writer, ">  <{}>", key)?;
            writeln!(writer, "{}", value)?;
            writeln!(writer)?;
        }
        writeln!(writer, "{}", RECORD_SEPARATOR)?;
        Ok(())
    }
}

/// Reads one record starting at `start`; returns it with the index of the line
/// after its `$$$$` separator.
fn read_record(lines: &[String], start: usize) -> Result<(Molecule, usize), FormatError> {
    let line_at = |index: usize| {
        lines
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| FormatError::Parse {
                line: index + 1,
                kind: ParseErrorKind::UnexpectedEof("molfile"),
            })
    };

    let mut molecule = Molecule::new(line_at(start)?.trim());
    let counts_index = start + 3;
    let counts = line_at(counts_index)?;
    if counts.len() < 6 {
        return Err(FormatError::Parse {
            line: counts_index + 1,
            kind: ParseErrorKind::InvalidCountsLine,
        });
    }
    let atom_count: usize = parse_int_field(counts, counts_index + 1, 0, 3)?;
    let bond_count: usize = parse_int_field(counts, counts_index + 1, 3, 6)?;

    let mut cursor = counts_index + 1;
    for i in 0..atom_count {
        let line = line_at(cursor)?;
        let x = parse_float_field(line, cursor + 1, 0, 10)?;
        let y = parse_float_field(line, cursor + 1, 10, 20)?;
        let z = parse_float_field(line, cursor + 1, 20, 30)?;
        let symbol = slice_and_trim(line, 31, 34);
        let element = Element::from_symbol(symbol);
        let mut atom = Atom::new(&format!("{}{}", symbol, i + 1), element, Point3::new(x, y, z));
        atom.serial = i + 1;
        molecule.add_atom(atom);
        cursor += 1;
    }

    for _ in 0..bond_count {
        let line = line_at(cursor)?;
        let a1: usize = parse_int_field(line, cursor + 1, 0, 3)?;
        let a2: usize = parse_int_field(line, cursor + 1, 3, 6)?;
        let order: BondOrder = slice_and_trim(line, 6, 9).parse().unwrap_or_default();
        molecule
            .add_bond(a1.wrapping_sub(1), a2.wrapping_sub(1), order)
            .ok_or_else(|| {
                FormatError::Inconsistency(format!(
                    "Bond on line {} references atoms {} and {} outside the atom block",
                    cursor + 1,
                    a1,
                    a2
                ))
            })?;
        cursor += 1;
    }

    let mut pending_key: Option<String> = None;
    let mut value_lines: Vec<&str> = Vec::new();
    loop {
        let Some(line) = lines.get(cursor) else {
            break;
        };
        cursor += 1;
        if line.starts_with(RECORD_SEPARATOR) {
            break;
        }
        if line.starts_with('>') {
            pending_key = data_key(line);
            value_lines.clear();
            continue;
        }
        if let Some(key) = &pending_key {
            if line.trim().is_empty() {
                molecule.data.insert_text(key.clone(), value_lines.join("\n"));
                pending_key = None;
            } else {
                value_lines.push(line.as_str());
            }
        }
    }
    if let Some(key) = pending_key {
        molecule.data.insert_text(key, value_lines.join("\n"));
    }

    Ok((molecule, cursor))
}

fn data_key(header: &str) -> Option<String> {
    let open = header.find('<')?;
    let close = header[open + 1..].find('>')? + open + 1;
    Some(header[open + 1..close].to_string())
}
