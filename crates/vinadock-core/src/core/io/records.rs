//! Fixed-column ATOM/HETATM records shared by the PDB and PDBQT formats.

use super::error::{FormatError, ParseErrorKind, parse_float_field, parse_int_field, slice_and_trim};
use crate::core::models::atom::{Atom, Element};
use nalgebra::Point3;

/// Shortest line that still carries coordinates (through column 54).
const MIN_ATOM_RECORD_LEN: usize = 54;

pub(crate) fn is_atom_record(line: &str) -> bool {
    line.starts_with("ATOM") || line.starts_with("HETATM")
}

/// Parses columns 1-66 of an ATOM/HETATM record.
///
/// The element is left as [`Element::Unknown`]; each format decides where it
/// comes from.
pub(crate) fn parse_atom_record(line: &str, line_num: usize) -> Result<Atom, FormatError> {
    if line.len() < MIN_ATOM_RECORD_LEN {
        return Err(FormatError::Parse {
            line: line_num,
            kind: ParseErrorKind::LineTooShort {
                record: "ATOM/HETATM",
                min: MIN_ATOM_RECORD_LEN,
            },
        });
    }

    let serial: usize = parse_int_field(line, line_num, 6, 11)?;
    let name = line.get(12..16).unwrap_or("").to_string();
    let res_name = slice_and_trim(line, 17, 20);
    let chain_id = line.get(21..22).and_then(|s| s.chars().next()).unwrap_or(' ');
    let res_id = if slice_and_trim(line, 22, 26).is_empty() {
        1
    } else {
        parse_int_field(line, line_num, 22, 26)?
    };
    let x = parse_float_field(line, line_num, 30, 38)?;
    let y = parse_float_field(line, line_num, 38, 46)?;
    let z = parse_float_field(line, line_num, 46, 54)?;

    // The raw 4-column name is kept until `finish_atom` so that its alignment
    // can still tell calcium from an alpha carbon.
    let mut atom = Atom::new(&name, Element::Unknown, Point3::new(x, y, z));
    atom.serial = serial;
    atom.res_name = if res_name.is_empty() {
        "UNL".to_string()
    } else {
        res_name.to_string()
    };
    atom.chain_id = chain_id;
    atom.res_id = res_id;
    atom.is_hetero = line.starts_with("HETATM");
    Ok(atom)
}

/// Infers the element from the raw name field and trims the stored name.
pub(crate) fn finish_atom(mut atom: Atom, element: Option<Element>) -> Atom {
    atom.element = element
        .filter(|e| *e != Element::Unknown)
        .unwrap_or_else(|| Element::from_atom_name(&atom.name));
    atom.name = atom.name.trim().to_string();
    atom
}

/// Pads an atom name into the 4-column PDB name field.
///
/// One-letter elements start in column 14, as the PDB convention expects.
pub(crate) fn format_atom_name(name: &str, element: Element) -> String {
    if name.len() >= 4 {
        name.chars().take(4).collect()
    } else if element.symbol().len() == 1 {
        format!(" {:<3}", name)
    } else {
        format!("{:<4}", name)
    }
}

/// Formats columns 1-66 of an ATOM/HETATM record.
pub(crate) fn format_atom_record(record: &str, serial: usize, atom: &Atom) -> String {
    let res_name: String = atom.res_name.chars().take(3).collect();
    format!(
        "{:<6}{:>5} {}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}",
        record,
        serial % 100_000,
        format_atom_name(&atom.name, atom.element),
        ' ',
        res_name,
        atom.chain_id,
        atom.res_id,
        ' ',
        atom.position.x,
        atom.position.y,
        atom.position.z,
        1.0,
        0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str =
        "HETATM   12  CA  LIG B  42      11.104   6.134  -6.504  1.00  0.00           C";

    #[test]
    fn parses_fixed_columns() {
        let atom = finish_atom(parse_atom_record(LINE, 1).unwrap(), None);
        assert_eq!(atom.serial, 12);
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.element, Element::C);
        assert_eq!(atom.res_name, "LIG");
        assert_eq!(atom.chain_id, 'B');
        assert_eq!(atom.res_id, 42);
        assert!(atom.is_hetero);
        assert_eq!(atom.position, Point3::new(11.104, 6.134, -6.504));
    }

    #[test]
    fn short_lines_are_rejected() {
        let err = parse_atom_record("ATOM      1  C", 7).unwrap_err();
        assert!(matches!(
            err,
            FormatError::Parse {
                line: 7,
                kind: ParseErrorKind::LineTooShort { .. }
            }
        ));
    }

    #[test]
    fn formatted_record_parses_back() {
        let atom = finish_atom(parse_atom_record(LINE, 1).unwrap(), None);
        let line = format_atom_record("ATOM", 3, &atom);
        assert_eq!(&line[6..11], "    3");
        let reparsed = finish_atom(parse_atom_record(&line, 1).unwrap(), None);
        assert_eq!(reparsed.name, "CA");
        assert_eq!(reparsed.element, Element::C);
        assert_eq!(reparsed.position, atom.position);
    }

    #[test]
    fn atom_names_follow_pdb_alignment() {
        assert_eq!(format_atom_name("C1", Element::C), " C1 ");
        assert_eq!(format_atom_name("CL1", Element::Cl), "CL1 ");
        assert_eq!(format_atom_name("HG21", Element::H), "HG21");
    }
}
