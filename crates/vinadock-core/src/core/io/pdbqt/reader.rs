use super::atom_types::element_for_ad_type;
use crate::core::io::error::{FormatError, parse_float_field, slice_and_trim};
use crate::core::io::records::{finish_atom, is_atom_record, parse_atom_record};
use crate::core::models::builder::MoleculeBuilder;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use std::io::BufRead;
use tracing::warn;

const NAME_REMARK: &str = "REMARK  Name =";

pub(super) fn read_models(reader: &mut impl BufRead) -> Result<Vec<Molecule>, FormatError> {
    let mut molecules = Vec::new();
    let mut builder = MoleculeBuilder::default();
    let mut title = String::new();

    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line_num = line_num + 1;

        if is_atom_record(&line) {
            let mut atom = parse_atom_record(&line, line_num)?;
            if !slice_and_trim(&line, 70, 76).is_empty() {
                atom.partial_charge = parse_float_field(&line, line_num, 70, 76)?;
            }
            let ad_type = slice_and_trim(&line, 77, 79);
            let element = element_for_ad_type(ad_type);
            if !ad_type.is_empty() {
                atom.ad_type = Some(ad_type.to_string());
            }
            if !builder.add_atom(finish_atom(atom, element)) {
                return Err(FormatError::Inconsistency(format!(
                    "Duplicate atom serial on line {}",
                    line_num
                )));
            }
            continue;
        }

        if let Some(name) = line.strip_prefix(NAME_REMARK) {
            if title.is_empty() {
                title = name.trim().to_string();
            }
            continue;
        }

        match slice_and_trim(&line, 0, 6) {
            "COMPND" if title.is_empty() => {
                title = line.get(10..).unwrap_or("").trim().to_string();
            }
            "CONECT" => {
                let serials: Vec<usize> = line
                    .split_whitespace()
                    .skip(1)
                    .filter_map(|s| s.parse().ok())
                    .collect();
                if let Some((&first, rest)) = serials.split_first() {
                    for &other in rest {
                        builder.add_bond(first, other, BondOrder::Single);
                    }
                }
            }
            "MODEL" | "ENDMDL" => {
                let finished = std::mem::take(&mut builder);
                if !finished.is_empty() {
                    molecules.push(finish_model(finished, &title));
                }
            }
            // ROOT, BRANCH, TORSDOF and the remaining REMARKs carry nothing
            // the molecule model keeps.
            _ => {}
        }
    }

    if !builder.is_empty() {
        molecules.push(finish_model(builder, &title));
    }
    Ok(molecules)
}

fn finish_model(mut builder: MoleculeBuilder, title: &str) -> Molecule {
    builder.title(title);
    let (mut molecule, dangling) = builder.build();
    if !dangling.is_empty() {
        warn!(
            count = dangling.len(),
            "Ignoring CONECT records that reference unknown atoms"
        );
    }
    molecule.perceive_bonds_if_missing();
    molecule
}
