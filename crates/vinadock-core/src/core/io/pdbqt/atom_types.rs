use crate::core::models::atom::Element;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use crate::core::utils::graph::shortest_cycle_through;
use phf::{Map, phf_map};

/// AutoDock 4 atom types and the element each one stands for.
///
/// Lookup is case-sensitive: `NA` is an acceptor nitrogen, `Na` is sodium.
#[rustfmt::skip]
static AD_TYPE_ELEMENTS: Map<&'static str, Element> = phf_map! {
    "H" => Element::H, "HD" => Element::H, "HS" => Element::H,
    "C" => Element::C, "A" => Element::C,
    "N" => Element::N, "NA" => Element::N, "NS" => Element::N,
    "O" => Element::O, "OA" => Element::O, "OS" => Element::O,
    "S" => Element::S, "SA" => Element::S,
    "P" => Element::P,
    "F" => Element::F, "Cl" => Element::Cl, "CL" => Element::Cl,
    "Br" => Element::Br, "BR" => Element::Br, "I" => Element::I,
    "Na" => Element::Na, "K" => Element::K, "Mg" => Element::Mg, "MG" => Element::Mg,
    "Ca" => Element::Ca, "Mn" => Element::Mn, "MN" => Element::Mn,
    "Fe" => Element::Fe, "FE" => Element::Fe, "Zn" => Element::Zn, "ZN" => Element::Zn,
    "Se" => Element::Se, "Si" => Element::Si, "B" => Element::B,
};

/// Resolves the element behind an AutoDock atom type.
pub fn element_for_ad_type(ad_type: &str) -> Option<Element> {
    AD_TYPE_ELEMENTS.get(ad_type.trim()).copied()
}

/// Assigns AutoDock 4 atom types to every atom of `molecule`.
///
/// Atoms that already carry a type (e.g., read from a PDBQT file) keep it. The
/// rules are deliberately small: aromatic carbons become `A`, oxygens `OA`,
/// sulfurs `SA`, nitrogens without an attached hydrogen become acceptors (`NA`)
/// unless they are amide or quaternary, and hydrogens on N/O/S become `HD`.
pub fn assign_ad_types(molecule: &Molecule) -> Vec<String> {
    let adjacency = molecule.adjacency();
    let aromatic = aromatic_atoms(molecule, &adjacency);
    let atoms = molecule.atoms();

    atoms
        .iter()
        .enumerate()
        .map(|(i, atom)| {
            if let Some(existing) = &atom.ad_type {
                return existing.clone();
            }
            let neighbors = &adjacency[i];
            match atom.element {
                Element::H => {
                    let polar = neighbors.iter().any(|&j| {
                        matches!(atoms[j].element, Element::N | Element::O | Element::S)
                    });
                    if polar { "HD" } else { "H" }.to_string()
                }
                Element::C if aromatic[i] => "A".to_string(),
                Element::N => {
                    let has_hydrogen = neighbors.iter().any(|&j| atoms[j].element.is_hydrogen());
                    let amide = neighbors
                        .iter()
                        .any(|&j| atoms[j].element == Element::C && has_carbonyl(molecule, j));
                    let quaternary = neighbors.len() >= 4;
                    let pyrrole_like = aromatic[i] && neighbors.len() >= 3;
                    if has_hydrogen || amide || quaternary || pyrrole_like {
                        "N".to_string()
                    } else {
                        "NA".to_string()
                    }
                }
                Element::O => "OA".to_string(),
                Element::S => "SA".to_string(),
                Element::Unknown => atom
                    .name
                    .trim()
                    .chars()
                    .next()
                    .map(|c| c.to_ascii_uppercase().to_string())
                    .unwrap_or_else(|| "C".to_string()),
                other => other.symbol().to_string(),
            }
        })
        .collect()
}

fn has_carbonyl(molecule: &Molecule, carbon: usize) -> bool {
    molecule.bonds().iter().any(|bond| {
        bond.order == BondOrder::Double
            && bond
                .partner(carbon)
                .is_some_and(|j| molecule.atoms()[j].element == Element::O)
    })
}

/// Flags atoms that sit in a 5- or 6-membered ring whose members all take part
/// in a double or aromatic bond.
fn aromatic_atoms(molecule: &Molecule, adjacency: &[Vec<usize>]) -> Vec<bool> {
    let n = molecule.atom_count();
    let mut unsaturated = vec![false; n];
    let mut aromatic = vec![false; n];
    for bond in molecule.bonds() {
        if bond.order == BondOrder::Aromatic {
            aromatic[bond.atom1] = true;
            aromatic[bond.atom2] = true;
        }
        if matches!(bond.order, BondOrder::Double | BondOrder::Aromatic) {
            unsaturated[bond.atom1] = true;
            unsaturated[bond.atom2] = true;
        }
    }

    for bond in molecule.bonds() {
        if !(unsaturated[bond.atom1] && unsaturated[bond.atom2]) {
            continue;
        }
        if let Some(cycle) = shortest_cycle_through(adjacency, bond.atom1, bond.atom2) {
            let ring_size_ok = matches!(cycle.len(), 5 | 6);
            let all_unsaturated = cycle.iter().all(|&i| {
                unsaturated[i]
                    || (cycle.len() == 5
                        && matches!(
                            molecule.atoms()[i].element,
                            Element::N | Element::O | Element::S
                        ))
            });
            if ring_size_ok && all_unsaturated {
                for &i in &cycle {
                    aromatic[i] = true;
                }
            }
        }
    }
    aromatic
}
