use super::geometry::calculate_rmsd;
use crate::core::models::atom::Element;
use crate::core::models::molecule::Molecule;
use nalgebra::Point3;
use std::collections::VecDeque;
use thiserror::Error;

/// Upper bound on the number of graph automorphisms enumerated by
/// [`RmsdMethod::MinSymmetry`].
pub const MAX_AUTOMORPHISMS: usize = 100_000;

#[derive(Debug, Error, PartialEq)]
pub enum RmsdError {
    #[error("No heavy atoms to compare")]
    EmptySelection,
    #[error("Heavy atom count mismatch: reference has {reference}, molecule has {molecule}")]
    AtomCountMismatch { reference: usize, molecule: usize },
    #[error("Symmetry search exceeded {0} atom mappings")]
    TooManyAutomorphisms(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RmsdMethod {
    /// Heavy atoms are compared index by index.
    #[default]
    Plain,
    /// Minimum over all symmetry-equivalent atom mappings of the reference.
    MinSymmetry,
}

/// Heavy-atom RMSD between two conformations of the same molecule.
///
/// Both molecules must list their atoms in the same order. No superposition
/// is performed, which is what docking poses need: they share the receptor
/// frame with the input.
pub fn compute_rmsd(
    reference: &Molecule,
    molecule: &Molecule,
    method: RmsdMethod,
) -> Result<f64, RmsdError> {
    let ref_heavy = reference.heavy_atom_indices();
    let mol_heavy = molecule.heavy_atom_indices();
    if ref_heavy.is_empty() {
        return Err(RmsdError::EmptySelection);
    }
    if ref_heavy.len() != mol_heavy.len() {
        return Err(RmsdError::AtomCountMismatch {
            reference: ref_heavy.len(),
            molecule: mol_heavy.len(),
        });
    }

    let ref_coords: Vec<Point3<f64>> = ref_heavy
        .iter()
        .map(|&i| reference.atoms()[i].position)
        .collect();
    let mol_coords: Vec<Point3<f64>> = mol_heavy
        .iter()
        .map(|&i| molecule.atoms()[i].position)
        .collect();

    match method {
        RmsdMethod::Plain => {
            calculate_rmsd(&ref_coords, &mol_coords).ok_or(RmsdError::EmptySelection)
        }
        RmsdMethod::MinSymmetry => {
            let graph = HeavyGraph::from_molecule(reference, &ref_heavy);
            let mut search = SymmetrySearch::new(&graph, &ref_coords, &mol_coords);
            search.run()?;
            Ok(search.best.sqrt())
        }
    }
}

/// Heavy-atom subgraph with local indices.
struct HeavyGraph {
    adjacency: Vec<Vec<usize>>,
    labels: Vec<(Element, usize)>,
}

impl HeavyGraph {
    fn from_molecule(molecule: &Molecule, heavy: &[usize]) -> Self {
        let mut local = vec![usize::MAX; molecule.atom_count()];
        for (k, &i) in heavy.iter().enumerate() {
            local[i] = k;
        }
        let mut adjacency = vec![Vec::new(); heavy.len()];
        for bond in molecule.bonds() {
            let (a, b) = (local[bond.atom1], local[bond.atom2]);
            if a != usize::MAX && b != usize::MAX {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }
        let labels = heavy
            .iter()
            .zip(&adjacency)
            .map(|(&i, neighbors)| (molecule.atoms()[i].element, neighbors.len()))
            .collect();
        Self { adjacency, labels }
    }

    /// Breadth-first visiting order so that most atoms have an already mapped
    /// neighbor when they are reached.
    fn search_order(&self) -> Vec<usize> {
        let n = self.adjacency.len();
        let mut seen = vec![false; n];
        let mut order = Vec::with_capacity(n);
        for start in 0..n {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                order.push(current);
                for &next in &self.adjacency[current] {
                    if !seen[next] {
                        seen[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        order
    }
}

struct SymmetrySearch<'a> {
    graph: &'a HeavyGraph,
    reference: &'a [Point3<f64>],
    molecule: &'a [Point3<f64>],
    order: Vec<usize>,
    mapping: Vec<usize>,
    used: Vec<bool>,
    visited: usize,
    best: f64,
}

impl<'a> SymmetrySearch<'a> {
    fn new(
        graph: &'a HeavyGraph,
        reference: &'a [Point3<f64>],
        molecule: &'a [Point3<f64>],
    ) -> Self {
        let n = reference.len();
        Self {
            graph,
            reference,
            molecule,
            order: graph.search_order(),
            mapping: vec![usize::MAX; n],
            used: vec![false; n],
            visited: 0,
            best: f64::INFINITY,
        }
    }

    /// Enumerates automorphisms, keeping the smallest mean squared deviation.
    fn run(&mut self) -> Result<(), RmsdError> {
        self.extend(0, 0.0)
    }

    fn extend(&mut self, depth: usize, partial: f64) -> Result<(), RmsdError> {
        let n = self.reference.len();
        if depth == n {
            self.visited += 1;
            if self.visited > MAX_AUTOMORPHISMS {
                return Err(RmsdError::TooManyAutomorphisms(MAX_AUTOMORPHISMS));
            }
            self.best = self.best.min(partial / n as f64);
            return Ok(());
        }

        let atom = self.order[depth];
        for candidate in 0..n {
            if self.used[candidate] || self.graph.labels[candidate] != self.graph.labels[atom] {
                continue;
            }
            let consistent = self.graph.adjacency[atom].iter().all(|&neighbor| {
                let image = self.mapping[neighbor];
                image == usize::MAX || self.graph.adjacency[candidate].contains(&image)
            });
            if !consistent {
                continue;
            }

            let deviation = (self.reference[atom] - self.molecule[candidate]).norm_squared();
            self.mapping[atom] = candidate;
            self.used[candidate] = true;
            let result = self.extend(depth + 1, partial + deviation);
            self.mapping[atom] = usize::MAX;
            self.used[candidate] = false;
            result?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::topology::BondOrder;
    use nalgebra::Vector3;

    /// Acetate-like fragment: C0-C1, C1-O2, C1-O3, plus a hydrogen on C0.
    fn carboxylate() -> Molecule {
        let mut mol = Molecule::new("acetate");
        mol.add_atom(Atom::new("C1", Element::C, Point3::new(0.0, 0.0, 0.0)));
        mol.add_atom(Atom::new("C2", Element::C, Point3::new(1.5, 0.0, 0.0)));
        mol.add_atom(Atom::new("O1", Element::O, Point3::new(2.2, 1.1, 0.0)));
        mol.add_atom(Atom::new("O2", Element::O, Point3::new(2.2, -1.1, 0.0)));
        mol.add_atom(Atom::new("H1", Element::H, Point3::new(-0.5, 0.9, 0.0)));
        mol.add_bond(0, 1, BondOrder::Single).unwrap();
        mol.add_bond(1, 2, BondOrder::Double).unwrap();
        mol.add_bond(1, 3, BondOrder::Single).unwrap();
        mol.add_bond(0, 4, BondOrder::Single).unwrap();
        mol
    }

    #[test]
    fn identical_conformations_have_zero_rmsd() {
        let mol = carboxylate();
        assert_eq!(compute_rmsd(&mol, &mol, RmsdMethod::Plain), Ok(0.0));
        assert_eq!(compute_rmsd(&mol, &mol, RmsdMethod::MinSymmetry), Ok(0.0));
    }

    #[test]
    fn swapped_equivalent_oxygens_are_symmetric() {
        let reference = carboxylate();
        let mut swapped = carboxylate();
        let o1 = swapped.atoms()[2].position;
        let o2 = swapped.atoms()[3].position;
        swapped.atoms_mut()[2].position = o2;
        swapped.atoms_mut()[3].position = o1;

        let plain = compute_rmsd(&reference, &swapped, RmsdMethod::Plain).unwrap();
        let min = compute_rmsd(&reference, &swapped, RmsdMethod::MinSymmetry).unwrap();
        assert!(plain > 1.0);
        assert!(min.abs() < 1e-12);
    }

    #[test]
    fn hydrogens_are_ignored() {
        let reference = carboxylate();
        let mut moved = carboxylate();
        moved.atoms_mut()[4].position += Vector3::new(5.0, 5.0, 5.0);
        assert_eq!(compute_rmsd(&reference, &moved, RmsdMethod::Plain), Ok(0.0));
    }

    #[test]
    fn heavy_atom_count_mismatch_is_an_error() {
        let reference = carboxylate();
        let mut smaller = Molecule::new("smaller");
        smaller.add_atom(Atom::new("C1", Element::C, Point3::origin()));
        assert_eq!(
            compute_rmsd(&reference, &smaller, RmsdMethod::Plain),
            Err(RmsdError::AtomCountMismatch {
                reference: 4,
                molecule: 1
            })
        );
    }

    #[test]
    fn molecule_without_heavy_atoms_is_an_empty_selection() {
        let mut hydrogen = Molecule::new("h2");
        hydrogen.add_atom(Atom::new("H1", Element::H, Point3::origin()));
        assert_eq!(
            compute_rmsd(&hydrogen, &hydrogen, RmsdMethod::MinSymmetry),
            Err(RmsdError::EmptySelection)
        );
    }

    #[test]
    fn highly_symmetric_graphs_hit_the_mapping_cap() {
        // Nine disconnected carbons have 9! = 362 880 automorphisms.
        let mut gas = Molecule::new("gas");
        for i in 0..9 {
            gas.add_atom(Atom::new("C", Element::C, Point3::new(i as f64 * 5.0, 0.0, 0.0)));
        }
        assert_eq!(
            compute_rmsd(&gas, &gas, RmsdMethod::MinSymmetry),
            Err(RmsdError::TooManyAutomorphisms(MAX_AUTOMORPHISMS))
        );
    }
}
