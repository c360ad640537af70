use super::atom::Atom;
use super::data::MoleculeData;
use super::topology::{Bond, BondOrder, perceive_bonds};
use crate::core::utils::geometry::centroid;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MoleculeError {
    #[error("Atom count mismatch: expected {expected}, found {found}")]
    AtomCountMismatch { expected: usize, found: usize },
    #[error("Invalid atom order: {0}")]
    InvalidOrder(String),
    #[error("Molecule has no atoms")]
    Empty,
    #[error("Atom {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
    #[error("Molecule has only 2D coordinates and 3D generation is not available")]
    FlatCoordinates,
}

/// An ordered collection of atoms and bonds with an associated data store.
///
/// Atom order is significant: index `i` is the `i + 1`-th atom in 1-based terms,
/// which is the numbering used by atom-order reconciliation after docking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    /// Title used to name files written for this molecule.
    pub title: String,
    /// Whether the molecule is a receptor (affects how it is written for docking).
    pub is_protein: bool,
    /// Associated data (SDF properties, scores, RMSD metrics).
    pub data: MoleculeData,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl Molecule {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Appends an atom and returns its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Adds a bond between two atoms.
    ///
    /// Adding a bond that already exists is a no-op. Returns `None` if either
    /// index is out of range or both indices are equal.
    pub fn add_bond(&mut self, atom1: usize, atom2: usize, order: BondOrder) -> Option<()> {
        if atom1 >= self.atoms.len() || atom2 >= self.atoms.len() || atom1 == atom2 {
            return None;
        }
        let exists = self
            .bonds
            .iter()
            .any(|b| b.contains(atom1) && b.contains(atom2));
        if !exists {
            self.bonds.push(Bond::new(atom1, atom2, order));
        }
        Some(())
    }

    /// Perceives bonds from geometry when the molecule carries none.
    ///
    /// Returns `true` if bonds were perceived.
    pub fn perceive_bonds_if_missing(&mut self) -> bool {
        if !self.bonds.is_empty() || self.atoms.len() < 2 {
            return false;
        }
        self.bonds = perceive_bonds(&self.atoms);
        true
    }

    /// Builds an adjacency list indexed by atom index.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.atoms.len()];
        for bond in &self.bonds {
            adjacency[bond.atom1].push(bond.atom2);
            adjacency[bond.atom2].push(bond.atom1);
        }
        adjacency
    }

    pub fn heavy_atom_indices(&self) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| !atom.element.is_hydrogen())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn coordinates(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|atom| atom.position).collect()
    }

    /// Geometric center of all atoms, or `None` for an empty molecule.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        centroid(&self.coordinates())
    }

    /// Overwrites this molecule's coordinates with those of `other`, atom by atom.
    ///
    /// Only geometry is copied; connectivity, names and data stay untouched.
    pub fn clone_coords_from(&mut self, other: &Molecule) -> Result<(), MoleculeError> {
        if other.atoms.len() != self.atoms.len() {
            return Err(MoleculeError::AtomCountMismatch {
                expected: self.atoms.len(),
                found: other.atoms.len(),
            });
        }
        for (atom, source) in self.atoms.iter_mut().zip(&other.atoms) {
            atom.position = source.position;
        }
        Ok(())
    }

    /// Reorders atoms so that new atom `k` is old atom `order[k] - 1`.
    ///
    /// `order` is 1-based and must be a permutation of `1..=atom_count`. Bonds are
    /// remapped to the new indices.
    pub fn renumber_atoms(&mut self, order: &[usize]) -> Result<(), MoleculeError> {
        let n = self.atoms.len();
        if order.len() != n {
            return Err(MoleculeError::AtomCountMismatch {
                expected: n,
                found: order.len(),
            });
        }
        let mut new_index_of = vec![usize::MAX; n];
        for (new_index, &old_one_based) in order.iter().enumerate() {
            if old_one_based == 0 || old_one_based > n {
                return Err(MoleculeError::InvalidOrder(format!(
                    "index {} is outside 1..={}",
                    old_one_based, n
                )));
            }
            let old_index = old_one_based - 1;
            if new_index_of[old_index] != usize::MAX {
                return Err(MoleculeError::InvalidOrder(format!(
                    "index {} appears more than once",
                    old_one_based
                )));
            }
            new_index_of[old_index] = new_index;
        }

        let reordered = order.iter().map(|&i| self.atoms[i - 1].clone()).collect();
        self.atoms = reordered;
        for bond in &mut self.bonds {
            bond.atom1 = new_index_of[bond.atom1];
            bond.atom2 = new_index_of[bond.atom2];
        }
        Ok(())
    }

    /// Checks that the molecule has usable 3D coordinates.
    ///
    /// There is no 3D coordinate generator, so a molecule that only has 2D
    /// coordinates cannot be repaired and is rejected.
    pub fn ensure_3d_coordinates(&self) -> Result<(), MoleculeError> {
        if self.atoms.is_empty() {
            return Err(MoleculeError::Empty);
        }
        if let Some(index) = self.atoms.iter().position(|atom| {
            !(atom.position.x.is_finite()
                && atom.position.y.is_finite()
                && atom.position.z.is_finite())
        }) {
            return Err(MoleculeError::NonFiniteCoordinate { index });
        }
        if self.atoms.len() > 1 && self.atoms.iter().all(|atom| atom.position.z == 0.0) {
            return Err(MoleculeError::FlatCoordinates);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Element;
    use nalgebra::Vector3;

    fn triatomic() -> Molecule {
        let mut mol = Molecule::new("water");
        mol.add_atom(Atom::new("O", Element::O, Point3::new(0.0, 0.0, 0.1)));
        mol.add_atom(Atom::new("H1", Element::H, Point3::new(0.96, 0.0, 0.0)));
        mol.add_atom(Atom::new("H2", Element::H, Point3::new(-0.24, 0.93, 0.0)));
        mol.add_bond(0, 1, BondOrder::Single).unwrap();
        mol.add_bond(0, 2, BondOrder::Single).unwrap();
        mol
    }

    #[test]
    fn add_bond_is_idempotent_and_validates_indices() {
        let mut mol = triatomic();
        assert!(mol.add_bond(1, 0, BondOrder::Single).is_some());
        assert_eq!(mol.bonds().len(), 2);
        assert!(mol.add_bond(0, 9, BondOrder::Single).is_none());
        assert!(mol.add_bond(1, 1, BondOrder::Single).is_none());
    }

    #[test]
    fn centroid_is_mean_of_positions() {
        let mut mol = Molecule::new("pair");
        mol.add_atom(Atom::new("C1", Element::C, Point3::new(0.0, 0.0, 0.0)));
        mol.add_atom(Atom::new("C2", Element::C, Point3::new(2.0, 4.0, -6.0)));
        assert_eq!(mol.centroid(), Some(Point3::new(1.0, 2.0, -3.0)));
        assert_eq!(Molecule::new("empty").centroid(), None);
    }

    #[test]
    fn renumber_atoms_permutes_atoms_and_remaps_bonds() {
        let mut mol = triatomic();
        mol.renumber_atoms(&[2, 3, 1]).unwrap();

        let names: Vec<_> = mol.atoms().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["H1", "H2", "O"]);
        for bond in mol.bonds() {
            assert!(bond.contains(2), "every bond should still touch the oxygen");
        }
    }

    #[test]
    fn renumber_atoms_rejects_non_permutations() {
        let mut mol = triatomic();
        assert!(matches!(
            mol.renumber_atoms(&[1, 2]),
            Err(MoleculeError::AtomCountMismatch { .. })
        ));
        assert!(matches!(
            mol.renumber_atoms(&[1, 1, 2]),
            Err(MoleculeError::InvalidOrder(_))
        ));
        assert!(matches!(
            mol.renumber_atoms(&[0, 1, 2]),
            Err(MoleculeError::InvalidOrder(_))
        ));
    }

    #[test]
    fn clone_coords_copies_geometry_only() {
        let mut target = triatomic();
        let mut source = triatomic();
        source.title = "moved".to_string();
        for atom in source.atoms_mut() {
            atom.position += Vector3::new(1.0, 1.0, 1.0);
        }
        target.clone_coords_from(&source).unwrap();

        assert_eq!(target.title, "water");
        assert_eq!(target.atoms()[0].position, Point3::new(1.0, 1.0, 1.1));
        assert_eq!(target.bonds().len(), 2);
    }

    #[test]
    fn clone_coords_requires_equal_atom_counts() {
        let mut target = triatomic();
        let source = Molecule::new("empty");
        assert_eq!(
            target.clone_coords_from(&source),
            Err(MoleculeError::AtomCountMismatch {
                expected: 3,
                found: 0
            })
        );
    }

    #[test]
    fn ensure_3d_coordinates_rejects_unusable_molecules() {
        assert_eq!(
            Molecule::new("empty").ensure_3d_coordinates(),
            Err(MoleculeError::Empty)
        );

        let mut flat = triatomic();
        flat.atoms_mut()[0].position.z = 0.0;
        assert_eq!(
            flat.ensure_3d_coordinates(),
            Err(MoleculeError::FlatCoordinates)
        );

        let mut broken = triatomic();
        broken.atoms_mut()[1].position.x = f64::NAN;
        assert_eq!(
            broken.ensure_3d_coordinates(),
            Err(MoleculeError::NonFiniteCoordinate { index: 1 })
        );

        assert!(triatomic().ensure_3d_coordinates().is_ok());
    }

    #[test]
    fn perceive_bonds_only_runs_when_bonds_are_missing() {
        let mut mol = triatomic();
        assert!(!mol.perceive_bonds_if_missing());

        let mut bare = Molecule::new("bare");
        bare.add_atom(Atom::new("C1", Element::C, Point3::new(0.0, 0.0, 0.0)));
        bare.add_atom(Atom::new("C2", Element::C, Point3::new(1.5, 0.0, 0.0)));
        assert!(bare.perceive_bonds_if_missing());
        assert_eq!(bare.bonds().len(), 1);
    }
}
