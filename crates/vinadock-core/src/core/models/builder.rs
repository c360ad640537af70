use super::atom::Atom;
use super::molecule::Molecule;
use super::topology::BondOrder;
use std::collections::HashMap;

/// Incrementally assembles a [`Molecule`] from file records that reference atoms
/// by serial number rather than by index.
pub struct MoleculeBuilder {
    molecule: Molecule,

    atom_serial_map: HashMap<usize, usize>,
    pending_bonds: Vec<(usize, usize, BondOrder)>,
}

impl Default for MoleculeBuilder {
    fn default() -> Self {
        Self::new("")
    }
}

impl MoleculeBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            molecule: Molecule::new(title),
            atom_serial_map: HashMap::new(),
            pending_bonds: Vec::new(),
        }
    }

    pub fn title(&mut self, title: &str) -> &mut Self {
        self.molecule.title = title.to_string();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.molecule.atom_count() == 0
    }

    /// Adds an atom, keeping its serial for later bond lookups.
    ///
    /// Returns `false` if the serial was already used, in which case the atom is
    /// not added.
    pub fn add_atom(&mut self, atom: Atom) -> bool {
        if self.atom_serial_map.contains_key(&atom.serial) {
            return false;
        }
        let serial = atom.serial;
        let index = self.molecule.add_atom(atom);
        self.atom_serial_map.insert(serial, index);
        true
    }

    /// Records a bond between two serials; resolved in [`build`](Self::build).
    pub fn add_bond(&mut self, serial1: usize, serial2: usize, order: BondOrder) -> &mut Self {
        self.pending_bonds.push((serial1, serial2, order));
        self
    }

    /// Finishes the molecule.
    ///
    /// Returns the molecule together with the serial pairs of bonds whose atoms
    /// were never added, so callers can decide whether that is an error.
    pub fn build(mut self) -> (Molecule, Vec<(usize, usize)>) {
        let mut dangling = Vec::new();
        for (s1, s2, order) in std::mem::take(&mut self.pending_bonds) {
            match (self.atom_serial_map.get(&s1), self.atom_serial_map.get(&s2)) {
                (Some(&i), Some(&j)) => {
                    self.molecule.add_bond(i, j, order);
                }
                _ => dangling.push((s1, s2)),
            }
        }
        (self.molecule, dangling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Element;
    use nalgebra::Point3;

    fn atom(serial: usize, name: &str) -> Atom {
        let mut atom = Atom::new(name, Element::C, Point3::origin());
        atom.serial = serial;
        atom
    }

    #[test]
    fn bonds_are_resolved_by_serial() {
        let mut builder = MoleculeBuilder::new("mol");
        builder.add_atom(atom(10, "C1"));
        builder.add_atom(atom(20, "C2"));
        builder.add_bond(20, 10, BondOrder::Double);
        let (mol, dangling) = builder.build();

        assert!(dangling.is_empty());
        assert_eq!(mol.bonds().len(), 1);
        assert_eq!(mol.bonds()[0].atom1, 1);
        assert_eq!(mol.bonds()[0].atom2, 0);
        assert_eq!(mol.bonds()[0].order, BondOrder::Double);
    }

    #[test]
    fn duplicate_serials_are_rejected_and_unknown_bonds_reported() {
        let mut builder = MoleculeBuilder::new("mol");
        assert!(builder.add_atom(atom(1, "C1")));
        assert!(!builder.add_atom(atom(1, "C2")));
        builder.add_bond(1, 99, BondOrder::Single);
        let (mol, dangling) = builder.build();

        assert_eq!(mol.atom_count(), 1);
        assert_eq!(dangling, vec![(1, 99)]);
    }
}
