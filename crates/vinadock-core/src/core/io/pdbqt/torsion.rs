use crate::core::models::atom::Element;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use crate::core::utils::graph::{connected_components, is_ring_bond};

/// A rigid fragment hanging off its parent through one rotatable bond.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Atom index on the parent side of the rotatable bond.
    pub parent_atom: usize,
    /// Atom index on this side of the rotatable bond; listed first in `atoms`.
    pub child_atom: usize,
    pub atoms: Vec<usize>,
    pub children: Vec<Branch>,
}

/// ROOT/BRANCH decomposition of a flexible ligand.
#[derive(Debug, Clone, PartialEq)]
pub struct TorsionTree {
    pub root: Vec<usize>,
    pub branches: Vec<Branch>,
}

impl TorsionTree {
    /// Builds the tree from the molecule's bonds.
    ///
    /// The root is the largest rigid fragment (the first one on ties). Fragments
    /// not connected to the root through rotatable bonds (counter-ions, waters)
    /// are folded into the root.
    pub fn build(molecule: &Molecule) -> Self {
        let adjacency = molecule.adjacency();
        let rotatable = rotatable_bonds(molecule, &adjacency);
        let fragments = connected_components(&adjacency, &rotatable);

        let mut fragment_of = vec![0; molecule.atom_count()];
        for (id, members) in fragments.iter().enumerate() {
            for &atom in members {
                fragment_of[atom] = id;
            }
        }

        let root_id = fragments
            .iter()
            .enumerate()
            .fold(None::<(usize, usize)>, |best, (id, members)| match best {
                Some((_, size)) if size >= members.len() => best,
                _ => Some((id, members.len())),
            })
            .map(|(id, _)| id)
            .unwrap_or(0);

        let mut visited = vec![false; fragments.len()];
        let mut root = Vec::new();
        let mut branches = Vec::new();
        if let Some(members) = fragments.get(root_id) {
            visited[root_id] = true;
            root.extend_from_slice(members);
            branches = grow_branches(root_id, &fragments, &fragment_of, &rotatable, &mut visited);
        }

        for (id, members) in fragments.iter().enumerate() {
            if !visited[id] {
                root.extend_from_slice(members);
            }
        }
        root.sort_unstable();

        Self { root, branches }
    }

    /// Number of branches, i.e. active torsions.
    pub fn torsion_count(&self) -> usize {
        fn count(branches: &[Branch]) -> usize {
            branches.iter().map(|b| 1 + count(&b.children)).sum()
        }
        count(&self.branches)
    }

    /// Atom indices in the order they are written.
    pub fn write_order(&self) -> Vec<usize> {
        fn walk(branches: &[Branch], out: &mut Vec<usize>) {
            for branch in branches {
                out.extend_from_slice(&branch.atoms);
                walk(&branch.children, out);
            }
        }
        let mut order = self.root.clone();
        walk(&self.branches, &mut order);
        order
    }
}

fn grow_branches(
    fragment: usize,
    fragments: &[Vec<usize>],
    fragment_of: &[usize],
    rotatable: &[(usize, usize)],
    visited: &mut [bool],
) -> Vec<Branch> {
    let mut branches = Vec::new();
    for &(a, b) in rotatable {
        let (parent_atom, child_atom) = if fragment_of[a] == fragment {
            (a, b)
        } else if fragment_of[b] == fragment {
            (b, a)
        } else {
            continue;
        };
        let child = fragment_of[child_atom];
        if visited[child] {
            continue;
        }
        visited[child] = true;

        let mut atoms = vec![child_atom];
        atoms.extend(fragments[child].iter().copied().filter(|&i| i != child_atom));
        let children = grow_branches(child, fragments, fragment_of, rotatable, visited);
        branches.push(Branch {
            parent_atom,
            child_atom,
            atoms,
            children,
        });
    }
    branches
}

/// Single, acyclic bonds between two non-terminal heavy atoms, excluding amide
/// C-N bonds.
pub fn rotatable_bonds(molecule: &Molecule, adjacency: &[Vec<usize>]) -> Vec<(usize, usize)> {
    let atoms = molecule.atoms();
    let heavy_degree = |i: usize| {
        adjacency[i]
            .iter()
            .filter(|&&j| !atoms[j].element.is_hydrogen())
            .count()
    };
    let is_carbonyl_carbon = |c: usize| {
        atoms[c].element == Element::C
            && molecule.bonds().iter().any(|bond| {
                bond.order == BondOrder::Double
                    && bond
                        .partner(c)
                        .is_some_and(|o| atoms[o].element == Element::O)
            })
    };
    let is_amide = |a: usize, b: usize| {
        (atoms[a].element == Element::N && is_carbonyl_carbon(b))
            || (atoms[b].element == Element::N && is_carbonyl_carbon(a))
    };

    molecule
        .bonds()
        .iter()
        .filter(|bond| bond.order == BondOrder::Single)
        .filter(|bond| {
            !atoms[bond.atom1].element.is_hydrogen() && !atoms[bond.atom2].element.is_hydrogen()
        })
        .filter(|bond| heavy_degree(bond.atom1) > 1 && heavy_degree(bond.atom2) > 1)
        .filter(|bond| !is_amide(bond.atom1, bond.atom2))
        .filter(|bond| !is_ring_bond(adjacency, bond.atom1, bond.atom2))
        .map(|bond| (bond.atom1, bond.atom2))
        .collect()
}
