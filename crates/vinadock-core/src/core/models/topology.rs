use super::atom::Atom;
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Slack added to the sum of covalent radii when perceiving bonds from distances.
const BOND_TOLERANCE: f64 = 0.45;
/// Pairs closer than this are treated as overlapping atoms, not bonds.
const MIN_BOND_DISTANCE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single = 1,
    Double = 2,
    Triple = 3,
    Aromatic = 4,
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            "4" | "ar" | "aromatic" => Ok(Self::Aromatic),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Aromatic => "Aromatic",
            }
        )
    }
}

/// A bond between two atoms, referenced by their index in the owning molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }

    /// Returns the partner of `atom` in this bond, if `atom` takes part in it.
    pub fn partner(&self, atom: usize) -> Option<usize> {
        if self.atom1 == atom {
            Some(self.atom2)
        } else if self.atom2 == atom {
            Some(self.atom1)
        } else {
            None
        }
    }
}

/// Perceives single bonds from interatomic distances and covalent radii.
///
/// Atoms with an unknown radius never bond, and hydrogen-hydrogen pairs are skipped.
/// Bonds come out ordered by their first and then second atom index.
pub fn perceive_bonds(atoms: &[Atom]) -> Vec<Bond> {
    let bondable: Vec<(usize, f64)> = atoms
        .iter()
        .enumerate()
        .filter_map(|(index, atom)| atom.element.covalent_radius().map(|r| (index, r)))
        .collect();
    let Some(max_radius) = bondable.iter().map(|&(_, r)| r).reduce(f64::max) else {
        return Vec::new();
    };

    let positions: Vec<[f64; 3]> = bondable
        .iter()
        .map(|&(index, _)| {
            let p = atoms[index].position;
            [p.x, p.y, p.z]
        })
        .collect();
    // 2D inputs put every atom at z = 0, so buckets must tolerate repeated axis values.
    let kdtree: ImmutableKdTree<f64, 3> = ImmutableKdTree::new_from_slice(&positions);
    let min_distance_sq = MIN_BOND_DISTANCE * MIN_BOND_DISTANCE;

    let mut bonds = Vec::new();
    for (slot, &(i, r1)) in bondable.iter().enumerate() {
        let search = r1 + max_radius + BOND_TOLERANCE;
        let mut partners: Vec<usize> = kdtree
            .within_unsorted::<SquaredEuclidean>(&positions[slot], search * search)
            .into_iter()
            .filter_map(|neighbour| {
                let (j, r2) = bondable[neighbour.item as usize];
                let both_hydrogen =
                    atoms[i].element.is_hydrogen() && atoms[j].element.is_hydrogen();
                if j <= i || both_hydrogen {
                    return None;
                }
                let cutoff = r1 + r2 + BOND_TOLERANCE;
                (neighbour.distance <= cutoff * cutoff && neighbour.distance >= min_distance_sq)
                    .then_some(j)
            })
            .collect();
        partners.sort_unstable();
        bonds.extend(partners.into_iter().map(|j| Bond::new(i, j, BondOrder::Single)));
    }
    bonds
}
