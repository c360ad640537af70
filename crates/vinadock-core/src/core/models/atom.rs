use nalgebra::Point3;
use phf::{Map, phf_map};

/// Single-bond covalent radii in Angstroms, keyed by element symbol.
#[rustfmt::skip]
static COVALENT_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 0.31, "C" => 0.76, "N" => 0.71, "O" => 0.66, "P" => 1.07, "S" => 1.05,
    "F" => 0.57, "Cl" => 1.02, "Br" => 1.20, "I" => 1.39,
    "Na" => 1.66, "K" => 2.03, "Mg" => 1.41, "Ca" => 1.76,
    "Mn" => 1.39, "Fe" => 1.32, "Co" => 1.26, "Ni" => 1.24, "Cu" => 1.32, "Zn" => 1.22,
    "Se" => 1.20, "B" => 0.84, "Si" => 1.11, "Li" => 1.28,
};

/// Chemical elements recognized by the structure readers.
///
/// Anything outside this set parses as [`Element::Unknown`] and is still carried
/// through reading and writing, it simply never takes part in bond perception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Element {
    H,
    #[default]
    C,
    N,
    O,
    P,
    S,

    F,
    Cl,
    Br,
    I,

    Na,
    K,
    Mg,
    Ca,

    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,

    Se,
    B,
    Si,
    Li,

    Unknown,
}

impl Element {
    /// Parses an element symbol, case-insensitively.
    ///
    /// Deuterium and tritium map to hydrogen.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim().to_uppercase().as_str() {
            "H" | "D" | "T" => Self::H,
            "C" => Self::C,
            "N" => Self::N,
            "O" => Self::O,
            "P" => Self::P,
            "S" => Self::S,
            "F" => Self::F,
            "CL" => Self::Cl,
            "BR" => Self::Br,
            "I" => Self::I,
            "NA" => Self::Na,
            "K" => Self::K,
            "MG" => Self::Mg,
            "CA" => Self::Ca,
            "MN" => Self::Mn,
            "FE" => Self::Fe,
            "CO" => Self::Co,
            "NI" => Self::Ni,
            "CU" => Self::Cu,
            "ZN" => Self::Zn,
            "SE" => Self::Se,
            "B" => Self::B,
            "SI" => Self::Si,
            "LI" => Self::Li,
            _ => Self::Unknown,
        }
    }

    /// Infers the element from a PDB-style atom name such as `" CA "` or `"HG21"`.
    ///
    /// Two-letter symbols are only accepted for names that start in the first
    /// column, which is how the PDB convention separates calcium from C-alpha.
    pub fn from_atom_name(name: &str) -> Self {
        let starts_in_first_column =
            !name.starts_with(' ') && !name.starts_with(|c: char| c.is_ascii_digit());
        if let Some(prefix) = name.get(..2).filter(|_| starts_in_first_column) {
            let two = Self::from_symbol(prefix);
            if two != Self::Unknown && two != Self::H {
                return two;
            }
        }
        let letters: String = name
            .trim()
            .chars()
            .skip_while(|c| c.is_ascii_digit())
            .take(1)
            .collect();
        Self::from_symbol(&letters)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::H => "H",
            Self::C => "C",
            Self::N => "N",
            Self::O => "O",
            Self::P => "P",
            Self::S => "S",
            Self::F => "F",
            Self::Cl => "Cl",
            Self::Br => "Br",
            Self::I => "I",
            Self::Na => "Na",
            Self::K => "K",
            Self::Mg => "Mg",
            Self::Ca => "Ca",
            Self::Mn => "Mn",
            Self::Fe => "Fe",
            Self::Co => "Co",
            Self::Ni => "Ni",
            Self::Cu => "Cu",
            Self::Zn => "Zn",
            Self::Se => "Se",
            Self::B => "B",
            Self::Si => "Si",
            Self::Li => "Li",
            Self::Unknown => "X",
        }
    }

    pub fn covalent_radius(&self) -> Option<f64> {
        COVALENT_RADII.get(self.symbol()).copied()
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        *self == Self::H
    }
}

/// A single atom of a [`Molecule`](super::molecule::Molecule).
///
/// Residue and chain fields are only meaningful for macromolecules read from
/// PDB-like files; small molecules read from SDF carry the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number as found in the source file (1-based by convention).
    pub serial: usize,
    /// Atom name (e.g., "CA", "C1").
    pub name: String,
    pub element: Element,
    pub res_name: String,
    pub res_id: isize,
    pub chain_id: char,
    /// Whether the atom was read from (or should be written as) a HETATM record.
    pub is_hetero: bool,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The partial atomic charge in elementary charge units.
    pub partial_charge: f64,
    /// AutoDock atom type read from a PDBQT file, if any.
    pub ad_type: Option<String>,
}

impl Atom {
    /// Creates a new `Atom` with ligand-style defaults for the residue fields.
    pub fn new(name: &str, element: Element, position: Point3<f64>) -> Self {
        Self {
            serial: 0,
            name: name.to_string(),
            element,
            res_name: "UNL".to_string(),
            res_id: 1,
            chain_id: ' ',
            is_hetero: false,
            position,
            partial_charge: 0.0,
            ad_type: None,
        }
    }
}
