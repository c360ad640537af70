//! Fixtures shared by engine and workflow tests.

use crate::core::models::atom::{Atom, Element};
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use nalgebra::Point3;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A shell script that mimics the engine's command-line behavior.
///
/// - `--version` prints a 1.1.2 banner.
/// - Any ligand path containing `bad` makes it exit with status 1.
/// - Scoring prints a fixed report; docking prints `rows` table rows and writes
///   `models` copies of the ligand's records to `--out`.
pub(crate) struct FakeVina {
    _dir: TempDir,
    path: PathBuf,
}

impl FakeVina {
    pub(crate) fn new() -> Self {
        Self::with_poses(3, 3)
    }

    pub(crate) fn with_poses(rows: usize, models: usize) -> Self {
        let dir = tempfile::tempdir().expect("create fake engine directory");
        let path = dir.path().join("vina");
        let script = SCRIPT
            .replace("@ROWS@", &rows.to_string())
            .replace("@MODELS@", &models.to_string());
        fs::write(&path, script).expect("write fake engine");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("make fake engine executable");
        }
        Self { _dir: dir, path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

const SCRIPT: &str = r##"#!/bin/sh
mode=dock
receptor=""
ligand=""
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    --version) echo "AutoDock Vina 1.1.2 (May 11, 2011)"; exit 0 ;;
    --score_only) mode=score ;;
    --receptor) shift; receptor="$1" ;;
    --ligand) shift; ligand="$1" ;;
    --out) shift; out="$1" ;;
  esac
  shift
done
if [ ! -f "$receptor" ]; then
  echo "Could not open receptor \"$receptor\"" >&2
  exit 2
fi
case "$ligand" in
  *bad*) echo "Parse error on line 1 in file \"$ligand\"" >&2; exit 1 ;;
esac
i=1
while [ $i -le 13 ]; do
  echo "# banner $i"
  i=$((i + 1))
done
if [ "$mode" = score ]; then
  echo "Affinity: -6.75 (kcal/mol)"
  echo "Intermolecular contributions to the terms, before weighting:"
  echo "    gauss 1     : 48.125"
  echo "    repulsion   : 1.25"
  exit 0
fi
echo "mode |   affinity | dist from best mode"
echo "     | (kcal/mol) | rmsd l.b.| rmsd u.b."
echo "-----+------------+----------+----------"
m=1
while [ $m -le @ROWS@ ]; do
  echo "   $m         -$((9 - m)).5      $m.000      $((m * 2)).000"
  m=$((m + 1))
done
: > "$out"
m=1
while [ $m -le @MODELS@ ]; do
  echo "MODEL $m" >> "$out"
  echo "REMARK VINA RESULT:    -$((9 - m)).5      0.000      0.000" >> "$out"
  grep -E '^(ROOT|ENDROOT|BRANCH|ENDBRANCH|ATOM|HETATM|TORSDOF)' "$ligand" >> "$out"
  echo "ENDMDL" >> "$out"
  m=$((m + 1))
done
echo "Writing output ... done."
"##;

/// Heavy-atom C1-O2-C3-C4(-C5)-C6. The flexible writer emits it out of index
/// order because the C4 fragment is the largest.
pub(crate) fn branched_ligand(title: &str) -> Molecule {
    let mut mol = Molecule::new(title);
    let atoms = [
        ("C1", Element::C, [0.0, 0.0, 0.0]),
        ("O2", Element::O, [1.4, 0.2, 0.1]),
        ("C3", Element::C, [2.1, 1.4, -0.2]),
        ("C4", Element::C, [3.6, 1.3, 0.0]),
        ("C5", Element::C, [4.2, 2.6, 0.4]),
        ("C6", Element::C, [4.1, 0.4, 1.1]),
    ];
    for (name, element, [x, y, z]) in atoms {
        mol.add_atom(Atom::new(name, element, Point3::new(x, y, z)));
    }
    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 4), (3, 5)] {
        mol.add_bond(a, b, BondOrder::Single).expect("valid bond");
    }
    mol
}

/// A few receptor atoms; enough to be written and read back.
pub(crate) fn small_receptor() -> Molecule {
    let mut mol = Molecule::new("receptor");
    let atoms = [
        ("N", Element::N, [10.0, 10.0, 10.0]),
        ("CA", Element::C, [11.4, 10.0, 10.2]),
        ("C", Element::C, [12.0, 11.4, 10.1]),
        ("O", Element::O, [11.3, 12.4, 10.0]),
    ];
    for (name, element, [x, y, z]) in atoms {
        let mut atom = Atom::new(name, element, Point3::new(x, y, z));
        atom.res_name = "ALA".to_string();
        atom.chain_id = 'A';
        mol.add_atom(atom);
    }
    mol.is_protein = true;
    mol
}
