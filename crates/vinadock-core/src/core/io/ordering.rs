//! Recovering atom correspondence after a writer reordered atoms.
//!
//! The PDBQT writer keeps each atom's original 1-based index in the serial
//! field but emits atoms grouped by torsion-tree fragment. The docking engine
//! reproduces that write order in its output. Reading the serials back gives
//! the write order; its argsort is the permutation that restores input order.

use super::error::{FormatError, parse_int_field};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Serial numbers of the `ATOM` records of a file, in file order.
///
/// Only the first model is considered, so a multi-model file yields the order
/// of one molecule.
pub fn read_write_order(path: impl AsRef<Path>) -> Result<Vec<usize>, FormatError> {
    let reader = BufReader::new(File::open(path)?);
    let mut order = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.starts_with("ENDMDL") {
            break;
        }
        if line.starts_with("ATOM") {
            order.push(parse_int_field(&line, line_num + 1, 6, 11)?);
        }
    }
    Ok(order)
}

/// 1-based positions that put written atoms back in input order.
///
/// Entry `k` is the 1-based position, in the written file, of the atom with
/// the `k`-th smallest serial. Ties keep file order.
pub fn restoring_order(write_order: &[usize]) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..write_order.len()).collect();
    positions.sort_by_key(|&i| write_order[i]);
    positions.into_iter().map(|i| i + 1).collect()
}
