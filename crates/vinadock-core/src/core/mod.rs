//! # Core Module
//!
//! Stateless building blocks for preparing docking inputs and reading docking
//! results back into memory.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, molecules and their data stores
//! - **File I/O** ([`io`]) - PDBQT, PDB and SDF readers/writers plus atom-order recovery
//! - **Utilities** ([`utils`]) - Geometry, graph searches, RMSD and file naming
//!
//! Nothing in this layer spawns processes or owns scratch space; that is the
//! job of [`crate::engine`].

pub mod io;
pub mod models;
pub mod utils;
