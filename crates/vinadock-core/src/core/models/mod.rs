//! # Core Models Module
//!
//! Data structures used to represent receptors, ligands and docked poses.
//!
//! ## Key Components
//!
//! - [`atom`] - Atoms and chemical elements
//! - [`topology`] - Bonds, bond orders and distance-based bond perception
//! - [`molecule`] - Ordered atom/bond container with coordinate operations
//! - [`data`] - Per-molecule key/value store and score records
//! - [`builder`] - Serial-number based molecule assembly for file readers
//!
//! Atom order inside a [`molecule::Molecule`] is significant. Docking engines
//! may hand atoms back in a different order than they were submitted, and the
//! docking workflow relies on index-stable atoms to undo that.

pub mod atom;
pub mod builder;
pub mod data;
pub mod molecule;
pub mod topology;
