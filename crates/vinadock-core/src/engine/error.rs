use thiserror::Error;

use super::config::ConfigError;
use super::report::ReportError;
use crate::core::io::error::FormatError;
use crate::core::models::molecule::MoleculeError;

#[derive(Debug, Error)]
pub enum DockingError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No receptor has been set for this session")]
    NoReceptor,

    #[error("Ligand #{index} ('{title}') has unusable coordinates: {source}")]
    UnusableLigand {
        index: usize,
        title: String,
        #[source]
        source: MoleculeError,
    },

    #[error("Docking engine failed: {command}")]
    EngineFailed { command: String },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Engine reported {records} pose record(s) but wrote {poses} pose(s)")]
    PoseCountMismatch { records: usize, poses: usize },

    #[error("Atom count mismatch for ligand '{title}': expected {expected}, found {found}")]
    AtomCountMismatch {
        title: String,
        expected: usize,
        found: usize,
    },

    #[error("Pose of ligand '{title}' could not be mapped back onto it: {source}")]
    PoseReconciliation {
        title: String,
        #[source]
        source: MoleculeError,
    },

    #[error("Structure file error: {0}")]
    Format(#[from] FormatError),

    #[error("Malformed engine report: {0}")]
    Report(#[from] ReportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
