//! # Engine Module
//!
//! This module drives an external AutoDock Vina binary: it resolves and probes
//! the executable, prepares input files, runs the engine, and turns its
//! human-readable reports back into per-molecule data.
//!
//! ## Overview
//!
//! A [`session::DockingSession`] is the long-lived handle. It is built from a
//! [`config::VinaConfig`], holds one receptor and one search box, and owns the
//! scratch directories used for engine input and output. The scoring and
//! docking pipelines in [`crate::workflows`] borrow a session for each batch.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Search box, search settings and session options
//! - **Executable** ([`executable`]) - Locating, probing and running the engine binary
//! - **Preparation** ([`prepare`]) - Writing receptors and ligands as engine input
//! - **Reports** ([`report`]) - Parsing scoring terms and docking pose tables
//! - **Scratch Space** ([`scratch`]) - Session and per-call temporary directories
//! - **Progress Monitoring** ([`progress`]) - Per-ligand progress events
//! - **Error Handling** ([`error`]) - Session and pipeline error types

pub mod config;
pub mod error;
pub mod executable;
pub mod prepare;
pub mod progress;
pub mod report;
pub mod scratch;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
