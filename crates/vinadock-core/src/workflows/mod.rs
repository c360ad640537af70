//! # Workflows Module
//!
//! The batch pipelines that turn a list of ligands into annotated molecules.
//!
//! ## Overview
//!
//! Each workflow borrows a [`DockingSession`](crate::engine::session::DockingSession)
//! for the duration of one batch. Ligands are processed strictly in order, one
//! engine process at a time; parallelism is left to the engine's own `--cpu`
//! option. Inputs are never modified. Results are clones carrying the engine's
//! output in their data store.
//!
//! - **Scoring** ([`score`]) - Evaluates each ligand in its given pose.
//! - **Docking** ([`dock`]) - Searches poses and returns one clone per pose,
//!   with atoms restored to input order and RMSD to the input attached.
//!
//! Both workflows share the batch setup and failure policy in `batch`: the
//! receptor may be swapped first, every ligand must have usable 3D coordinates,
//! and a failed engine run is either skipped or fatal depending on the session.

mod batch;
pub mod dock;
pub mod score;
