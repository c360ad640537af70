//! # vinadock
//!
//! Drives an AutoDock Vina compatible docking engine from Rust: prepares PDBQT
//! inputs, runs the engine executable, and turns its text output into scores
//! and poses attached to in-memory molecules.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`), file
//!   formats, bond perception, AutoDock atom typing and RMSD utilities.
//!
//! - **[`engine`]: The Logic Core.** The stateful pieces: validated engine
//!   configuration, the executable wrapper, report parsing, file preparation,
//!   scratch-space tracking and the [`engine::session::DockingSession`] that
//!   ties them together.
//!
//! - **[`workflows`]: The Public API.** The scoring and docking pipelines. They
//!   take a session by reference and return annotated molecule clones.
//!
//! ## Example
//!
//! ```no_run
//! use vinadock::core::io::read_molecules;
//! use vinadock::engine::config::{MoleculeSource, VinaConfigBuilder};
//! use vinadock::engine::progress::ProgressReporter;
//! use vinadock::engine::session::DockingSession;
//! use vinadock::workflows;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VinaConfigBuilder::new()
//!     .protein(MoleculeSource::Path("receptor.pdbqt".into()))
//!     .center([10.0, 12.5, -3.0])
//!     .size([22.0, 22.0, 22.0])
//!     .build()?;
//! let mut session = DockingSession::new(config)?;
//! let ligands = read_molecules("ligands.sdf")?;
//! let poses = workflows::dock::run(&mut session, &ligands, None, &ProgressReporter::new())?;
//! for pose in &poses {
//!     println!("{}: {:?}", pose.title, pose.data.get_f64("vina_affinity"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
