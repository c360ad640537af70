//! Layered configuration for the command line.
//!
//! Values are resolved in order of increasing priority: built-in defaults, the
//! TOML file given with `--config`, `-S key=value` overrides, and finally the
//! dedicated command-line flags.

pub mod defaults;
pub mod file;
pub mod models;

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use file::FileConfig;
use models::AppConfig;
use vinadock::engine::config::{MoleculeSource, VinaConfigBuilder};

pub fn build_config(args: &RunArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let mut file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    file_config.apply_set_values(&args.set_values)?;

    let box_file = file_config.search_box.take().unwrap_or_default();
    let search_file = file_config.search.take().unwrap_or_default();
    let engine_file = file_config.engine.take().unwrap_or_default();

    // An explicit center on the command line beats an auto-box ligand from the
    // file, and the other way round.
    let autobox_ligand = match (&args.center, &args.autobox_ligand) {
        (Some(_), _) => None,
        (None, Some(path)) => Some(path.clone()),
        (None, None) => box_file.autobox_ligand,
    };
    let center = args.center.or(box_file.center).unwrap_or(defaults.center);
    let size = args.size.or(box_file.size).unwrap_or(defaults.size);

    let skip_bad_mols = if args.strict {
        false
    } else {
        engine_file.skip_bad_mols.unwrap_or(defaults.skip_bad_mols)
    };
    let keep_scratch =
        args.keep_scratch || engine_file.keep_scratch.unwrap_or(defaults.keep_scratch);

    let mut builder = VinaConfigBuilder::new()
        .center(center)
        .size(size)
        .exhaustiveness(
            args.exhaustiveness
                .or(search_file.exhaustiveness)
                .unwrap_or(defaults.exhaustiveness),
        )
        .num_modes(
            args.num_modes
                .or(search_file.num_modes)
                .unwrap_or(defaults.num_modes),
        )
        .energy_range(
            args.energy_range
                .or(search_file.energy_range)
                .unwrap_or(defaults.energy_range),
        )
        .cpu(args.cpu.or(search_file.cpu).unwrap_or(defaults.cpu))
        .skip_bad_mols(skip_bad_mols)
        .autocleanup(!keep_scratch)
        .protein(MoleculeSource::Path(args.receptor.clone()));

    if let Some(seed) = args.seed.or(search_file.seed) {
        builder = builder.seed(seed);
    }
    if let Some(executable) = args.vina.clone().or(engine_file.executable) {
        builder = builder.executable(executable);
    }
    if let Some(scratch_dir) = args.scratch_dir.clone().or(engine_file.scratch_dir) {
        builder = builder.scratch_root(scratch_dir);
    }
    if let Some(ligand) = autobox_ligand {
        builder = builder.auto_ligand(MoleculeSource::Path(ligand));
    }

    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        ligands_path: args.ligands.clone(),
        output_path: args.output.clone(),
        summary_path: args.summary.clone(),
        core_config,
    })
}
