use crate::error::{CliError, Result};
use crate::utils::parser::{parse_assignment, parse_triplet};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileBoxConfig {
    pub center: Option<[f64; 3]>,
    pub size: Option<[f64; 3]>,
    pub autobox_ligand: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSearchConfig {
    pub exhaustiveness: Option<u32>,
    pub num_modes: Option<u32>,
    pub energy_range: Option<f64>,
    pub seed: Option<i64>,
    pub cpu: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileEngineConfig {
    pub executable: Option<PathBuf>,
    pub scratch_dir: Option<PathBuf>,
    pub skip_bad_mols: Option<bool>,
    pub keep_scratch: Option<bool>,
}

/// The TOML configuration file. Every field is optional; anything missing
/// falls back to the command line or the defaults.
///
/// ```toml
/// [box]
/// center = [12.0, -3.5, 8.25]
/// size = [22, 22, 22]
///
/// [search]
/// exhaustiveness = 16
/// num-modes = 5
///
/// [engine]
/// executable = "/opt/vina/bin/vina"
/// skip-bad-mols = false
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(rename = "box")]
    pub search_box: Option<FileBoxConfig>,
    pub search: Option<FileSearchConfig>,
    pub engine: Option<FileEngineConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Applies `-S key=value` overrides on top of the file's values.
    pub fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) =
                parse_assignment(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
            debug!(key, value, "Applying configuration override");

            match key {
                "box.center" => {
                    self.search_box.get_or_insert_with(Default::default).center =
                        Some(parse_triplet(value).map_err(|e| CliError::Config(e.to_string()))?);
                }
                "box.size" => {
                    self.search_box.get_or_insert_with(Default::default).size =
                        Some(parse_triplet(value).map_err(|e| CliError::Config(e.to_string()))?);
                }
                "box.autobox-ligand" => {
                    self.search_box
                        .get_or_insert_with(Default::default)
                        .autobox_ligand = Some(PathBuf::from(value));
                }
                "search.exhaustiveness" => {
                    self.search.get_or_insert_with(Default::default).exhaustiveness =
                        Some(parse_value(key, value)?);
                }
                "search.num-modes" => {
                    self.search.get_or_insert_with(Default::default).num_modes =
                        Some(parse_value(key, value)?);
                }
                "search.energy-range" => {
                    self.search.get_or_insert_with(Default::default).energy_range =
                        Some(parse_value(key, value)?);
                }
                "search.seed" => {
                    self.search.get_or_insert_with(Default::default).seed =
                        Some(parse_value(key, value)?);
                }
                "search.cpu" => {
                    self.search.get_or_insert_with(Default::default).cpu =
                        Some(parse_value(key, value)?);
                }
                "engine.executable" => {
                    self.engine.get_or_insert_with(Default::default).executable =
                        Some(PathBuf::from(value));
                }
                "engine.scratch-dir" => {
                    self.engine.get_or_insert_with(Default::default).scratch_dir =
                        Some(PathBuf::from(value));
                }
                "engine.skip-bad-mols" => {
                    self.engine.get_or_insert_with(Default::default).skip_bad_mols =
                        Some(parse_value(key, value)?);
                }
                "engine.keep-scratch" => {
                    self.engine.get_or_insert_with(Default::default).keep_scratch =
                        Some(parse_value(key, value)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid {} value for {}: {}",
            std::any::type_name::<T>(),
            key,
            value
        ))
    })
}
