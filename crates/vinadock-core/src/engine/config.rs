use crate::core::models::molecule::Molecule;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("num_modes must be between 1 and 9, got {0}")]
    InvalidNumModes(u32),
    #[error("Docking executable not found: {0}")]
    ExecutableNotFound(String),
    #[error("Could not determine the docking engine version: {0}")]
    VersionProbe(String),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// A molecule given either in memory or as a file to load.
#[derive(Debug, Clone, PartialEq)]
pub enum MoleculeSource {
    Path(PathBuf),
    Molecule(Molecule),
}

impl From<PathBuf> for MoleculeSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Molecule> for MoleculeSource {
    fn from(molecule: Molecule) -> Self {
        Self::Molecule(molecule)
    }
}

/// Search box and search settings passed to the engine on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineParameters {
    pub center: [f64; 3],
    pub size: [f64; 3],
    pub exhaustiveness: u32,
    pub num_modes: u32,
    pub energy_range: f64,
    pub seed: Option<i64>,
    pub cpu: u32,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0, 0.0],
            size: [20.0, 20.0, 20.0],
            exhaustiveness: 8,
            num_modes: 9,
            energy_range: 3.0,
            seed: None,
            cpu: 1,
        }
    }
}

impl EngineParameters {
    pub const MAX_NUM_MODES: u32 = 9;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=Self::MAX_NUM_MODES).contains(&self.num_modes) {
            return Err(ConfigError::InvalidNumModes(self.num_modes));
        }
        if self.center.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "center",
                reason: format!("{:?} has a non-finite component", self.center),
            });
        }
        if self.size.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(ConfigError::InvalidParameter {
                name: "size",
                reason: format!("{:?} must be positive in every dimension", self.size),
            });
        }
        if self.exhaustiveness == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "exhaustiveness",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.cpu == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "cpu",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The shared parameter list, in the order the engine documents them.
    ///
    /// `--cpu` is not part of it; only docking runs pass it.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(18);
        for (axis, value) in ["x", "y", "z"].iter().zip(self.center) {
            args.push(format!("--center_{}", axis));
            args.push(value.to_string());
        }
        for (axis, value) in ["x", "y", "z"].iter().zip(self.size) {
            args.push(format!("--size_{}", axis));
            args.push(value.to_string());
        }
        args.push("--exhaustiveness".to_string());
        args.push(self.exhaustiveness.to_string());
        if let Some(seed) = self.seed {
            args.push("--seed".to_string());
            args.push(seed.to_string());
        }
        args.push("--num_modes".to_string());
        args.push(self.num_modes.to_string());
        args.push("--energy_range".to_string());
        args.push(self.energy_range.to_string());
        args
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VinaConfig {
    pub parameters: EngineParameters,
    /// Explicit engine binary; looked up on `PATH` when absent.
    pub executable: Option<PathBuf>,
    /// Directory under which session scratch space is created; system temp
    /// directory when absent.
    pub scratch_root: Option<PathBuf>,
    pub autocleanup: bool,
    pub skip_bad_mols: bool,
    pub protein: Option<MoleculeSource>,
    /// Ligand whose centroid replaces `parameters.center`.
    pub auto_ligand: Option<MoleculeSource>,
}

impl Default for VinaConfig {
    fn default() -> Self {
        Self {
            parameters: EngineParameters::default(),
            executable: None,
            scratch_root: None,
            autocleanup: true,
            skip_bad_mols: true,
            protein: None,
            auto_ligand: None,
        }
    }
}

#[derive(Default)]
pub struct VinaConfigBuilder {
    center: Option<[f64; 3]>,
    size: Option<[f64; 3]>,
    exhaustiveness: Option<u32>,
    num_modes: Option<u32>,
    energy_range: Option<f64>,
    seed: Option<i64>,
    cpu: Option<u32>,
    executable: Option<PathBuf>,
    scratch_root: Option<PathBuf>,
    autocleanup: Option<bool>,
    skip_bad_mols: Option<bool>,
    protein: Option<MoleculeSource>,
    auto_ligand: Option<MoleculeSource>,
}

impl VinaConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(mut self, center: [f64; 3]) -> Self {
        self.center = Some(center);
        self
    }
    pub fn size(mut self, size: [f64; 3]) -> Self {
        self.size = Some(size);
        self
    }
    pub fn exhaustiveness(mut self, exhaustiveness: u32) -> Self {
        self.exhaustiveness = Some(exhaustiveness);
        self
    }
    pub fn num_modes(mut self, n: u32) -> Self {
        self.num_modes = Some(n);
        self
    }
    pub fn energy_range(mut self, range: f64) -> Self {
        self.energy_range = Some(range);
        self
    }
    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn cpu(mut self, cpu: u32) -> Self {
        self.cpu = Some(cpu);
        self
    }
    pub fn executable(mut self, path: PathBuf) -> Self {
        self.executable = Some(path);
        self
    }
    pub fn scratch_root(mut self, path: PathBuf) -> Self {
        self.scratch_root = Some(path);
        self
    }
    pub fn autocleanup(mut self, enabled: bool) -> Self {
        self.autocleanup = Some(enabled);
        self
    }
    pub fn skip_bad_mols(mut self, skip: bool) -> Self {
        self.skip_bad_mols = Some(skip);
        self
    }
    pub fn protein(mut self, source: MoleculeSource) -> Self {
        self.protein = Some(source);
        self
    }
    pub fn auto_ligand(mut self, source: MoleculeSource) -> Self {
        self.auto_ligand = Some(source);
        self
    }

    pub fn build(self) -> Result<VinaConfig, ConfigError> {
        let defaults = EngineParameters::default();
        let parameters = EngineParameters {
            center: self.center.unwrap_or(defaults.center),
            size: self.size.unwrap_or(defaults.size),
            exhaustiveness: self.exhaustiveness.unwrap_or(defaults.exhaustiveness),
            num_modes: self.num_modes.unwrap_or(defaults.num_modes),
            energy_range: self.energy_range.unwrap_or(defaults.energy_range),
            seed: self.seed,
            cpu: self.cpu.unwrap_or(defaults.cpu),
        };
        parameters.validate()?;
        Ok(VinaConfig {
            parameters,
            executable: self.executable,
            scratch_root: self.scratch_root,
            autocleanup: self.autocleanup.unwrap_or(true),
            skip_bad_mols: self.skip_bad_mols.unwrap_or(true),
            protein: self.protein,
            auto_ligand: self.auto_ligand,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_engine_defaults() {
        let config = VinaConfigBuilder::new().build().unwrap();
        assert_eq!(config.parameters, EngineParameters::default());
        assert_eq!(config.parameters.size, [20.0, 20.0, 20.0]);
        assert_eq!(config.parameters.exhaustiveness, 8);
        assert_eq!(config.parameters.num_modes, 9);
        assert_eq!(config.parameters.energy_range, 3.0);
        assert_eq!(config.parameters.cpu, 1);
        assert!(config.autocleanup);
        assert!(config.skip_bad_mols);
        assert!(config.executable.is_none());
    }

    #[test]
    fn num_modes_outside_one_to_nine_is_rejected() {
        for n in [0, 10, 42] {
            assert_eq!(
                VinaConfigBuilder::new().num_modes(n).build(),
                Err(ConfigError::InvalidNumModes(n))
            );
        }
        for n in [1, 5, 9] {
            assert!(VinaConfigBuilder::new().num_modes(n).build().is_ok());
        }
    }

    #[test]
    fn non_positive_box_is_rejected() {
        let err = VinaConfigBuilder::new()
            .size([20.0, 0.0, 20.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "size", .. }));
    }

    #[test]
    fn args_follow_engine_order_and_skip_absent_seed() {
        let params = EngineParameters {
            center: [1.5, -2.0, 0.25],
            ..EngineParameters::default()
        };
        let expected = "--center_x 1.5 --center_y -2 --center_z 0.25 \
                        --size_x 20 --size_y 20 --size_z 20 \
                        --exhaustiveness 8 --num_modes 9 --energy_range 3";
        assert_eq!(params.to_args().join(" "), expected);
    }

    #[test]
    fn seed_goes_between_exhaustiveness_and_num_modes() {
        let params = EngineParameters {
            seed: Some(42),
            ..EngineParameters::default()
        };
        let args = params.to_args();
        let seed_at = args.iter().position(|a| a == "--seed").unwrap();
        assert_eq!(args[seed_at - 2], "--exhaustiveness");
        assert_eq!(args[seed_at + 1], "42");
        assert_eq!(args[seed_at + 2], "--num_modes");
    }
}
