use vinadock::engine::config::EngineParameters;

/// Values used when neither the config file nor the command line set them.
pub struct DefaultsConfig {
    pub size: [f64; 3],
    pub center: [f64; 3],
    pub exhaustiveness: u32,
    pub num_modes: u32,
    pub energy_range: f64,
    pub cpu: u32,
    pub skip_bad_mols: bool,
    pub keep_scratch: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let engine = EngineParameters::default();
        Self {
            size: engine.size,
            center: engine.center,
            exhaustiveness: engine.exhaustiveness,
            num_modes: engine.num_modes,
            energy_range: engine.energy_range,
            cpu: engine.cpu,
            skip_bad_mols: true,
            keep_scratch: false,
        }
    }
}
