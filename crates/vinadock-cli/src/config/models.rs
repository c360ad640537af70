use std::path::PathBuf;
use vinadock::engine::config::VinaConfig;

pub struct AppConfig {
    pub ligands_path: PathBuf,
    pub output_path: PathBuf,
    pub summary_path: Option<PathBuf>,
    pub core_config: VinaConfig,
}
