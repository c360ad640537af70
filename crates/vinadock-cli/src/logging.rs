use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self},
    prelude::*,
};

pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(stderr_layer);

    if let Some(path) = log_file {
        let file = File::create(&path).map_err(CliError::Io)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true);

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::Path;
    use tracing::{debug, info, warn};

    fn log_to_file<F: FnOnce()>(path: &Path, filter: LevelFilter, emit: F) -> String {
        let file = File::create(path).unwrap();
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true);
        let subscriber = tracing_subscriber::registry().with(filter).with(file_layer);
        tracing::subscriber::with_default(subscriber, emit);
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::OFF);
    }

    #[test]
    #[serial]
    fn single_verbose_flag_shows_session_info_but_not_per_ligand_debug() {
        let temp_dir = tempfile::tempdir().unwrap();
        let content = log_to_file(
            &temp_dir.path().join("vinadock.log"),
            level_filter(1, false),
            || {
                info!(version = "1.1.2", "Session ready");
                debug!(index = 0, poses = 9, "Docked ligand");
            },
        );
        assert!(content.contains("Session ready"));
        assert!(content.contains("version=\"1.1.2\""));
        assert!(!content.contains("Docked ligand"));
    }

    #[test]
    #[serial]
    fn file_layer_records_engine_diagnostics() {
        let temp_dir = tempfile::tempdir().unwrap();
        let content = log_to_file(
            &temp_dir.path().join("vinadock.log"),
            level_filter(0, false),
            || warn!(index = 3, "Docking engine failed"),
        );
        assert!(content.contains("Docking engine failed"));
        assert!(content.contains("index=3"));
        assert!(content.contains("WARN"));
        assert!(content.contains("ThreadId"));
    }

    #[test]
    #[serial]
    fn quiet_suppresses_skip_warnings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let content = log_to_file(
            &temp_dir.path().join("vinadock.log"),
            level_filter(2, true),
            || warn!(count = 1, "Some ligands were skipped"),
        );
        assert!(content.is_empty());
    }

    #[test]
    fn log_file_that_is_a_directory_is_an_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = setup_logging(0, false, Some(temp_dir.path().to_path_buf()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
