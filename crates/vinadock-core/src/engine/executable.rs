use super::config::ConfigError;
use super::error::DockingError;
use itertools::Itertools;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, trace};

/// Binary name looked up on `PATH` when no executable is configured.
pub const DEFAULT_EXECUTABLE: &str = "vina";

/// Captured result of one engine invocation.
#[derive(Debug)]
pub struct EngineOutput {
    pub status: ExitStatus,
    /// Standard output followed by standard error.
    pub combined: Vec<u8>,
    /// The invocation as a space-joined command line, for diagnostics.
    pub command_line: String,
}

impl EngineOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn combined_text(&self) -> String {
        String::from_utf8_lossy(&self.combined).into_owned()
    }
}

/// A resolved docking engine binary and the version it reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VinaExecutable {
    path: PathBuf,
    version: String,
}

impl VinaExecutable {
    /// Resolves the binary and probes its version.
    ///
    /// An explicit path is checked for existence and execute permission; without
    /// one, [`DEFAULT_EXECUTABLE`] is searched on `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => which::which(path).map_err(|e| {
                ConfigError::ExecutableNotFound(format!("{}: {}", path.display(), e))
            })?,
            None => which::which(DEFAULT_EXECUTABLE).map_err(|e| {
                ConfigError::ExecutableNotFound(format!("'{}' on PATH: {}", DEFAULT_EXECUTABLE, e))
            })?,
        };
        let version = probe_version(&path)?;
        debug!(path = %path.display(), %version, "Resolved docking engine");
        Ok(Self { path, version })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Runs the engine to completion and captures its output.
    ///
    /// A non-zero exit status is not an error here; callers decide whether to
    /// skip or abort. Only failing to start the process is.
    pub fn run<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<EngineOutput, DockingError> {
        let command_line = std::iter::once(self.path.as_os_str())
            .chain(args.iter().map(|arg| arg.as_ref()))
            .map(|part| part.to_string_lossy())
            .join(" ");
        trace!(command = %command_line, "Running docking engine");

        let output = Command::new(&self.path)
            .args(args)
            .output()
            .map_err(|source| DockingError::Spawn {
                program: self.path.display().to_string(),
                source,
            })?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);
        Ok(EngineOutput {
            status: output.status,
            combined,
            command_line,
        })
    }
}

fn probe_version(path: &Path) -> Result<String, ConfigError> {
    let output = Command::new(path)
        .arg("--version")
        .output()
        .map_err(|e| ConfigError::VersionProbe(format!("{}: {}", path.display(), e)))?;
    let text = String::from_utf8_lossy(&output.stdout);
    parse_version(&text).ok_or_else(|| {
        ConfigError::VersionProbe(format!(
            "unexpected `--version` output from {}: '{}'",
            path.display(),
            text.trim()
        ))
    })
}

/// Picks the version from a banner like `AutoDock Vina 1.1.2 (May 11, 2011)`.
pub fn parse_version(banner: &str) -> Option<String> {
    banner
        .lines()
        .find(|line| !line.trim().is_empty())?
        .split_whitespace()
        .nth(2)
        .map(str::to_string)
}
