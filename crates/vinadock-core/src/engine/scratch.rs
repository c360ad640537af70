use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use tracing::{debug, warn};

const SESSION_PREFIX: &str = "autodock_vina_";
const CALL_PREFIX: &str = "ligands_";

/// Scratch directories owned by a docking session.
///
/// The session directory is created lazily under the configured root and kept
/// until [`clean`](Self::clean). Every directory created this way is tracked,
/// including ones that were later replaced by a new session directory.
/// Per-call directories live inside the session directory and are removed when
/// their [`TempDir`] guard drops.
#[derive(Debug, Default)]
pub struct ScratchSpace {
    root: Option<PathBuf>,
    session_dir: Option<PathBuf>,
    tracked: Vec<PathBuf>,
}

impl ScratchSpace {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            session_dir: None,
            tracked: Vec::new(),
        }
    }

    /// The current session directory, created on first use.
    pub fn session_dir(&mut self) -> io::Result<&Path> {
        let path = match self.session_dir.take() {
            Some(path) => path,
            None => {
                let root = self.root.clone().unwrap_or_else(std::env::temp_dir);
                fs::create_dir_all(&root)?;
                let path = Builder::new().prefix(SESSION_PREFIX).tempdir_in(&root)?.keep();
                debug!(path = %path.display(), "Created session scratch directory");
                self.tracked.push(path.clone());
                path
            }
        };
        Ok(self.session_dir.insert(path).as_path())
    }

    /// Forgets the cached session directory so the next use creates a new one.
    ///
    /// The old directory stays tracked and is removed by [`clean`](Self::clean).
    pub fn reset_session_dir(&mut self) {
        self.session_dir = None;
    }

    /// A fresh per-call directory inside the session directory.
    pub fn call_dir(&mut self) -> io::Result<TempDir> {
        let parent = self.session_dir()?.to_path_buf();
        Builder::new().prefix(CALL_PREFIX).tempdir_in(parent)
    }

    pub fn tracked(&self) -> &[PathBuf] {
        &self.tracked
    }

    /// Removes every tracked directory and forgets them.
    ///
    /// Directories that are already gone are ignored. Other removal failures
    /// are logged; the directory is forgotten either way.
    pub fn clean(&mut self) {
        for path in self.tracked.drain(..) {
            match fs::remove_dir_all(&path) {
                Ok(()) => debug!(path = %path.display(), "Removed scratch directory"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove scratch directory")
                }
            }
        }
        self.session_dir = None;
    }
}
