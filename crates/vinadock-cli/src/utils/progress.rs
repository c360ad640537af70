use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use tracing::warn;
use vinadock::engine::progress::{Progress, ProgressCallback};

/// Drives a single ligand progress bar on stderr from workflow events.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    skipped: Arc<Mutex<Vec<usize>>>,
    finished: Arc<Mutex<Vec<FinishedLigand>>>,
}

/// A ligand the workflow produced results for, with how many it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedLigand {
    pub index: usize,
    pub poses: usize,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::bar_style())
            .with_message("Preparing...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            skipped: Arc::new(Mutex::new(Vec::new())),
            finished: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Indices of the ligands the engine rejected so far.
    pub fn skipped(&self) -> Vec<usize> {
        self.skipped
            .lock()
            .map(|skipped| skipped.clone())
            .unwrap_or_default()
    }

    /// Ligands that produced results, in the order their results were returned.
    pub fn finished(&self) -> Vec<FinishedLigand> {
        self.finished
            .lock()
            .map(|finished| finished.clone())
            .unwrap_or_default()
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();
        let skipped_clone = self.skipped.clone();
        let finished_clone = self.finished.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::BatchStart { total } => {
                    pb_guard.reset();
                    pb_guard.set_length(total as u64);
                    pb_guard.set_position(0);
                    pb_guard.set_style(Self::bar_style());
                }
                Progress::LigandStart { title, .. } => {
                    pb_guard.set_message(title);
                }
                Progress::LigandSkipped { index } => {
                    if let Ok(mut skipped) = skipped_clone.lock() {
                        skipped.push(index);
                    }
                    pb_guard.println(format!("  ligand #{} skipped", index));
                    pb_guard.inc(1);
                }
                Progress::LigandFinished { index, poses } => {
                    if let Ok(mut finished) = finished_clone.lock() {
                        finished.push(FinishedLigand { index, poses });
                    }
                    pb_guard.inc(1);
                }
                Progress::BatchFinish => {
                    if pb_guard.position() < pb_guard.length().unwrap_or(0) {
                        pb_guard.set_position(pb_guard.length().unwrap_or(0));
                    }
                    pb_guard.finish_with_message("✓ Done");
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<24} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
