/// Per-ligand events emitted by the scoring and docking workflows.
///
/// Indices refer to positions in the ligand slice passed to the workflow.
#[derive(Debug, Clone)]
pub enum Progress {
    BatchStart { total: usize },
    LigandStart { index: usize, title: String },
    /// The engine failed on this ligand and the session skips bad molecules.
    LigandSkipped { index: usize },
    LigandFinished { index: usize, poses: usize },
    BatchFinish,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
