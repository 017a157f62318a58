use std::cell::RefCell;

/// Stage of a merge, reported to a [`ProgressReporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeStage {
    Load,
    Align,
    Size,
    /// Verbatim copy of the base volume into the destination.
    BaseLayer,
    /// Second pass combining the other volume with the base.
    Overlay,
    Save,
}

/// Receives progress from a running merge. `done` counts completed units
/// of `total` within the current stage.
pub trait ProgressReporter {
    fn report(&self, stage: MergeStage, done: u32, total: u32);
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _stage: MergeStage, _done: u32, _total: u32) {}
}

/// Forwards progress to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&self, stage: MergeStage, done: u32, total: u32) {
        if done == total {
            log::info!("{stage:?} complete");
        } else {
            log::trace!("{stage:?}: {done}/{total}");
        }
    }
}

/// Records every report, for tests and UIs that poll.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: RefCell<Vec<(MergeStage, u32, u32)>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<(MergeStage, u32, u32)> {
        self.events.borrow().clone()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, stage: MergeStage, done: u32, total: u32) {
        self.events.borrow_mut().push((stage, done, total));
    }
}

impl<P: ProgressReporter + ?Sized> ProgressReporter for &P {
    fn report(&self, stage: MergeStage, done: u32, total: u32) {
        (**self).report(stage, done, total);
    }
}
