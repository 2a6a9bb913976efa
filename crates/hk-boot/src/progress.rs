//! Per-subsystem progress reporting.

use crate::{BootObserver, CancelToken};

/// Handed to each subsystem's `initialize`.
///
/// Maps the subsystem's local progress `p ∈ [0, 1]` onto the run:
///
/// ```text
/// global = (subsystems_processed_before_this + p) / total_subsystems
/// ```
///
/// Global progress is non-decreasing as long as each subsystem reports
/// non-decreasing local progress.  A subsystem that goes backwards makes the
/// global value go backwards too; the sink does not correct it.
pub struct ProgressSink<'a> {
    name:      String,
    processed: usize,
    total:     usize,
    cancel:    CancelToken,
    observer:  &'a mut (dyn BootObserver + Send),
}

impl<'a> ProgressSink<'a> {
    pub(crate) fn new(
        name:      String,
        processed: usize,
        total:     usize,
        cancel:    CancelToken,
        observer:  &'a mut (dyn BootObserver + Send),
    ) -> Self {
        Self { name, processed, total, cancel, observer }
    }

    /// Report local progress.  Values outside `[0, 1]` (and NaN) are clamped.
    pub fn report(&mut self, local: f32) {
        let local = if local.is_nan() { 0.0 } else { local.clamp(0.0, 1.0) };
        let global = self.global_for(local);
        self.observer.on_subsystem_progress(&self.name, local, global);
        self.observer.on_progress(global);
    }

    /// Run-wide progress that local progress `local` corresponds to.
    pub fn global_for(&self, local: f32) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        ((self.processed as f32 + local) / self.total as f32).clamp(0.0, 1.0)
    }

    /// Name of the subsystem this sink belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
