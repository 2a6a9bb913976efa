//! Boot observer trait for UI and telemetry.

use std::time::Duration;

/// Terminal result of one boot run, as reported to the observer.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    pub success: bool,
    /// Summary on success; the first required failure's reason otherwise.
    pub message: String,
    pub elapsed: Duration,
}

/// Callbacks invoked by [`BootSequencer::run`][crate::BootSequencer::run].
///
/// All methods have default no-op implementations.  The sequencer calls them
/// from its single control flow, so implementations need no locking.
pub trait BootObserver {
    /// A subsystem is about to initialize.
    fn on_subsystem_start(&mut self, _name: &str, _priority: i32) {}

    /// A subsystem reported local progress `local`; `global` is the run-wide
    /// value it maps to.
    fn on_subsystem_progress(&mut self, _name: &str, _local: f32, _global: f32) {}

    /// A subsystem finished, successfully or not.  Fires before an abort.
    fn on_subsystem_complete(&mut self, _name: &str, _success: bool, _message: &str) {}

    /// Run-wide progress in `[0, 1]`.  The last call of a run is exactly 1.0.
    fn on_progress(&mut self, _global: f32) {}

    /// Fired exactly once per run, last.
    fn on_run_complete(&mut self, _outcome: &RunOutcome) {}
}

/// A [`BootObserver`] that does nothing.
pub struct NoopBootObserver;

impl BootObserver for NoopBootObserver {}
