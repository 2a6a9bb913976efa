//! `BootSequencer`: registration, the run loop, and teardown.

use std::time::{Duration, Instant};

use crate::unwind::{dispose_guarded, initialize_guarded};
use crate::{
    BootError, BootObserver, BootResult, CancelToken, ProgressSink, RegistrationError, RunOutcome,
    Subsystem, SubsystemError,
};

/// What happened to one subsystem during a run.
#[derive(Clone, Debug, PartialEq)]
pub struct SubsystemOutcome {
    pub name:     String,
    pub priority: i32,
    pub required: bool,
    pub success:  bool,
    /// `"initialized"` on success, the failure reason otherwise.
    pub message:  String,
}

/// Result of a run in which every required subsystem came up.
#[derive(Clone, Debug, PartialEq)]
pub struct BootSummary {
    pub elapsed:   Duration,
    /// Subsystems attempted (always every registered one on success).
    pub processed: usize,
    pub succeeded: usize,
    /// One entry per processed subsystem, in initialization order.
    pub outcomes:  Vec<SubsystemOutcome>,
}

impl BootSummary {
    /// Optional subsystems that did not come up.
    pub fn failed(&self) -> impl Iterator<Item = &SubsystemOutcome> + '_ {
        self.outcomes.iter().filter(|o| !o.success)
    }
}

/// Runs registered [`Subsystem`]s one at a time in ascending priority order.
///
/// A sequencer runs once.  Subsystems that initialized successfully stay
/// owned by the sequencer until [`shutdown`](Self::shutdown) (or until a
/// failed run disposes them).
///
/// # Example
///
/// ```rust,ignore
/// let mut boot = BootSequencer::new();
/// boot.register(AssetService::new())?;
/// boot.register(SceneService::new())?;
///
/// let summary = boot.run(&mut progress_bar).await?;
/// // ... application runs ...
/// boot.shutdown();
/// ```
#[derive(Default)]
pub struct BootSequencer {
    subsystems:  Vec<Box<dyn Subsystem>>,
    /// Indices into `subsystems` (post-sort) of live subsystems, in
    /// initialization order.  Popped on dispose.
    initialized: Vec<usize>,
    cancel:      CancelToken,
    has_run:     bool,
}

impl BootSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share an existing cancel token (e.g. one wired to a UI button).
    pub fn with_cancel_token(cancel: CancelToken) -> Self {
        Self {
            subsystems:  Vec::new(),
            initialized: Vec::new(),
            cancel,
            has_run:     false,
        }
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Add a subsystem to the run.
    ///
    /// Rejections are logged and returned; the sequencer stays usable and the
    /// rejected subsystem is simply absent from the run.
    pub fn register(&mut self, subsystem: impl Subsystem + 'static) -> Result<(), RegistrationError> {
        self.register_boxed(Box::new(subsystem))
    }

    pub fn register_boxed(&mut self, subsystem: Box<dyn Subsystem>) -> Result<(), RegistrationError> {
        let name = subsystem.name();
        let rejected = if self.has_run {
            Some(RegistrationError::AlreadyRun(name.to_owned()))
        } else if name.trim().is_empty() {
            Some(RegistrationError::EmptyName)
        } else if self.is_registered(name) {
            Some(RegistrationError::DuplicateName(name.to_owned()))
        } else {
            None
        };

        if let Some(err) = rejected {
            log::warn!("boot: registration rejected: {err}");
            return Err(err);
        }

        log::debug!(
            "boot: registered `{}` (priority {}, {})",
            name,
            subsystem.priority(),
            if subsystem.is_required() { "required" } else { "optional" },
        );
        self.subsystems.push(subsystem);
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.subsystems.iter().any(|s| s.name() == name)
    }

    /// Number of registered subsystems.
    pub fn len(&self) -> usize {
        self.subsystems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsystems.is_empty()
    }

    /// Names of subsystems that are initialized and not yet disposed, in
    /// initialization order.
    pub fn initialized_names(&self) -> Vec<&str> {
        self.initialized.iter().map(|&i| self.subsystems[i].name()).collect()
    }

    /// A clone of the token this sequencer checks between subsystems.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    // ── Run ───────────────────────────────────────────────────────────────

    /// Initialize every registered subsystem in ascending priority order.
    ///
    /// Returns `Ok` when every required subsystem came up (optional failures
    /// are listed in the summary).  On a required failure or cancellation,
    /// already-initialized subsystems are disposed newest first before the
    /// error is returned.  `observer` sees progress reach exactly 1.0 and one
    /// `on_run_complete` in every case except [`BootError::AlreadyRun`].
    pub async fn run<O>(&mut self, observer: &mut O) -> BootResult<BootSummary>
    where
        O: BootObserver + Send,
    {
        if self.has_run {
            return Err(BootError::AlreadyRun);
        }
        self.has_run = true;

        let started = Instant::now();
        self.subsystems.sort_by_key(|s| s.priority());
        let total = self.subsystems.len();
        log::info!("boot: starting {total} subsystems");

        let mut outcomes = Vec::with_capacity(total);
        let mut processed = 0;
        let mut succeeded = 0;
        let mut abort = None;

        for idx in 0..total {
            if self.cancel.is_cancelled() {
                abort = Some(BootError::Cancelled { elapsed: started.elapsed() });
                break;
            }

            let subsystem = self.subsystems[idx].as_mut();
            let name = subsystem.name().to_owned();
            let priority = subsystem.priority();
            let required = subsystem.is_required();

            observer.on_subsystem_start(&name, priority);
            log::debug!("boot: initializing `{name}` (priority {priority})");

            let sink = ProgressSink::new(name.clone(), processed, total, self.cancel.clone(), &mut *observer);
            let init = initialize_guarded(&mut *subsystem, sink).await;
            let result = match init {
                Ok(()) if subsystem.is_initialized() => Ok(()),
                Ok(()) => Err(SubsystemError::NotReady),
                Err(e) => Err(e),
            };

            let success = result.is_ok();
            let message = match &result {
                Ok(()) => "initialized".to_owned(),
                Err(e) => e.to_string(),
            };
            observer.on_subsystem_complete(&name, success, &message);

            processed += 1;
            outcomes.push(SubsystemOutcome {
                name: name.clone(),
                priority,
                required,
                success,
                message: message.clone(),
            });

            match result {
                Ok(()) => {
                    succeeded += 1;
                    self.initialized.push(idx);
                    observer.on_progress(processed as f32 / total as f32);
                }
                Err(SubsystemError::Cancelled) => {
                    log::warn!("boot: `{name}` cancelled");
                    abort = Some(BootError::Cancelled { elapsed: started.elapsed() });
                    break;
                }
                Err(_) if required => {
                    log::error!("boot: required subsystem `{name}` failed: {message}");
                    abort = Some(BootError::RequiredFailed {
                        name,
                        reason: message,
                        elapsed: started.elapsed(),
                    });
                    break;
                }
                Err(_) => {
                    log::warn!("boot: optional subsystem `{name}` failed: {message}");
                    observer.on_progress(processed as f32 / total as f32);
                }
            }
        }

        if abort.is_some() {
            self.dispose_initialized();
        }
        observer.on_progress(1.0);

        match abort {
            None => {
                let elapsed = started.elapsed();
                let message = format!("{succeeded}/{total} subsystems initialized");
                log::info!("boot: complete in {elapsed:?}, {message}");
                observer.on_run_complete(&RunOutcome { success: true, message, elapsed });
                Ok(BootSummary { elapsed, processed, succeeded, outcomes })
            }
            Some(err) => {
                let elapsed = match &err {
                    BootError::RequiredFailed { elapsed, .. } | BootError::Cancelled { elapsed } => *elapsed,
                    BootError::AlreadyRun => started.elapsed(),
                };
                let message = match &err {
                    BootError::RequiredFailed { reason, .. } => reason.clone(),
                    other => other.to_string(),
                };
                observer.on_run_complete(&RunOutcome { success: false, message, elapsed });
                Err(err)
            }
        }
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Dispose every live subsystem, newest first.  Safe to call more than
    /// once; each subsystem is disposed at most once.
    pub fn shutdown(&mut self) {
        if !self.initialized.is_empty() {
            log::info!("boot: shutting down {} subsystems", self.initialized.len());
        }
        self.dispose_initialized();
    }

    /// Teardown faults are logged and swallowed.
    fn dispose_initialized(&mut self) {
        while let Some(idx) = self.initialized.pop() {
            let subsystem = self.subsystems[idx].as_mut();
            match dispose_guarded(&mut *subsystem) {
                Ok(()) => log::debug!("boot: disposed `{}`", subsystem.name()),
                Err(e) => log::error!("boot: disposing `{}` failed: {e}", subsystem.name()),
            }
        }
    }
}

impl Drop for BootSequencer {
    fn drop(&mut self) {
        self.dispose_initialized();
    }
}
