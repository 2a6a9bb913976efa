//! Mock services and a console boot observer.

use std::time::Duration;

use hk_boot::{BootObserver, InitFuture, ProgressSink, RunOutcome, Subsystem, SubsystemError};

use crate::settings::ServiceSettings;

/// A service that sleeps through its configured steps.
pub struct MockService {
    settings: ServiceSettings,
    ready:    bool,
}

impl MockService {
    pub fn new(settings: ServiceSettings) -> Self {
        Self { settings, ready: false }
    }
}

impl Subsystem for MockService {
    fn name(&self) -> &str {
        &self.settings.name
    }

    fn priority(&self) -> i32 {
        self.settings.priority
    }

    fn is_required(&self) -> bool {
        self.settings.required
    }

    fn initialize<'a>(&'a mut self, mut sink: ProgressSink<'a>) -> InitFuture<'a> {
        Box::pin(async move {
            let steps = self.settings.steps.max(1);
            let pause = Duration::from_millis(self.settings.step_ms);
            for step in 1..=steps {
                tokio::select! {
                    _ = tokio::time::sleep(pause) => {}
                    _ = sink.cancel_token().cancelled() => return Err(SubsystemError::Cancelled),
                }
                sink.report(step as f32 / steps as f32);
            }
            if let Some(reason) = &self.settings.fail {
                return Err(SubsystemError::failed(reason.clone()));
            }
            self.ready = true;
            Ok(())
        })
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn dispose(&mut self) -> Result<(), SubsystemError> {
        log::info!("{}: disposed", self.settings.name);
        self.ready = false;
        Ok(())
    }
}

/// Logs boot progress in 10 % increments.
#[derive(Default)]
pub struct ConsoleProgress {
    last_decile: u32,
}

impl BootObserver for ConsoleProgress {
    fn on_subsystem_start(&mut self, name: &str, priority: i32) {
        log::info!("  starting {name} (priority {priority})");
    }

    fn on_subsystem_complete(&mut self, name: &str, success: bool, message: &str) {
        if success {
            log::info!("  {name}: {message}");
        } else {
            log::warn!("  {name}: FAILED ({message})");
        }
    }

    fn on_progress(&mut self, global: f32) {
        let decile = (global * 10.0).floor() as u32;
        if decile > self.last_decile {
            self.last_decile = decile;
            log::info!("boot {:>3.0}%", global * 100.0);
        }
    }

    fn on_run_complete(&mut self, outcome: &RunOutcome) {
        log::info!(
            "boot {} in {:.2?}: {}",
            if outcome.success { "succeeded" } else { "failed" },
            outcome.elapsed,
            outcome.message,
        );
    }
}
