//! Integration tests for hk-boot.

use std::sync::{Arc, Mutex};

use crate::{
    BootObserver, InitFuture, ProgressSink, RunOutcome, Subsystem, SubsystemError,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// What a mock subsystem does when initialized.
#[derive(Clone)]
enum Behavior {
    Succeed,
    Fail(&'static str),
    NotReady,
    Panic,
    /// Cancel the shared token, then succeed.
    CancelRun,
    /// Wait for the cancel token, then report cancellation.
    AwaitCancel,
}

/// Shared log of `dispose` calls across mocks.
type DisposeLog = Arc<Mutex<Vec<String>>>;

struct Mock {
    name:     String,
    priority: i32,
    required: bool,
    behavior: Behavior,
    steps:    Vec<f32>,
    ready:    bool,
    disposed: DisposeLog,
}

impl Mock {
    fn new(name: &str, priority: i32, disposed: &DisposeLog) -> Self {
        Self {
            name: name.to_owned(),
            priority,
            required: true,
            behavior: Behavior::Succeed,
            steps: vec![0.5, 1.0],
            ready: false,
            disposed: Arc::clone(disposed),
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn behaving(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    fn steps(mut self, steps: &[f32]) -> Self {
        self.steps = steps.to_vec();
        self
    }
}

impl Subsystem for Mock {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn initialize<'a>(&'a mut self, mut sink: ProgressSink<'a>) -> InitFuture<'a> {
        Box::pin(async move {
            for &p in &self.steps {
                sink.report(p);
                tokio::task::yield_now().await;
            }
            match self.behavior.clone() {
                Behavior::Succeed => {
                    self.ready = true;
                    Ok(())
                }
                Behavior::Fail(reason) => Err(SubsystemError::failed(reason)),
                Behavior::NotReady => Ok(()),
                Behavior::Panic => panic!("{} exploded", self.name),
                Behavior::CancelRun => {
                    sink.cancel_token().cancel();
                    self.ready = true;
                    Ok(())
                }
                Behavior::AwaitCancel => {
                    sink.cancel_token().cancelled().await;
                    Err(SubsystemError::Cancelled)
                }
            }
        })
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn dispose(&mut self) -> Result<(), SubsystemError> {
        self.ready = false;
        self.disposed.lock().unwrap().push(self.name.clone());
        if self.name.starts_with("panicky") {
            panic!("{} teardown panicked", self.name);
        }
        if self.name.starts_with("faulty") {
            return Err(SubsystemError::failed("teardown fault"));
        }
        Ok(())
    }
}

#[derive(Default)]
struct Recorder {
    starts:    Vec<(String, i32)>,
    completes: Vec<(String, bool, String)>,
    local:     Vec<(String, f32, f32)>,
    progress:  Vec<f32>,
    runs:      Vec<RunOutcome>,
}

impl BootObserver for Recorder {
    fn on_subsystem_start(&mut self, name: &str, priority: i32) {
        self.starts.push((name.to_owned(), priority));
    }
    fn on_subsystem_progress(&mut self, name: &str, local: f32, global: f32) {
        self.local.push((name.to_owned(), local, global));
    }
    fn on_subsystem_complete(&mut self, name: &str, success: bool, message: &str) {
        self.completes.push((name.to_owned(), success, message.to_owned()));
    }
    fn on_progress(&mut self, global: f32) {
        self.progress.push(global);
    }
    fn on_run_complete(&mut self, outcome: &RunOutcome) {
        self.runs.push(outcome.clone());
    }
}

impl Recorder {
    fn start_names(&self) -> Vec<&str> {
        self.starts.iter().map(|(n, _)| n.as_str()).collect()
    }
}

fn log() -> DisposeLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn disposed(log: &DisposeLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

// ── Registration ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod registration_tests {
    use super::*;
    use crate::{BootSequencer, RegistrationError};

    #[test]
    fn duplicate_name_is_rejected_and_first_kept() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("assets", 1, &d)).unwrap();
        let err = boot.register(Mock::new("assets", 2, &d)).unwrap_err();

        assert_eq!(err, RegistrationError::DuplicateName("assets".into()));
        assert_eq!(boot.len(), 1);
        assert!(boot.is_registered("assets"));
    }

    #[test]
    fn blank_names_are_rejected() {
        let d = log();
        let mut boot = BootSequencer::new();
        assert_eq!(boot.register(Mock::new("", 1, &d)), Err(RegistrationError::EmptyName));
        assert_eq!(boot.register(Mock::new("  \t", 1, &d)), Err(RegistrationError::EmptyName));
        assert!(boot.is_empty());
    }

    #[tokio::test]
    async fn registration_after_run_is_rejected() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.run(&mut Recorder::default()).await.unwrap();
        assert!(matches!(
            boot.register(Mock::new("late", 0, &d)),
            Err(RegistrationError::AlreadyRun(_))
        ));
    }
}

// ── Ordering and progress ─────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::{BootError, BootSequencer};

    #[tokio::test]
    async fn starts_follow_ascending_priority() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("c", 3, &d)).unwrap();
        boot.register(Mock::new("a", 1, &d)).unwrap();
        boot.register(Mock::new("b", 2, &d)).unwrap();

        let mut rec = Recorder::default();
        let summary = boot.run(&mut rec).await.unwrap();

        assert_eq!(rec.start_names(), vec!["a", "b", "c"]);
        assert_eq!(rec.starts.iter().map(|s| s.1).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.succeeded, 3);
        assert_eq!(boot.initialized_names(), vec!["a", "b", "c"]);
        assert!(rec.runs[0].success);
    }

    #[tokio::test]
    async fn equal_priorities_keep_registration_order() {
        let d = log();
        let mut boot = BootSequencer::new();
        for name in ["x", "y", "z"] {
            boot.register(Mock::new(name, 5, &d)).unwrap();
        }
        let mut rec = Recorder::default();
        boot.run(&mut rec).await.unwrap();
        assert_eq!(rec.start_names(), vec!["x", "y", "z"]);
    }

    #[tokio::test]
    async fn progress_is_monotonic_and_ends_at_one() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("a", 1, &d).steps(&[0.1, 0.4, 0.9])).unwrap();
        boot.register(Mock::new("b", 2, &d).steps(&[0.0, 0.5, 1.0])).unwrap();
        boot.register(Mock::new("c", 3, &d).optional().behaving(Behavior::Fail("nope"))).unwrap();
        boot.register(Mock::new("d", 4, &d).steps(&[])).unwrap();

        let mut rec = Recorder::default();
        boot.run(&mut rec).await.unwrap();

        assert!(rec.progress.windows(2).all(|w| w[0] <= w[1]), "{:?}", rec.progress);
        assert_eq!(*rec.progress.last().unwrap(), 1.0);
        assert!(rec.progress.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[tokio::test]
    async fn local_progress_maps_into_run_share() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("a", 1, &d).steps(&[1.0])).unwrap();
        boot.register(Mock::new("b", 2, &d).steps(&[0.5, 7.0])).unwrap();

        let mut rec = Recorder::default();
        boot.run(&mut rec).await.unwrap();

        assert_eq!(
            rec.local,
            vec![
                ("a".to_owned(), 1.0, 0.5),
                ("b".to_owned(), 0.5, 0.75),
                ("b".to_owned(), 1.0, 1.0),
            ]
        );
    }

    #[tokio::test]
    async fn empty_sequencer_succeeds() {
        let mut boot = BootSequencer::new();
        let mut rec = Recorder::default();
        let summary = boot.run(&mut rec).await.unwrap();
        assert_eq!(summary.processed, 0);
        assert_eq!(rec.progress, vec![1.0]);
        assert_eq!(rec.runs.len(), 1);
    }

    #[tokio::test]
    async fn second_run_is_rejected() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("a", 1, &d)).unwrap();
        boot.run(&mut Recorder::default()).await.unwrap();

        let mut rec = Recorder::default();
        assert_eq!(boot.run(&mut rec).await, Err(BootError::AlreadyRun));
        assert!(rec.starts.is_empty());
        assert!(rec.runs.is_empty());
    }
}

// ── Failures ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod failure_tests {
    use super::*;
    use crate::{BootError, BootSequencer};

    #[tokio::test]
    async fn optional_fault_does_not_fail_the_run() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("core", 1, &d)).unwrap();
        boot.register(Mock::new("audio", 2, &d).optional().behaving(Behavior::Fail("no device"))).unwrap();
        boot.register(Mock::new("scene", 3, &d)).unwrap();

        let mut rec = Recorder::default();
        let summary = boot.run(&mut rec).await.unwrap();

        assert!(rec.runs[0].success);
        assert!(rec.completes.contains(&("audio".to_owned(), false, "no device".to_owned())));
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed().map(|o| o.name.as_str()).collect::<Vec<_>>(), vec!["audio"]);
        assert_eq!(boot.initialized_names(), vec!["core", "scene"]);
    }

    #[tokio::test]
    async fn required_fault_aborts_and_disposes_predecessors_once() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("one", 1, &d)).unwrap();
        boot.register(Mock::new("two", 2, &d)).unwrap();
        boot.register(Mock::new("net", 3, &d).behaving(Behavior::Fail("port in use"))).unwrap();
        boot.register(Mock::new("late", 4, &d)).unwrap();

        let mut rec = Recorder::default();
        let err = boot.run(&mut rec).await.unwrap_err();

        match err {
            BootError::RequiredFailed { name, reason, .. } => {
                assert_eq!(name, "net");
                assert_eq!(reason, "port in use");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(rec.start_names(), vec!["one", "two", "net"]);
        assert_eq!(rec.completes.last().unwrap(), &("net".to_owned(), false, "port in use".to_owned()));
        assert_eq!(rec.runs.len(), 1);
        assert!(!rec.runs[0].success);
        assert_eq!(rec.runs[0].message, "port in use");
        assert_eq!(*rec.progress.last().unwrap(), 1.0);

        // Newest first, each exactly once, even across a later shutdown.
        assert_eq!(disposed(&d), vec!["two", "one"]);
        boot.shutdown();
        drop(boot);
        assert_eq!(disposed(&d), vec!["two", "one"]);
    }

    #[tokio::test]
    async fn soft_failure_of_required_subsystem_aborts() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("lazy", 1, &d).behaving(Behavior::NotReady)).unwrap();

        let mut rec = Recorder::default();
        let err = boot.run(&mut rec).await.unwrap_err();
        assert!(matches!(err, BootError::RequiredFailed { ref name, .. } if name == "lazy"));
        assert!(!rec.completes[0].1);
        assert!(disposed(&d).is_empty());
    }

    #[tokio::test]
    async fn panic_is_a_hard_failure() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("ok", 1, &d)).unwrap();
        boot.register(Mock::new("bomb", 2, &d).optional().behaving(Behavior::Panic)).unwrap();

        let mut rec = Recorder::default();
        let summary = boot.run(&mut rec).await.unwrap();
        let bomb = &summary.outcomes[1];
        assert!(!bomb.success);
        assert_eq!(bomb.message, "panicked: bomb exploded");
    }

    #[tokio::test]
    async fn teardown_fault_does_not_mask_abort_cause() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("faulty-cache", 1, &d)).unwrap();
        boot.register(Mock::new("db", 2, &d).behaving(Behavior::Fail("unreachable"))).unwrap();

        let err = boot.run(&mut Recorder::default()).await.unwrap_err();
        assert!(matches!(err, BootError::RequiredFailed { ref reason, .. } if reason == "unreachable"));
        assert_eq!(disposed(&d), vec!["faulty-cache"]);
    }
}

#[cfg(test)]
mod teardown_panic_tests {
    use super::*;
    use crate::{BootError, BootSequencer};

    #[tokio::test]
    async fn teardown_panic_does_not_mask_abort_cause() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("cache", 1, &d)).unwrap();
        boot.register(Mock::new("panicky-index", 2, &d)).unwrap();
        boot.register(Mock::new("db", 3, &d).behaving(Behavior::Fail("unreachable"))).unwrap();

        let mut rec = Recorder::default();
        let err = boot.run(&mut rec).await.unwrap_err();

        assert!(matches!(err, BootError::RequiredFailed { ref name, ref reason, .. }
            if name == "db" && reason == "unreachable"));
        assert_eq!(rec.runs.len(), 1);
        assert_eq!(rec.runs[0].message, "unreachable");
        // The panic in the newest subsystem's teardown does not stop the older one.
        assert_eq!(disposed(&d), vec!["panicky-index", "cache"]);
        assert!(boot.initialized_names().is_empty());
    }
}

// ── Cancellation and shutdown ─────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use std::time::Duration;

    use super::*;
    use crate::{BootError, BootSequencer, CancelToken};

    #[tokio::test]
    async fn cancel_before_run_starts_nothing() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("a", 1, &d)).unwrap();
        boot.cancel_token().cancel();

        let mut rec = Recorder::default();
        let err = boot.run(&mut rec).await.unwrap_err();
        assert!(matches!(err, BootError::Cancelled { .. }));
        assert!(rec.starts.is_empty());
        assert_eq!(rec.progress, vec![1.0]);
        assert!(!rec.runs[0].success);
    }

    #[tokio::test]
    async fn cancel_is_checked_between_subsystems() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("first", 1, &d).behaving(Behavior::CancelRun)).unwrap();
        boot.register(Mock::new("second", 2, &d)).unwrap();

        let mut rec = Recorder::default();
        let err = boot.run(&mut rec).await.unwrap_err();
        assert!(matches!(err, BootError::Cancelled { .. }));
        assert_eq!(rec.start_names(), vec!["first"]);
        assert_eq!(disposed(&d), vec!["first"]);
    }

    #[tokio::test]
    async fn subsystem_can_honour_cancel_mid_initialization() {
        let d = log();
        let token = CancelToken::new();
        let mut boot = BootSequencer::with_cancel_token(token.clone());
        boot.register(Mock::new("ready", 0, &d)).unwrap();
        boot.register(Mock::new("waiter", 1, &d).optional().behaving(Behavior::AwaitCancel)).unwrap();

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let err = boot.run(&mut Recorder::default()).await.unwrap_err();
        canceller.await.unwrap();
        assert!(matches!(err, BootError::Cancelled { .. }));
        assert_eq!(disposed(&d), vec!["ready"]);
    }

    #[tokio::test]
    async fn cancelled_resolves_immediately_once_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        token.clone().cancelled().await;
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn shutdown_disposes_newest_first_once() {
        let d = log();
        let mut boot = BootSequencer::new();
        boot.register(Mock::new("a", 1, &d)).unwrap();
        boot.register(Mock::new("b", 2, &d)).unwrap();
        boot.register(Mock::new("c", 3, &d).optional().behaving(Behavior::Fail("x"))).unwrap();
        boot.run(&mut Recorder::default()).await.unwrap();

        boot.shutdown();
        boot.shutdown();
        assert_eq!(disposed(&d), vec!["b", "a"]);
        assert!(boot.initialized_names().is_empty());
    }

    #[tokio::test]
    async fn drop_disposes_live_subsystems() {
        let d = log();
        {
            let mut boot = BootSequencer::new();
            boot.register(Mock::new("a", 1, &d)).unwrap();
            boot.run(&mut Recorder::default()).await.unwrap();
        }
        assert_eq!(disposed(&d), vec!["a"]);
    }
}
