use std::time::Duration;

use thiserror::Error;

/// Why one subsystem failed to come up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubsystemError {
    /// Initialization returned an error.
    #[error("{0}")]
    Failed(String),

    /// Initialization returned `Ok` but the subsystem reports it is not ready.
    #[error("completed without becoming ready")]
    NotReady,

    /// Initialization observed the cancel token and gave up.
    #[error("initialization cancelled")]
    Cancelled,

    /// Initialization (or teardown) panicked.
    #[error("panicked: {0}")]
    Panicked(String),
}

impl SubsystemError {
    pub fn failed(reason: impl Into<String>) -> Self {
        SubsystemError::Failed(reason.into())
    }
}

/// A subsystem the sequencer refused to accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("subsystem name is empty")]
    EmptyName,

    #[error("subsystem `{0}` is already registered")]
    DuplicateName(String),

    #[error("cannot register `{0}`: the boot sequence has already run")]
    AlreadyRun(String),
}

/// Terminal failure of a boot run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BootError {
    #[error("required subsystem `{name}` failed after {elapsed:?}: {reason}")]
    RequiredFailed {
        name:    String,
        reason:  String,
        elapsed: Duration,
    },

    #[error("boot cancelled after {elapsed:?}")]
    Cancelled { elapsed: Duration },

    #[error("boot sequence has already run")]
    AlreadyRun,
}

pub type BootResult<T> = Result<T, BootError>;
