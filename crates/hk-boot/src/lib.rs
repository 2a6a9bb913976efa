//! `hk-boot` — ordered start-up of independently registered subsystems.
//!
//! # Run
//!
//! ```text
//! sequencer.run(&mut observer):
//!   sort subsystems by ascending priority (stable)
//!   for each subsystem:
//!     cancelled?            → abort (Cancelled)
//!     on_subsystem_start
//!     initialize(sink)      → Ok + ready | Ok + not ready | Err | panic
//!     on_subsystem_complete (always, success or not)
//!     failed and required?  → abort (RequiredFailed)
//!   abort?                  → dispose initialized subsystems, newest first
//!   on_progress(1.0), on_run_complete
//! ```
//!
//! Subsystems run strictly one at a time; the sequencer only suspends while
//! awaiting a subsystem's own initialization future.

pub mod cancel;
pub mod error;
pub mod observer;
pub mod progress;
pub mod sequencer;
pub mod subsystem;
mod unwind;

#[cfg(test)]
mod tests;

pub use cancel::CancelToken;
pub use error::{BootError, BootResult, RegistrationError, SubsystemError};
pub use observer::{BootObserver, NoopBootObserver, RunOutcome};
pub use progress::ProgressSink;
pub use sequencer::{BootSequencer, BootSummary, SubsystemOutcome};
pub use subsystem::{InitFuture, Subsystem};
