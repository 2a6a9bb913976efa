//! The unit of start-up work.

use std::future::Future;
use std::pin::Pin;

use crate::{ProgressSink, SubsystemError};

/// Boxed initialization future borrowing the subsystem and its sink.
pub type InitFuture<'a> = Pin<Box<dyn Future<Output = Result<(), SubsystemError>> + Send + 'a>>;

/// An externally supplied service brought up by the
/// [`BootSequencer`][crate::BootSequencer].
///
/// # Example
///
/// ```rust
/// use hk_boot::{InitFuture, ProgressSink, Subsystem, SubsystemError};
///
/// struct Assets { loaded: bool }
///
/// impl Subsystem for Assets {
///     fn name(&self) -> &str { "assets" }
///     fn priority(&self) -> i32 { 10 }
///
///     fn initialize<'a>(&'a mut self, mut sink: ProgressSink<'a>) -> InitFuture<'a> {
///         Box::pin(async move {
///             for step in 1..=4 {
///                 sink.report(step as f32 / 4.0);
///             }
///             self.loaded = true;
///             Ok(())
///         })
///     }
///
///     fn is_initialized(&self) -> bool { self.loaded }
///
///     fn dispose(&mut self) -> Result<(), SubsystemError> {
///         self.loaded = false;
///         Ok(())
///     }
/// }
/// ```
pub trait Subsystem: Send {
    /// Unique, non-blank name.
    fn name(&self) -> &str;

    /// Sort key; lower runs earlier.  Ties keep registration order.
    fn priority(&self) -> i32;

    /// Whether a failure of this subsystem aborts the whole run.
    fn is_required(&self) -> bool {
        true
    }

    /// Bring the subsystem up, reporting progress through `sink`.
    fn initialize<'a>(&'a mut self, sink: ProgressSink<'a>) -> InitFuture<'a>;

    /// Readiness after `initialize` returned.  `Ok` from `initialize` with
    /// `false` here is a soft failure.
    fn is_initialized(&self) -> bool;

    /// Tear the subsystem down.  Only called after a successful
    /// initialization, at most once.
    fn dispose(&mut self) -> Result<(), SubsystemError>;
}
