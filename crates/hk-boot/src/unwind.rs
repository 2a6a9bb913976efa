//! Panic containment for subsystem code.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::{ProgressSink, Subsystem, SubsystemError};

/// Polls the inner future inside `catch_unwind`.
struct CatchUnwind<F>(F);

impl<F: Future + Unpin> Future for CatchUnwind<F> {
    type Output = Result<F::Output, Box<dyn Any + Send>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = &mut self.0;
        match panic::catch_unwind(AssertUnwindSafe(|| Pin::new(inner).poll(cx))) {
            Ok(Poll::Pending) => Poll::Pending,
            Ok(Poll::Ready(out)) => Poll::Ready(Ok(out)),
            Err(payload) => Poll::Ready(Err(payload)),
        }
    }
}

/// Run `subsystem.initialize(sink)`, turning a panic anywhere in it into
/// [`SubsystemError::Panicked`].
pub(crate) async fn initialize_guarded<'a>(
    subsystem: &'a mut dyn Subsystem,
    sink:      ProgressSink<'a>,
) -> Result<(), SubsystemError> {
    let init = match panic::catch_unwind(AssertUnwindSafe(|| subsystem.initialize(sink))) {
        Ok(init) => init,
        Err(payload) => return Err(SubsystemError::Panicked(panic_message(&*payload))),
    };
    match CatchUnwind(init).await {
        Ok(result) => result,
        Err(payload) => Err(SubsystemError::Panicked(panic_message(&*payload))),
    }
}

/// Run `subsystem.dispose()`, turning a panic into
/// [`SubsystemError::Panicked`].
pub(crate) fn dispose_guarded(subsystem: &mut dyn Subsystem) -> Result<(), SubsystemError> {
    panic::catch_unwind(AssertUnwindSafe(|| subsystem.dispose()))
        .unwrap_or_else(|payload| Err(SubsystemError::Panicked(panic_message(&*payload))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
