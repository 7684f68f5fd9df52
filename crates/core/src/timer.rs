//! Delayed-execution facility backed by the tokio runtime
//!
//! Provides the two primitives the invoker needs from its host:
//! schedule a callback after a delay, and cancel it before it fires.

use crate::error::{DebounceError, Result};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Schedules callbacks on a tokio runtime
#[derive(Debug, Clone)]
pub struct Timer {
    runtime: Handle,
}

impl Timer {
    /// Bind to the runtime of the calling context
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime, like `tokio::spawn`.
    pub fn current() -> Self {
        Self::from_handle(Handle::current())
    }

    /// Bind to the runtime of the calling context, if there is one
    pub fn try_current() -> Result<Self> {
        Handle::try_current()
            .map(Self::from_handle)
            .map_err(|_| DebounceError::NoRuntime)
    }

    /// Bind to an explicit runtime handle
    pub fn from_handle(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Run `callback` once `delay` has elapsed
    ///
    /// The deadline is fixed here, not when the task first gets polled.
    pub fn schedule<F>(&self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        // Sleep reads the clock of the current runtime on creation
        let _enter = self.runtime.enter();
        let sleep = tokio::time::sleep(delay);

        let task = self.runtime.spawn(async move {
            sleep.await;
            callback();
        });

        TimerHandle {
            abort: task.abort_handle(),
        }
    }
}

/// Handle to a scheduled callback
///
/// Dropping the handle detaches the callback; it still fires.
#[derive(Debug)]
pub struct TimerHandle {
    abort: AbortHandle,
}

impl TimerHandle {
    /// Cancel the callback if it has not fired yet
    pub fn cancel(self) {
        self.abort.abort();
    }

    /// Whether the callback has run (or been cancelled)
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}
