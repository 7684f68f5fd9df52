//! Trailing-edge debounced invoker
//!
//! Wraps a function so that a burst of calls collapses into a single deferred
//! call, made once the burst has been quiet for `delay` and carrying the
//! arguments of the last call in the burst.
//!
//! ## Design
//!
//! Each invoker owns one pending slot:
//! 1. `call(args)` cancels whatever is pending in the slot
//! 2. A new timer is scheduled with `args` moved into its callback
//! 3. When the timer fires, the callback takes the slot back to idle and
//!    only then runs the wrapped function
//!
//! Pending invocations are tagged with a generation so a callback that lost
//! a race against a newer call finds the slot taken over and does nothing.
//!
//! A zero delay bypasses all of this: the wrapped function runs inline.
//!
//! ## Usage
//!
//! ```ignore
//! let search = Debounced::new(|query: String| run_search(&query), DEFAULT_DELAY);
//! search.call("r".into());
//! search.call("ru".into());
//! search.call("rust".into()); // only this one runs, 100ms from now
//! ```

use crate::error::Result;
use crate::timer::{Timer, TimerHandle};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::trace;

/// Quiet period used when the caller does not pick one
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

type Callback<A> = dyn Fn(A) + Send + Sync;

/// A debounced wrapper around `Fn(A)`
///
/// Multi-argument functions take a tuple. Call-site context travels either in
/// the closure's captures or explicitly inside `A`.
///
/// Clones share the same pending slot; they are handles to one invoker.
/// Dropping the last handle cancels any pending invocation.
pub struct Debounced<A> {
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    func: Box<Callback<A>>,
    delay: Duration,
    /// `None` exactly when `delay` is zero
    timer: Option<Timer>,
    slot: Mutex<Slot>,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    pending: Option<Pending>,
}

struct Pending {
    generation: u64,
    handle: TimerHandle,
}

impl<A: Send + 'static> Debounced<A> {
    /// Wrap `func`, scheduling on the current tokio runtime
    ///
    /// Any return value of `func` is discarded.
    ///
    /// # Panics
    /// Panics outside a tokio runtime unless `delay` is zero.
    pub fn new<F, R>(func: F, delay: Duration) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        let timer = (!delay.is_zero()).then(Timer::current);
        Self::build(func, delay, timer)
    }

    /// Like [`Debounced::new`], but reports a missing runtime as an error
    pub fn try_new<F, R>(func: F, delay: Duration) -> Result<Self>
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        let timer = if delay.is_zero() {
            None
        } else {
            Some(Timer::try_current()?)
        };
        Ok(Self::build(func, delay, timer))
    }

    /// Wrap `func`, scheduling on an explicit timer
    pub fn with_timer<F, R>(timer: Timer, func: F, delay: Duration) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self::build(func, delay, (!delay.is_zero()).then_some(timer))
    }

    fn build<F, R>(func: F, delay: Duration, timer: Option<Timer>) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        let func: Box<Callback<A>> = Box::new(move |args: A| {
            let _ = func(args);
        });

        Self {
            inner: Arc::new(Inner {
                func,
                delay,
                timer,
                slot: Mutex::new(Slot::default()),
            }),
        }
    }

    /// The debounced function
    ///
    /// Returns immediately. With a non-zero delay the wrapped function runs
    /// later on the runtime, and only if no other call arrives first.
    pub fn call(&self, args: A) {
        let Some(timer) = &self.inner.timer else {
            (self.inner.func)(args);
            return;
        };

        // Hold the slot across scheduling so the new callback cannot
        // observe the slot before its own entry is in place
        let mut slot = self.inner.slot.lock();

        if let Some(stale) = slot.pending.take() {
            trace!(generation = stale.generation, "superseding pending invocation");
            stale.handle.cancel();
        }

        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;

        let weak = Arc::downgrade(&self.inner);
        let handle = timer.schedule(self.inner.delay, move || fire(weak, generation, args));

        slot.pending = Some(Pending { generation, handle });
        trace!(
            generation,
            delay_ms = self.inner.delay.as_millis() as u64,
            "scheduled pending invocation"
        );
    }
}

impl<A> Debounced<A> {
    /// Quiet period this invoker waits for
    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    /// Whether an invocation is waiting for its quiet period to elapse
    pub fn is_pending(&self) -> bool {
        self.inner.slot.lock().pending.is_some()
    }
}

/// Timer callback: run the wrapped function if this generation still owns the slot
fn fire<A>(inner: Weak<Inner<A>>, generation: u64, args: A) {
    let Some(inner) = inner.upgrade() else {
        return;
    };

    let mut slot = inner.slot.lock();
    let owns_slot = matches!(&slot.pending, Some(pending) if pending.generation == generation);
    if !owns_slot {
        return;
    }
    slot.pending = None;
    drop(slot);

    trace!(generation, "firing pending invocation");
    (inner.func)(args);
}

impl<A> Drop for Inner<A> {
    fn drop(&mut self) {
        if let Some(pending) = self.slot.get_mut().pending.take() {
            trace!(generation = pending.generation, "invoker dropped, cancelling pending invocation");
            pending.handle.cancel();
        }
    }
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A> fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("delay", &self.inner.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// Wrap `func` and hand back the debounced function as a closure
///
/// A zero `delay` yields a closure that calls `func` inline.
pub fn debounce<A, R, F>(func: F, delay: Duration) -> impl Fn(A) + Clone + Send + Sync + 'static
where
    A: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    let debounced = Debounced::new(func, delay);
    move |args: A| debounced.call(args)
}

/// [`debounce`] with [`DEFAULT_DELAY`]
pub fn debounce_default<A, R, F>(func: F) -> impl Fn(A) + Clone + Send + Sync + 'static
where
    A: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    debounce(func, DEFAULT_DELAY)
}
