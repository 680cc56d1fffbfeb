//! `throttle`: at most one real call per time window.
//!
//! # Protocol
//!
//! A call to the wrapper at time `T` with arguments `A`:
//!
//! 1. If the wrapped function has never run, or `T - last >= wait`, run it
//!    now with `A`, record `last = T`, remember and return the result.
//! 2. Otherwise, if no trailing call is pending, schedule one re-entry of
//!    the *wrapper* with `A` after `wait - (T - last)` and return the last
//!    remembered result.
//! 3. Otherwise return the last remembered result.
//!
//! The trailing re-entry clears the pending flag and then follows the same
//! protocol. If a manual call already ran the function in the meantime, the
//! re-entry lands in case 2 and reschedules itself for the next window, so
//! a late timer never causes two calls inside one window.
//!
//! ```text
//! wait = 100
//!   t=0    call -> runs                         (last = 0)
//!   t=50   call -> trailing re-entry at t=100
//!   t=100  re-entry -> runs                     (last = 100)
//!   t=102  call -> trailing re-entry at t=200
//!   t=200  re-entry -> runs
//! ```

use crate::scheduler::Scheduler;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tracing::trace;

/// Wrap `func` so it runs at most once per `wait`, with a trailing call for
/// activity inside a window.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use std::time::Duration;
/// use underbar::{throttle, VirtualScheduler};
///
/// let scheduler = Rc::new(VirtualScheduler::new());
/// let double = throttle(|n: i32| n * 2, Duration::from_millis(100), scheduler.clone());
///
/// assert_eq!(double.call(1), Some(2));
/// assert_eq!(double.call(2), Some(2)); // throttled, trailing call queued
/// scheduler.advance(Duration::from_millis(100));
/// assert_eq!(double.last_result(), Some(4));
/// ```
pub fn throttle<F, R>(func: F, wait: Duration, scheduler: Rc<dyn Scheduler>) -> Throttled<F, R> {
    Throttled {
        inner: Rc::new(ThrottleInner {
            func: RefCell::new(func),
            wait,
            scheduler,
            state: RefCell::new(ThrottleState {
                last_called: None,
                scheduled: false,
                last_result: None,
            }),
        }),
    }
}

/// A throttled function. Cloning yields another handle to the same wrapper.
pub struct Throttled<F, R> {
    inner: Rc<ThrottleInner<F, R>>,
}

struct ThrottleInner<F, R> {
    func: RefCell<F>,
    wait: Duration,
    scheduler: Rc<dyn Scheduler>,
    state: RefCell<ThrottleState<R>>,
}

struct ThrottleState<R> {
    /// Scheduler time of the last real call
    last_called: Option<Duration>,
    /// A trailing re-entry is queued
    scheduled: bool,
    last_result: Option<R>,
}

enum Decision {
    Run,
    Defer(Duration),
    Skip,
}

impl<F, R> Clone for Throttled<F, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<F, R> Throttled<F, R> {
    /// Call through the throttle.
    ///
    /// Returns the result of this call if the function ran, otherwise the
    /// last remembered result (`None` until the first real call).
    pub fn call<A>(&self, args: A) -> Option<R>
    where
        F: FnMut(A) -> R + 'static,
        A: 'static,
        R: Clone + 'static,
    {
        let inner = &self.inner;
        let now = inner.scheduler.now();

        let decision = {
            let mut state = inner.state.borrow_mut();
            match state.last_called {
                Some(last) if now.saturating_sub(last) < inner.wait => {
                    if state.scheduled {
                        Decision::Skip
                    } else {
                        state.scheduled = true;
                        Decision::Defer(inner.wait - now.saturating_sub(last))
                    }
                }
                _ => {
                    state.last_called = Some(now);
                    Decision::Run
                }
            }
        };

        match decision {
            Decision::Run => {
                trace!(?now, "throttle: running");
                let result = {
                    let mut func = inner.func.borrow_mut();
                    (*func)(args)
                };
                inner.state.borrow_mut().last_result = Some(result.clone());
                Some(result)
            }
            Decision::Defer(after) => {
                trace!(?now, ?after, "throttle: trailing call scheduled");
                let handle = self.clone();
                inner.scheduler.schedule(
                    after,
                    Box::new(move || {
                        handle.inner.state.borrow_mut().scheduled = false;
                        handle.call(args);
                    }),
                );
                self.last_result()
            }
            Decision::Skip => {
                trace!(?now, "throttle: dropped, trailing call already pending");
                self.last_result()
            }
        }
    }

    /// The most recent result of the wrapped function.
    pub fn last_result(&self) -> Option<R>
    where
        R: Clone,
    {
        self.inner.state.borrow().last_result.clone()
    }

    /// Whether a trailing call is queued.
    pub fn is_scheduled(&self) -> bool {
        self.inner.state.borrow().scheduled
    }

    /// The throttle window.
    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}

impl<F, R> fmt::Debug for Throttled<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Throttled")
            .field("wait", &self.inner.wait)
            .field("last_called", &state.last_called)
            .field("scheduled", &state.scheduled)
            .finish()
    }
}
