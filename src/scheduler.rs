//! Scheduler: the deferred-execution port used by `delay` and `throttle`.
//!
//! Decorators never touch a global timer. They are handed a [`Scheduler`]
//! that can tell the time and run a task after a delay. Two implementations
//! are provided:
//!
//! - [`VirtualScheduler`]: a simulated clock driven by the caller. Tests
//!   step it explicitly, so timing is exact.
//! - [`EventLoop`]: wall-clock timers on a current-thread tokio runtime.
//!
//! Everything runs on one cooperative timeline. Tasks are `FnOnce()` and may
//! schedule further tasks; there is no cancellation.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use underbar::{Scheduler, VirtualScheduler};
//!
//! let scheduler = VirtualScheduler::new();
//! let fired = Rc::new(Cell::new(false));
//! let flag = fired.clone();
//! scheduler.schedule(Duration::from_millis(100), Box::new(move || flag.set(true)));
//!
//! scheduler.advance(Duration::from_millis(99));
//! assert!(!fired.get());
//! scheduler.advance(Duration::from_millis(1));
//! assert!(fired.get());
//! ```

use crate::error::Result;
use std::cell::{Cell, RefCell};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tokio::task::{JoinHandle, LocalSet};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace, warn};

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// "Run this after that long", on a single monotonic clock.
pub trait Scheduler {
    /// Time elapsed on this scheduler's clock.
    fn now(&self) -> Duration;

    /// Queue `task` to run once `after` has elapsed from [`now`](Self::now).
    fn schedule(&self, after: Duration, task: Task);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn schedule(&self, after: Duration, task: Task) {
        (**self).schedule(after, task)
    }
}

// =============================================================================
// Timer queue
// =============================================================================

struct Timer {
    due: Duration,
    seq: u64,
    task: Task,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Earlier deadline first; insertion order breaks ties.
impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

#[derive(Default)]
struct TimerQueue {
    heap: BinaryHeap<Reverse<Timer>>,
    next_seq: u64,
}

impl TimerQueue {
    fn push(&mut self, due: Duration, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Timer { due, seq, task }));
    }

    fn next_due(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(timer)| timer.due)
    }

    /// Pop the earliest timer if it is due at or before `deadline`.
    fn pop_due(&mut self, deadline: Duration) -> Option<Timer> {
        if self.next_due()? <= deadline {
            self.heap.pop().map(|Reverse(timer)| timer)
        } else {
            None
        }
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

// =============================================================================
// VirtualScheduler
// =============================================================================

/// A scheduler on a simulated clock that only moves when told to.
#[derive(Default)]
pub struct VirtualScheduler {
    clock: Cell<Duration>,
    queue: RefCell<TimerQueue>,
}

impl VirtualScheduler {
    /// Create a scheduler with the clock at zero and nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward by `by`, running every task that falls due on
    /// the way at its exact deadline, in deadline order.
    ///
    /// Tasks queued by running tasks also run if they fall due in range.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.get() + by;
        loop {
            // Release the queue borrow before running: tasks may schedule.
            let next = self.queue.borrow_mut().pop_due(target);
            let Some(timer) = next else { break };
            self.clock.set(self.clock.get().max(timer.due));
            trace!(due = ?timer.due, seq = timer.seq, "virtual timer fired");
            (timer.task)();
        }
        self.clock.set(target);
    }

    /// Move the clock forward without running anything, as if the loop had
    /// been busy. Overdue tasks run on the next [`run_due`](Self::run_due)
    /// or [`advance`](Self::advance).
    pub fn skip(&self, by: Duration) {
        self.clock.set(self.clock.get() + by);
    }

    /// Run every task already due, late, at the current instant.
    pub fn run_due(&self) {
        self.advance(Duration::ZERO);
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> Duration {
        self.clock.get()
    }

    fn schedule(&self, after: Duration, task: Task) {
        let due = self.clock.get() + after;
        trace!(?after, ?due, "virtual timer queued");
        self.queue.borrow_mut().push(due, task);
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualScheduler")
            .field("now", &self.clock.get())
            .field("pending", &self.pending())
            .finish()
    }
}

// =============================================================================
// EventLoop
// =============================================================================

/// A wall-clock scheduler on a current-thread tokio runtime.
///
/// Each scheduled task becomes a local task that sleeps until its deadline;
/// nothing runs until [`run`](Self::run) drives the [`LocalSet`]. Tasks are
/// not `Send`, so they never leave this thread.
pub struct EventLoop {
    runtime: Runtime,
    local: LocalSet,
    origin: Instant,
    handles: RefCell<Vec<JoinHandle<()>>>,
    pending: Rc<Cell<usize>>,
}

impl EventLoop {
    /// Create an event loop whose clock starts now.
    ///
    /// # Errors
    /// `UnderbarError::Runtime` if the tokio runtime cannot be built.
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_time().build()?;
        Ok(Self {
            runtime,
            local: LocalSet::new(),
            origin: Instant::now(),
            handles: RefCell::new(Vec::new()),
            pending: Rc::new(Cell::new(0)),
        })
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.pending.get()
    }

    /// Run tasks as they fall due until none are left, including tasks
    /// scheduled by running tasks. Returns the number of tasks that ran to
    /// completion.
    pub fn run(&self) -> usize {
        let ran = self.local.block_on(&self.runtime, async {
            let mut ran = 0;
            loop {
                let batch = std::mem::take(&mut *self.handles.borrow_mut());
                if batch.is_empty() {
                    break;
                }
                for handle in batch {
                    match handle.await {
                        Ok(()) => ran += 1,
                        Err(err) => warn!(error = %err, "scheduled task failed"),
                    }
                }
            }
            ran
        });
        debug!(ran, "event loop drained");
        ran
    }
}

impl Scheduler for EventLoop {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule(&self, after: Duration, task: Task) {
        let deadline = Instant::now() + after;
        trace!(?after, "timer queued");
        let pending = Rc::clone(&self.pending);
        pending.set(pending.get() + 1);
        let handle = self.local.spawn_local(async move {
            sleep_until(deadline).await;
            pending.set(pending.get() - 1);
            trace!(late = ?Instant::now().saturating_duration_since(deadline), "timer fired");
            task();
        });
        self.handles.borrow_mut().push(handle);
    }
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    type Log = Rc<RefCell<Vec<(&'static str, u64)>>>;

    fn recorder(scheduler: &Rc<VirtualScheduler>, log: &Log, name: &'static str) -> Task {
        let scheduler = scheduler.clone();
        let log = log.clone();
        Box::new(move || log.borrow_mut().push((name, scheduler.now().as_millis() as u64)))
    }

    #[test]
    fn test_tasks_run_in_deadline_order() {
        let scheduler = Rc::new(VirtualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        scheduler.schedule(ms(30), recorder(&scheduler, &log, "c"));
        scheduler.schedule(ms(10), recorder(&scheduler, &log, "a"));
        scheduler.schedule(ms(20), recorder(&scheduler, &log, "b"));
        assert_eq!(scheduler.pending(), 3);

        scheduler.advance(ms(100));
        assert_eq!(*log.borrow(), vec![("a", 10), ("b", 20), ("c", 30)]);
        assert_eq!(scheduler.now(), ms(100));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_same_deadline_keeps_insertion_order() {
        let scheduler = Rc::new(VirtualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        scheduler.schedule(ms(5), recorder(&scheduler, &log, "first"));
        scheduler.schedule(ms(5), recorder(&scheduler, &log, "second"));
        scheduler.advance(ms(5));
        assert_eq!(*log.borrow(), vec![("first", 5), ("second", 5)]);
    }

    #[test]
    fn test_tasks_scheduled_while_advancing() {
        let scheduler = Rc::new(VirtualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner = recorder(&scheduler, &log, "inner");
        let handle = scheduler.clone();
        scheduler.schedule(ms(10), Box::new(move || handle.schedule(ms(10), inner)));

        scheduler.advance(ms(15));
        assert!(log.borrow().is_empty());
        scheduler.advance(ms(5));
        assert_eq!(*log.borrow(), vec![("inner", 20)]);
    }

    #[test]
    fn test_skip_then_run_due_fires_late() {
        let scheduler = Rc::new(VirtualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        scheduler.schedule(ms(10), recorder(&scheduler, &log, "late"));
        scheduler.skip(ms(25));
        assert!(log.borrow().is_empty());

        scheduler.run_due();
        assert_eq!(*log.borrow(), vec![("late", 25)]);
    }

    #[test]
    fn test_event_loop_runs_everything() {
        let event_loop = EventLoop::new().unwrap();
        let count = Rc::new(Cell::new(0));
        for delay in [2, 0, 1] {
            let count = count.clone();
            event_loop.schedule(ms(delay), Box::new(move || count.set(count.get() + 1)));
        }

        assert_eq!(event_loop.pending(), 3);
        assert_eq!(event_loop.run(), 3);
        assert_eq!(event_loop.pending(), 0);
        assert_eq!(count.get(), 3);
        assert!(event_loop.now() >= ms(2));
    }

    #[test]
    fn test_event_loop_waits_for_deadlines() {
        let event_loop = Rc::new(EventLoop::new().unwrap());
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, name) in [(20, "slow"), (5, "fast")] {
            let log = log.clone();
            event_loop.schedule(ms(delay), Box::new(move || log.borrow_mut().push(name)));
        }

        assert_eq!(event_loop.run(), 2);
        assert_eq!(*log.borrow(), vec!["fast", "slow"]);
        assert!(event_loop.now() >= ms(20));
    }

    #[test]
    fn test_event_loop_runs_tasks_scheduled_by_tasks() {
        let event_loop = Rc::new(EventLoop::new().unwrap());
        let fired = Rc::new(Cell::new(false));

        let handle = event_loop.clone();
        let flag = fired.clone();
        event_loop.schedule(
            ms(1),
            Box::new(move || handle.schedule(ms(1), Box::new(move || flag.set(true)))),
        );

        assert_eq!(event_loop.run(), 2);
        assert!(fired.get());
        assert_eq!(event_loop.run(), 0);
    }
}
