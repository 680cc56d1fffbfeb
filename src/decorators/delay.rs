//! `delay`: run a function once, later.

use crate::scheduler::Scheduler;
use std::time::Duration;
use tracing::trace;

/// Schedule exactly one call of `func(args)` after `wait`.
///
/// Returns immediately. The deferred call's return value is dropped.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use underbar::{delay, VirtualScheduler};
///
/// let scheduler = VirtualScheduler::new();
/// let seen = Rc::new(Cell::new(0));
/// let sink = seen.clone();
/// let add = move |(a, b): (i32, i32)| sink.set(a + b);
/// delay(&scheduler, add, Duration::from_millis(500), (2, 3));
///
/// assert_eq!(seen.get(), 0);
/// scheduler.advance(Duration::from_millis(500));
/// assert_eq!(seen.get(), 5);
/// ```
pub fn delay<S, F, A, R>(scheduler: &S, func: F, wait: Duration, args: A)
where
    S: Scheduler + ?Sized,
    F: FnOnce(A) -> R + 'static,
    A: 'static,
{
    trace!(?wait, "delay scheduled");
    scheduler.schedule(
        wait,
        Box::new(move || {
            let _ = func(args);
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::VirtualScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_runs_after_wait() {
        let scheduler = VirtualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();

        let push = move |word: &'static str| sink.borrow_mut().push(word);
        delay(&scheduler, push, ms(100), "a");
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(ms(99));
        assert!(log.borrow().is_empty());
        scheduler.advance(ms(1));
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn test_runs_exactly_once() {
        let scheduler = VirtualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();

        delay(&scheduler, move |n: i32| sink.borrow_mut().push(n), ms(10), 7);
        scheduler.advance(ms(1000));
        assert_eq!(*log.borrow(), vec![7]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_result_is_discarded() {
        let scheduler = VirtualScheduler::new();
        delay(&scheduler, |n: i32| n * 2, ms(0), 21);
        scheduler.run_due();
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_order_follows_wait() {
        let scheduler = VirtualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (wait, name) in [(30, "slow"), (10, "fast")] {
            let sink = log.clone();
            let push = move |n: &'static str| sink.borrow_mut().push(n);
            delay(&scheduler, push, ms(wait), name);
        }
        scheduler.advance(ms(30));
        assert_eq!(*log.borrow(), vec!["fast", "slow"]);
    }
}
