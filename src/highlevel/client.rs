//! Convenience wrapper that owns a random source and a [`Scheduler`] and
//! delegates to the free functions of the crate.
//!
//! For full control, call [`sort`](crate::sort), [`shape`](crate::shape)
//! and [`decorators`](crate::decorators) directly.

use crate::decorators::{self, Throttled};
use crate::error::Result;
use crate::kernel::AsCollection;
use crate::scheduler::{EventLoop, Scheduler};
use crate::shape;
use crate::sort;
use crate::value::Record;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Convenience wrapper for the operations that need ambient state.
///
/// `Underbar` owns a ChaCha8 generator (for `shuffle` and the pivots of
/// `sort_by`) and a scheduler (for `delay` and `throttle`). Everything
/// else in the crate is stateless and is called directly.
///
/// # When to use `Underbar` vs direct calls
///
/// | Use case | Recommendation |
/// |----------|---------------|
/// | Quick scripts, examples | `Underbar` (less boilerplate) |
/// | Library code, tests needing exact control | Free functions with your own RNG and scheduler |
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use std::time::Duration;
/// use underbar::{Underbar, VirtualScheduler};
///
/// let scheduler = Rc::new(VirtualScheduler::new());
/// let u = Underbar::with_scheduler(scheduler.clone(), 42);
///
/// let shuffled = u.shuffle(&[1, 2, 3, 4]);
/// assert_eq!(shuffled.len(), 4);
///
/// let log = u.throttle(|n: i32| n, Duration::from_millis(100));
/// assert_eq!(log.call(1), Some(1));
/// ```
pub struct Underbar<S: Scheduler + 'static = EventLoop> {
    seed: u64,
    rng: RefCell<ChaCha8Rng>,
    scheduler: Rc<S>,
}

impl Underbar<EventLoop> {
    /// Create an instance with a fresh entropy-derived seed and a wall-clock
    /// [`EventLoop`].
    ///
    /// # Errors
    /// `UnderbarError::Runtime` if the event loop cannot start.
    pub fn new() -> Result<Self> {
        Self::with_seed(rand::random())
    }

    /// Create an instance with a specific seed and a wall-clock
    /// [`EventLoop`].
    ///
    /// Using the same seed guarantees the same shuffles and pivot choices
    /// across runs and machines.
    pub fn with_seed(seed: u64) -> Result<Self> {
        Ok(Self::with_scheduler(Rc::new(EventLoop::new()?), seed))
    }
}

impl<S: Scheduler + 'static> Underbar<S> {
    /// Create an instance on a caller-supplied scheduler.
    pub fn with_scheduler(scheduler: Rc<S>, seed: u64) -> Self {
        Self {
            seed,
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
            scheduler,
        }
    }

    /// The seed the random source started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The scheduler `delay` and `throttle` use.
    pub fn scheduler(&self) -> &Rc<S> {
        &self.scheduler
    }

    // =========================================================================
    // Randomized operations
    // =========================================================================

    /// Shuffled copy of `items`. See [`shape::shuffle`].
    pub fn shuffle<T: Clone>(&self, items: &[T]) -> Vec<T> {
        shape::shuffle(items, &mut *self.rng.borrow_mut())
    }

    /// Sort by an extracted key. See [`sort::sort_by`].
    pub fn sort_by<C, K, F>(&self, collection: &C, key: F) -> Vec<C::Item>
    where
        C: AsCollection + ?Sized,
        C::Item: Clone,
        K: PartialOrd,
        F: Fn(&C::Item) -> Option<K>,
    {
        sort::sort_by(collection, key, &mut *self.rng.borrow_mut())
    }

    /// Sort records by a named field. See [`sort::sort_by_field`].
    pub fn sort_by_field<C>(&self, collection: &C, field: &str) -> Vec<C::Item>
    where
        C: AsCollection + ?Sized,
        C::Item: Record + Clone,
        <C::Item as Record>::Field: PartialOrd + Clone,
    {
        sort::sort_by_field(collection, field, &mut *self.rng.borrow_mut())
    }

    // =========================================================================
    // Scheduled decorators
    // =========================================================================

    /// Run `func(args)` once after `wait`. See [`decorators::delay`].
    pub fn delay<F, A, R>(&self, func: F, wait: Duration, args: A)
    where
        F: FnOnce(A) -> R + 'static,
        A: 'static,
    {
        decorators::delay(self.scheduler.as_ref(), func, wait, args)
    }

    /// Throttle `func` to one call per `wait`. See [`decorators::throttle`].
    pub fn throttle<F, R>(&self, func: F, wait: Duration) -> Throttled<F, R> {
        decorators::throttle(func, wait, self.scheduler.clone())
    }
}
