//! `once`: run a function on the first call only.

use std::cell::{Cell, OnceCell};
use std::fmt;

/// Wrap `func` so it runs at most once.
///
/// The first [`Once::call`] runs `func` with its arguments and caches the
/// result; every later call returns a clone of that result without running
/// anything, whatever arguments it is given.
///
/// # Example
///
/// ```rust
/// use underbar::once;
///
/// let init = once(|n: i32| n * 10);
/// assert_eq!(init.call(1), 10);
/// assert_eq!(init.call(2), 10);
/// ```
pub fn once<F, R>(func: F) -> Once<F, R> {
    Once {
        func: Cell::new(Some(func)),
        result: OnceCell::new(),
    }
}

/// A function that has run at most once. See [`once`].
pub struct Once<F, R> {
    func: Cell<Option<F>>,
    result: OnceCell<R>,
}

impl<F, R> Once<F, R> {
    /// Run the wrapped function if this is the first call, then return the
    /// cached result.
    ///
    /// # Panics
    /// If the wrapped function panicked during the first call, or calls this
    /// wrapper recursively.
    pub fn call<A>(&self, args: A) -> R
    where
        F: FnOnce(A) -> R,
        R: Clone,
    {
        self.result
            .get_or_init(|| {
                let func = self
                    .func
                    .take()
                    .expect("once: wrapped function did not complete its first call");
                func(args)
            })
            .clone()
    }

    /// Whether the wrapped function has run.
    pub fn is_called(&self) -> bool {
        self.result.get().is_some()
    }

    /// The cached result, if the wrapped function has run.
    pub fn result(&self) -> Option<&R> {
        self.result.get()
    }
}

impl<F, R: fmt::Debug> fmt::Debug for Once<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Once").field("result", &self.result.get()).finish()
    }
}
