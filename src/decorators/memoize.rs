//! `memoize`: cache a single-argument function's results.
//!
//! The same argument ALWAYS returns the SAME result, computed once.
//! The cache grows without bound.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Wrap `func` so each distinct argument is computed once.
///
/// The argument is the cache key, so it must be hashable; this is the
/// "single primitive argument" restriction, checked by the type system.
///
/// # Example
///
/// ```rust
/// use underbar::memoize;
///
/// let square = memoize(|n: u64| n * n);
/// assert_eq!(square.call(12), 144);
/// assert_eq!(square.call(12), 144); // served from cache
/// assert_eq!(square.cache_size(), 1);
/// ```
pub fn memoize<F, K, V>(func: F) -> Memoized<F, K, V>
where
    F: Fn(K) -> V,
    K: Eq + Hash + Clone,
    V: Clone,
{
    Memoized {
        func,
        cache: RefCell::new(HashMap::new()),
    }
}

/// A function with a result cache. See [`memoize`].
pub struct Memoized<F, K, V> {
    func: F,
    /// Cache of computed results
    cache: RefCell<HashMap<K, V>>,
}

impl<F, K, V> Memoized<F, K, V>
where
    F: Fn(K) -> V,
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Get the result for `arg`.
    ///
    /// If it has been computed before, returns it from cache.
    /// Otherwise, computes it and caches it.
    pub fn call(&self, arg: K) -> V {
        // Check cache first
        {
            let cache = self.cache.borrow();
            if let Some(result) = cache.get(&arg) {
                return result.clone();
            }
        }

        // No borrow is held while `func` runs
        debug!(cached = self.cache_size(), "memoize miss");
        let result = (self.func)(arg.clone());

        self.cache.borrow_mut().insert(arg, result.clone());
        result
    }

    /// Clear the result cache.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Get the number of cached results.
    pub fn cache_size(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<F, K, V> fmt::Debug for Memoized<F, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("cache_size", &self.cache.borrow().len())
            .finish()
    }
}
