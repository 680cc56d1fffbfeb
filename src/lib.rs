//! # Underbar: collection utilities and function decorators
//!
//! Underbar is a small functional toolkit: one traversal primitive, the
//! collection operations built on it, a handful of multi-sequence shape
//! operations, a randomized key sort, and decorators that change how and
//! when a function runs.
//!
//! ## Quick Start
//!
//! ```rust
//! use underbar::{filter, flatten, memoize, reduce, uniq, Value};
//!
//! let numbers = vec![1, 2, 2, 3, 4];
//! assert_eq!(reduce(&numbers, |sum, n| sum + n, 0), 12);
//! assert_eq!(filter(&numbers, |n, _, _| n % 2 == 0), vec![2, 2, 4]);
//! assert_eq!(uniq(&numbers), vec![1, 2, 3, 4]);
//!
//! // Heterogeneous data goes through `Value`
//! let nested = Value::from_json("[1, [2, [3]]]")?;
//! assert_eq!(flatten(&nested).len(), 3);
//!
//! // Decorators wrap a function and own their state
//! let square = memoize(|n: u64| n * n);
//! assert_eq!(square.call(12), 144);
//! assert_eq!(square.cache_size(), 1);
//! # Ok::<(), underbar::UnderbarError>(())
//! ```
//!
//! ## Layers
//!
//! - [`kernel`]: [`Collection`], [`each`] and everything built on a fold
//! - [`shape`]: `zip`, `flatten`, set operations, `shuffle`
//! - [`sort`]: `sort_by` / `sort_by_field`
//! - [`decorators`]: `once`, `memoize`, `delay`, `throttle`
//! - [`scheduler`]: the clock `delay` and `throttle` run on
//! - [`highlevel`]: [`Underbar`], which owns an RNG and a scheduler

pub mod decorators;
pub mod error;
pub mod highlevel;
pub mod kernel;
pub mod scheduler;
pub mod shape;
pub mod sort;
pub mod value;

// Re-exports for convenience
pub use decorators::{delay, memoize, once, throttle, Memoized, Once, Throttled};
pub use error::{Result, UnderbarError};
pub use highlevel::Underbar;
pub use kernel::{
    contains, defaults, each, every, every_truthy, extend, filter, first, first_n, identity,
    index_of, invoke, invoke_method, last, last_n, map, pluck, reduce, reduce_first, reject, some,
    some_truthy, uniq, AsCollection, Collection, Key, Mapping,
};
pub use scheduler::{EventLoop, Scheduler, Task, VirtualScheduler};
pub use shape::{difference, flatten, intersection, shuffle, zip};
pub use sort::{sort_by, sort_by_field};
pub use value::{Methods, Nested, Record, Truthy, Value};
