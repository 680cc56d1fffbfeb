//! Function decorators.
//!
//! Each decorator takes a function and returns a wrapper with different
//! call semantics. The wrapper owns its state; no two wrappers share any.
//!
//! - [`once`]: run on the first call only, replay the result afterwards
//! - [`memoize`]: cache results per argument
//! - [`delay`]: run once after a wait
//! - [`throttle`]: at most one call per window, plus a trailing call
//!
//! `delay` and `throttle` need a [`Scheduler`](crate::scheduler::Scheduler);
//! they never block the caller.

pub mod delay;
pub mod memoize;
pub mod once;
pub mod throttle;

pub use delay::delay;
pub use memoize::{memoize, Memoized};
pub use once::{once, Once};
pub use throttle::{throttle, Throttled};
