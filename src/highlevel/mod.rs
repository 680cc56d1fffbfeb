//! High-level convenience API.
//!
//! This layer provides [`Underbar`], an ergonomic wrapper that owns a seeded
//! random source and a [`Scheduler`](crate::scheduler::Scheduler) and
//! delegates to [`sort`](crate::sort), [`shape`](crate::shape) and
//! [`decorators`](crate::decorators).
//!
//! For library code, prefer the free functions and pass your own RNG and
//! scheduler.

pub mod client;

pub use client::Underbar;
