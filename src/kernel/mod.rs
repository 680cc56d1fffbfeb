//! Kernel layer: traversal and the collection operations built on it.
//!
//! - [`collection`]: [`Collection`], [`Key`] and [`each`], the single
//!   traversal primitive
//! - [`reduce`](mod@reduce): folds and the predicates built on them
//! - [`transforms`]: projections, filters, maps, invocation, `uniq`
//! - [`merge`]: in-place `extend` / `defaults`
//!
//! This layer has no dependencies on [`decorators`](crate::decorators),
//! [`sort`](crate::sort) or [`shape`](crate::shape).
//!
//! # Example
//!
//! ```rust
//! use underbar::kernel::{every, filter, reduce, Mapping};
//!
//! let numbers = vec![1, 2, 3, 4];
//! assert_eq!(reduce(&numbers, |sum, n| sum + n, 0), 10);
//! assert_eq!(filter(&numbers, |n, _, _| n % 2 == 0), vec![2, 4]);
//!
//! let mut stock = Mapping::new();
//! stock.insert("apples".to_string(), 3);
//! stock.insert("pears".to_string(), 0);
//! assert!(!every(&stock, |count| *count > 0));
//! ```

pub mod collection;
pub mod merge;
pub mod reduce;
pub mod transforms;

pub use collection::{each, AsCollection, Collection, Entries, Key, Mapping};
pub use merge::{defaults, extend};
pub use reduce::{contains, every, every_truthy, index_of, reduce, reduce_first, some, some_truthy};
pub use transforms::{
    filter, first, first_n, identity, invoke, invoke_method, last, last_n, map, pluck, reject, uniq,
};
