//! Element-wise transforms: projections, filters, maps and invocation.
//!
//! All results are freshly allocated `Vec`s; inputs are never mutated.

use super::collection::{each, AsCollection, Collection, Key};
use super::reduce::{contains, reduce};
use crate::error::{Result, UnderbarError};
use crate::value::{Methods, Record, Value};

/// Return the argument unchanged. The default iterator where one is optional.
pub fn identity<T>(value: T) -> T {
    value
}

/// First element, if any.
pub fn first<T>(items: &[T]) -> Option<&T> {
    items.first()
}

/// The first `n` elements, or all of them when there are fewer.
pub fn first_n<T>(items: &[T], n: usize) -> &[T] {
    &items[..n.min(items.len())]
}

/// Last element, if any.
pub fn last<T>(items: &[T]) -> Option<&T> {
    items.last()
}

/// The last `n` elements, or all of them when there are fewer.
pub fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// Values for which `test(value, key, collection)` holds, in traversal order.
pub fn filter<'a, C, P>(collection: &'a C, mut test: P) -> Vec<C::Item>
where
    C: AsCollection + ?Sized,
    C::Item: Clone,
    P: FnMut(&'a C::Item, Key<'a>, Collection<'a, C::Item>) -> bool,
{
    let mut result = Vec::new();
    each(collection, |value, key, source| {
        if test(value, key, source) {
            result.push(value.clone());
        }
    });
    result
}

/// Values for which `test` does not hold.
pub fn reject<'a, C, P>(collection: &'a C, mut test: P) -> Vec<C::Item>
where
    C: AsCollection + ?Sized,
    C::Item: Clone,
    P: FnMut(&'a C::Item, Key<'a>, Collection<'a, C::Item>) -> bool,
{
    filter(collection, |value, key, source| !test(value, key, source))
}

/// `iterator(value, key, collection)` for every element, in traversal order.
pub fn map<'a, C, R, F>(collection: &'a C, mut iterator: F) -> Vec<R>
where
    C: AsCollection + ?Sized,
    F: FnMut(&'a C::Item, Key<'a>, Collection<'a, C::Item>) -> R,
{
    let mut result = Vec::with_capacity(collection.as_collection().len());
    each(collection, |value, key, source| {
        result.push(iterator(value, key, source));
    });
    result
}

/// Project every element onto one named field. Missing fields are `None`.
///
/// # Example
///
/// ```rust
/// use underbar::{pluck, Value};
///
/// let people = Value::from_json(r#"[{"name": "moe", "age": 30}, {"name": "curly"}]"#)?;
/// let ages = pluck(people.as_list().unwrap(), "age");
/// assert_eq!(ages, vec![Some(Value::Int(30)), None]);
/// # Ok::<(), underbar::UnderbarError>(())
/// ```
pub fn pluck<C>(collection: &C, field: &str) -> Vec<Option<<C::Item as Record>::Field>>
where
    C: AsCollection + ?Sized,
    C::Item: Record,
    <C::Item as Record>::Field: Clone,
{
    map(collection, |value, _, _| value.field(field).cloned())
}

/// Apply `function(element, args)` to every element.
pub fn invoke<'a, C, A, R, F>(collection: &'a C, function: F, args: &A) -> Vec<R>
where
    C: AsCollection + ?Sized,
    A: ?Sized,
    F: Fn(&'a C::Item, &A) -> R,
{
    map(collection, |value, _, _| function(value, args))
}

/// Call the method named `method` on every element with `args`.
///
/// # Errors
/// `UnderbarError::UnknownMethod` for the first element that lacks it.
pub fn invoke_method<C>(collection: &C, method: &str, args: &[Value]) -> Result<Vec<Value>>
where
    C: AsCollection + ?Sized,
    C::Item: Methods,
{
    map(collection, |value, _, _| {
        value
            .call_method(method, args)
            .ok_or_else(|| UnderbarError::UnknownMethod {
                method: method.to_string(),
            })
    })
    .into_iter()
    .collect()
}

/// Duplicate-free copy that keeps the first occurrence of each value.
pub fn uniq<C>(collection: &C) -> Vec<C::Item>
where
    C: AsCollection + ?Sized,
    C::Item: PartialEq + Clone,
{
    reduce(
        collection,
        |mut result: Vec<C::Item>, value| {
            if !contains(&result, value) {
                result.push(value.clone());
            }
            result
        },
        Vec::new(),
    )
}
