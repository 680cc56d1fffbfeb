//! Folds over a collection and the predicates built on them.

use super::collection::AsCollection;
use crate::error::{Result, UnderbarError};
use crate::value::Truthy;

/// Fold left-to-right: `accumulator = iterator(accumulator, value)`.
///
/// The iterator sees values only, never keys.
pub fn reduce<'a, C, A, F>(collection: &'a C, mut iterator: F, initial: A) -> A
where
    C: AsCollection + ?Sized,
    F: FnMut(A, &'a C::Item) -> A,
{
    collection
        .as_collection()
        .entries()
        .fold(initial, |accumulator, (_, value)| iterator(accumulator, value))
}

/// Fold without an initial value.
///
/// The first visited value seeds the accumulator and the fold continues with
/// the remaining values, so `reduce_first(&[1, 2, 3], add)` is `6`.
///
/// # Errors
/// `UnderbarError::EmptyReduce` when there is nothing to seed with.
pub fn reduce_first<'a, C, F>(collection: &'a C, mut iterator: F) -> Result<C::Item>
where
    C: AsCollection + ?Sized,
    C::Item: Clone,
    F: FnMut(C::Item, &'a C::Item) -> C::Item,
{
    let mut entries = collection.as_collection().entries();
    let (_, seed) = entries.next().ok_or(UnderbarError::EmptyReduce)?;
    Ok(entries.fold(seed.clone(), |accumulator, (_, value)| {
        iterator(accumulator, value)
    }))
}

/// Whether any value equals `target`. Scans the whole collection.
pub fn contains<C>(collection: &C, target: &C::Item) -> bool
where
    C: AsCollection + ?Sized,
    C::Item: PartialEq,
{
    reduce(collection, |found, item| found || item == target, false)
}

/// Whether every value passes `predicate`. Empty collections pass.
pub fn every<'a, C, P>(collection: &'a C, mut predicate: P) -> bool
where
    C: AsCollection + ?Sized,
    P: FnMut(&'a C::Item) -> bool,
{
    reduce(collection, |so_far, item| so_far && predicate(item), true)
}

/// [`every`] with truthiness as the predicate.
pub fn every_truthy<C>(collection: &C) -> bool
where
    C: AsCollection + ?Sized,
    C::Item: Truthy,
{
    every(collection, Truthy::is_truthy)
}

/// Whether at least one value passes `predicate`.
pub fn some<'a, C, P>(collection: &'a C, mut predicate: P) -> bool
where
    C: AsCollection + ?Sized,
    P: FnMut(&'a C::Item) -> bool,
{
    !every(collection, |item| !predicate(item))
}

/// [`some`] with truthiness as the predicate.
pub fn some_truthy<C>(collection: &C) -> bool
where
    C: AsCollection + ?Sized,
    C::Item: Truthy,
{
    some(collection, Truthy::is_truthy)
}

/// Index of the first element equal to `target`.
pub fn index_of<T: PartialEq>(items: &[T], target: &T) -> Option<usize> {
    reduce(
        items,
        |(position, found), item| match found {
            Some(_) => (position, found),
            None if item == target => (position, Some(position)),
            None => (position + 1, None),
        },
        (0, None),
    )
    .1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Mapping;
    use crate::value::Value;

    fn ages() -> Mapping<i32> {
        let mut map = Mapping::new();
        map.insert("curly".to_string(), 60);
        map.insert("larry".to_string(), 50);
        map.insert("moe".to_string(), 40);
        map
    }

    #[test]
    fn test_reduce_with_initial() {
        assert_eq!(reduce(&[1, 2, 3], |a, b| a + b, 0), 6);
        assert_eq!(reduce(&[1, 2, 3], |a, b| a + b, 10), 16);
    }

    #[test]
    fn test_reduce_into_other_type() {
        let joined = reduce(
            &["a", "b"],
            |mut acc: String, s| {
                acc.push_str(s);
                acc
            },
            String::new(),
        );
        assert_eq!(joined, "ab");
    }

    #[test]
    fn test_reduce_first_seeds_with_first_value() {
        assert_eq!(reduce_first(&[1, 2, 3], |a, b| a + b).unwrap(), 6);
        assert_eq!(reduce_first(&[7], |a, b| a * b).unwrap(), 7);
    }

    #[test]
    fn test_reduce_first_on_mapping() {
        // ascending key order: curly, larry, moe
        let oldest_first = reduce_first(&ages(), |acc, age| acc - age).unwrap();
        assert_eq!(oldest_first, 60 - 50 - 40);
    }

    #[test]
    fn test_reduce_first_empty() {
        let err = reduce_first(&Vec::<i32>::new(), |a, b| a + b).unwrap_err();
        assert!(matches!(err, UnderbarError::EmptyReduce));
    }

    #[test]
    fn test_contains() {
        assert!(contains(&[1, 2, 3], &2));
        assert!(!contains(&[1, 2, 3], &4));
        assert!(contains(&ages(), &50));
        assert!(!contains(&Vec::<i32>::new(), &0));
    }

    #[test]
    fn test_every() {
        assert!(every(&[2, 4, 6], |x| x % 2 == 0));
        assert!(!every(&[2, 3, 6], |x| x % 2 == 0));
        assert!(every(&Vec::<i32>::new(), |_| false));
        assert!(every(&ages(), |age| *age >= 40));
    }

    #[test]
    fn test_every_truthy() {
        assert!(every_truthy(&[true, true]));
        assert!(!every_truthy(&[Value::Int(1), Value::Null]));
    }

    #[test]
    fn test_some() {
        assert!(!some(&[1, 3, 5], |x| x % 2 == 0));
        assert!(some(&[1, 4, 5], |x| x % 2 == 0));
        assert!(!some(&Vec::<i32>::new(), |_| true));
    }

    #[test]
    fn test_some_truthy() {
        assert!(some_truthy(&[0, 0, 1]));
        assert!(!some_truthy(&[Value::Null, Value::from(""), Value::Int(0)]));
    }

    #[test]
    fn test_index_of() {
        assert_eq!(index_of(&[10, 20, 30, 20], &20), Some(1));
        assert_eq!(index_of(&[10, 20, 30], &40), None);
        assert_eq!(index_of::<i32>(&[], &1), None);
    }
}
