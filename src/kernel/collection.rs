//! Collection: the one place that looks at the shape of its input.
//!
//! A [`Collection`] is either an ordered sequence or a string-keyed mapping.
//! Every traversal in the crate goes through [`Collection::entries`] (or
//! [`each`], which wraps it), so sequence and mapping inputs behave the same
//! everywhere.
//!
//! - Sequences are visited at indices `0..len`, in order.
//! - Mappings are visited once per key, in the mapping's own order
//!   (ascending for [`Mapping`]).

use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::iter::Enumerate;
use std::slice;

/// A string-keyed mapping.
pub type Mapping<T> = BTreeMap<String, T>;

/// Position of a visited element: an index into a sequence or a mapping key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    Index(usize),
    Name(&'a str),
}

impl<'a> Key<'a> {
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&'a str> {
        match self {
            Key::Index(_) => None,
            Key::Name(name) => Some(*name),
        }
    }

    /// The key as a property name; indices render as decimal strings.
    pub fn to_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(name) => f.write_str(name),
        }
    }
}

/// A borrowed view of either a sequence or a mapping.
#[derive(Debug)]
pub enum Collection<'a, T> {
    Sequence(&'a [T]),
    Mapping(&'a Mapping<T>),
}

// Manual impls: a view is copyable whatever `T` is.
impl<T> Clone for Collection<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Collection<'_, T> {}

impl<'a, T> Collection<'a, T> {
    /// Number of elements (sequence) or keys (mapping).
    pub fn len(&self) -> usize {
        match self {
            Collection::Sequence(items) => items.len(),
            Collection::Mapping(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Collection::Sequence(_))
    }

    /// Look up one element. An index never matches a mapping and a name
    /// never matches a sequence.
    pub fn get(&self, key: Key<'_>) -> Option<&'a T> {
        match (*self, key) {
            (Collection::Sequence(items), Key::Index(i)) => items.get(i),
            (Collection::Mapping(map), Key::Name(name)) => map.get(name),
            _ => None,
        }
    }

    /// Iterate `(key, value)` pairs in traversal order.
    pub fn entries(&self) -> Entries<'a, T> {
        match *self {
            Collection::Sequence(items) => Entries::Sequence(items.iter().enumerate()),
            Collection::Mapping(map) => Entries::Mapping(map.iter()),
        }
    }

    /// Iterate values only, in traversal order.
    pub fn values(&self) -> impl Iterator<Item = &'a T> {
        self.entries().map(|(_, value)| value)
    }
}

impl<'a, T> From<&'a [T]> for Collection<'a, T> {
    fn from(items: &'a [T]) -> Self {
        Collection::Sequence(items)
    }
}

impl<'a, T> From<&'a Vec<T>> for Collection<'a, T> {
    fn from(items: &'a Vec<T>) -> Self {
        Collection::Sequence(items)
    }
}

impl<'a, T> From<&'a Mapping<T>> for Collection<'a, T> {
    fn from(map: &'a Mapping<T>) -> Self {
        Collection::Mapping(map)
    }
}

/// Iterator returned by [`Collection::entries`].
pub enum Entries<'a, T> {
    Sequence(Enumerate<slice::Iter<'a, T>>),
    Mapping(btree_map::Iter<'a, String, T>),
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (Key<'a>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Sequence(iter) => iter.next().map(|(i, value)| (Key::Index(i), value)),
            Entries::Mapping(iter) => iter.next().map(|(key, value)| (Key::Name(key), value)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Entries::Sequence(iter) => iter.size_hint(),
            Entries::Mapping(iter) => iter.size_hint(),
        }
    }
}

impl<T> ExactSizeIterator for Entries<'_, T> {}

/// Types that can be viewed as a [`Collection`].
///
/// The element type is an associated type so that `each(&vec, ...)` infers
/// its closure argument types from the container alone.
pub trait AsCollection {
    type Item;

    fn as_collection(&self) -> Collection<'_, Self::Item>;
}

impl<T> AsCollection for [T] {
    type Item = T;

    fn as_collection(&self) -> Collection<'_, T> {
        Collection::Sequence(self)
    }
}

impl<T> AsCollection for Vec<T> {
    type Item = T;

    fn as_collection(&self) -> Collection<'_, T> {
        Collection::Sequence(self)
    }
}

impl<T, const N: usize> AsCollection for [T; N] {
    type Item = T;

    fn as_collection(&self) -> Collection<'_, T> {
        Collection::Sequence(self)
    }
}

impl<T> AsCollection for Mapping<T> {
    type Item = T;

    fn as_collection(&self) -> Collection<'_, T> {
        Collection::Mapping(self)
    }
}

impl<T> AsCollection for Collection<'_, T> {
    type Item = T;

    fn as_collection(&self) -> Collection<'_, T> {
        *self
    }
}

/// Call `visitor(value, key, collection)` once for every element.
///
/// # Example
///
/// ```rust
/// use underbar::each;
///
/// let mut seen = Vec::new();
/// each(&vec![10, 20, 30], |value, key, _| seen.push((key.as_index(), *value)));
/// assert_eq!(seen, vec![(Some(0), 10), (Some(1), 20), (Some(2), 30)]);
/// ```
pub fn each<'a, C, F>(collection: &'a C, mut visitor: F)
where
    C: AsCollection + ?Sized,
    F: FnMut(&'a C::Item, Key<'a>, Collection<'a, C::Item>),
{
    let view = collection.as_collection();
    for (key, value) in view.entries() {
        visitor(value, key, view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_each_sequence_in_order() {
        let items = vec!["a", "b", "c"];
        let mut visits = Vec::new();
        each(&items, |value, key, source| {
            assert!(source.is_sequence());
            visits.push((key, *value));
        });
        assert_eq!(
            visits,
            vec![(Key::Index(0), "a"), (Key::Index(1), "b"), (Key::Index(2), "c")]
        );
    }

    #[test]
    fn test_each_mapping_every_key_once() {
        let mut map = Mapping::new();
        map.insert("b".to_string(), 2);
        map.insert("a".to_string(), 1);
        map.insert("c".to_string(), 3);

        let mut visits = Vec::new();
        each(&map, |value, key, source| {
            assert_eq!(source.get(key), Some(value));
            visits.push((key.to_name(), *value));
        });
        assert_eq!(
            visits,
            vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]
        );
    }

    #[test]
    fn test_each_empty() {
        let mut count = 0;
        each(&Vec::<i32>::new(), |_, _, _| count += 1);
        each(&Mapping::<i32>::new(), |_, _, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_get_rejects_mismatched_key() {
        let items = [1, 2, 3];
        let view = items.as_collection();
        assert_eq!(view.get(Key::Index(1)), Some(&2));
        assert_eq!(view.get(Key::Name("1")), None);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_key_accessors() {
        assert_eq!(Key::Name("age").as_name(), Some("age"));
        assert_eq!(Key::Index(2).as_name(), None);
        assert_eq!(Key::Name("age").as_index(), None);
    }

    #[test]
    fn test_values_in_traversal_order() {
        let mut map = Mapping::new();
        map.insert("z".to_string(), 26);
        map.insert("a".to_string(), 1);
        let values: Vec<&i32> = map.as_collection().values().collect();
        assert_eq!(values, vec![&1, &26]);

        let items = vec![3, 1, 2];
        let values: Vec<i32> = items.as_collection().values().copied().collect();
        assert_eq!(values, items);
    }

    #[test]
    fn test_key_to_name() {
        assert_eq!(Key::Index(4).to_name(), "4");
        assert_eq!(Key::Name("age").to_name(), "age");
    }

    proptest! {
        #[test]
        fn each_visits_every_index_once_in_order(
            items in proptest::collection::vec(any::<i32>(), 0..64),
        ) {
            let mut indices = Vec::new();
            each(&items, |_, key, _| indices.push(key.as_index()));
            let expected: Vec<Option<usize>> = (0..items.len()).map(Some).collect();
            prop_assert_eq!(indices, expected);
        }
    }
}
