//! Shallow merges into a target mapping.
//!
//! Unlike the rest of the kernel these mutate their first argument: the
//! target is taken by exclusive reference, updated in place and handed back.

use super::collection::{each, AsCollection, Mapping};

/// Copy every key/value of every source into `target`, later sources
/// overwriting earlier ones and `target`'s own entries.
///
/// Sequence sources contribute their indices as keys (`"0"`, `"1"`, ...).
///
/// # Example
///
/// ```rust
/// use underbar::{extend, Mapping};
///
/// let mut target = Mapping::from([("a".to_string(), 1)]);
/// let source = Mapping::from([("a".to_string(), 2), ("b".to_string(), 3)]);
/// extend(&mut target, [&source]);
/// assert_eq!(target.get("a"), Some(&2));
/// assert_eq!(target.get("b"), Some(&3));
/// ```
pub fn extend<'t, 's, T, C, I>(target: &'t mut Mapping<T>, sources: I) -> &'t mut Mapping<T>
where
    T: Clone,
    C: AsCollection<Item = T> + ?Sized + 's,
    I: IntoIterator<Item = &'s C>,
{
    for source in sources {
        each(source, |value, key, _| {
            target.insert(key.to_name(), value.clone());
        });
    }
    target
}

/// Like [`extend`], but only fills keys `target` does not have yet, so the
/// first source to provide a key wins and existing entries are never
/// overwritten.
pub fn defaults<'t, 's, T, C, I>(target: &'t mut Mapping<T>, sources: I) -> &'t mut Mapping<T>
where
    T: Clone,
    C: AsCollection<Item = T> + ?Sized + 's,
    I: IntoIterator<Item = &'s C>,
{
    for source in sources {
        each(source, |value, key, _| {
            target
                .entry(key.to_name())
                .or_insert_with(|| value.clone());
        });
    }
    target
}
