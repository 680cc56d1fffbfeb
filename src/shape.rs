//! Shape and set operations over several sequences at once.
//!
//! Variadic inputs are slices of sequences: `zip(&[a, b, c])` rather than
//! `zip(a, b, c)`. Membership tests use `==`.

use crate::kernel::{every, filter, map, reduce, some};
use crate::value::Nested;
use rand::Rng;

/// Group the i-th elements of every sequence together.
///
/// The result has as many rows as the longest input; positions past the end
/// of a shorter input are `None`.
///
/// # Example
///
/// ```rust
/// use underbar::{zip, Value};
///
/// let letters = vec![Value::from("a"), Value::from("b")];
/// let numbers = vec![Value::Int(1)];
/// let rows = zip(&[letters, numbers]);
/// assert_eq!(rows[0], vec![Some(Value::from("a")), Some(Value::Int(1))]);
/// assert_eq!(rows[1], vec![Some(Value::from("b")), None]);
/// ```
pub fn zip<T, S>(sequences: &[S]) -> Vec<Vec<Option<T>>>
where
    T: Clone,
    S: AsRef<[T]>,
{
    let longest = reduce(sequences, |max, seq| max.max(seq.as_ref().len()), 0usize);
    (0..longest)
        .map(|i| map(sequences, |seq, _, _| seq.as_ref().get(i).cloned()))
        .collect()
}

/// Flatten arbitrarily nested sequences into one, depth-first, left to right.
///
/// A value that is not a sequence flattens to itself. Self-referential
/// structures are not detected.
///
/// # Example
///
/// ```rust
/// use underbar::{flatten, Value};
///
/// let nested = Value::from_json("[1, [2, [3, [4]], 5]]")?;
/// let flat: Vec<i64> = flatten(&nested).iter().filter_map(Value::as_i64).collect();
/// assert_eq!(flat, vec![1, 2, 3, 4, 5]);
/// # Ok::<(), underbar::UnderbarError>(())
/// ```
pub fn flatten<T>(nested: &T) -> Vec<T>
where
    T: Nested + Clone,
{
    match nested.children() {
        None => vec![nested.clone()],
        Some(children) => reduce(
            children,
            |mut flat, child| {
                flat.extend(flatten(child));
                flat
            },
            Vec::new(),
        ),
    }
}

/// Elements of the first array present in every other array, in the first
/// array's order. Duplicates in the first array are kept.
pub fn intersection<T, S>(arrays: &[S]) -> Vec<T>
where
    T: PartialEq + Clone,
    S: AsRef<[T]>,
{
    let Some(first) = arrays.first() else {
        return Vec::new();
    };
    filter(first.as_ref(), |item, _, _| {
        every(arrays, |array| some(array.as_ref(), |other| other == item))
    })
}

/// Elements of `first` that appear in none of `rest`, in order.
pub fn difference<T, S>(first: &[T], rest: &[S]) -> Vec<T>
where
    T: PartialEq + Clone,
    S: AsRef<[T]>,
{
    filter(first, |item, _, _| {
        every(rest, |array| !some(array.as_ref(), |other| other == item))
    })
}

/// A uniformly shuffled copy of `items`; the input is left untouched.
///
/// Fisher-Yates: walk from the last index down to 1, swapping each slot with
/// one drawn uniformly from `0..=i`.
pub fn shuffle<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng,
{
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}
