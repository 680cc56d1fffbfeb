//! Sorting by an extracted key with a randomized three-way quicksort.
//!
//! # Algorithm
//!
//! 1. View the input as a sequence (a mapping contributes its values).
//! 2. Pick a uniformly random pivot and extract its key.
//! 3. Partition into `less`, `equal` and `greater` buckets by key.
//! 4. Sort `less` and `greater` recursively and concatenate.
//!
//! Keys are `Option<K>`; `None` is an undefined key. Undefined keys sort
//! after every defined key and compare equal to each other. A key that is
//! unordered relative to the pivot (`NaN`, mismatched [`Value`] variants)
//! goes to `greater`. The pivot element itself always lands in `equal`, so
//! every step shrinks the problem.
//!
//! Equal keys keep their input order; this falls out of the partition and is
//! not a documented guarantee.
//!
//! [`Value`]: crate::value::Value

use crate::kernel::{each, map, AsCollection, Key};
use crate::value::Record;
use rand::Rng;
use std::cmp::Ordering;

/// Sort a collection by the key `key` extracts from each element.
///
/// `rng` picks the pivots; pass a seeded generator for a reproducible
/// sequence of pivots.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use underbar::sort_by;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let words = vec!["pear", "fig", "banana"];
/// assert_eq!(sort_by(&words, |w| Some(w.len()), &mut rng), vec!["fig", "pear", "banana"]);
/// ```
pub fn sort_by<C, K, F, R>(collection: &C, key: F, rng: &mut R) -> Vec<C::Item>
where
    C: AsCollection + ?Sized,
    C::Item: Clone,
    K: PartialOrd,
    F: Fn(&C::Item) -> Option<K>,
    R: Rng,
{
    let items = map(collection, |value, _, _| value);
    quicksort(&items, &key, rng).into_iter().cloned().collect()
}

/// Sort records by one named field. Records missing the field sort last.
pub fn sort_by_field<C, R>(collection: &C, field: &str, rng: &mut R) -> Vec<C::Item>
where
    C: AsCollection + ?Sized,
    C::Item: Record + Clone,
    <C::Item as Record>::Field: PartialOrd + Clone,
    R: Rng,
{
    sort_by(collection, |item| item.field(field).cloned(), rng)
}

fn quicksort<'a, T, K, F, R>(items: &[&'a T], key: &F, rng: &mut R) -> Vec<&'a T>
where
    K: PartialOrd,
    F: Fn(&T) -> Option<K>,
    R: Rng,
{
    if items.len() <= 1 {
        return items.to_vec();
    }

    let pivot_index = rng.gen_range(0..items.len());
    let pivot = key(items[pivot_index]);

    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    each(items, |item, position, _| {
        let bucket = if position == Key::Index(pivot_index) {
            Ordering::Equal
        } else {
            classify(&key(*item), &pivot)
        };
        match bucket {
            Ordering::Less => less.push(*item),
            Ordering::Equal => equal.push(*item),
            Ordering::Greater => greater.push(*item),
        }
    });

    let mut sorted = quicksort(&less, key, rng);
    sorted.append(&mut equal);
    sorted.append(&mut quicksort(&greater, key, rng));
    sorted
}

/// Which bucket a key falls in relative to the pivot key.
fn classify<K: PartialOrd>(key: &Option<K>, pivot: &Option<K>) -> Ordering {
    match (key, pivot) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(key), Some(pivot)) => key.partial_cmp(pivot).unwrap_or(Ordering::Greater),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Mapping;
    use crate::value::Value;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_sort_by_field() {
        let records = Value::from_json(r#"[{"a": 3}, {"a": 1}, {"a": 2}]"#).unwrap();
        let sorted = sort_by_field(records.as_list().unwrap(), "a", &mut rng());
        let expected = Value::from_json(r#"[{"a": 1}, {"a": 2}, {"a": 3}]"#).unwrap();
        assert_eq!(sorted, expected.as_list().unwrap());
    }

    #[test]
    fn test_missing_field_sorts_last() {
        let records = Value::from_json(r#"[{"a": 2}, {"b": 0}, {"a": 1}, {"b": 1}]"#).unwrap();
        let sorted = sort_by_field(records.as_list().unwrap(), "a", &mut rng());
        let firsts: Vec<Option<&Value>> = sorted.iter().map(|r| r.field("a")).collect();
        assert_eq!(firsts, vec![Some(&Value::Int(1)), Some(&Value::Int(2)), None, None]);
    }

    #[test]
    fn test_sort_by_function() {
        let people = vec![("moe", 40), ("curly", 60), ("larry", 50)];
        let sorted = sort_by(&people, |p| Some(p.1), &mut rng());
        assert_eq!(sorted, vec![("moe", 40), ("larry", 50), ("curly", 60)]);
    }

    #[test]
    fn test_sort_strings_lexicographically() {
        let words = vec!["pear", "apple", "fig"];
        assert_eq!(sort_by(&words, |w| Some(*w), &mut rng()), vec!["apple", "fig", "pear"]);
    }

    #[test]
    fn test_sort_mapping_values() {
        let mut map = Mapping::new();
        map.insert("x".to_string(), 3);
        map.insert("y".to_string(), 1);
        map.insert("z".to_string(), 2);
        assert_eq!(sort_by(&map, |v| Some(*v), &mut rng()), vec![1, 2, 3]);
    }

    #[test]
    fn test_equal_keys_grouped_in_input_order() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (1, 'e')];
        let sorted = sort_by(&items, |i| Some(i.0), &mut rng());
        assert_eq!(sorted, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c'), (1, 'e')]);
    }

    #[test]
    fn test_all_equal_keys_keep_input_order_for_any_pivot() {
        let items = vec![(5, 'a'), (5, 'b'), (5, 'c'), (5, 'd')];
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(sort_by(&items, |i| Some(i.0), &mut rng), items);
        }
    }

    #[test]
    fn test_undefined_keys_grouped_in_input_order() {
        let items = vec![(None, 'a'), (Some(1), 'b'), (None, 'c'), (Some(0), 'd')];
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let sorted = sort_by(&items, |i| i.0, &mut rng);
            assert_eq!(sorted, vec![(Some(0), 'd'), (Some(1), 'b'), (None, 'a'), (None, 'c')]);
        }
    }

    #[test]
    fn test_nan_keys_do_not_stall() {
        let items = vec![f64::NAN, 2.0, f64::NAN, 1.0];
        let sorted = sort_by(&items, |x| Some(*x), &mut rng());
        assert_eq!(sorted.len(), 4);
        assert_eq!(sorted.iter().filter(|x| x.is_nan()).count(), 2);
    }

    #[test]
    fn test_trivial_inputs() {
        assert!(sort_by(&Vec::<i32>::new(), |x| Some(*x), &mut rng()).is_empty());
        assert_eq!(sort_by(&[9], |x| Some(*x), &mut rng()), vec![9]);
    }

    #[test]
    fn test_thousand_random_elements() {
        let mut source = ChaCha8Rng::seed_from_u64(1000);
        let items: Vec<i64> = (0..1000).map(|_| source.gen_range(-500..500)).collect();

        let mut expected = items.clone();
        expected.sort();
        assert_eq!(sort_by(&items, |x| Some(*x), &mut rng()), expected);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&Some(1), &Some(2)), Ordering::Less);
        assert_eq!(classify(&Some(2), &Some(2)), Ordering::Equal);
        assert_eq!(classify(&Some(1), &None), Ordering::Less);
        assert_eq!(classify(&None, &Some(1)), Ordering::Greater);
        assert_eq!(classify::<i32>(&None, &None), Ordering::Equal);
        assert_eq!(classify(&Some(f64::NAN), &Some(1.0)), Ordering::Greater);
    }

    proptest! {
        #[test]
        fn sort_matches_reference(
            items in proptest::collection::vec(any::<i32>(), 0..200),
            seed in any::<u64>(),
        ) {
            let mut expected = items.clone();
            expected.sort();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            prop_assert_eq!(sort_by(&items, |x| Some(*x), &mut rng), expected);
        }
    }
}
