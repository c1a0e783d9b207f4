//! Copies, extremes and value-ordered views of keyed mappings.
use std::collections::BTreeMap;
use std::hash::Hash;

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::error::{Error, Result};

// ------------------------------ Deep copy -------------------------------- //

/// Build a new mapping holding clones of every entry in `source`.
///
/// The result shares nothing with `source`; entries of either can be replaced
/// without the other noticing. The target collection type is chosen by the
/// caller, so a `BTreeMap` can be copied into an `IndexMap` and so on.
pub fn deep_copy<'a, K, V, S, M>(source: &'a S) -> M
where
    &'a S: IntoIterator<Item = (&'a K, &'a V)>,
    K: Clone + 'a,
    V: Clone + 'a,
    S: ?Sized,
    M: FromIterator<(K, V)>,
{
    source
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

// ------------------------------- Extremes -------------------------------- //

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extremes<V> {
    pub min: V,
    pub max: V,
}

/// Smallest and largest value in a single pass.
///
/// Fails with [`Error::EmptyInput`] when there is nothing to scan.
pub fn min_max<'a, V, I>(values: I) -> Result<Extremes<V>>
where
    I: IntoIterator<Item = &'a V>,
    V: Ord + Clone + 'a,
{
    let mut values = values.into_iter();
    let first = values.next().ok_or(Error::EmptyInput { operation: "min_max" })?;
    let (mut lo, mut hi) = (first, first);
    for v in values {
        if v < lo { lo = v; }
        if v > hi { hi = v; }
    }
    Ok(Extremes { min: lo.clone(), max: hi.clone() })
}

/// Parallel maximum of `values`.
pub fn max_value<V: Ord + Clone + Sync>(values: &[V]) -> Result<V> {
    values
        .par_iter()
        .max()
        .cloned()
        .ok_or(Error::EmptyInput { operation: "max_value" })
}

/// Parallel minimum of `values`.
pub fn min_value<V: Ord + Clone + Sync>(values: &[V]) -> Result<V> {
    values
        .par_iter()
        .min()
        .cloned()
        .ok_or(Error::EmptyInput { operation: "min_value" })
}

/// Maximum of `initial` and every value; never fails.
pub fn max_value_or<'a, V, I>(values: I, initial: V) -> V
where
    I: IntoIterator<Item = &'a V>,
    V: Ord + Clone + 'a,
{
    values.into_iter().fold(initial, |acc, v| if *v > acc { v.clone() } else { acc })
}

/// Minimum of `initial` and every value; never fails.
pub fn min_value_or<'a, V, I>(values: I, initial: V) -> V
where
    I: IntoIterator<Item = &'a V>,
    V: Ord + Clone + 'a,
{
    values.into_iter().fold(initial, |acc, v| if *v < acc { v.clone() } else { acc })
}

/// Whether any element equals `needle` under `V`'s `PartialEq`.
///
/// For `BigDecimal` that equality is numeric, so `2.0` matches `2.00`. A
/// scale-sensitive check has to compare `as_bigint_and_exponent()` instead.
pub fn contains_value<V: PartialEq + Sync>(values: &[V], needle: &V) -> bool {
    values.par_iter().any(|v| v == needle)
}

/// Largest key of an ordered mapping, or `default` when it is empty.
pub fn max_key<K: Ord + Clone, V>(map: &BTreeMap<K, V>, default: K) -> K {
    map.last_key_value().map(|(k, _)| k.clone()).unwrap_or(default)
}

/// Smallest key of an ordered mapping, or `default` when it is empty.
pub fn min_key<K: Ord + Clone, V>(map: &BTreeMap<K, V>, default: K) -> K {
    map.first_key_value().map(|(k, _)| k.clone()).unwrap_or(default)
}

// ------------------------------ Value order ------------------------------ //

/// Re-key `source` into an insertion-ordered mapping sorted by ascending value.
///
/// The sort is stable: equal values keep the order `source` yielded them in.
pub fn order_by_value<'a, K, V, I>(source: I) -> IndexMap<K, V>
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: Hash + Eq + Clone + 'a,
    V: Ord + Clone + 'a,
{
    let mut entries = source.into_iter().collect::<Vec<_>>();
    entries.sort_by(|a, b| a.1.cmp(b.1));
    entries
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// First key, in the mapping's own iteration order, whose value equals `value`.
///
/// With duplicate values the answer depends on that order: a `BTreeMap` gives
/// the smallest such key, an `IndexMap` the earliest inserted one.
pub fn key_for_value<'a, K, V, I>(source: I, value: &V) -> Option<&'a K>
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: 'a,
    V: PartialEq + 'a,
{
    source
        .into_iter()
        .find(|(_, v)| *v == value)
        .map(|(k, _)| k)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    fn dec(s: &str) -> BigDecimal { BigDecimal::from_str(s).unwrap() }

    #[test]
    fn deep_copy_is_independent() {
        let original = BTreeMap::from([("a", dec("1.5")), ("b", dec("2"))]);
        let mut copy: BTreeMap<&str, BigDecimal> = deep_copy(&original);
        assert_eq!(copy, original);

        copy.insert("a", dec("99"));
        copy.remove("b");
        assert_eq!(original["a"], dec("1.5"));
        assert_eq!(original.len(), 2);
    }

    #[test]
    fn deep_copy_across_collection_types() {
        let original: HashMap<u32, i64> = HashMap::from([(3, 30), (1, 10)]);
        let ordered: BTreeMap<u32, i64> = deep_copy(&original);
        assert_eq!(ordered.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn min_max_scans_all_values() {
        let m = BTreeMap::from([(1, dec("3.2")), (2, dec("-1")), (3, dec("7.25"))]);
        let ex = min_max(m.values()).unwrap();
        assert_eq!(ex.min, dec("-1"));
        assert_eq!(ex.max, dec("7.25"));

        let single = min_max([5i32].iter()).unwrap();
        assert_eq!(single, Extremes { min: 5, max: 5 });
    }

    #[test]
    fn min_max_on_empty_is_an_error() {
        let m: BTreeMap<u8, BigDecimal> = BTreeMap::new();
        assert_eq!(min_max(m.values()), Err(Error::EmptyInput { operation: "min_max" }));
    }

    #[test]
    fn parallel_extremes() {
        let xs: Vec<BigDecimal> = (0..1000).map(|i| BigDecimal::from(i) / BigDecimal::from(8)).collect();
        assert_eq!(max_value(&xs).unwrap(), dec("124.875"));
        assert_eq!(min_value(&xs).unwrap(), dec("0"));
        assert!(contains_value(&xs, &dec("62.5")));
        assert!(!contains_value(&xs, &dec("62.51")));

        let empty: Vec<BigDecimal> = Vec::new();
        assert!(matches!(max_value(&empty), Err(Error::EmptyInput { .. })));
        assert!(matches!(min_value(&empty), Err(Error::EmptyInput { .. })));
    }

    #[test]
    fn seeded_extremes_never_fail() {
        let m: BTreeMap<u8, i64> = BTreeMap::from([(0, 4), (1, 9)]);
        assert_eq!(max_value_or(m.values(), 0), 9);
        assert_eq!(max_value_or(m.values(), 100), 100);
        assert_eq!(min_value_or(m.values(), 5), 4);
        assert_eq!(min_value_or(BTreeMap::<u8, i64>::new().values(), 5), 5);
    }

    #[test]
    fn key_bounds_with_defaults() {
        let m = BTreeMap::from([(4, "d"), (-2, "a"), (9, "z")]);
        assert_eq!(max_key(&m, 0), 9);
        assert_eq!(min_key(&m, 0), -2);
        let empty: BTreeMap<i32, ()> = BTreeMap::new();
        assert_eq!(max_key(&empty, 7), 7);
        assert_eq!(min_key(&empty, 7), 7);
    }

    #[test]
    fn key_bounds_over_string_keys() {
        let m: BTreeMap<String, u32> =
            ["pear", "apple", "quince"].into_iter().map(|k| (k.to_string(), 1)).collect();
        assert_eq!(max_key(&m, String::new()), "quince");
        assert_eq!(min_key(&m, String::new()), "apple");
    }

    #[test]
    fn contains_value_ignores_decimal_scale() {
        let xs = vec![dec("1.5"), dec("2.0")];
        assert!(contains_value(&xs, &dec("2.00")));
        assert!(contains_value(&xs, &dec("2")));
        assert!(!contains_value(&xs, &dec("2.000001")));
    }

    #[test]
    fn order_by_value_is_stable_and_idempotent() {
        let mut m: IndexMap<&str, i32> = IndexMap::new();
        m.insert("c", 2);
        m.insert("a", 1);
        m.insert("d", 2);
        m.insert("b", 0);

        let sorted = order_by_value(&m);
        assert_eq!(sorted.keys().copied().collect::<Vec<_>>(), vec!["b", "a", "c", "d"]);

        let again = order_by_value(&sorted);
        assert_eq!(
            again.iter().collect::<Vec<_>>(),
            sorted.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn key_for_value_follows_iteration_order() {
        let m = BTreeMap::from([("z", 1), ("b", 2), ("a", 2)]);
        assert_eq!(key_for_value(&m, &2), Some(&"a"));
        assert_eq!(key_for_value(&m, &3), None);

        let mut ordered: IndexMap<&str, i32> = IndexMap::new();
        ordered.insert("b", 2);
        ordered.insert("a", 2);
        assert_eq!(key_for_value(&ordered, &2), Some(&"b"));
    }
}
