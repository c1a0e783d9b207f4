//! Combining keyed numeric mappings.
use crate::accumulate::accumulate;
use crate::numeric::{Additive, KeyedValues};
use crate::ordering::deep_copy;

/// Accumulate every entry of `source` into `destination`.
///
/// Keys only in `destination` are left alone. The order `source` is walked in
/// does not change the result.
pub fn merge_into<'a, K, V, M, I>(destination: &mut M, source: I)
where
    M: KeyedValues<K, V>,
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: Clone + 'a,
    V: Additive + 'a,
{
    for (key, value) in source {
        accumulate(destination, key.clone(), value.clone());
    }
}

/// Per-key sum of `a` and `b` in a fresh mapping; neither input is touched.
pub fn merge<'a, K, V, M>(a: &'a M, b: &'a M) -> M
where
    M: KeyedValues<K, V> + FromIterator<(K, V)>,
    &'a M: IntoIterator<Item = (&'a K, &'a V)>,
    K: Clone + 'a,
    V: Additive + 'a,
{
    let mut out: M = deep_copy(a);
    merge_into(&mut out, b);
    out
}

// ------------------------------- Tests ------------------------------------ //
