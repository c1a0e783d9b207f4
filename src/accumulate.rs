//! Add-or-initialize updates on keyed mappings.
//!
//! Every function here mutates exactly one argument: the mapping it is given.
use crate::numeric::{Additive, KeyedValues};

/// Add `delta` to the value at `key`, or store `delta` when the key is absent.
/// Returns the value now stored.
pub fn accumulate<K, V, M>(map: &mut M, key: K, delta: V) -> V
where
    M: KeyedValues<K, V>,
    V: Additive,
{
    let next = match map.value_of(&key) {
        Some(current) => current.plus(&delta),
        None => delta,
    };
    map.put(key, next.clone());
    next
}

/// [`accumulate`] with a fixed increment of one.
pub fn count_occurrence<K, V, M>(map: &mut M, key: K) -> V
where
    M: KeyedValues<K, V>,
    V: Additive,
{
    accumulate(map, key, V::one())
}

/// Keep the larger of the stored value and `candidate`. No write when the
/// stored value already wins or ties.
pub fn set_if_greater<K, V, M>(map: &mut M, key: K, candidate: V)
where
    M: KeyedValues<K, V>,
    V: Ord,
{
    match map.value_of_mut(&key) {
        Some(current) => {
            if candidate > *current {
                *current = candidate;
            }
        }
        None => map.put(key, candidate),
    }
}

/// Keep the smaller of the stored value and `candidate`.
pub fn set_if_lesser<K, V, M>(map: &mut M, key: K, candidate: V)
where
    M: KeyedValues<K, V>,
    V: Ord,
{
    match map.value_of_mut(&key) {
        Some(current) => {
            if candidate < *current {
                *current = candidate;
            }
        }
        None => map.put(key, candidate),
    }
}

// ------------------------------- Grouping --------------------------------- //

/// Add `member` to the collection stored at `key`, creating it first if needed.
///
/// Works for any `Default + Extend` collection: `HashSet`, `BTreeSet`, `Vec`.
pub fn insert_into_group<K, T, C, M>(map: &mut M, key: K, member: T)
where
    M: KeyedValues<K, C>,
    C: Default + Extend<T>,
{
    map.slot_or_insert_with(key, C::default)
        .extend(std::iter::once(member));
}

/// Put `(inner_key, value)` into the inner mapping stored at `key`.
pub fn insert_nested<K, K2, V, Inner, M>(map: &mut M, key: K, inner_key: K2, value: V)
where
    M: KeyedValues<K, Inner>,
    Inner: Default + KeyedValues<K2, V>,
{
    map.slot_or_insert_with(key, Inner::default).put(inner_key, value);
}

/// Append `value` to the list at `key` unless it equals the list's last
/// element. Returns whether the list grew.
pub fn push_if_changed<K, V, M>(map: &mut M, key: K, value: V) -> bool
where
    M: KeyedValues<K, Vec<V>>,
    V: PartialEq,
{
    let list = map.slot_or_insert_with(key, Vec::new);
    if list.last() == Some(&value) {
        return false;
    }
    list.push(value);
    true
}

// ------------------------------- Tests ------------------------------------ //
