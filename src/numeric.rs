//! Numeric kinds and keyed mappings the aggregation helpers operate on.
//!
//! Two seams:
//! - [`Additive`]: one add/compare capability implemented by every supported
//!   numeric kind (i32, i64, arbitrary-precision integer and decimal).
//! - [`KeyedValues`]: the minimal get/put surface shared by `BTreeMap`
//!   (ordered), `HashMap` (unordered) and `IndexMap` (insertion-ordered).
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::{One, Zero};

// ------------------------------ Additive --------------------------------- //

/// A value that can be summed and ordered.
///
/// Fixed-width kinds wrap on overflow; nothing is range-checked.
pub trait Additive: Clone + Ord {
    fn zero() -> Self;
    fn one() -> Self;
    fn plus(&self, rhs: &Self) -> Self;
}

macro_rules! fixed_width_additive {
    ($($t:ty),*) => {$(
        impl Additive for $t {
            fn zero() -> Self { 0 }
            fn one() -> Self { 1 }
            fn plus(&self, rhs: &Self) -> Self { self.wrapping_add(*rhs) }
        }
    )*};
}

fixed_width_additive!(i32, i64);

impl Additive for BigInt {
    fn zero() -> Self { <BigInt as Zero>::zero() }
    fn one() -> Self { <BigInt as One>::one() }
    fn plus(&self, rhs: &Self) -> Self { self + rhs }
}

impl Additive for BigDecimal {
    fn zero() -> Self { <BigDecimal as Zero>::zero() }
    fn one() -> Self { <BigDecimal as One>::one() }
    fn plus(&self, rhs: &Self) -> Self { self + rhs }
}

// ----------------------------- KeyedValues ------------------------------- //

/// Get/put access to a unique-key mapping.
pub trait KeyedValues<K, V> {
    fn value_of(&self, key: &K) -> Option<&V>;
    fn value_of_mut(&mut self, key: &K) -> Option<&mut V>;
    fn put(&mut self, key: K, value: V);
    /// Mutable slot for `key`, created with `init` when absent.
    fn slot_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, init: F) -> &mut V;
}

impl<K: Ord, V> KeyedValues<K, V> for BTreeMap<K, V> {
    fn value_of(&self, key: &K) -> Option<&V> { self.get(key) }
    fn value_of_mut(&mut self, key: &K) -> Option<&mut V> { self.get_mut(key) }
    fn put(&mut self, key: K, value: V) { self.insert(key, value); }
    fn slot_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, init: F) -> &mut V {
        self.entry(key).or_insert_with(init)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> KeyedValues<K, V> for HashMap<K, V, S> {
    fn value_of(&self, key: &K) -> Option<&V> { self.get(key) }
    fn value_of_mut(&mut self, key: &K) -> Option<&mut V> { self.get_mut(key) }
    fn put(&mut self, key: K, value: V) { self.insert(key, value); }
    fn slot_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, init: F) -> &mut V {
        self.entry(key).or_insert_with(init)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> KeyedValues<K, V> for IndexMap<K, V, S> {
    fn value_of(&self, key: &K) -> Option<&V> { self.get(key) }
    fn value_of_mut(&mut self, key: &K) -> Option<&mut V> { self.get_mut(key) }
    fn put(&mut self, key: K, value: V) { self.insert(key, value); }
    fn slot_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, init: F) -> &mut V {
        self.entry(key).or_insert_with(init)
    }
}

// ------------------------------- Tests ------------------------------------ //
