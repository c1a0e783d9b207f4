//! Overlap and uniqueness between two sets.
//!
//! Naming is positional and asymmetric: the overlap pass walks `s1` and
//! checks membership in `s0`, and the uniqueness counts come from
//! subtracting the overlap size from each set's size.
use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OverlapCounts {
    /// elements of `s1` also in `s0`
    pub overlap: usize,
    /// elements of `s1` not in `s0`
    pub unique_to_s1: usize,
    /// elements of `s0` not in `s1`
    pub unique_to_s0: usize,
}

impl OverlapCounts {
    fn from_sizes(overlap: usize, s0_len: usize, s1_len: usize) -> Self {
        Self {
            overlap,
            unique_to_s1: s1_len - overlap,
            unique_to_s0: s0_len - overlap,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlapWithCounts<T: Eq + Hash> {
    pub overlap: HashSet<T>,
    pub counts: OverlapCounts,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlapWithUniques<T: Eq + Hash> {
    pub overlap: HashSet<T>,
    pub unique_to_s1: HashSet<T>,
    pub unique_to_s0: HashSet<T>,
}

pub fn union_counts<T: Eq + Hash>(s0: &HashSet<T>, s1: &HashSet<T>) -> OverlapCounts {
    let overlap = s1.iter().filter(|x| s0.contains(*x)).count();
    OverlapCounts::from_sizes(overlap, s0.len(), s1.len())
}

/// The intersection (as `s1` filtered to members of `s0`) plus its counts.
pub fn union_and_counts<T: Eq + Hash + Clone>(
    s0: &HashSet<T>,
    s1: &HashSet<T>,
) -> OverlapWithCounts<T> {
    let overlap = overlap_of(s0, s1);
    let counts = OverlapCounts::from_sizes(overlap.len(), s0.len(), s1.len());
    OverlapWithCounts { overlap, counts }
}

/// Intersection, `s1 - s0` and `s0 - s1`, all materialized.
pub fn union_and_uniques<T: Eq + Hash + Clone>(
    s0: &HashSet<T>,
    s1: &HashSet<T>,
) -> OverlapWithUniques<T> {
    OverlapWithUniques {
        overlap: overlap_of(s0, s1),
        unique_to_s1: s1.difference(s0).cloned().collect(),
        unique_to_s0: s0.difference(s1).cloned().collect(),
    }
}

/// Plain union of two identifier sets.
pub fn combined_key_set<T: Eq + Hash + Clone>(s0: &HashSet<T>, s1: &HashSet<T>) -> HashSet<T> {
    s0.union(s1).cloned().collect()
}

fn overlap_of<T: Eq + Hash + Clone>(s0: &HashSet<T>, s1: &HashSet<T>) -> HashSet<T> {
    s1.iter().filter(|x| s0.contains(*x)).cloned().collect()
}

// ------------------------------- Tests ------------------------------------ //
