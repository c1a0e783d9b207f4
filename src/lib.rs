//! Keyed numeric aggregation: add-or-initialize accumulation, map merging,
//! fixed-width decimal histograms, set overlap counts and value ordering.
//!
//! Everything is synchronous and in-memory. Functions that mutate take the
//! destination mapping as `&mut`; everything else borrows and returns new
//! values.
pub mod accumulate;
pub mod cli;
pub mod error;
pub mod input;
pub mod interval;
pub mod merge;
pub mod numeric;
pub mod ordering;
pub mod sets;

pub use accumulate::{
    accumulate, count_occurrence, insert_into_group, insert_nested, push_if_changed,
    set_if_greater, set_if_lesser,
};
pub use error::{Error, Result};
pub use interval::{bin, DivisionContext, Histogram};
pub use merge::{merge, merge_into};
pub use numeric::{Additive, KeyedValues};
pub use ordering::{deep_copy, key_for_value, min_max, order_by_value, Extremes};
pub use sets::{
    combined_key_set, union_and_counts, union_and_uniques, union_counts, OverlapCounts,
    OverlapWithCounts, OverlapWithUniques,
};

pub use bigdecimal::{BigDecimal, RoundingMode};
pub use num_bigint::BigInt;
