//! Fixed-width histograms over arbitrary-precision decimals.
//!
//! Bin `i` is the half-open interval `[min + i·w, min + (i+1)·w)`. A value's
//! bin is found in two steps:
//! 1. `(value - min) / w`, rounded to the [`DivisionContext`] precision;
//! 2. the rounded quotient truncated toward zero.
//!
//! Rounding happens before truncation, so a value just below a boundary can
//! round up into the next bin. That is the intended classification and is
//! not the same as floor division.
use std::collections::BTreeMap;
use std::num::NonZeroU64;

use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::{ToPrimitive, Zero};

use crate::accumulate::count_occurrence;
use crate::error::{Error, Result};

/// 34 significant digits, the IEEE 754 decimal128 precision.
const DECIMAL128_DIGITS: NonZeroU64 = NonZeroU64::MIN.saturating_add(33);

/// Significant digits `BigDecimal`'s `/` produces before the context rounds.
/// A finer context would round an already rounded quotient a second time.
pub const MAX_DIVISION_DIGITS: u64 = 100;

// ------------------------------- Context --------------------------------- //

/// Precision and rounding applied to the bin-index division.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DivisionContext {
    precision: NonZeroU64,
    rounding: RoundingMode,
}

impl DivisionContext {
    /// `precision` must lie in `1..=MAX_DIVISION_DIGITS`.
    pub fn new(precision: u64, rounding: RoundingMode) -> Result<Self> {
        let invalid = Error::InvalidPrecision { requested: precision, max: MAX_DIVISION_DIGITS };
        if precision > MAX_DIVISION_DIGITS {
            return Err(invalid);
        }
        let precision = NonZeroU64::new(precision).ok_or(invalid)?;
        Ok(Self { precision, rounding })
    }
    pub fn precision(&self) -> NonZeroU64 { self.precision }
    pub fn rounding(&self) -> RoundingMode { self.rounding }

    /// `numerator / denominator` rounded to this context.
    /// `denominator` must be non-zero.
    pub fn divide(&self, numerator: &BigDecimal, denominator: &BigDecimal) -> BigDecimal {
        (numerator / denominator).with_precision_round(self.precision, self.rounding)
    }
}

impl Default for DivisionContext {
    fn default() -> Self {
        Self { precision: DECIMAL128_DIGITS, rounding: RoundingMode::HalfEven }
    }
}

// ------------------------------ Histogram -------------------------------- //

/// Three mappings keyed by bin index that always share the same key set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Histogram {
    /// values per bin
    pub counts: BTreeMap<i64, i64>,
    /// `"<bin min> - <bin max>"`
    pub labels: BTreeMap<i64, String>,
    /// lower bound of each bin
    pub mins: BTreeMap<i64, BigDecimal>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    /// Number of values classified.
    pub fn total(&self) -> i64 { self.counts.values().sum() }

    /// `(index, count, label, min)` rows in ascending bin order.
    pub fn rows(&self) -> impl Iterator<Item = (i64, i64, &str, &BigDecimal)> + '_ {
        self.counts.iter().filter_map(|(index, count)| {
            let label = self.labels.get(index)?;
            let min = self.mins.get(index)?;
            Some((*index, *count, label.as_str(), min))
        })
    }
}

// ------------------------------- Binning --------------------------------- //

/// Classify every value into its bin and tally counts, labels and bin minimums.
///
/// Values are visited in the order given. A zero `width` puts everything in
/// bin 0. Labels and minimums are computed once, when a bin is first seen.
pub fn bin<'a, I>(
    min: &BigDecimal,
    width: &BigDecimal,
    values: I,
    ctx: &DivisionContext,
) -> Result<Histogram>
where
    I: IntoIterator<Item = &'a BigDecimal>,
{
    let mut out = Histogram::default();
    for value in values {
        let index = interval_index(min, width, value, ctx)?;
        count_occurrence(&mut out.counts, index);
        if !out.labels.contains_key(&index) {
            let bin_min = interval_min(min, width, index);
            let bin_max = interval_max(&bin_min, width);
            out.labels.insert(index, format!("{bin_min} - {bin_max}"));
            out.mins.insert(index, bin_min);
        }
    }
    Ok(out)
}

/// Bin index of `value`: `(value - min) / width` rounded by `ctx`, then
/// truncated toward zero. Zero `width` yields 0.
pub fn interval_index(
    min: &BigDecimal,
    width: &BigDecimal,
    value: &BigDecimal,
    ctx: &DivisionContext,
) -> Result<i64> {
    if width.is_zero() {
        return Ok(0);
    }
    let quotient = ctx.divide(&(value - min), width);
    let (truncated, _) = quotient.with_scale(0).into_bigint_and_exponent();
    truncated.to_i64().ok_or_else(|| Error::BinIndexOutOfRange {
        quotient: quotient.to_string(),
    })
}

/// `min + index·width`
pub fn interval_min(min: &BigDecimal, width: &BigDecimal, index: i64) -> BigDecimal {
    let (digits, scale) = width.as_bigint_and_exponent();
    let step = BigDecimal::new(digits * index, scale);
    add_at_finest_scale(min, &step)
}

/// `bin_min + width`
pub fn interval_max(bin_min: &BigDecimal, width: &BigDecimal) -> BigDecimal {
    add_at_finest_scale(bin_min, width)
}

/// Sum carrying the larger of the two scales, so `0.0 + 2` prints as `2.0`.
fn add_at_finest_scale(a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
    let scale = a.as_bigint_and_exponent().1.max(b.as_bigint_and_exponent().1);
    (a + b).with_scale(scale)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal { BigDecimal::from_str(s).unwrap() }

    #[test]
    fn lower_edge_belongs_to_its_bin() {
        let m = BTreeMap::from([("a", dec("1.0")), ("b", dec("1.5")), ("c", dec("2.9"))]);
        let h = bin(&dec("0.0"), &dec("1.0"), m.values(), &DivisionContext::default()).unwrap();
        assert_eq!(h.counts, BTreeMap::from([(1, 2), (2, 1)]));
        assert!(!h.labels.contains_key(&0));
        assert_eq!(h.labels[&1], "1.0 - 2.0");
        assert_eq!(h.labels[&2], "2.0 - 3.0");
        assert_eq!(h.mins[&2], dec("2.0"));
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn zero_width_collapses_to_bin_zero() {
        let xs = [dec("-4"), dec("0"), dec("12.5")];
        let h = bin(&dec("1"), &dec("0"), xs.iter(), &DivisionContext::default()).unwrap();
        assert_eq!(h.counts, BTreeMap::from([(0, 3)]));
        assert_eq!(h.labels[&0], "1 - 1");
    }

    #[test]
    fn empty_input_gives_empty_histogram() {
        let h = bin(&dec("0"), &dec("1"), std::iter::empty(), &DivisionContext::default()).unwrap();
        assert!(h.is_empty());
        assert!(h.labels.is_empty() && h.mins.is_empty());
    }

    #[test]
    fn boundary_values_take_the_upper_bin() {
        let ctx = DivisionContext::default();
        let (min, w) = (dec("10"), dec("2.5"));
        for i in 0..6 {
            let edge = interval_min(&min, &w, i);
            assert_eq!(interval_index(&min, &w, &edge, &ctx).unwrap(), i);
        }
    }

    #[test]
    fn values_below_min_get_negative_bins() {
        let ctx = DivisionContext::default();
        // -0.5 truncates to 0, -1.0 is exactly bin -1
        assert_eq!(interval_index(&dec("0"), &dec("1"), &dec("-0.5"), &ctx).unwrap(), 0);
        assert_eq!(interval_index(&dec("0"), &dec("1"), &dec("-1"), &ctx).unwrap(), -1);
        assert_eq!(interval_index(&dec("0"), &dec("1"), &dec("-2.7"), &ctx).unwrap(), -2);
    }

    #[test]
    fn rounding_happens_before_truncation() {
        let just_below = dec("1.9999");
        let (min, w) = (dec("0"), dec("1"));

        let coarse = DivisionContext::new(2, RoundingMode::HalfUp).unwrap();
        assert_eq!(interval_index(&min, &w, &just_below, &coarse).unwrap(), 2);

        let fine = DivisionContext::new(10, RoundingMode::HalfUp).unwrap();
        assert_eq!(interval_index(&min, &w, &just_below, &fine).unwrap(), 1);

        let down = DivisionContext::new(2, RoundingMode::Down).unwrap();
        assert_eq!(interval_index(&min, &w, &just_below, &down).unwrap(), 1);
    }

    #[test]
    fn labels_are_computed_on_first_encounter() {
        let xs = [dec("0.25"), dec("0.75"), dec("0.5")];
        let h = bin(&dec("0"), &dec("1"), xs.iter(), &DivisionContext::default()).unwrap();
        assert_eq!(h.counts[&0], 3);
        assert_eq!(h.labels.len(), 1);
        assert_eq!(h.mins[&0], dec("0"));
        let rows = h.rows().collect::<Vec<_>>();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, 0);
        assert_eq!(rows[0].1, 3);
    }

    #[test]
    fn oversized_quotient_is_reported() {
        let huge = dec("1e30");
        let err = interval_index(&dec("0"), &dec("1"), &huge, &DivisionContext::default());
        assert!(matches!(err, Err(Error::BinIndexOutOfRange { .. })));
    }

    #[test]
    fn bounds_keep_the_finest_scale() {
        assert_eq!(interval_min(&dec("0.00"), &dec("1.0"), 3).to_string(), "3.00");
        assert_eq!(interval_min(&dec("5"), &dec("0.5"), -2).to_string(), "4.0");
        assert_eq!(interval_max(&dec("2.0"), &dec("1")).to_string(), "3.0");
    }

    #[test]
    fn precision_must_fit_the_division() {
        let mode = RoundingMode::HalfEven;
        assert_eq!(
            DivisionContext::new(0, mode),
            Err(Error::InvalidPrecision { requested: 0, max: MAX_DIVISION_DIGITS })
        );
        assert_eq!(
            DivisionContext::new(150, mode),
            Err(Error::InvalidPrecision { requested: 150, max: MAX_DIVISION_DIGITS })
        );
        let widest = DivisionContext::new(MAX_DIVISION_DIGITS, mode).unwrap();
        assert_eq!(widest.precision().get(), MAX_DIVISION_DIGITS);
    }
}
