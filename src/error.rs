use thiserror::Error;

/// Failures surfaced by the aggregation helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An extremum was requested over zero values.
    #[error("{operation} needs at least one value, got an empty input")]
    EmptyInput { operation: &'static str },

    /// `(value - min) / width` truncated to something outside `i64`.
    #[error("bin index {quotient} does not fit in a 64-bit integer")]
    BinIndexOutOfRange { quotient: String },

    /// Precision outside `1..=MAX_DIVISION_DIGITS`.
    #[error("division precision must be between 1 and {max} significant digits, got {requested}")]
    InvalidPrecision { requested: u64, max: u64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
