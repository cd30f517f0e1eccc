//! Error types for primitive construction.

/// Errors raised when a caller hands in a malformed series.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeriesError {
    /// Years are not strictly increasing.
    #[error("fiscal years must be strictly increasing: {year} follows {previous}")]
    NonMonotonic {
        /// Year of the preceding entry.
        previous: i32,
        /// Offending year.
        year: i32,
    },

    /// Parallel year and value slices differ in length.
    #[error("length mismatch: {years} years, {values} values")]
    LengthMismatch {
        /// Number of years.
        years: usize,
        /// Number of values.
        values: usize,
    },
}

/// Errors raised when parsing a selector from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSelectorError {
    /// Unknown growth indicator name.
    #[error("unknown growth indicator: {0}")]
    GrowthIndicator(String),

    /// Unknown investment option name.
    #[error("unknown investment option: {0}")]
    InvestmentOption(String),
}
