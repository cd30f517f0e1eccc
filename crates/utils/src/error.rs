//! Error types for utility functions.

use fairval_primitives::SeriesError;
use fairval_traits::RateError;

/// Errors that can occur during utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Statement rows do not form a valid series.
    #[error("series error: {0}")]
    Series(#[from] SeriesError),

    /// Date cell that is not `YYYY-MM-DD`.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Exchange-rate failure.
    #[error(transparent)]
    Rates(#[from] RateError),
}
