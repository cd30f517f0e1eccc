//! Exchange-rate source trait definitions.

use fairval_primitives::{CurrencyCode, RateTable};

/// Errors that can occur while obtaining or applying conversion rates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateError {
    /// The source could not produce a snapshot.
    #[error("exchange rates unavailable: {0}")]
    Unavailable(String),

    /// A currency is missing from the snapshot.
    #[error("no exchange rate for currency: {0}")]
    UnknownCurrency(CurrencyCode),
}

impl RateError {
    /// Returns whether retrying later may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Source of same-day currency conversion rates.
pub trait RateSource: Send + Sync {
    /// Fetch a fresh rate snapshot.
    ///
    /// # Errors
    /// Returns `RateError::Unavailable` if the snapshot cannot be obtained.
    fn fetch_rates(&self) -> Result<RateTable, RateError>;
}
