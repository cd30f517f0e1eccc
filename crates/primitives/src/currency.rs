//! Currency types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a new currency code, converting to uppercase.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Snapshot of conversion rates quoted against a single base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Currency the rates are quoted against.
    pub base: CurrencyCode,
    /// Time after which the snapshot is stale.
    pub next_update: DateTime<Utc>,
    /// Units of each currency per unit of `base`.
    pub rates: HashMap<CurrencyCode, f64>,
}

impl RateTable {
    /// Create a new rate table.
    #[must_use]
    pub const fn new(
        base: CurrencyCode,
        next_update: DateTime<Utc>,
        rates: HashMap<CurrencyCode, f64>,
    ) -> Self {
        Self { base, next_update, rates }
    }

    /// Rate for a currency, if quoted.
    #[must_use]
    pub fn rate(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Whether the snapshot should be refreshed at `now`.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now > self.next_update
    }
}
