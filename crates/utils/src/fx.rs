//! Cached currency conversion.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use fairval_primitives::{CurrencyCode, RateTable};
use fairval_traits::{RateError, RateSource};
use tracing::info;

use crate::UtilsError;

/// Rate snapshot cache over a [`RateSource`].
///
/// The snapshot is fetched on first use and again whenever it is past its
/// next-update time. Callers serialize on one lock, so at most one refresh
/// is in flight.
#[derive(Debug)]
pub struct ExchangeRateCache<S> {
    source: S,
    table: Mutex<Option<RateTable>>,
}

impl<S: RateSource> ExchangeRateCache<S> {
    /// Create an empty cache.
    pub const fn new(source: S) -> Self {
        Self { source, table: Mutex::new(None) }
    }

    /// Current snapshot, refreshed if missing or stale at `now`.
    ///
    /// # Errors
    /// Returns `UtilsError::Rates` if a needed refresh fails.
    pub fn rates_at(&self, now: DateTime<Utc>) -> Result<RateTable, UtilsError> {
        self.with_rates(now, |table| Ok(table.clone()))
    }

    /// Convert `amount` between currencies with the snapshot valid at `now`.
    ///
    /// Same-currency conversion returns `amount` without touching the
    /// source.
    ///
    /// # Errors
    /// Returns `UtilsError::Rates` if a refresh fails or either currency is
    /// not quoted.
    pub fn convert_at(
        &self,
        amount: f64,
        from: &CurrencyCode,
        to: &CurrencyCode,
        now: DateTime<Utc>,
    ) -> Result<f64, UtilsError> {
        if from == to {
            return Ok(amount);
        }
        self.with_rates(now, |table| {
            let quote = |code: &CurrencyCode| {
                table.rate(code).ok_or_else(|| RateError::UnknownCurrency(code.clone()))
            };
            Ok(amount / quote(from)? * quote(to)?)
        })
    }

    /// Convert `amount` between currencies at the current time.
    ///
    /// # Errors
    /// See [`Self::convert_at`].
    pub fn convert(
        &self,
        amount: f64,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<f64, UtilsError> {
        self.convert_at(amount, from, to, Utc::now())
    }

    fn with_rates<T>(
        &self,
        now: DateTime<Utc>,
        f: impl FnOnce(&RateTable) -> Result<T, RateError>,
    ) -> Result<T, UtilsError> {
        let mut guard = self.table.lock().unwrap_or_else(PoisonError::into_inner);

        let table = match guard.take() {
            Some(table) if !table.is_stale(now) => table,
            _ => {
                let table = self.source.fetch_rates()?;
                info!(
                    base = %table.base,
                    currencies = table.rates.len(),
                    next_update = %table.next_update,
                    "refreshed exchange rates"
                );
                table
            }
        };
        Ok(f(guard.insert(table))?)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    use super::*;

    struct CountingSource {
        next_update: DateTime<Utc>,
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn new(next_update: DateTime<Utc>) -> Self {
            Self { next_update, calls: AtomicUsize::new(0) }
        }
    }

    impl RateSource for CountingSource {
        fn fetch_rates(&self) -> Result<RateTable, RateError> {
            let calls = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let next_update = self.next_update + Duration::days(calls as i64 - 1);
            Ok(RateTable::new(
                "USD".into(),
                next_update,
                HashMap::from([("USD".into(), 1.0), ("EUR".into(), 0.8), ("JPY".into(), 150.0)]),
            ))
        }
    }

    struct DownSource;

    impl RateSource for DownSource {
        fn fetch_rates(&self) -> Result<RateTable, RateError> {
            Err(RateError::Unavailable("offline".to_string()))
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn converts_through_base() {
        let cache = ExchangeRateCache::new(CountingSource::new(noon()));
        let yen = cache.convert_at(8.0, &"EUR".into(), &"JPY".into(), noon()).unwrap();
        // 8 EUR = 10 USD = 1500 JPY
        assert_relative_eq!(yen, 1500.0, epsilon = 1e-9);
    }

    #[test]
    fn same_currency_skips_source() {
        let cache = ExchangeRateCache::new(DownSource);
        let amount = cache.convert_at(42.0, &"XYZ".into(), &"xyz".into(), noon()).unwrap();
        assert_eq!(amount, 42.0);
    }

    #[test]
    fn refreshes_only_when_stale() {
        let cache = ExchangeRateCache::new(CountingSource::new(noon()));

        cache.rates_at(noon()).unwrap();
        cache.rates_at(noon()).unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 1);

        let table = cache.rates_at(noon() + Duration::seconds(1)).unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(table.next_update, noon() + Duration::days(1));

        cache.rates_at(noon() + Duration::hours(1)).unwrap();
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unknown_currency() {
        let cache = ExchangeRateCache::new(CountingSource::new(noon()));
        let err = cache.convert_at(1.0, &"USD".into(), &"GBP".into(), noon()).unwrap_err();
        assert!(matches!(
            err,
            UtilsError::Rates(RateError::UnknownCurrency(code)) if code.as_str() == "GBP"
        ));
    }

    #[test]
    fn failed_refresh_leaves_cache_empty() {
        let cache = ExchangeRateCache::new(DownSource);
        let err = cache.rates_at(noon()).unwrap_err();
        assert!(matches!(err, UtilsError::Rates(RateError::Unavailable(_))));
        assert!(cache.table.lock().unwrap().is_none());
    }

    #[test]
    fn concurrent_callers_share_one_refresh() {
        let cache = ExchangeRateCache::new(CountingSource::new(noon()));
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    cache.convert_at(1.0, &"USD".into(), &"EUR".into(), noon()).unwrap()
                });
            }
        });
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 1);
    }
}
