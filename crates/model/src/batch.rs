//! Valuation of several companies with per-company failures collected.

use std::fmt;

use fairval_primitives::{CompanyFinancials, CurrencyCode, Ticker};
use fairval_traits::GrowthEstimator;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{Evaluator, ValuationReport};

/// Headline figures of one successful valuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationSummary {
    /// Ticker symbol.
    pub ticker: Ticker,
    /// Currency the share price is quoted in.
    pub currency: CurrencyCode,
    /// Share price.
    pub share_price: f64,
    /// Market capitalization.
    pub market_cap: f64,
    /// Enterprise value.
    pub enterprise_value: f64,
    /// Discounted cash flow value.
    pub intrinsic_value: f64,
    /// Intrinsic value over the investment base.
    pub value_rating: f64,
}

impl ValuationSummary {
    /// Summarize a report for the company it was produced from.
    #[must_use]
    pub fn new(financials: &CompanyFinancials, report: &ValuationReport) -> Self {
        Self {
            ticker: financials.profile.ticker.clone(),
            currency: financials.profile.currency.clone(),
            share_price: financials.share_price,
            market_cap: financials.market_cap,
            enterprise_value: financials.enterprise_value,
            intrinsic_value: report.result.intrinsic_value,
            value_rating: report.result.value_rating,
        }
    }
}

/// A company that could not be valued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuationFailure {
    /// Ticker symbol.
    pub ticker: Ticker,
    /// What went wrong.
    pub message: String,
}

/// Outcome of valuing several companies under one set of parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchValuation {
    /// Annual discount rate.
    pub discount_rate: f64,
    /// Explicit projection years.
    pub growing_years: u32,
    /// Perpetual growth after the projection years.
    pub terminal_growth: f64,
    /// Companies valued, in input order.
    pub fulfilled: Vec<ValuationSummary>,
    /// Companies that failed to load or evaluate, in input order.
    pub rejected: Vec<ValuationFailure>,
}

impl<E: GrowthEstimator> Evaluator<E> {
    /// Value several companies, collecting failures instead of stopping.
    ///
    /// Each input pairs a ticker with its loaded financials or the error
    /// that prevented loading them. Load errors and evaluation errors both
    /// end up in `rejected`.
    pub fn evaluate_many<I, F>(&self, companies: I) -> BatchValuation
    where
        I: IntoIterator<Item = (Ticker, Result<CompanyFinancials, F>)>,
        F: fmt::Display,
    {
        let config = self.config();
        let mut batch = BatchValuation {
            discount_rate: config.discount_rate,
            growing_years: config.growing_years,
            terminal_growth: config.terminal_growth,
            fulfilled: Vec::new(),
            rejected: Vec::new(),
        };

        for (ticker, loaded) in companies {
            let outcome = loaded.map_err(|e| e.to_string()).and_then(|financials| {
                self.evaluate(&financials)
                    .map(|report| ValuationSummary::new(&financials, &report))
                    .map_err(|e| e.to_string())
            });
            match outcome {
                Ok(summary) => batch.fulfilled.push(summary),
                Err(message) => {
                    warn!(%ticker, %message, "company rejected");
                    batch.rejected.push(ValuationFailure { ticker, message });
                }
            }
        }

        debug!(
            fulfilled = batch.fulfilled.len(),
            rejected = batch.rejected.len(),
            "batch valuation complete"
        );
        batch
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use fairval_primitives::{CompanyProfile, FiscalSeries, GrowthIndicator};

    use super::*;
    use crate::EvaluatorConfig;

    fn company(ticker: &str, enterprise_value: f64) -> CompanyFinancials {
        let series = |values: [f64; 3]| {
            FiscalSeries::from_pairs([2021, 2022, 2023].into_iter().zip(values.map(Some))).unwrap()
        };
        CompanyFinancials {
            profile: CompanyProfile::simple(ticker.into(), "USD".into()),
            share_price: 10.0,
            market_cap: 1500.0,
            enterprise_value,
            adjusted_enterprise_value: enterprise_value,
            fiscal_year_ends: Vec::new(),
            revenues: series([100.0, 121.0, 146.41]),
            earnings: series([10.0, 11.0, 12.1]),
            dividends: FiscalSeries::default(),
            free_cash_flows: series([90.0, 100.0, 110.0]),
        }
    }

    fn evaluator() -> Evaluator {
        Evaluator::with_config(EvaluatorConfig {
            discount_rate: 0.10,
            growing_years: 3,
            terminal_growth: 0.02,
            growth_indicator: GrowthIndicator::Revenues,
            include_dividends: false,
            ..EvaluatorConfig::default()
        })
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let inputs: Vec<(Ticker, Result<CompanyFinancials, String>)> = vec![
            ("AAA".into(), Ok(company("AAA", 2000.0))),
            ("BBB".into(), Err("no statements found".to_string())),
            ("CCC".into(), Ok(company("CCC", 1000.0))),
        ];
        let batch = evaluator().evaluate_many(inputs);

        assert_eq!(batch.growing_years, 3);
        assert_eq!(batch.fulfilled.len(), 2);
        assert_eq!(batch.fulfilled[0].ticker.as_str(), "AAA");
        assert_eq!(batch.fulfilled[1].ticker.as_str(), "CCC");
        assert_relative_eq!(batch.fulfilled[0].value_rating, 2027.85 / 2000.0, epsilon = 1e-9);
        assert_relative_eq!(batch.fulfilled[1].value_rating, 2027.85 / 1000.0, epsilon = 1e-9);

        assert_eq!(
            batch.rejected,
            vec![ValuationFailure { ticker: "BBB".into(), message: "no statements found".into() }]
        );
    }

    #[test]
    fn evaluation_errors_are_rejected() {
        let mut evaluator = evaluator();
        evaluator.config_mut().discount_rate = f64::NAN;
        let batch = evaluator.evaluate_many([("AAA".into(), Ok::<_, String>(company("AAA", 1.0)))]);

        assert!(batch.fulfilled.is_empty());
        assert_eq!(batch.rejected.len(), 1);
        assert!(batch.rejected[0].message.contains("discount_rate"));
    }

    #[test]
    fn serializes_in_camel_case() {
        let batch = evaluator().evaluate_many([(
            Ticker::from("AAA"),
            Ok::<_, String>(company("AAA", 2000.0)),
        )]);
        let json = serde_json::to_value(&batch).unwrap();

        assert_eq!(json["growingYears"], 3);
        assert_eq!(json["fulfilled"][0]["ticker"], "AAA");
        assert_eq!(json["fulfilled"][0]["enterpriseValue"], 2000.0);
        assert!(json["rejected"].as_array().unwrap().is_empty());
    }
}
