//! Company records supplied by a financial data provider.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{CurrencyCode, Date, FiscalSeries, GrowthIndicator, InvestmentOption};

/// Stock ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct Ticker(pub String);

impl Ticker {
    /// Create a new ticker, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Get the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Descriptive company metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Ticker symbol.
    pub ticker: Ticker,
    /// Long company name.
    pub name: String,
    /// Business summary.
    pub summary: String,
    /// Industry classification.
    pub industry: String,
    /// Company website.
    pub website: String,
    /// Currency the share price is quoted in.
    pub currency: CurrencyCode,
    /// Currency the financial statements are reported in.
    pub financial_currency: CurrencyCode,
}

impl CompanyProfile {
    /// Create a profile with just a ticker and a single currency.
    #[must_use]
    pub fn simple(ticker: Ticker, currency: CurrencyCode) -> Self {
        Self {
            name: ticker.to_string(),
            ticker,
            summary: String::new(),
            industry: String::new(),
            website: String::new(),
            financial_currency: currency.clone(),
            currency,
        }
    }
}

/// Market figures and annual statement series for one company.
///
/// Market figures are expressed in the financial currency. Every series is
/// aligned with `fiscal_year_ends`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyFinancials {
    /// Company metadata.
    pub profile: CompanyProfile,
    /// Share price in the financial currency.
    pub share_price: f64,
    /// Market capitalization.
    pub market_cap: f64,
    /// Enterprise value.
    pub enterprise_value: f64,
    /// Liabilities-adjusted enterprise value.
    pub adjusted_enterprise_value: f64,
    /// Fiscal year end dates, ascending.
    pub fiscal_year_ends: Vec<Date>,
    /// Total revenue per fiscal year.
    pub revenues: FiscalSeries,
    /// Net income per fiscal year.
    pub earnings: FiscalSeries,
    /// Common dividends paid per fiscal year.
    pub dividends: FiscalSeries,
    /// Free cash flow per fiscal year.
    pub free_cash_flows: FiscalSeries,
}

impl CompanyFinancials {
    /// Historical series behind an indicator, `None` for a custom rate.
    #[must_use]
    pub const fn series(&self, indicator: GrowthIndicator) -> Option<&FiscalSeries> {
        match indicator {
            GrowthIndicator::Revenues => Some(&self.revenues),
            GrowthIndicator::Earnings => Some(&self.earnings),
            GrowthIndicator::Dividends => Some(&self.dividends),
            GrowthIndicator::FreeCashFlows => Some(&self.free_cash_flows),
            GrowthIndicator::Custom => None,
        }
    }

    /// Market figure selected by an investment option.
    #[must_use]
    pub const fn investment_base(&self, option: InvestmentOption) -> f64 {
        match option {
            InvestmentOption::EnterpriseValue => self.enterprise_value,
            InvestmentOption::MarketCap => self.market_cap,
            InvestmentOption::AdjustedEnterpriseValue => self.adjusted_enterprise_value,
        }
    }
}
