//! Valuation parameters and selectors.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseSelectorError;

/// Inputs of a two-stage discounted cash flow valuation.
///
/// The discount rate is expected to exceed the terminal growth rate. This is
/// not enforced: the terminal value diverges or turns negative otherwise, and
/// callers must check the result for finiteness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationParameters {
    /// Annual discount rate.
    pub discount_rate: f64,
    /// Explicit projection years before the terminal value.
    pub growing_years: u32,
    /// Perpetual growth rate after the projection horizon.
    pub terminal_growth: f64,
    /// Growth rate applied during the projection years.
    pub projected_growth: f64,
}

impl ValuationParameters {
    /// Create new parameters.
    #[must_use]
    pub const fn new(
        discount_rate: f64,
        growing_years: u32,
        terminal_growth: f64,
        projected_growth: f64,
    ) -> Self {
        Self { discount_rate, growing_years, terminal_growth, projected_growth }
    }

    /// Same parameters with a different projected growth rate.
    #[must_use]
    pub const fn with_projected_growth(self, projected_growth: f64) -> Self {
        Self { projected_growth, ..self }
    }
}

/// Historical indicator feeding the growth estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GrowthIndicator {
    /// Total revenue.
    #[default]
    Revenues,
    /// Net income.
    Earnings,
    /// Common dividends paid.
    Dividends,
    /// Free cash flow.
    FreeCashFlows,
    /// Caller-supplied growth rate.
    Custom,
}

impl GrowthIndicator {
    /// Indicators backed by a historical series.
    pub const HISTORICAL: [Self; 4] =
        [Self::Revenues, Self::Earnings, Self::Dividends, Self::FreeCashFlows];

    /// Camel-case key, as used in persisted settings.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Revenues => "revenues",
            Self::Earnings => "earnings",
            Self::Dividends => "dividends",
            Self::FreeCashFlows => "freeCashFlows",
            Self::Custom => "custom",
        }
    }

    /// Whether the growth rate is supplied directly by the caller.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl fmt::Display for GrowthIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GrowthIndicator {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "revenues" | "revenue" => Ok(Self::Revenues),
            "earnings" => Ok(Self::Earnings),
            "dividends" => Ok(Self::Dividends),
            "freecashflows" | "fcf" => Ok(Self::FreeCashFlows),
            "custom" => Ok(Self::Custom),
            _ => Err(ParseSelectorError::GrowthIndicator(s.to_string())),
        }
    }
}

/// Market figure the intrinsic value is compared to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvestmentOption {
    /// Market cap plus debt, preferred and minority interest, less cash.
    #[default]
    EnterpriseValue,
    /// Share price times shares outstanding.
    MarketCap,
    /// Enterprise value using total liabilities and net of short-term investments.
    AdjustedEnterpriseValue,
}

impl fmt::Display for InvestmentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnterpriseValue => write!(f, "enterpriseValue"),
            Self::MarketCap => write!(f, "marketCap"),
            Self::AdjustedEnterpriseValue => write!(f, "adjustedEnterpriseValue"),
        }
    }
}

impl FromStr for InvestmentOption {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "enterprisevalue" | "ev" => Ok(Self::EnterpriseValue),
            "marketcap" => Ok(Self::MarketCap),
            "adjustedenterprisevalue" | "adjustedev" => Ok(Self::AdjustedEnterpriseValue),
            _ => Err(ParseSelectorError::InvestmentOption(s.to_string())),
        }
    }
}
