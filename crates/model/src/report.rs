//! Valuation report.

use std::fmt;

use fairval_math::{
    DEFAULT_SIGNIFICANT_FIGURES, DcfBreakdown, format_camel_case, format_num, format_pct,
};
use fairval_primitives::{CompanyProfile, GrowthIndicator, ValuationParameters, ValuationResult};

use crate::EvaluatorConfig;

/// Longest horizon whose discounted flows are listed year by year.
const MAX_LISTED_YEARS: u32 = 10;

/// Growth rate estimated from each indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthEstimates {
    /// Revenue growth.
    pub revenues: f64,
    /// Earnings growth.
    pub earnings: f64,
    /// Dividend growth.
    pub dividends: f64,
    /// Free cash flow growth.
    pub free_cash_flows: f64,
    /// Caller-supplied growth.
    pub custom: f64,
}

impl GrowthEstimates {
    /// Estimate for an indicator.
    #[must_use]
    pub const fn get(&self, indicator: GrowthIndicator) -> f64 {
        match indicator {
            GrowthIndicator::Revenues => self.revenues,
            GrowthIndicator::Earnings => self.earnings,
            GrowthIndicator::Dividends => self.dividends,
            GrowthIndicator::FreeCashFlows => self.free_cash_flows,
            GrowthIndicator::Custom => self.custom,
        }
    }

    /// Iterate over `(indicator, rate)` pairs, custom last.
    pub fn iter(&self) -> impl Iterator<Item = (GrowthIndicator, f64)> + '_ {
        GrowthIndicator::HISTORICAL
            .into_iter()
            .chain([GrowthIndicator::Custom])
            .map(|indicator| (indicator, self.get(indicator)))
    }
}

/// Outcome of a full evaluation with its intermediate figures.
#[derive(Debug, Clone)]
pub struct ValuationReport {
    /// Company metadata.
    pub profile: CompanyProfile,
    /// Share price in the financial currency.
    pub share_price: f64,
    /// Settings the evaluation ran with.
    pub config: EvaluatorConfig,
    /// Growth rate per indicator.
    pub growth_estimates: GrowthEstimates,
    /// Mean dividends over the investment base.
    pub dividend_yield: f64,
    /// Parameters handed to the discounted cash flow.
    pub parameters: ValuationParameters,
    /// Mean historical free cash flow.
    pub base_cash_flow: f64,
    /// Discounted cash flow components.
    pub breakdown: DcfBreakdown,
    /// Intrinsic value against the investment base.
    pub result: ValuationResult,
}

impl ValuationReport {
    /// Print the report to stdout.
    pub fn print_summary(&self) {
        println!("{self}");
    }
}

impl fmt::Display for ValuationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = |v: f64| format_num(v, DEFAULT_SIGNIFICANT_FIGURES);
        let rule = "=".repeat(64);
        let thin = "-".repeat(64);

        writeln!(f, "{rule}")?;
        writeln!(f, "INTRINSIC VALUE: {} ({})", self.profile.name, self.profile.ticker)?;
        writeln!(f, "{rule}")?;
        if !self.profile.industry.is_empty() {
            writeln!(f, "Industry:    {}", self.profile.industry)?;
        }
        writeln!(f, "Currency:    {}", self.profile.financial_currency)?;
        writeln!(f, "Share price: {}", num(self.share_price))?;
        writeln!(f, "{thin}")?;

        writeln!(f, "GROWTH ESTIMATES:")?;
        for (indicator, rate) in self.growth_estimates.iter() {
            let marker = if indicator == self.config.growth_indicator { "*" } else { " " };
            writeln!(
                f,
                "{marker} {:<20} {:>12}",
                format_camel_case(indicator.key()),
                format_pct(rate, false)
            )?;
        }
        let dividends = if self.config.include_dividends { "included" } else { "excluded" };
        let dividend_yield = format_pct(self.dividend_yield, true);
        writeln!(f, "  {:<20} {dividend_yield:>12} ({dividends})", "Dividend Yield")?;
        let projected = format_pct(self.parameters.projected_growth, true);
        writeln!(f, "  {:<20} {projected:>12}", "Projected Growth")?;
        writeln!(f, "{thin}")?;

        writeln!(f, "DISCOUNTED CASH FLOW:")?;
        let discount_rate = format_pct(self.parameters.discount_rate, false);
        writeln!(f, "  {:<20} {discount_rate:>12}", "Discount Rate")?;
        let terminal_growth = format_pct(self.parameters.terminal_growth, false);
        writeln!(f, "  {:<20} {terminal_growth:>12}", "Terminal Growth")?;
        writeln!(f, "  {:<20} {:>12}", "Base Cash Flow", num(self.base_cash_flow))?;
        if self.parameters.growing_years <= MAX_LISTED_YEARS {
            for (year, flow) in self.breakdown.discounted_cash_flows().enumerate() {
                writeln!(f, "  {:<20} {:>12}", format!("Year {}", year + 1), num(flow))?;
            }
        } else {
            let label = format!("Years 1-{}", self.parameters.growing_years);
            writeln!(f, "  {label:<20} {:>12}", num(self.breakdown.explicit_value))?;
        }
        let terminal = num(self.breakdown.discounted_terminal_value);
        writeln!(f, "  {:<20} {terminal:>12}", "Terminal Value")?;
        writeln!(f, "{thin}")?;

        let investment = format_camel_case(&self.config.investment_option.to_string());
        writeln!(f, "  {:<20} {:>12}", "Intrinsic Value", num(self.result.intrinsic_value))?;
        writeln!(f, "  {:<20} {:>12}", investment, num(self.result.investment_base))?;
        let rating = format_pct(self.result.value_rating, false);
        write!(f, "  {:<20} {rating:>12}", "Value Rating")
    }
}
