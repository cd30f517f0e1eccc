//! Two-stage discounted cash flow valuation.

use fairval_primitives::{FiscalSeries, ValuationParameters};

use crate::MathError;

/// Components of a discounted cash flow valuation.
///
/// Yearly flows are not stored; [`DcfBreakdown::discounted_cash_flows`]
/// recomputes them on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcfBreakdown {
    /// Mean historical free cash flow the projection starts from.
    pub base_cash_flow: f64,
    /// Parameters the valuation ran with.
    pub params: ValuationParameters,
    /// Sum of the discounted explicit-year flows.
    pub explicit_value: f64,
    /// Cash flow in the final projection year.
    pub terminal_cash_flow: f64,
    /// Gordon-growth value at the end of the horizon.
    pub terminal_value: f64,
    /// Present value of the terminal value.
    pub discounted_terminal_value: f64,
    /// Intrinsic value: discounted flows plus discounted terminal value.
    pub total: f64,
}

impl DcfBreakdown {
    /// Present value of each explicit projection year, year 1 first.
    pub fn discounted_cash_flows(&self) -> impl Iterator<Item = f64> + use<> {
        discounted_cash_flows(self.base_cash_flow, &self.params)
    }

    /// Share of the total contributed by the terminal value.
    #[must_use]
    pub fn terminal_share(&self) -> f64 {
        self.discounted_terminal_value / self.total
    }
}

fn discounted_cash_flows(
    base_cash_flow: f64,
    params: &ValuationParameters,
) -> impl Iterator<Item = f64> + use<> {
    let projected = 1.0 + params.projected_growth;
    let discount = 1.0 + params.discount_rate;
    (1..=params.growing_years)
        .map(f64::from)
        .map(move |year| base_cash_flow * projected.powf(year) / discount.powf(year))
}

/// Compute the full discounted cash flow breakdown.
///
/// With `r` the discount rate, `n` the growing years, `gP` the projected and
/// `gT` the terminal growth:
///
/// ```text
/// FCFn  = FCF0 * (1 + gP)^n
/// TV    = FCFn / (r - gT)
/// value = sum_{y=1..n} FCF0 * (1 + gP)^y / (1 + r)^y + TV / (1 + r)^n
/// ```
///
/// `r == gT` yields an infinite or NaN value and `r < gT` a negative terminal
/// value. Neither is trapped. The explicit years are summed as a running
/// total, so memory does not grow with `n`.
#[must_use]
pub fn dcf_breakdown(base_cash_flow: f64, params: &ValuationParameters) -> DcfBreakdown {
    let r = params.discount_rate;
    let n = f64::from(params.growing_years);

    let terminal_cash_flow = base_cash_flow * (1.0 + params.projected_growth).powf(n);
    let terminal_value = terminal_cash_flow / (r - params.terminal_growth);
    let discounted_terminal_value = terminal_value / (1.0 + r).powf(n);

    let explicit_value =
        discounted_cash_flows(base_cash_flow, params).fold(0.0, |sum, flow| sum + flow);
    let total = explicit_value + discounted_terminal_value;

    DcfBreakdown {
        base_cash_flow,
        params: *params,
        explicit_value,
        terminal_cash_flow,
        terminal_value,
        discounted_terminal_value,
        total,
    }
}

/// Intrinsic value of a base free cash flow under the given parameters.
///
/// See [`dcf_breakdown`] for the formula.
#[must_use]
pub fn intrinsic_value(base_cash_flow: f64, params: &ValuationParameters) -> f64 {
    dcf_breakdown(base_cash_flow, params).total
}

/// Mean of the present values of a series.
///
/// Absent entries are skipped, so the divisor is the number of present
/// values. NaN when there are none.
#[must_use]
pub fn base_cash_flow(series: &FiscalSeries) -> f64 {
    let (sum, count) =
        series.present().fold((0.0, 0_usize), |(sum, count), (_, v)| (sum + v, count + 1));
    sum / count as f64
}

/// Ratio of intrinsic value to investment base.
///
/// Zero or negative bases are not special-cased.
#[must_use]
pub fn value_rating(intrinsic_value: f64, investment_base: f64) -> f64 {
    intrinsic_value / investment_base
}

/// Mean dividend divided by the investment base.
///
/// Unlike [`base_cash_flow`], absent entries count as zero and the divisor
/// is the full series length.
#[must_use]
pub fn dividend_yield(dividends: &FiscalSeries, investment_base: f64) -> f64 {
    let sum: f64 = dividends.values().map(|v| v.unwrap_or(0.0)).sum();
    let mean = sum / dividends.len() as f64;
    mean / investment_base
}

/// Check caller-supplied rates for values no valuation can use.
///
/// Only non-finite rates are rejected. A discount rate at or below the
/// terminal growth rate is allowed through; the result shows it.
///
/// # Errors
/// Returns `MathError::InvalidInput` naming the first non-finite rate.
pub fn validate_parameters(params: &ValuationParameters) -> Result<(), MathError> {
    let rates = [
        ("discount_rate", params.discount_rate),
        ("terminal_growth", params.terminal_growth),
        ("projected_growth", params.projected_growth),
    ];
    match rates.into_iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(MathError::InvalidInput { name, value }),
        None => Ok(()),
    }
}
