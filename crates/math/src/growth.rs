//! Exponential growth fitting.

use fairval_primitives::{FiscalSeries, GrowthFit};
use fairval_traits::GrowthEstimator;
use ndarray::Array1;

/// Fit `y = constant * base^(x - x0)` by least squares on `ln(y)`.
///
/// Absent values are excluded from the regression. `x0` is the first listed
/// year of the series, present or not. The curve passes through the geometric
/// mean of the observed values at their mean year.
///
/// Regression runs on year offsets from `x0`, which leaves the slope
/// unchanged and keeps the normal equations well conditioned.
///
/// # Returns
/// The fitted curve. Both fields are NaN with fewer than two present values;
/// non-positive values make the fit non-finite.
#[must_use]
pub fn fit_exponential(series: &FiscalSeries) -> GrowthFit {
    let anchor = series.first_year().map_or(f64::NAN, f64::from);

    let (offsets, log_values): (Vec<f64>, Vec<f64>) =
        series.present().map(|(year, value)| (f64::from(year) - anchor, value.ln())).unzip();
    if offsets.len() < 2 {
        return GrowthFit::unavailable();
    }
    let x = Array1::from_vec(offsets);
    let log_y = Array1::from_vec(log_values);

    let n = x.len() as f64;
    let x_sum = x.sum();
    let log_y_sum = log_y.sum();
    let x_sqr_sum = x.dot(&x);
    let x_log_y_sum = x.dot(&log_y);

    let slope = (n * x_log_y_sum - x_sum * log_y_sum) / (n * x_sqr_sum - x_sum.powi(2));
    let base = slope.exp();

    let x_mean = x_sum / n;
    let y_geometric_mean = (log_y_sum / n).exp();
    let constant = y_geometric_mean / base.powf(x_mean);

    GrowthFit::new(constant, base)
}

/// Log-linear least squares growth estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLinearFitter;

impl LogLinearFitter {
    /// Create a new fitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl GrowthEstimator for LogLinearFitter {
    fn estimate(&self, series: &FiscalSeries) -> GrowthFit {
        fit_exponential(series)
    }

    fn name(&self) -> &str {
        "log_linear"
    }
}
