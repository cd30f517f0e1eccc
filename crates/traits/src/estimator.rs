//! Growth estimation trait definitions.

use fairval_primitives::{FiscalSeries, GrowthFit};

/// Trait for estimating a constant annual growth curve from a fiscal series.
///
/// Implementations never fail: insufficient or unusable data yields a fit
/// with non-finite fields, which callers must check before display.
pub trait GrowthEstimator: Send + Sync {
    /// Fit a growth curve anchored at the series' first listed year.
    fn estimate(&self, series: &FiscalSeries) -> GrowthFit;

    /// Returns the name of this estimator.
    fn name(&self) -> &str;
}
