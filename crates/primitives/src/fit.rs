//! Exponential growth fit result.

use serde::{Deserialize, Serialize};

/// Fitted exponential curve `y = constant * base^(x - x0)`.
///
/// `x0` is the first year of the series the curve was fitted to. Both fields
/// are NaN when the series had fewer than two usable points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthFit {
    /// Fitted value at the series' first year.
    pub constant: f64,
    /// Per-year multiplicative growth factor.
    pub base: f64,
}

impl GrowthFit {
    /// Create a new fit.
    #[must_use]
    pub const fn new(constant: f64, base: f64) -> Self {
        Self { constant, base }
    }

    /// Fit with both fields NaN.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { constant: f64::NAN, base: f64::NAN }
    }

    /// Annual growth rate (`base - 1`).
    #[must_use]
    pub const fn rate(&self) -> f64 {
        self.base - 1.0
    }

    /// Curve value `offset` years after the anchor year.
    #[must_use]
    pub fn value_at(&self, offset: f64) -> f64 {
        self.constant * self.base.powf(offset)
    }

    /// Whether both fields are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.constant.is_finite() && self.base.is_finite()
    }
}
