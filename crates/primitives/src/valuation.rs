//! Valuation result.

use serde::{Deserialize, Serialize};

/// Intrinsic value compared against a market investment base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    /// Present value of projected free cash flows.
    pub intrinsic_value: f64,
    /// Market figure the value is compared to.
    pub investment_base: f64,
    /// `intrinsic_value / investment_base`.
    pub value_rating: f64,
}

impl ValuationResult {
    /// Create a new result.
    #[must_use]
    pub const fn new(intrinsic_value: f64, investment_base: f64, value_rating: f64) -> Self {
        Self { intrinsic_value, investment_base, value_rating }
    }

    /// Whether every figure is finite and fit for display.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.intrinsic_value.is_finite()
            && self.investment_base.is_finite()
            && self.value_rating.is_finite()
    }

    /// Rating above one: undervalued under the model's assumptions.
    #[must_use]
    pub const fn is_undervalued(&self) -> bool {
        self.value_rating > 1.0
    }
}
