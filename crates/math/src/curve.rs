//! Fitted growth curve projection.

use fairval_primitives::{FiscalSeries, GrowthFit};

/// Observed history next to a fitted curve extended into the future.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthCurve {
    /// Historical years followed by projected years.
    pub years: Vec<i32>,
    /// Observed values; `None` for absent and projected years.
    pub observed: Vec<Option<f64>>,
    /// Fitted curve value for every year.
    pub fitted: Vec<f64>,
}

impl GrowthCurve {
    /// Number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.years.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Iterate over `(year, observed, fitted)` triples.
    pub fn points(&self) -> impl Iterator<Item = (i32, Option<f64>, f64)> + '_ {
        self.years
            .iter()
            .zip(&self.observed)
            .zip(&self.fitted)
            .map(|((&year, &observed), &fitted)| (year, observed, fitted))
    }
}

/// Evaluate a fitted curve over a series' years plus `extra_years` beyond.
///
/// # Arguments
/// * `series` - Series the curve was fitted to
/// * `fit` - Fit anchored at the series' first year
/// * `extra_years` - Number of consecutive years to project past the last one
///
/// # Returns
/// Curve points. Empty if the series is empty.
#[must_use]
pub fn growth_curve(series: &FiscalSeries, fit: &GrowthFit, extra_years: u32) -> GrowthCurve {
    let (Some(first), Some(last)) = (series.first_year(), series.last_year()) else {
        return GrowthCurve { years: Vec::new(), observed: Vec::new(), fitted: Vec::new() };
    };

    let projected = (1..=extra_years).map_while(|i| i32::try_from(i).ok()).map(|i| last + i);
    let years: Vec<i32> = series.years().chain(projected).collect();

    let mut observed: Vec<Option<f64>> = series.values().collect();
    observed.resize(years.len(), None);

    let fitted = years.iter().map(|&year| fit.value_at(f64::from(year - first))).collect();

    GrowthCurve { years, observed, fitted }
}
