//! End-to-end company valuation.

use fairval_math::{
    GrowthCurve, LogLinearFitter, base_cash_flow, dcf_breakdown, dividend_yield, growth_curve,
    value_rating,
};
use fairval_primitives::{
    CompanyFinancials, GrowthFit, GrowthIndicator, ValuationParameters, ValuationResult,
};
use fairval_traits::GrowthEstimator;
use tracing::{debug, warn};

use crate::{EvaluatorConfig, GrowthEstimates, ModelError, ValuationReport};

/// Values a company from its statements under an [`EvaluatorConfig`].
///
/// Growth comes from the configured indicator through a [`GrowthEstimator`],
/// optionally topped up with the dividend yield, and feeds a two-stage
/// discounted cash flow on the mean historical free cash flow.
#[derive(Debug, Clone, Default)]
pub struct Evaluator<E = LogLinearFitter> {
    config: EvaluatorConfig,
    estimator: E,
}

impl Evaluator<LogLinearFitter> {
    /// Create an evaluator with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with the given settings.
    #[must_use]
    pub const fn with_config(config: EvaluatorConfig) -> Self {
        Self { config, estimator: LogLinearFitter::new() }
    }
}

impl<E: GrowthEstimator> Evaluator<E> {
    /// Replace the growth estimator.
    #[must_use]
    pub fn with_estimator<F: GrowthEstimator>(self, estimator: F) -> Evaluator<F> {
        Evaluator { config: self.config, estimator }
    }

    /// Current settings.
    #[must_use]
    pub const fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Mutable access to the settings.
    pub const fn config_mut(&mut self) -> &mut EvaluatorConfig {
        &mut self.config
    }

    /// Fitted growth curve for an indicator, `None` for a custom rate.
    #[must_use]
    pub fn fit(
        &self,
        financials: &CompanyFinancials,
        indicator: GrowthIndicator,
    ) -> Option<GrowthFit> {
        financials.series(indicator).map(|series| self.estimator.estimate(series))
    }

    /// Annual growth rate for an indicator.
    ///
    /// The custom indicator returns the configured custom growth. NaN when
    /// the series cannot be fitted.
    #[must_use]
    pub fn growth_rate(&self, financials: &CompanyFinancials, indicator: GrowthIndicator) -> f64 {
        self.fit(financials, indicator).map_or(self.config.custom_growth, |fit| fit.rate())
    }

    /// Growth rates for every indicator.
    #[must_use]
    pub fn growth_estimates(&self, financials: &CompanyFinancials) -> GrowthEstimates {
        GrowthEstimates {
            revenues: self.growth_rate(financials, GrowthIndicator::Revenues),
            earnings: self.growth_rate(financials, GrowthIndicator::Earnings),
            dividends: self.growth_rate(financials, GrowthIndicator::Dividends),
            free_cash_flows: self.growth_rate(financials, GrowthIndicator::FreeCashFlows),
            custom: self.config.custom_growth,
        }
    }

    /// Market figure the intrinsic value is compared to.
    #[must_use]
    pub const fn investment_base(&self, financials: &CompanyFinancials) -> f64 {
        financials.investment_base(self.config.investment_option)
    }

    /// Mean dividends relative to the investment base.
    #[must_use]
    pub fn dividend_yield(&self, financials: &CompanyFinancials) -> f64 {
        dividend_yield(&financials.dividends, self.investment_base(financials))
    }

    /// Growth rate projected over the explicit years.
    ///
    /// The indicator's rate, plus the dividend yield when dividends are
    /// included.
    #[must_use]
    pub fn projected_growth(&self, financials: &CompanyFinancials) -> f64 {
        let growth = self.growth_rate(financials, self.config.growth_indicator);
        self.with_dividends(growth, self.dividend_yield(financials))
    }

    /// Add the dividend yield to a growth rate when dividends are included.
    const fn with_dividends(&self, growth: f64, dividend_yield: f64) -> f64 {
        if self.config.include_dividends { growth + dividend_yield } else { growth }
    }

    /// Discounted cash flow parameters for a company.
    #[must_use]
    pub fn valuation_parameters(&self, financials: &CompanyFinancials) -> ValuationParameters {
        self.config.valuation_parameters(self.projected_growth(financials))
    }

    /// History and fitted curve of the configured indicator, projected over
    /// the growing years. `None` for a custom rate.
    #[must_use]
    pub fn growth_curve(&self, financials: &CompanyFinancials) -> Option<GrowthCurve> {
        let indicator = self.config.growth_indicator;
        let series = financials.series(indicator)?;
        let fit = self.estimator.estimate(series);
        Some(growth_curve(series, &fit, self.config.growing_years))
    }

    /// Value a company.
    ///
    /// Missing or unusable data never fails the evaluation: it propagates
    /// as NaN or infinity into the report.
    ///
    /// # Errors
    /// Returns `ModelError::Math` if a configured rate is not finite.
    pub fn evaluate(&self, financials: &CompanyFinancials) -> Result<ValuationReport, ModelError> {
        self.config.validate()?;

        let ticker = &financials.profile.ticker;
        let growth_estimates = self.growth_estimates(financials);
        let dividend_yield = self.dividend_yield(financials);

        let projected =
            self.with_dividends(growth_estimates.get(self.config.growth_indicator), dividend_yield);
        let parameters = self.config.valuation_parameters(projected);

        debug!(
            %ticker,
            estimator = self.estimator.name(),
            indicator = %self.config.growth_indicator,
            projected_growth = projected,
            dividend_yield,
            "estimated growth"
        );

        let base_cash_flow = base_cash_flow(&financials.free_cash_flows);
        let breakdown = dcf_breakdown(base_cash_flow, &parameters);
        let investment_base = self.investment_base(financials);
        let result = ValuationResult::new(
            breakdown.total,
            investment_base,
            value_rating(breakdown.total, investment_base),
        );

        if result.is_available() {
            debug!(
                %ticker,
                intrinsic_value = result.intrinsic_value,
                investment_base,
                value_rating = result.value_rating,
                "valuation complete"
            );
        } else {
            warn!(
                %ticker,
                base_cash_flow,
                projected_growth = projected,
                "valuation unavailable"
            );
        }

        Ok(ValuationReport {
            profile: financials.profile.clone(),
            share_price: financials.share_price,
            config: self.config.clone(),
            growth_estimates,
            dividend_yield,
            parameters,
            base_cash_flow,
            breakdown,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use fairval_primitives::{CompanyProfile, FiscalSeries, InvestmentOption};
    use rstest::rstest;

    use super::*;

    fn series(values: [Option<f64>; 3]) -> FiscalSeries {
        FiscalSeries::from_pairs([2021, 2022, 2023].into_iter().zip(values)).unwrap()
    }

    fn financials() -> CompanyFinancials {
        CompanyFinancials {
            profile: CompanyProfile::simple("acme".into(), "USD".into()),
            share_price: 20.0,
            market_cap: 1500.0,
            enterprise_value: 2000.0,
            adjusted_enterprise_value: 2500.0,
            fiscal_year_ends: Vec::new(),
            revenues: series([Some(100.0), Some(121.0), Some(146.41)]),
            earnings: series([Some(10.0), Some(11.0), Some(12.1)]),
            dividends: series([Some(20.0), None, Some(40.0)]),
            free_cash_flows: series([Some(90.0), Some(100.0), Some(110.0)]),
        }
    }

    fn config(indicator: GrowthIndicator, include_dividends: bool) -> EvaluatorConfig {
        EvaluatorConfig {
            discount_rate: 0.10,
            growing_years: 3,
            terminal_growth: 0.02,
            growth_indicator: indicator,
            include_dividends,
            ..EvaluatorConfig::default()
        }
    }

    #[test]
    fn evaluate_revenue_growth() {
        let evaluator = Evaluator::with_config(config(GrowthIndicator::Revenues, false));
        let report = evaluator.evaluate(&financials()).unwrap();

        assert_relative_eq!(report.growth_estimates.revenues, 0.21, epsilon = 1e-9);
        assert_relative_eq!(report.base_cash_flow, 100.0, epsilon = 1e-12);
        assert_relative_eq!(report.parameters.projected_growth, 0.21, epsilon = 1e-9);
        assert_relative_eq!(report.result.intrinsic_value, 2027.85, epsilon = 1e-6);
        assert_eq!(report.result.investment_base, 2000.0);
        assert_relative_eq!(report.result.value_rating, 2027.85 / 2000.0, epsilon = 1e-9);
    }

    #[test]
    fn dividends_add_yield() {
        let evaluator = Evaluator::with_config(config(GrowthIndicator::Revenues, true));
        let data = financials();

        // (20 + 0 + 40) / 3 / 2000
        assert_relative_eq!(evaluator.dividend_yield(&data), 0.01, epsilon = 1e-12);
        assert_relative_eq!(evaluator.projected_growth(&data), 0.22, epsilon = 1e-9);

        let report = evaluator.evaluate(&data).unwrap();
        assert_relative_eq!(report.parameters.projected_growth, 0.22, epsilon = 1e-9);
        assert!(report.result.intrinsic_value > 2027.85);
    }

    #[test]
    fn custom_growth_skips_fitting() {
        let mut evaluator = Evaluator::with_config(config(GrowthIndicator::Custom, false));
        evaluator.config_mut().custom_growth = 0.21;
        let data = financials();

        assert!(evaluator.fit(&data, GrowthIndicator::Custom).is_none());
        assert!(evaluator.growth_curve(&data).is_none());
        let report = evaluator.evaluate(&data).unwrap();
        assert_relative_eq!(report.result.intrinsic_value, 2027.85, epsilon = 1e-6);
    }

    #[rstest]
    #[case(GrowthIndicator::Revenues, true)]
    #[case(GrowthIndicator::Earnings, false)]
    #[case(GrowthIndicator::Dividends, true)]
    #[case(GrowthIndicator::Custom, true)]
    fn evaluate_uses_projected_growth(#[case] indicator: GrowthIndicator, #[case] dividends: bool) {
        let evaluator = Evaluator::with_config(config(indicator, dividends));
        let data = financials();
        let report = evaluator.evaluate(&data).unwrap();
        assert_eq!(report.parameters, evaluator.valuation_parameters(&data));
        assert_eq!(
            report.parameters.projected_growth.to_bits(),
            evaluator.projected_growth(&data).to_bits()
        );
    }

    #[rstest]
    #[case(InvestmentOption::EnterpriseValue, 2000.0)]
    #[case(InvestmentOption::MarketCap, 1500.0)]
    #[case(InvestmentOption::AdjustedEnterpriseValue, 2500.0)]
    fn investment_option_selects_base(#[case] option: InvestmentOption, #[case] expected: f64) {
        let evaluator = Evaluator::with_config(EvaluatorConfig {
            investment_option: option,
            ..EvaluatorConfig::default()
        });
        assert_eq!(evaluator.investment_base(&financials()), expected);
    }

    #[test]
    fn growth_estimates_cover_all_indicators() {
        let estimates = Evaluator::new().growth_estimates(&financials());
        assert_relative_eq!(estimates.revenues, 0.21, epsilon = 1e-9);
        assert_relative_eq!(estimates.earnings, 0.10, epsilon = 1e-9);
        assert!(estimates.dividends > 0.0);
        assert_eq!(estimates.custom, 0.0);
    }

    #[test]
    fn unusable_history_propagates_nan() {
        let mut data = financials();
        data.revenues = series([Some(100.0), None, None]);
        data.free_cash_flows = series([None, None, None]);

        let report = Evaluator::with_config(config(GrowthIndicator::Revenues, false))
            .evaluate(&data)
            .unwrap();
        assert!(report.growth_estimates.revenues.is_nan());
        assert!(report.base_cash_flow.is_nan());
        assert!(!report.result.is_available());
    }

    #[test]
    fn non_finite_config_is_rejected() {
        let evaluator = Evaluator::with_config(EvaluatorConfig {
            discount_rate: f64::INFINITY,
            ..EvaluatorConfig::default()
        });
        assert!(matches!(evaluator.evaluate(&financials()), Err(ModelError::Math(_))));
    }

    #[test]
    fn growth_curve_projects_growing_years() {
        let evaluator = Evaluator::with_config(config(GrowthIndicator::Revenues, false));
        let curve = evaluator.growth_curve(&financials()).unwrap();

        assert_eq!(curve.years, vec![2021, 2022, 2023, 2024, 2025, 2026]);
        assert_relative_eq!(curve.fitted[5], 100.0 * 1.21_f64.powi(5), epsilon = 1e-6);
    }

    struct Flat;

    impl GrowthEstimator for Flat {
        fn estimate(&self, _series: &FiscalSeries) -> GrowthFit {
            GrowthFit::new(1.0, 1.0)
        }

        fn name(&self) -> &str {
            "flat"
        }
    }

    #[test]
    fn custom_estimator_is_used() {
        let evaluator =
            Evaluator::with_config(config(GrowthIndicator::Earnings, false)).with_estimator(Flat);
        let report = evaluator.evaluate(&financials()).unwrap();
        assert_eq!(report.parameters.projected_growth, 0.0);
        assert_eq!(report.growth_estimates.revenues, 0.0);
    }
}
