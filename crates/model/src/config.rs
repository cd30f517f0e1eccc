//! Evaluator configuration.

use fairval_math::validate_parameters;
use fairval_primitives::{GrowthIndicator, InvestmentOption, ValuationParameters};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ModelError;

/// User-chosen valuation settings.
///
/// Serialized in camel case. Fields missing from JSON input take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluatorConfig {
    /// Annual discount rate.
    pub discount_rate: f64,
    /// Explicit projection years.
    pub growing_years: u32,
    /// Perpetual growth after the projection years.
    pub terminal_growth: f64,
    /// Growth rate used when the indicator is [`GrowthIndicator::Custom`].
    pub custom_growth: f64,
    /// Indicator the growth rate is estimated from.
    pub growth_indicator: GrowthIndicator,
    /// Market figure the intrinsic value is compared to.
    pub investment_option: InvestmentOption,
    /// Whether the dividend yield is added to the growth rate.
    pub include_dividends: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.15,
            growing_years: 4,
            terminal_growth: 0.02,
            custom_growth: 0.0,
            growth_indicator: GrowthIndicator::Revenues,
            investment_option: InvestmentOption::EnterpriseValue,
            include_dividends: true,
        }
    }
}

/// Fields named in a JSON settings object.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigOverrides {
    discount_rate: Option<f64>,
    growing_years: Option<u32>,
    terminal_growth: Option<f64>,
    custom_growth: Option<f64>,
    growth_indicator: Option<GrowthIndicator>,
    investment_option: Option<InvestmentOption>,
    include_dividends: Option<bool>,
}

impl EvaluatorConfig {
    /// Read settings from JSON on top of the defaults.
    ///
    /// # Errors
    /// Returns `ModelError::Json` for malformed JSON or mistyped fields, and
    /// `ModelError::InvalidConfig` if the input is not an object.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Self::default().merge_json(json)
    }

    /// Apply the fields present in a JSON object over these settings.
    ///
    /// Fields not named keep their current value, including non-finite rates
    /// that JSON cannot represent.
    ///
    /// # Errors
    /// Returns `ModelError::Json` for malformed JSON or mistyped fields, and
    /// `ModelError::InvalidConfig` if the input is not an object.
    pub fn merge_json(&self, json: &str) -> Result<Self, ModelError> {
        let overrides: Value = serde_json::from_str(json)?;
        let Value::Object(overrides) = overrides else {
            return Err(ModelError::InvalidConfig("expected a JSON object".to_string()));
        };

        let overrides: ConfigOverrides = serde_json::from_value(Value::Object(overrides))?;
        Ok(Self {
            discount_rate: overrides.discount_rate.unwrap_or(self.discount_rate),
            growing_years: overrides.growing_years.unwrap_or(self.growing_years),
            terminal_growth: overrides.terminal_growth.unwrap_or(self.terminal_growth),
            custom_growth: overrides.custom_growth.unwrap_or(self.custom_growth),
            growth_indicator: overrides.growth_indicator.unwrap_or(self.growth_indicator),
            investment_option: overrides.investment_option.unwrap_or(self.investment_option),
            include_dividends: overrides.include_dividends.unwrap_or(self.include_dividends),
        })
    }

    /// Serialize the settings to JSON.
    ///
    /// # Errors
    /// Returns `ModelError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Valuation parameters for a given projected growth rate.
    #[must_use]
    pub const fn valuation_parameters(&self, projected_growth: f64) -> ValuationParameters {
        ValuationParameters::new(
            self.discount_rate,
            self.growing_years,
            self.terminal_growth,
            projected_growth,
        )
    }

    /// Check the user-supplied rates.
    ///
    /// # Errors
    /// Returns `ModelError::Math` if a rate is not finite.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_parameters(&self.valuation_parameters(self.custom_growth))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = EvaluatorConfig::default();
        assert_eq!(config.discount_rate, 0.15);
        assert_eq!(config.growing_years, 4);
        assert_eq!(config.terminal_growth, 0.02);
        assert_eq!(config.custom_growth, 0.0);
        assert_eq!(config.growth_indicator, GrowthIndicator::Revenues);
        assert_eq!(config.investment_option, InvestmentOption::EnterpriseValue);
        assert!(config.include_dividends);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{"discountRate":0.1,"growthIndicator":"freeCashFlows"}"#;
        let config = EvaluatorConfig::from_json(json).unwrap();
        assert_eq!(config.discount_rate, 0.1);
        assert_eq!(config.growth_indicator, GrowthIndicator::FreeCashFlows);
        assert_eq!(config.growing_years, 4);
        assert!(config.include_dividends);
    }

    #[test]
    fn merge_overrides_current_settings() {
        let current = EvaluatorConfig { growing_years: 8, ..EvaluatorConfig::default() };
        let merged = current.merge_json(r#"{"includeDividends":false}"#).unwrap();
        assert_eq!(merged.growing_years, 8);
        assert!(!merged.include_dividends);
    }

    #[test]
    fn merge_keeps_non_finite_fields() {
        let current = EvaluatorConfig { custom_growth: f64::NAN, ..EvaluatorConfig::default() };
        let merged = current.merge_json(r#"{"growingYears":5}"#).unwrap();
        assert_eq!(merged.growing_years, 5);
        assert!(merged.custom_growth.is_nan());
        assert_eq!(merged.discount_rate, 0.15);
    }

    #[test]
    fn json_round_trip() {
        let config = EvaluatorConfig {
            investment_option: InvestmentOption::MarketCap,
            custom_growth: 0.07,
            ..EvaluatorConfig::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains(r#""investmentOption":"marketCap""#));
        assert_eq!(EvaluatorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn rejects_non_object_json() {
        let err = EvaluatorConfig::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_mistyped_field() {
        let err = EvaluatorConfig::from_json(r#"{"growingYears":-3}"#).unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }

    #[test]
    fn validate_rejects_non_finite_rates() {
        assert!(EvaluatorConfig::default().validate().is_ok());

        let config = EvaluatorConfig { terminal_growth: f64::NAN, ..EvaluatorConfig::default() };
        assert!(matches!(config.validate(), Err(ModelError::Math(_))));
    }

    #[test]
    fn valuation_parameters_carry_settings() {
        let params = EvaluatorConfig::default().valuation_parameters(0.3);
        assert_eq!(params, ValuationParameters::new(0.15, 4, 0.02, 0.3));
    }
}
