#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod growth;
pub use growth::{LogLinearFitter, fit_exponential};

mod curve;
pub use curve::{GrowthCurve, growth_curve};

mod dcf;
pub use dcf::{
    DcfBreakdown, base_cash_flow, dcf_breakdown, dividend_yield, intrinsic_value,
    validate_parameters, value_rating,
};

mod format;
pub use format::{DEFAULT_SIGNIFICANT_FIGURES, format_camel_case, format_num, format_pct};

mod error;
pub use error::MathError;
