//! # fairval
//!
//! Discounted cash flow valuation from historical company financials.
//!
//! This crate provides a unified interface to the fairval crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Core type definitions
//! - `traits`: Growth estimator and rate source abstractions
//! - `math`: Growth fitting, discounted cash flow and formatting
//! - `model`: End-to-end evaluation
//! - `utils`: Statement ingestion and currency conversion
//! - `cli`: The `evaluate` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use fairval::model::{Evaluator, EvaluatorConfig};
//!
//! let report = Evaluator::with_config(EvaluatorConfig::default()).evaluate(&financials)?;
//! report.print_summary();
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use fairval_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use fairval_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use fairval_math as math;
#[cfg(feature = "model")]
#[doc(inline)]
pub use fairval_model as model;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use fairval_utils as utils;
