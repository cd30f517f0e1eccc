#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::EvaluatorConfig;

mod evaluator;
pub use evaluator::Evaluator;

mod report;
pub use report::{GrowthEstimates, ValuationReport};

mod batch;
pub use batch::{BatchValuation, ValuationFailure, ValuationSummary};

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use fairval_traits::GrowthEstimator;

    pub use super::{BatchValuation, Evaluator, EvaluatorConfig, ModelError, ValuationReport};
}
