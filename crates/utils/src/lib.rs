#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod statements;
pub use statements::{DATE_COLUMN, financials_from_frame};

mod fx;
pub use fx::ExchangeRateCache;

mod error;
pub use error::UtilsError;
