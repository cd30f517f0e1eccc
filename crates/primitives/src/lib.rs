#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod series;
pub use series::{FiscalEntry, FiscalSeries};

mod fit;
pub use fit::GrowthFit;

mod params;
pub use params::{GrowthIndicator, InvestmentOption, ValuationParameters};

mod valuation;
pub use valuation::ValuationResult;

mod company;
pub use company::{CompanyFinancials, CompanyProfile, Ticker};

mod currency;
pub use currency::{CurrencyCode, RateTable};

mod error;
pub use error::{ParseSelectorError, SeriesError};

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
