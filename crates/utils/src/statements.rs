//! Company financials from a frame of dated statement rows.

use chrono::{Datelike, NaiveDate};
use fairval_primitives::{CompanyFinancials, CompanyProfile, Date, FiscalSeries};
use polars::prelude::*;
use tracing::debug;

use crate::UtilsError;

/// Column holding each row's `YYYY-MM-DD` date.
pub const DATE_COLUMN: &str = "as_of_date";

const REVENUE: &str = "annual_total_revenue";
const NET_INCOME: &str = "annual_net_income";
const CASH_DIVIDENDS: &str = "annual_cash_dividends_paid";
const PREFERRED_DIVIDENDS: &str = "annual_preferred_stock_dividends";
const FREE_CASH_FLOW: &str = "annual_free_cash_flow";

/// Build company financials from a wide statement frame.
///
/// Rows are sorted by [`DATE_COLUMN`]. Every row with an annual revenue is a
/// fiscal year end, and the annual series are read from those rows. Balance
/// sheet items take the latest row's `quarterly_` value, falling back to the
/// latest fiscal year end's `annual_` value. Statement columns may be absent.
///
/// # Arguments
/// * `df` - Statement rows, one per reporting date
/// * `profile` - Company metadata
/// * `share_price` - Share price in the financial currency
///
/// # Errors
/// Returns `UtilsError::MissingColumn` without a date column,
/// `UtilsError::InvalidDate` for unparsable dates, and `UtilsError::Series`
/// if two fiscal year ends fall in the same calendar year.
pub fn financials_from_frame(
    df: &DataFrame,
    profile: CompanyProfile,
    share_price: f64,
) -> Result<CompanyFinancials, UtilsError> {
    if df.column(DATE_COLUMN).is_err() {
        return Err(UtilsError::MissingColumn(DATE_COLUMN.to_string()));
    }
    let sorted =
        df.clone().lazy().sort([DATE_COLUMN], SortMultipleOptions::default()).collect()?;
    let rows = StatementRows::new(&sorted)?;

    let revenue = rows.column(REVENUE)?;
    let year_ends: Vec<usize> = (0..rows.len()).filter(|&i| revenue[i].is_some()).collect();
    let fiscal_year_ends: Vec<Date> = year_ends.iter().map(|&i| rows.dates[i]).collect();
    let years: Vec<i32> = fiscal_year_ends.iter().map(Datelike::year).collect();

    let annual = |values: &[Option<f64>]| -> Vec<Option<f64>> {
        year_ends.iter().map(|&i| values[i]).collect()
    };
    let revenues = FiscalSeries::from_years(&years, &annual(&revenue))?;
    let earnings = FiscalSeries::from_years(&years, &annual(&rows.column(NET_INCOME)?))?;
    let free_cash_flows = FiscalSeries::from_years(&years, &annual(&rows.column(FREE_CASH_FLOW)?))?;

    let cash_dividends = annual(&rows.column(CASH_DIVIDENDS)?);
    let preferred_dividends = annual(&rows.column(PREFERRED_DIVIDENDS)?);
    let common_dividends: Vec<Option<f64>> = cash_dividends
        .iter()
        .zip(&preferred_dividends)
        .map(|(cash, preferred)| cash.map(|cash| cash.abs() - preferred.unwrap_or(0.0).abs()))
        .collect();
    let dividends = FiscalSeries::from_years(&years, &common_dividends)?;

    let balance = BalanceSheet {
        rows: &rows,
        latest: rows.len().checked_sub(1),
        year_end: year_ends.last().copied(),
    };
    let market_cap = share_price * balance.item("ordinary_shares_number")?.unwrap_or(f64::NAN);
    let debt = balance.item_or_zero("total_debt")?;
    let preferred = balance.item_or_zero("preferred_stock")?;
    let minority = balance.item_or_zero("minority_interest")?;
    let cash = balance.item_or_zero("cash_and_cash_equivalents")?;
    let liabilities = balance.item_or_zero("total_liabilities_net_minority_interest")?;
    let short_term_investments = balance.item_or_zero("other_short_term_investments")?;

    let enterprise_value = market_cap + debt + preferred + minority - cash;
    let adjusted_enterprise_value =
        market_cap + liabilities + preferred + minority - cash - short_term_investments;

    debug!(
        ticker = %profile.ticker,
        rows = rows.len(),
        fiscal_years = years.len(),
        market_cap,
        enterprise_value,
        "loaded statements"
    );

    Ok(CompanyFinancials {
        profile,
        share_price,
        market_cap,
        enterprise_value,
        adjusted_enterprise_value,
        fiscal_year_ends,
        revenues,
        earnings,
        dividends,
        free_cash_flows,
    })
}

/// Date-sorted statement rows.
struct StatementRows<'a> {
    frame: &'a DataFrame,
    dates: Vec<Date>,
}

impl<'a> StatementRows<'a> {
    fn new(frame: &'a DataFrame) -> Result<Self, UtilsError> {
        let dates = frame
            .column(DATE_COLUMN)?
            .str()?
            .into_iter()
            .map(|cell| {
                let cell = cell.unwrap_or_default();
                NaiveDate::parse_from_str(cell, "%Y-%m-%d")
                    .map_err(|_| UtilsError::InvalidDate(cell.to_string()))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { frame, dates })
    }

    const fn len(&self) -> usize {
        self.dates.len()
    }

    /// Values of a statement column as floats; all absent if the column is.
    fn column(&self, name: &str) -> Result<Vec<Option<f64>>, UtilsError> {
        let Ok(column) = self.frame.column(name) else {
            return Ok(vec![None; self.len()]);
        };
        let values = column.cast(&DataType::Float64)?;
        Ok(values.f64()?.into_iter().collect())
    }
}

/// Most recent balance sheet figures.
struct BalanceSheet<'r, 'a> {
    rows: &'r StatementRows<'a>,
    latest: Option<usize>,
    year_end: Option<usize>,
}

impl BalanceSheet<'_, '_> {
    fn item(&self, name: &str) -> Result<Option<f64>, UtilsError> {
        let quarterly = self.rows.column(&format!("quarterly_{name}"))?;
        let annual = self.rows.column(&format!("annual_{name}"))?;
        Ok(self
            .latest
            .and_then(|i| quarterly[i])
            .or_else(|| self.year_end.and_then(|i| annual[i])))
    }

    fn item_or_zero(&self, name: &str) -> Result<f64, UtilsError> {
        Ok(self.item(name)?.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn profile() -> CompanyProfile {
        CompanyProfile::simple("ACME".into(), "USD".into())
    }

    fn statements() -> DataFrame {
        df! {
            // Out of order on purpose
            "as_of_date" => &["2023-12-31", "2021-12-31", "2024-03-31", "2022-12-31"],
            "annual_total_revenue" => &[Some(146.41), Some(100.0), None, Some(121.0)],
            "annual_net_income" => &[Some(12.0), Some(10.0), None, None],
            "annual_free_cash_flow" => &[Some(110.0), Some(90.0), None, Some(100.0)],
            "annual_cash_dividends_paid" => &[Some(-25.0), None, None, Some(-20.0)],
            "annual_preferred_stock_dividends" => &[Some(-5.0), None, None, None],
            "annual_ordinary_shares_number" => &[Some(10.0), Some(10.0), None, Some(10.0)],
            "quarterly_ordinary_shares_number" => &[None, None, Some(12.0), None],
            "annual_total_debt" => &[Some(300.0), Some(100.0), None, Some(200.0)],
            "quarterly_cash_and_cash_equivalents" => &[None, None, Some(50.0), None],
            "annual_total_liabilities_net_minority_interest" => &[Some(800.0), None, None, None],
            "annual_other_short_term_investments" => &[Some(30.0), None, None, None],
        }
        .unwrap()
    }

    #[test]
    fn annual_series_follow_fiscal_year_ends() {
        let financials = financials_from_frame(&statements(), profile(), 20.0).unwrap();

        let years: Vec<i32> = financials.revenues.years().collect();
        assert_eq!(years, vec![2021, 2022, 2023]);
        assert_eq!(financials.fiscal_year_ends.len(), 3);
        assert_eq!(financials.fiscal_year_ends[2], NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        assert_eq!(financials.revenues.get(2023), Some(146.41));
        assert_eq!(financials.earnings.get(2022), None);
        assert_eq!(financials.free_cash_flows.present_count(), 3);
    }

    #[test]
    fn common_dividends_exclude_preferred() {
        let financials = financials_from_frame(&statements(), profile(), 20.0).unwrap();
        let dividends: Vec<Option<f64>> = financials.dividends.values().collect();
        assert_eq!(dividends, vec![None, Some(20.0), Some(20.0)]);
    }

    #[test]
    fn market_figures_prefer_latest_quarter() {
        let financials = financials_from_frame(&statements(), profile(), 20.0).unwrap();

        // 20 * 12 quarterly shares
        assert_relative_eq!(financials.market_cap, 240.0);
        // 240 + 300 annual debt - 50 quarterly cash
        assert_relative_eq!(financials.enterprise_value, 490.0);
        // 240 + 800 - 50 - 30
        assert_relative_eq!(financials.adjusted_enterprise_value, 960.0);
    }

    #[test]
    fn unknown_shares_make_market_figures_nan() {
        let df = df! {
            "as_of_date" => &["2022-12-31", "2023-12-31"],
            "annual_total_revenue" => &[1.0, 2.0],
        }
        .unwrap();
        let financials = financials_from_frame(&df, profile(), 20.0).unwrap();

        assert!(financials.market_cap.is_nan());
        assert!(financials.enterprise_value.is_nan());
        assert!(financials.dividends.values().all(|v| v.is_none()));
        assert!(financials.free_cash_flows.present().next().is_none());
    }

    #[test]
    fn missing_date_column() {
        let df = df! { "annual_total_revenue" => &[1.0] }.unwrap();
        let err = financials_from_frame(&df, profile(), 1.0).unwrap_err();
        assert!(matches!(err, UtilsError::MissingColumn(name) if name == DATE_COLUMN));
    }

    #[test]
    fn invalid_date_is_rejected() {
        let df = df! {
            "as_of_date" => &["2023-12-31", "31/12/2022"],
            "annual_total_revenue" => &[1.0, 2.0],
        }
        .unwrap();
        let err = financials_from_frame(&df, profile(), 1.0).unwrap_err();
        assert!(matches!(err, UtilsError::InvalidDate(cell) if cell == "31/12/2022"));
    }

    #[test]
    fn two_year_ends_in_one_year() {
        let df = df! {
            "as_of_date" => &["2023-01-31", "2023-12-31"],
            "annual_total_revenue" => &[1.0, 2.0],
        }
        .unwrap();
        let err = financials_from_frame(&df, profile(), 1.0).unwrap_err();
        assert!(matches!(err, UtilsError::Series(_)));
    }
}
