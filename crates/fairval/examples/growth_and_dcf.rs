//! Growth fitting and discounted cash flow on a hand-built company.
//!
//! Run with: `RUST_LOG=debug cargo run --example growth_and_dcf`

use fairval::{
    math::{DEFAULT_SIGNIFICANT_FIGURES, dcf_breakdown, fit_exponential, format_num, format_pct},
    model::{Evaluator, EvaluatorConfig},
    primitives::{
        CompanyFinancials, CompanyProfile, FiscalSeries, GrowthIndicator, InvestmentOption,
        ValuationParameters,
    },
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    println!("=== Growth Fit ===\n");

    let revenues =
        FiscalSeries::from_pairs([(2021, Some(100.0)), (2022, Some(121.0)), (2023, Some(146.41))])?;
    let fit = fit_exponential(&revenues);
    println!("Constant: {:.4}", fit.constant);
    println!("Base:     {:.4}", fit.base);
    println!("Growth:   {}", format_pct(fit.rate(), true));

    println!("\n=== Discounted Cash Flow ===\n");

    let params = ValuationParameters::new(0.10, 3, 0.02, fit.rate());
    let breakdown = dcf_breakdown(100.0, &params);
    for (year, flow) in breakdown.discounted_cash_flows().enumerate() {
        println!("Year {}: {:.2}", year + 1, flow);
    }
    println!("Terminal value (discounted): {:.2}", breakdown.discounted_terminal_value);
    println!("Intrinsic value:             {:.2}", breakdown.total);

    println!("\n=== Full Evaluation ===\n");

    let years = [2019, 2020, 2021, 2022, 2023];
    let financials = CompanyFinancials {
        profile: CompanyProfile::simple("ACME".into(), "USD".into()),
        share_price: 48.0,
        market_cap: 4.8e10,
        enterprise_value: 5.3e10,
        adjusted_enterprise_value: 6.1e10,
        fiscal_year_ends: Vec::new(),
        revenues: FiscalSeries::from_years(
            &years,
            &[Some(2.1e10), Some(2.3e10), Some(2.6e10), Some(2.8e10), Some(3.1e10)],
        )?,
        earnings: FiscalSeries::from_years(
            &years,
            &[Some(2.0e9), Some(1.6e9), Some(2.4e9), Some(2.9e9), Some(3.3e9)],
        )?,
        dividends: FiscalSeries::from_years(
            &years,
            &[Some(4.0e8), Some(4.0e8), None, Some(5.0e8), Some(5.5e8)],
        )?,
        free_cash_flows: FiscalSeries::from_years(
            &years,
            &[Some(2.2e9), Some(2.5e9), Some(2.4e9), Some(3.0e9), Some(3.4e9)],
        )?,
    };

    for indicator in [GrowthIndicator::Revenues, GrowthIndicator::FreeCashFlows] {
        let evaluator = Evaluator::with_config(EvaluatorConfig {
            growth_indicator: indicator,
            investment_option: InvestmentOption::MarketCap,
            ..EvaluatorConfig::default()
        });
        let report = evaluator.evaluate(&financials)?;
        println!(
            "{indicator}: intrinsic value {} vs market cap {} ({})",
            format_num(report.result.intrinsic_value, DEFAULT_SIGNIFICANT_FIGURES),
            format_num(report.result.investment_base, DEFAULT_SIGNIFICANT_FIGURES),
            format_pct(report.result.value_rating, false),
        );
    }

    let report = Evaluator::new().evaluate(&financials)?;
    println!();
    report.print_summary();

    Ok(())
}
