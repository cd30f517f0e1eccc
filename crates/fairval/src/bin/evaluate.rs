//! Intrinsic value CLI tool.
//!
//! Values a company from a CSV of dated statement rows.
//!
//! Usage: `cargo run --features cli --bin evaluate -- STATEMENTS.csv --price P [OPTIONS]`
//! Example: `cargo run --features cli --bin evaluate -- acme.csv --ticker ACME --price 41.5`
//!
//! With `--batch FILE=PRICE...` every file is valued and a JSON summary is
//! printed, with the files that failed listed separately.

use std::{env, error::Error, fs, path::Path, str::FromStr};

use fairval::{
    math::{DEFAULT_SIGNIFICANT_FIGURES, format_num},
    model::{Evaluator, EvaluatorConfig},
    primitives::{CompanyFinancials, CompanyProfile, GrowthIndicator, InvestmentOption, Ticker},
    utils::financials_from_frame,
};
use polars::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: evaluate STATEMENTS.csv --price P [OPTIONS]
       evaluate --batch STATEMENTS.csv=PRICE... [OPTIONS]

Options:
  --ticker T             Ticker symbol (default: file name)
  --currency C           Financial currency (default: USD)
  --price P              Share price in the financial currency
  --params FILE          JSON settings, overridden by the flags below
  --discount-rate R      Annual discount rate
  --growing-years N      Explicit projection years
  --terminal-growth G    Perpetual growth rate
  --indicator I          revenues | earnings | dividends | free-cash-flows | custom
  --custom-growth G      Growth rate for the custom indicator
  --investment O         enterprise-value | market-cap | adjusted-enterprise-value
  --no-dividends         Do not add the dividend yield to growth
  --curve                Print the fitted growth curve
  --batch FILE=PRICE...  Value several files and print a JSON summary";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || has_flag(&args, "--help") {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    let outcome = if has_flag(&args, "--batch") { run_batch(&args) } else { run(&args) };
    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let path = Path::new(&args[1]);
    let ticker = flag_value(args, "--ticker").map_or_else(|| file_ticker(path), str::to_string);
    let currency = flag_value(args, "--currency").unwrap_or("USD");
    let price: f64 = parse_flag(args, "--price")?.ok_or("--price is required")?;

    let config = build_config(args)?;
    let financials = load_financials(path, &ticker, currency, price)?;

    let evaluator = Evaluator::with_config(config);
    let report = evaluator.evaluate(&financials)?;
    report.print_summary();

    if has_flag(args, "--curve")
        && let Some(curve) = evaluator.growth_curve(&financials)
    {
        println!();
        println!("{:<8} {:>12} {:>12}", "Year", "Observed", "Fitted");
        for (year, observed, fitted) in curve.points() {
            let observed = observed
                .map_or_else(|| "-".to_string(), |v| format_num(v, DEFAULT_SIGNIFICANT_FIGURES));
            let fitted = format_num(fitted, DEFAULT_SIGNIFICANT_FIGURES);
            println!("{year:<8} {observed:>12} {fitted:>12}");
        }
    }

    Ok(())
}

/// Value every `FILE=PRICE` entry after `--batch` and print the outcome as JSON.
fn run_batch(args: &[String]) -> Result<(), Box<dyn Error>> {
    let currency = flag_value(args, "--currency").unwrap_or("USD");
    let config = build_config(args)?;

    let entries = args
        .iter()
        .skip_while(|arg| *arg != "--batch")
        .skip(1)
        .take_while(|arg| !arg.starts_with("--"));
    let companies: Vec<(Ticker, Result<CompanyFinancials, Box<dyn Error>>)> = entries
        .map(|entry| {
            let (file, price) = entry.rsplit_once('=').unwrap_or((entry.as_str(), ""));
            let path = Path::new(file);
            let ticker = file_ticker(path);
            let loaded = price
                .parse::<f64>()
                .map_err(|e| -> Box<dyn Error> { format!("price {price:?}: {e}").into() })
                .and_then(|price| load_financials(path, &ticker, currency, price));
            (Ticker::new(ticker), loaded)
        })
        .collect();
    if companies.is_empty() {
        return Err("--batch needs at least one FILE=PRICE entry".into());
    }

    let batch = Evaluator::with_config(config).evaluate_many(companies);
    println!("{}", serde_json::to_string_pretty(&batch)?);
    Ok(())
}

/// Read a statements CSV into company financials.
fn load_financials(
    path: &Path,
    ticker: &str,
    currency: &str,
    price: f64,
) -> Result<CompanyFinancials, Box<dyn Error>> {
    info!(path = %path.display(), %ticker, price, "loading statements");
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    let profile = CompanyProfile::simple(ticker.into(), currency.into());
    Ok(financials_from_frame(&df, profile, price)?)
}

fn file_ticker(path: &Path) -> String {
    path.file_stem().map_or_else(String::new, |s| s.to_string_lossy().into_owned())
}

/// Settings from `--params` with command-line overrides applied.
fn build_config(args: &[String]) -> Result<EvaluatorConfig, Box<dyn Error>> {
    let mut config = match flag_value(args, "--params") {
        Some(file) => EvaluatorConfig::from_json(&fs::read_to_string(file)?)?,
        None => EvaluatorConfig::default(),
    };

    if let Some(rate) = parse_flag(args, "--discount-rate")? {
        config.discount_rate = rate;
    }
    if let Some(years) = parse_flag(args, "--growing-years")? {
        config.growing_years = years;
    }
    if let Some(growth) = parse_flag(args, "--terminal-growth")? {
        config.terminal_growth = growth;
    }
    if let Some(growth) = parse_flag(args, "--custom-growth")? {
        config.custom_growth = growth;
    }
    if let Some(indicator) = parse_flag::<GrowthIndicator>(args, "--indicator")? {
        config.growth_indicator = indicator;
    }
    if let Some(option) = parse_flag::<InvestmentOption>(args, "--investment")? {
        config.investment_option = option;
    }
    if has_flag(args, "--no-dividends") {
        config.include_dividends = false;
    }

    Ok(config)
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|arg| arg == name)
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter().position(|arg| arg == name).and_then(|i| args.get(i + 1)).map(String::as_str)
}

fn parse_flag<T>(args: &[String], name: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    flag_value(args, name)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| -> Box<dyn Error> { format!("{name} {value}: {e}").into() })
        })
        .transpose()
}
