//! Display formatting for financial figures.

/// Significant figures used when none are specified.
pub const DEFAULT_SIGNIFICANT_FIGURES: usize = 4;

const SUFFIXES: [&str; 5] = ["", "k", "M", "B", "T"];

/// Format a number with a thousands suffix (`k`, `M`, `B`, `T`).
///
/// Values below one thousand in magnitude are printed as is. Larger values
/// are scaled and keep `significant_figures` digits, never fewer than their
/// integer part. Trillions is the largest suffix.
///
/// # Returns
/// `"NaN"` for NaN, `"Infinity"` or `"-Infinity"` for infinite values.
#[must_use]
pub fn format_num(value: f64, significant_figures: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let tier = (value.abs().log10() / 3.0).trunc().clamp(0.0, (SUFFIXES.len() - 1) as f64) as usize;
    if tier == 0 {
        return value.to_string();
    }

    let scaled = value / 10_f64.powi(3 * tier as i32);
    let integer_digits = scaled.abs().floor().to_string().len();
    let decimals = significant_figures.saturating_sub(integer_digits);
    format!("{scaled:.decimals$}{}", SUFFIXES[tier])
}

/// Format a fraction as a percentage with two decimals.
///
/// With `signed`, positive values (and zero) get a leading `+`.
#[must_use]
pub fn format_pct(value: f64, signed: bool) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if !signed {
        return format!("{:.2}%", value * 100.0);
    }
    let sign = if value >= 0.0 { '+' } else { '-' };
    format!("{sign}{:.2}%", value.abs() * 100.0)
}

/// Split a camel-case key into capitalized words.
///
/// A space goes before every uppercase letter and every run of digits.
#[must_use]
pub fn format_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut previous_digit = false;
    for c in key.chars() {
        let digit = c.is_ascii_digit();
        if c.is_uppercase() || (digit && !previous_digit) {
            out.push(' ');
        }
        out.push(c);
        previous_digit = digit;
    }

    let mut chars = out.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}
