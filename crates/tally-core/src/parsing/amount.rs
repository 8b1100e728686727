use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::model::Cell;

static PLAIN_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("valid number pattern")
});

static GROUPED_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d*)?$").expect("valid grouped number pattern")
});

/// Coerce an amount cell into a number.
///
/// Numbers pass through, numeric-looking text is parsed, and everything
/// else (blank, words, booleans, dates, errors) is `None`.
pub fn coerce_amount(cell: Option<&Cell>) -> Option<Decimal> {
    match cell? {
        Cell::Number(f) => f64_to_decimal(*f),
        Cell::Text(s) => parse_amount_text(s),
        Cell::Blank | Cell::Other(_) => None,
    }
}

/// Parse a numeric-looking string such as "500", "-300", "1,250.50" or "1e3".
pub fn parse_amount_text(s: &str) -> Option<Decimal> {
    let s = s.trim();

    let cleaned = if GROUPED_NUMBER.is_match(s) {
        s.replace(',', "")
    } else if PLAIN_NUMBER.is_match(s) {
        s.to_string()
    } else {
        return None;
    };

    let (negative, digits) = match cleaned.as_bytes().first() {
        Some(b'-') => (true, &cleaned[1..]),
        Some(b'+') => (false, &cleaned[1..]),
        _ => (false, cleaned.as_str()),
    };

    let mut normalized = String::with_capacity(digits.len() + 2);
    if negative {
        normalized.push('-');
    }
    if digits.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(digits);
    if normalized.ends_with('.') {
        normalized.pop();
    }

    if normalized.contains(|c| c == 'e' || c == 'E') {
        Decimal::from_scientific(&normalized).ok()
    } else {
        Decimal::from_str(&normalized).ok()
    }
}

/// Convert f64 to Decimal, preserving the shortest decimal representation.
///
/// Goes through the string form so 1250.5_f64 stays 1250.5 rather than
/// picking up binary floating-point artifacts. Non-finite values are `None`.
pub fn f64_to_decimal(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    format!("{f}")
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_number_cells() {
        assert_eq!(coerce_amount(Some(&Cell::Number(1250.5))), Some(dec!(1250.5)));
        assert_eq!(coerce_amount(Some(&Cell::Number(-300.0))), Some(dec!(-300)));
        assert_eq!(coerce_amount(Some(&Cell::Number(0.0035))), Some(dec!(0.0035)));
    }

    #[test]
    fn test_numeric_text() {
        assert_eq!(parse_amount_text("500"), Some(dec!(500)));
        assert_eq!(parse_amount_text("  -300 "), Some(dec!(-300)));
        assert_eq!(parse_amount_text("+12.75"), Some(dec!(12.75)));
        assert_eq!(parse_amount_text(".5"), Some(dec!(0.5)));
        assert_eq!(parse_amount_text("7."), Some(dec!(7)));
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(parse_amount_text("1,250.50"), Some(dec!(1250.50)));
        assert_eq!(parse_amount_text("-12,000"), Some(dec!(-12000)));
    }

    #[test]
    fn test_exponent() {
        assert_eq!(parse_amount_text("1e3"), Some(dec!(1000)));
        assert_eq!(parse_amount_text("2.5E-2"), Some(dec!(0.025)));
    }

    #[test]
    fn test_malformed_text_is_absent() {
        assert!(parse_amount_text("n/a").is_none());
        assert!(parse_amount_text("").is_none());
        assert!(parse_amount_text("12abc").is_none());
        assert!(parse_amount_text("1,25").is_none());
        assert!(parse_amount_text("--5").is_none());
        assert!(parse_amount_text("$100").is_none());
    }

    #[test]
    fn test_non_numeric_cells_are_absent() {
        assert!(coerce_amount(None).is_none());
        assert!(coerce_amount(Some(&Cell::Blank)).is_none());
        assert!(coerce_amount(Some(&Cell::Other("TRUE".into()))).is_none());
        assert!(coerce_amount(Some(&Cell::Number(f64::NAN))).is_none());
        assert!(coerce_amount(Some(&Cell::Number(f64::INFINITY))).is_none());
    }
}
