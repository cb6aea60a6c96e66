//! Numeric input parsing and fixed-decimal rendering
//!
//! Values arrive as free-form text. They are validated here, before any
//! conversion arithmetic runs, so that NaN and infinities never enter the
//! engine.

use thiserror::Error;

/// Error type for numeric input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Please enter a value")]
    Empty,

    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Value is not a finite number: {0}")]
    NonFinite(String),
}

/// Default number of digits after the decimal point
pub const DEFAULT_DECIMALS: usize = 4;

/// Parse free-form text into a finite `f64`
/// Supports: "42", "-3.5", "  1.5e3 ", "+.25"
pub fn parse_value(s: &str) -> Result<f64, NumberError> {
    let s = s.trim();

    if s.is_empty() {
        return Err(NumberError::Empty);
    }

    // `f64::from_str` also accepts "inf" and "NaN"; those are rejected below
    let value: f64 = s.parse()
        .map_err(|_| NumberError::ParseError(s.to_string()))?;

    ensure_finite(value)
}

/// Reject NaN and infinities
pub fn ensure_finite(value: f64) -> Result<f64, NumberError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumberError::NonFinite(value.to_string()))
    }
}

/// Render with exactly `decimals` digits after the decimal point
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value);
    // -0.00001 rounds to "-0.0000"
    match rendered.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_value("42"), Ok(42.0));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_value("  -3.5\n"), Ok(-3.5));
    }

    #[test]
    fn test_parse_scientific() {
        assert_abs_diff_eq!(parse_value("1.5e3").unwrap(), 1500.0);
        assert_abs_diff_eq!(parse_value("+.25").unwrap(), 0.25);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_value(""), Err(NumberError::Empty));
        assert_eq!(parse_value("   "), Err(NumberError::Empty));
        assert_eq!(NumberError::Empty.to_string(), "Please enter a value");
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_value("abc"), Err(NumberError::ParseError("abc".to_string())));
        assert!(matches!(parse_value("1,5"), Err(NumberError::ParseError(_))));
        assert!(matches!(parse_value("12 km"), Err(NumberError::ParseError(_))));
    }

    #[test]
    fn test_parse_non_finite() {
        assert!(matches!(parse_value("NaN"), Err(NumberError::NonFinite(_))));
        assert!(matches!(parse_value("inf"), Err(NumberError::NonFinite(_))));
        assert!(matches!(parse_value("-infinity"), Err(NumberError::NonFinite(_))));
        // Overflows to infinity while parsing
        assert!(matches!(parse_value("1e400"), Err(NumberError::NonFinite(_))));
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(100.0, 4), "100.0000");
        assert_eq!(format_fixed(0.621371192, 4), "0.6214");
        assert_eq!(format_fixed(-40.0, 4), "-40.0000");
        assert_eq!(format_fixed(2.4, 0), "2");
        assert_eq!(format_fixed(1.0 / 3.0, 2), "0.33");
    }

    #[test]
    fn test_format_negative_zero() {
        assert_eq!(format_fixed(-0.0, 4), "0.0000");
        assert_eq!(format_fixed(-0.00001, 4), "0.0000");
        assert_eq!(format_fixed(-0.0001, 4), "-0.0001");
    }
}
