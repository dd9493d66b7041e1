//! Numeric parsing.

use std::num::IntErrorKind;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Not a number at all.
    Invalid,
    /// A number with a fractional part where an integer was expected.
    NotIntegral,
    /// Integral, but outside the `i64` range.
    OutOfRange,
}

/// Parses a decimal literal, including scientific notation (`1.5e3`).
///
/// Literals that cannot be held exactly in 28 fractional digits are rejected
/// rather than rounded.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.split_once(['e', 'E']) {
        Some((mantissa, _)) => {
            Decimal::from_str_exact(mantissa).ok()?;
            Decimal::from_scientific(value).ok()
        }
        None => Decimal::from_str_exact(value).ok(),
    }
}

/// Parses an integral literal.
///
/// Accepts plain integers and integral decimals such as `42.0` or `4.2e1`;
/// `42.5` is [`NumericError::NotIntegral`].
pub fn parse_integer(value: &str) -> Result<i64, NumericError> {
    let value = value.trim();
    match value.parse::<i64>() {
        Ok(parsed) => return Ok(parsed),
        Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(NumericError::OutOfRange);
        }
        Err(_) => {}
    }
    let decimal = parse_decimal(value).ok_or(NumericError::Invalid)?;
    if !decimal.fract().is_zero() {
        return Err(NumericError::NotIntegral);
    }
    decimal.trunc().to_i64().ok_or(NumericError::OutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integral_forms() {
        assert_eq!(parse_integer("42"), Ok(42));
        assert_eq!(parse_integer(" -7 "), Ok(-7));
        assert_eq!(parse_integer("+3"), Ok(3));
        assert_eq!(parse_integer("42.0"), Ok(42));
        assert_eq!(parse_integer("4.2e1"), Ok(42));
    }

    #[test]
    fn rejects_fractions_and_garbage() {
        assert_eq!(parse_integer("42.5"), Err(NumericError::NotIntegral));
        assert_eq!(parse_integer("abc"), Err(NumericError::Invalid));
        assert_eq!(parse_integer(""), Err(NumericError::Invalid));
    }

    #[test]
    fn detects_overflow() {
        assert_eq!(
            parse_integer("9223372036854775808"),
            Err(NumericError::OutOfRange)
        );
        assert_eq!(
            parse_integer("9223372036854775808.0"),
            Err(NumericError::OutOfRange)
        );
    }

    #[test]
    fn keeps_decimal_precision() {
        assert_eq!(
            parse_decimal("0.1").map(|d| d.to_string()),
            Some("0.1".to_string())
        );
        assert_eq!(
            parse_decimal("19.990").map(|d| d.to_string()),
            Some("19.990".to_string())
        );
        assert_eq!(
            parse_decimal("1.5e3").map(|d| d.normalize().to_string()),
            Some("1500".to_string())
        );
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn rejects_digits_beyond_precision() {
        assert_eq!(parse_decimal("0.12345678901234567890123456789012"), None);
        assert_eq!(
            parse_decimal("3.14159265358979323846264338327950288"),
            None
        );
        assert_eq!(parse_decimal("1.2345678901234567890123456789012e2"), None);
        assert_eq!(parse_decimal("1e-40"), None);
        assert_eq!(
            parse_decimal("0.1234567890123456789012345678").map(|d| d.to_string()),
            Some("0.1234567890123456789012345678".to_string())
        );
    }
}
