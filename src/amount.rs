//! Prices written in major units, converted to whole minor units.
//!
//! Uses `rust_decimal` so that `"0.80"` becomes exactly 80 cents with no
//! floating-point rounding along the way.

use crate::error::AmountError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Minor units per major unit.
pub const MINOR_PER_MAJOR: i64 = 100;

/// Number of fractional digits a price may carry.
pub const SCALE: u32 = 2;

/// Parses a decimal price such as `"3.88"` into minor units.
///
/// Zero and negative prices parse fine; rejecting them is the register's
/// job. Trailing zeros beyond two places are accepted (`"1.500"`), other
/// extra digits are not.
///
/// # Examples
///
/// ```
/// use cash_register::amount::parse_minor_units;
///
/// assert_eq!(parse_minor_units("0.80").unwrap(), 80);
/// assert_eq!(parse_minor_units(" 12 ").unwrap(), 1200);
/// assert!(parse_minor_units("0.805").is_err());
/// ```
pub fn parse_minor_units(s: &str) -> Result<i64, AmountError> {
    let trimmed = s.trim();
    let decimal = Decimal::from_str(trimmed)?.normalize();

    if decimal.scale() > SCALE {
        return Err(AmountError::TooPrecise(trimmed.to_string()));
    }

    decimal
        .checked_mul(Decimal::from(MINOR_PER_MAJOR))
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| AmountError::OutOfRange(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_whole_and_fractional_prices() {
        assert_eq!(parse_minor_units("1").unwrap(), 100);
        assert_eq!(parse_minor_units("0.8").unwrap(), 80);
        assert_eq!(parse_minor_units("0.01").unwrap(), 1);
        assert_eq!(parse_minor_units("3.88").unwrap(), 388);
    }

    #[test]
    fn test_trims_whitespace_and_trailing_zeros() {
        assert_eq!(parse_minor_units("  2.5  ").unwrap(), 250);
        assert_eq!(parse_minor_units("1.5000").unwrap(), 150);
    }

    #[test]
    fn test_zero_and_negative_parse() {
        assert_eq!(parse_minor_units("0").unwrap(), 0);
        assert_eq!(parse_minor_units("-1.00").unwrap(), -100);
    }

    #[test]
    fn test_rejects_sub_cent_precision() {
        assert!(matches!(
            parse_minor_units("0.001"),
            Err(AmountError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(parse_minor_units("abc"), Err(AmountError::Parse(_))));
        assert!(matches!(parse_minor_units(""), Err(AmountError::Parse(_))));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            parse_minor_units("999999999999999999999"),
            Err(AmountError::OutOfRange(_))
        ));
    }
}
