//! Monetary rounding and overflow checks.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Number of decimal places kept on every monetary field.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds a monetary amount to two decimal places, half away from zero.
///
/// Only applied when a value is assigned to an output field; intermediate
/// figures keep full precision.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Turns the result of a checked `Decimal` operation into a calculation error.
pub(crate) fn checked_amount(value: Option<Decimal>, what: &str) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::CalculationError {
        message: format!("{} is out of range", what),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_midpoint_rounds_up() {
        assert_eq!(round_money(dec("2.345")), dec("2.35"));
        assert_eq!(round_money(dec("2.355")), dec("2.36"));
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(round_money(dec("2708.3333333")), dec("2708.33"));
    }

    #[test]
    fn test_negative_midpoint_rounds_away_from_zero() {
        assert_eq!(round_money(dec("-1.005")), dec("-1.01"));
    }

    #[test]
    fn test_overflow_becomes_calculation_error() {
        let sum = checked_amount(Decimal::MAX.checked_add(Decimal::ONE), "total deductions");
        match sum {
            Err(EngineError::CalculationError { message }) => {
                assert_eq!(message, "total deductions is out of range");
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
        assert_eq!(
            checked_amount(dec("1").checked_add(dec("2")), "sum").unwrap(),
            dec("3")
        );
    }

    #[test]
    fn test_already_rounded_is_unchanged() {
        assert_eq!(round_money(dec("6000")), dec("6000"));
        assert_eq!(round_money(dec("375.50")), dec("375.50"));
    }
}
