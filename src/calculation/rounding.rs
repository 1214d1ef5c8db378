//! Rounding primitives for monetary values.
//!
//! All rounding in the engine goes through this module so that every field is
//! rounded the same way: half away from zero, never banker's rounding.
//!
//! Values inside the engine are [`Decimal`], which cannot hold NaN or
//! infinities. Floating-point numbers enter through [`to_decimal`], which is
//! where non-finite values are rejected, and divisions go through
//! [`checked_div`], which reports a zero divisor instead of producing one.
//! [`checked_mul`], [`checked_add`] and [`checked_sub`] report results beyond
//! the decimal range the same way instead of panicking.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Rounds a value to two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::round_to_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let v = Decimal::from_str("76.925").unwrap();
/// assert_eq!(round_to_cents(v), Decimal::from_str("76.93").unwrap());
/// ```
pub fn round_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a value to the nearest integer, half away from zero.
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a percentage into a fraction (`23` becomes `0.23`).
pub fn percent(value: Decimal) -> Decimal {
    value / Decimal::ONE_HUNDRED
}

/// Converts a floating-point value into a [`Decimal`].
///
/// The conversion goes through the shortest decimal representation of the
/// float, so `76.925_f64` becomes exactly `76.925`.
///
/// # Errors
///
/// Returns `InvalidNumber` if the value is NaN, infinite, or too large to be
/// represented as a decimal.
///
/// # Examples
///
/// ```
/// use netpay_engine::calculation::to_decimal;
///
/// assert!(to_decimal(2000.0, "grossMonthly").is_ok());
/// assert!(to_decimal(f64::NAN, "grossMonthly").is_err());
/// ```
pub fn to_decimal(value: f64, context: &str) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::InvalidNumber {
            context: context.to_string(),
            message: format!("{} is not a finite number", value),
        });
    }

    Decimal::from_str(&value.to_string()).map_err(|e| EngineError::InvalidNumber {
        context: context.to_string(),
        message: format!("{} cannot be represented as a decimal: {}", value, e),
    })
}

/// Divides `numerator` by `denominator`, reporting a zero divisor or an
/// overflow as `InvalidNumber`.
pub fn checked_div(numerator: Decimal, denominator: Decimal, context: &str) -> EngineResult<Decimal> {
    if denominator.is_zero() {
        return Err(EngineError::InvalidNumber {
            context: context.to_string(),
            message: format!("division of {} by zero", numerator),
        });
    }

    numerator
        .checked_div(denominator)
        .ok_or_else(|| EngineError::InvalidNumber {
            context: context.to_string(),
            message: format!("{} / {} overflows", numerator, denominator),
        })
}

fn overflow(context: &str, lhs: Decimal, op: &str, rhs: Decimal) -> EngineError {
    EngineError::InvalidNumber {
        context: context.to_string(),
        message: format!("{} {} {} overflows", lhs, op, rhs),
    }
}

/// Multiplies two values, reporting an overflow as `InvalidNumber`.
pub fn checked_mul(lhs: Decimal, rhs: Decimal, context: &str) -> EngineResult<Decimal> {
    lhs.checked_mul(rhs)
        .ok_or_else(|| overflow(context, lhs, "*", rhs))
}

/// Adds two values, reporting an overflow as `InvalidNumber`.
pub fn checked_add(lhs: Decimal, rhs: Decimal, context: &str) -> EngineResult<Decimal> {
    lhs.checked_add(rhs)
        .ok_or_else(|| overflow(context, lhs, "+", rhs))
}

/// Subtracts `rhs` from `lhs`, reporting an overflow as `InvalidNumber`.
pub fn checked_sub(lhs: Decimal, rhs: Decimal, context: &str) -> EngineResult<Decimal> {
    lhs.checked_sub(rhs)
        .ok_or_else(|| overflow(context, lhs, "-", rhs))
}
