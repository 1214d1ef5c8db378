//! Typed payroll input.
//!
//! [`PayrollInput`] is the strongly-typed shape of the inputs the payroll
//! rules read. It converts into the generic [`InputRecord`] the evaluator
//! works with.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::InputRecord;

use super::fields::inputs;

/// The raw inputs of one payroll calculation.
///
/// # Example
///
/// ```
/// use netpay_engine::payroll::PayrollInput;
/// use netpay_engine::models::InputRecord;
/// use rust_decimal::Decimal;
///
/// let input: InputRecord = PayrollInput::new(Decimal::from(2000)).into();
/// assert_eq!(input.get("monthsPerYear").unwrap(), Decimal::from(14));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollInput {
    /// Gross monthly pay.
    pub gross_monthly: Decimal,
    /// Paid days in the month.
    pub paid_days_per_month: Decimal,
    /// Calendar days in the month.
    pub calendar_days_per_month: Decimal,
    /// Monthly salaries paid per year.
    pub months_per_year: Decimal,
    /// Whether the contract is an apprenticeship.
    #[serde(default)]
    pub apprenticeship: bool,
    /// Public holidays not taken this month.
    #[serde(default)]
    pub unused_holiday_days: Decimal,
}

impl PayrollInput {
    /// Creates an input for `gross_monthly` with a common full-time profile:
    /// 26 paid days, a 31-day month, 14 salaries a year, no apprenticeship
    /// and no unused holidays.
    pub fn new(gross_monthly: Decimal) -> Self {
        Self {
            gross_monthly,
            paid_days_per_month: Decimal::from(26),
            calendar_days_per_month: Decimal::from(31),
            months_per_year: Decimal::from(14),
            apprenticeship: false,
            unused_holiday_days: Decimal::ZERO,
        }
    }
}

impl From<PayrollInput> for InputRecord {
    fn from(input: PayrollInput) -> Self {
        InputRecord::new()
            .with(inputs::GROSS_MONTHLY, input.gross_monthly)
            .with(inputs::PAID_DAYS_PER_MONTH, input.paid_days_per_month)
            .with(inputs::CALENDAR_DAYS_PER_MONTH, input.calendar_days_per_month)
            .with(inputs::MONTHS_PER_YEAR, input.months_per_year)
            .with_flag(inputs::APPRENTICESHIP, input.apprenticeship)
            .with(inputs::UNUSED_HOLIDAY_DAYS, input.unused_holiday_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_every_field() {
        let record: InputRecord = PayrollInput {
            apprenticeship: true,
            unused_holiday_days: Decimal::TWO,
            ..PayrollInput::new(Decimal::from(1500))
        }
        .into();

        assert_eq!(record.get(inputs::GROSS_MONTHLY).unwrap(), Decimal::from(1500));
        assert_eq!(record.get(inputs::PAID_DAYS_PER_MONTH).unwrap(), Decimal::from(26));
        assert_eq!(record.get(inputs::CALENDAR_DAYS_PER_MONTH).unwrap(), Decimal::from(31));
        assert!(record.flag(inputs::APPRENTICESHIP).unwrap());
        assert_eq!(record.get(inputs::UNUSED_HOLIDAY_DAYS).unwrap(), Decimal::TWO);
        assert_eq!(record.iter().count(), 6);
    }

    #[test]
    fn test_deserializes_camel_case_with_defaults() {
        let input: PayrollInput = serde_json::from_str(
            r#"{
                "grossMonthly": 2000,
                "paidDaysPerMonth": 26,
                "calendarDaysPerMonth": 31,
                "monthsPerYear": 14
            }"#,
        )
        .unwrap();

        assert_eq!(input, PayrollInput::new(Decimal::from(2000)));
    }
}
