//! Payroll policies layered on the generic calculators.
//!
//! The tiered-rate calculator is schedule-agnostic; the exemption threshold,
//! the monthly split, the tax credit bands and the bonus taper are domain
//! policy and live here.

use rust_decimal::Decimal;

use crate::calculation::{Schedule, checked_div, checked_mul};
use crate::config::{BonusConfig, IncomeTaxConfig, TaxCreditConfig};
use crate::error::EngineResult;

/// Months a taxable annual amount is spread over.
pub const TAX_MONTHS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Returns the monthly income tax owed on `taxable_annual`.
///
/// Nothing is owed at or below the exemption threshold; above it the whole
/// income goes through the schedule and the annual amount is split over
/// twelve months.
///
/// # Examples
///
/// ```
/// use netpay_engine::config::PayrollConfig;
/// use netpay_engine::payroll::monthly_income_tax;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::default();
/// let tax = monthly_income_tax(Decimal::from(15_000), &config.income_tax);
/// assert_eq!(tax * Decimal::from(12), Decimal::from(3_450));
/// ```
pub fn monthly_income_tax(taxable_annual: Decimal, config: &IncomeTaxConfig) -> Decimal {
    if taxable_annual <= config.exemption_threshold {
        return Decimal::ZERO;
    }
    config.schedule.amount_owed(taxable_annual) / TAX_MONTHS
}

/// Returns the monthly regional surtax owed on `taxable_annual`.
pub fn monthly_regional_surtax(taxable_annual: Decimal, schedule: &Schedule) -> Decimal {
    schedule.amount_owed(taxable_annual) / TAX_MONTHS
}

/// Returns the annual employee tax credit for `gross_annual` income.
pub fn annual_tax_credit(gross_annual: Decimal, config: &TaxCreditConfig) -> EngineResult<Decimal> {
    if gross_annual <= config.full_credit_limit {
        Ok(config.full_credit)
    } else if gross_annual <= config.middle_limit {
        let quotient = checked_div(
            config.middle_limit - gross_annual,
            config.middle_limit - config.full_credit_limit,
            "taxCredit",
        )?;
        Ok(config.middle_base_credit + config.middle_variable_credit * quotient)
    } else if gross_annual <= config.upper_limit {
        let quotient = checked_div(
            config.upper_limit - gross_annual,
            config.upper_limit - config.middle_limit,
            "taxCredit",
        )?;
        Ok(config.middle_base_credit * quotient)
    } else {
        Ok(Decimal::ZERO)
    }
}

/// Returns the tax credit for a month of `calendar_days` days.
pub fn monthly_tax_credit(
    gross_annual: Decimal,
    calendar_days: Decimal,
    config: &TaxCreditConfig,
) -> EngineResult<Decimal> {
    let annual = annual_tax_credit(gross_annual, config)?;
    let daily = checked_div(annual, config.days_per_year, "taxCredit")?;
    checked_mul(daily, calendar_days, "taxCredit")
}

/// Returns the monthly income bonus for `presumed_annual` income.
///
/// The full amount is paid up to `taper_low`, nothing from `taper_high`, and
/// a linear share in between.
pub fn income_bonus(presumed_annual: Decimal, config: &BonusConfig) -> EngineResult<Decimal> {
    if presumed_annual <= config.taper_low {
        Ok(config.full_amount)
    } else if presumed_annual < config.taper_high {
        let share = checked_div(
            config.taper_high - presumed_annual,
            config.taper_high - config.taper_low,
            "incomeBonus",
        )?;
        Ok(share * config.full_amount)
    } else {
        Ok(Decimal::ZERO)
    }
}
