//! The payroll rule set.
//!
//! Every payroll quantity is one field of a [`GraphSpec`]. Rules read raw
//! inputs from the [`InputRecord`](crate::models::InputRecord) and other
//! quantities through the output accessor; the evaluator works out the order.
//!
//! Some fields are rounded as soon as they are computed and later rules
//! consume the rounded value. That mirrors how the amounts appear on a real
//! payslip, and the totals depend on it.

use rust_decimal::Decimal;

use crate::calculation::{
    checked_add, checked_div, checked_mul, checked_sub, round_to_cents, round_to_unit,
};
use crate::config::PayrollConfig;
use crate::engine::GraphSpec;
use crate::error::EngineResult;

use super::fields::{self, inputs};
use super::policy::{
    TAX_MONTHS, income_bonus, monthly_income_tax, monthly_regional_surtax, monthly_tax_credit,
};

/// Builds the payroll graph spec from `config`.
///
/// The configuration is validated first and its values are copied into the
/// rules, so the returned spec does not borrow from `config`.
///
/// # Errors
///
/// Returns `Configuration` if `config` fails [`PayrollConfig::validate`].
pub fn rule_set(config: &PayrollConfig) -> EngineResult<GraphSpec> {
    config.validate()?;

    let standard_rate = config.contributions.standard_rate;
    let apprentice_rate = config.contributions.apprentice_rate;
    let solidarity_rate = config.contributions.solidarity_rate;
    let supplementary_fund = config.contributions.supplementary_fund;
    let bilateral_contribution = config.contributions.bilateral_contribution;
    let income_tax = config.income_tax.clone();
    let tax_credit = config.tax_credit.clone();
    let regional_surtax = config.regional_surtax.clone();
    let bonus = config.bonus.clone();

    GraphSpec::builder()
        .field(fields::DAILY_PAY, |i, _| {
            let daily = checked_div(
                i.get(inputs::GROSS_MONTHLY)?,
                i.get(inputs::PAID_DAYS_PER_MONTH)?,
                fields::DAILY_PAY,
            )?;
            Ok(round_to_cents(daily))
        })
        .field(fields::GROSS_MONTHLY, |i, _| {
            Ok(round_to_cents(i.get(inputs::GROSS_MONTHLY)?))
        })
        .field(fields::GROSS_ANNUAL, |i, _| {
            let annual = checked_mul(
                i.get(inputs::GROSS_MONTHLY)?,
                i.get(inputs::MONTHS_PER_YEAR)?,
                fields::GROSS_ANNUAL,
            )?;
            Ok(round_to_cents(annual))
        })
        .field(fields::UNUSED_HOLIDAY_PAY, |i, o| {
            checked_mul(
                o.get(fields::DAILY_PAY)?,
                i.get(inputs::UNUSED_HOLIDAY_DAYS)?,
                fields::UNUSED_HOLIDAY_PAY,
            )
        })
        .field(fields::CONTRIBUTION_BASE, |i, o| {
            let base = checked_add(
                i.get(inputs::GROSS_MONTHLY)?,
                o.get(fields::UNUSED_HOLIDAY_PAY)?,
                fields::CONTRIBUTION_BASE,
            )?;
            Ok(round_to_cents(base))
        })
        .field(fields::CONTRIBUTION_BASE_ROUNDED, |_, o| {
            Ok(round_to_unit(o.get(fields::CONTRIBUTION_BASE)?))
        })
        // INPS
        .field(fields::SOCIAL_CONTRIBUTION, move |i, o| {
            let rate = if i.flag(inputs::APPRENTICESHIP)? {
                apprentice_rate
            } else {
                standard_rate
            };
            checked_mul(
                rate,
                o.get(fields::CONTRIBUTION_BASE_ROUNDED)?,
                fields::SOCIAL_CONTRIBUTION,
            )
        })
        .field(fields::SUPPLEMENTARY_FUND, move |_, _| Ok(supplementary_fund))
        .field(fields::SOLIDARITY_CONTRIBUTION, move |_, o| {
            let solidarity = checked_mul(
                solidarity_rate,
                o.get(fields::CONTRIBUTION_BASE_ROUNDED)?,
                fields::SOLIDARITY_CONTRIBUTION,
            )?;
            Ok(round_to_cents(solidarity))
        })
        .field(fields::TOTAL_SOCIAL_WITHHOLDINGS, |_, o| {
            let total = checked_add(
                o.get(fields::SOCIAL_CONTRIBUTION)?,
                o.get(fields::SOLIDARITY_CONTRIBUTION)?,
                fields::TOTAL_SOCIAL_WITHHOLDINGS,
            )?;
            Ok(round_to_cents(total))
        })
        .field(fields::BILATERAL_CONTRIBUTION, move |_, _| {
            Ok(bilateral_contribution)
        })
        // IRPEF
        .field(fields::TAXABLE_MONTHLY, |_, o| {
            checked_sub(
                o.get(fields::CONTRIBUTION_BASE)?,
                o.get(fields::TOTAL_SOCIAL_WITHHOLDINGS)?,
                fields::TAXABLE_MONTHLY,
            )
        })
        .field(fields::TAXABLE_ANNUAL, |_, o| {
            checked_mul(o.get(fields::TAXABLE_MONTHLY)?, TAX_MONTHS, fields::TAXABLE_ANNUAL)
        })
        .field(fields::GROSS_INCOME_TAX, move |_, o| {
            let taxable_annual = o.get(fields::TAXABLE_ANNUAL)?;
            Ok(round_to_cents(monthly_income_tax(taxable_annual, &income_tax)))
        })
        .field(fields::TAX_CREDIT, move |i, o| {
            let credit = monthly_tax_credit(
                o.get(fields::GROSS_ANNUAL)?,
                i.get(inputs::CALENDAR_DAYS_PER_MONTH)?,
                &tax_credit,
            )?;
            Ok(round_to_cents(credit))
        })
        // Negative when the credit exceeds the tax; the excess raises net pay.
        .field(fields::NET_INCOME_TAX, |_, o| {
            checked_sub(
                o.get(fields::GROSS_INCOME_TAX)?,
                o.get(fields::TAX_CREDIT)?,
                fields::NET_INCOME_TAX,
            )
        })
        .field(fields::REGIONAL_SURTAX, move |_, o| {
            let taxable_annual = o.get(fields::TAXABLE_ANNUAL)?;
            Ok(monthly_regional_surtax(taxable_annual, &regional_surtax))
        })
        // Income bonus
        .field(fields::PRESUMED_ANNUAL_INCOME, |i, o| {
            checked_mul(
                o.get(fields::TAXABLE_MONTHLY)?,
                i.get(inputs::MONTHS_PER_YEAR)?,
                fields::PRESUMED_ANNUAL_INCOME,
            )
        })
        .field(fields::INCOME_BONUS, move |_, o| {
            income_bonus(o.get(fields::PRESUMED_ANNUAL_INCOME)?, &bonus)
        })
        // Totals
        .field(fields::TOTAL_WITHHOLDINGS, |_, o| {
            [
                o.get(fields::SOCIAL_CONTRIBUTION)?,
                o.get(fields::SOLIDARITY_CONTRIBUTION)?,
                o.get(fields::SUPPLEMENTARY_FUND)?,
                o.get(fields::BILATERAL_CONTRIBUTION)?,
                o.get(fields::NET_INCOME_TAX)?,
                o.get(fields::REGIONAL_SURTAX)?,
            ]
            .into_iter()
            .try_fold(Decimal::ZERO, |total, amount| {
                checked_add(total, amount, fields::TOTAL_WITHHOLDINGS)
            })
        })
        .field(fields::TOTAL_COMPENSATION, |_, o| {
            checked_add(
                o.get(fields::CONTRIBUTION_BASE)?,
                o.get(fields::INCOME_BONUS)?,
                fields::TOTAL_COMPENSATION,
            )
        })
        .field(fields::NET_MONTHLY, |_, o| {
            let net = checked_sub(
                o.get(fields::TOTAL_COMPENSATION)?,
                o.get(fields::TOTAL_WITHHOLDINGS)?,
                fields::NET_MONTHLY,
            )?;
            Ok(round_to_cents(net))
        })
        // Statistics
        .field(fields::NET_WITHOUT_BONUS, |_, o| {
            checked_sub(
                o.get(fields::NET_MONTHLY)?,
                o.get(fields::INCOME_BONUS)?,
                fields::NET_WITHOUT_BONUS,
            )
        })
        .field(fields::TAX_RATE, |i, o| {
            let gross = i.get(inputs::GROSS_MONTHLY)?;
            let withheld = checked_sub(gross, o.get(fields::NET_MONTHLY)?, fields::TAX_RATE)?;
            checked_div(withheld, gross, fields::TAX_RATE)
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{evaluate, evaluate_with_trace};
    use crate::error::EngineError;
    use crate::models::{InputRecord, OutputRecord};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn reference_input() -> InputRecord {
        InputRecord::new()
            .with(inputs::GROSS_MONTHLY, dec("2000"))
            .with(inputs::PAID_DAYS_PER_MONTH, dec("26"))
            .with(inputs::CALENDAR_DAYS_PER_MONTH, dec("31"))
            .with(inputs::MONTHS_PER_YEAR, dec("14"))
            .with_flag(inputs::APPRENTICESHIP, false)
            .with(inputs::UNUSED_HOLIDAY_DAYS, Decimal::ZERO)
    }

    fn run(input: &InputRecord) -> OutputRecord {
        let spec = rule_set(&PayrollConfig::default()).unwrap();
        evaluate(&spec, input).unwrap()
    }

    /// PR-001: reference profile intermediate values
    #[test]
    fn test_reference_profile_intermediates() {
        let output = run(&reference_input());

        assert_eq!(output.get(fields::DAILY_PAY).unwrap(), dec("76.92"));
        assert_eq!(output.get(fields::GROSS_ANNUAL).unwrap(), dec("28000"));
        assert_eq!(output.get(fields::CONTRIBUTION_BASE).unwrap(), dec("2000"));
        assert_eq!(output.get(fields::SOCIAL_CONTRIBUTION).unwrap(), dec("183.80"));
        assert_eq!(output.get(fields::TAXABLE_MONTHLY).unwrap(), dec("1816.20"));
        assert_eq!(output.get(fields::TAXABLE_ANNUAL).unwrap(), dec("21794.40"));
        assert_eq!(output.get(fields::GROSS_INCOME_TAX).unwrap(), dec("440.37"));
        assert_eq!(output.get(fields::TAX_CREDIT).unwrap(), dec("83.06"));
        assert_eq!(output.get(fields::NET_INCOME_TAX).unwrap(), dec("357.31"));
        assert_eq!(output.get(fields::REGIONAL_SURTAX).unwrap(), dec("24.32096"));
        assert_eq!(output.get(fields::PRESUMED_ANNUAL_INCOME).unwrap(), dec("25426.8"));
        assert_eq!(output.get(fields::INCOME_BONUS).unwrap(), dec("23.366498"));
    }

    /// PR-002: reference profile net pay
    #[test]
    fn test_reference_profile_net_monthly() {
        let output = run(&reference_input());

        assert_eq!(output.get(fields::TOTAL_WITHHOLDINGS).unwrap(), dec("567.43096"));
        assert_eq!(output.get(fields::TOTAL_COMPENSATION).unwrap(), dec("2023.366498"));
        assert_eq!(output.get(fields::NET_MONTHLY).unwrap(), dec("1455.94"));
        assert_eq!(output.get(fields::NET_WITHOUT_BONUS).unwrap(), dec("1432.573502"));
        assert_eq!(output.get(fields::TAX_RATE).unwrap(), dec("0.27203"));
    }

    /// PR-003: apprentices pay the reduced rate
    #[test]
    fn test_apprentice_rate() {
        let input = reference_input().with_flag(inputs::APPRENTICESHIP, true);
        let output = run(&input);

        assert_eq!(output.get(fields::SOCIAL_CONTRIBUTION).unwrap(), dec("116.80"));
        assert_eq!(output.get(fields::TAXABLE_MONTHLY).unwrap(), dec("1883.20"));
    }

    #[test]
    fn test_unused_holidays_raise_contribution_base() {
        let input = reference_input().with(inputs::UNUSED_HOLIDAY_DAYS, dec("2"));
        let output = run(&input);

        assert_eq!(output.get(fields::UNUSED_HOLIDAY_PAY).unwrap(), dec("153.84"));
        assert_eq!(output.get(fields::CONTRIBUTION_BASE).unwrap(), dec("2153.84"));
        assert_eq!(output.get(fields::CONTRIBUTION_BASE_ROUNDED).unwrap(), dec("2154"));
        assert_eq!(output.get(fields::SOCIAL_CONTRIBUTION).unwrap(), dec("197.9526"));
        assert_eq!(output.get(fields::TOTAL_SOCIAL_WITHHOLDINGS).unwrap(), dec("197.95"));
    }

    /// PR-005: unused tax credit is paid back through net pay
    #[test]
    fn test_low_income_credit_exceeds_tax() {
        let input = reference_input().with(inputs::GROSS_MONTHLY, dec("400"));
        let output = run(&input);

        // Taxable annual 4358.88 is under the exemption.
        assert_eq!(output.get(fields::GROSS_INCOME_TAX).unwrap(), Decimal::ZERO);
        assert_eq!(output.get(fields::TAX_CREDIT).unwrap(), dec("159.67"));
        assert_eq!(output.get(fields::NET_INCOME_TAX).unwrap(), dec("-159.67"));
        assert_eq!(output.get(fields::INCOME_BONUS).unwrap(), dec("81.53"));
        assert_eq!(output.get(fields::NET_MONTHLY).unwrap(), dec("597.97"));
    }

    #[test]
    fn test_credit_slightly_above_tax() {
        let input = reference_input().with(inputs::GROSS_MONTHLY, dec("700"));
        let output = run(&input);

        assert_eq!(output.get(fields::GROSS_INCOME_TAX).unwrap(), dec("146.20"));
        assert_eq!(output.get(fields::TAX_CREDIT).unwrap(), dec("152.78"));
        assert_eq!(output.get(fields::NET_INCOME_TAX).unwrap(), dec("-6.58"));
        assert_eq!(output.get(fields::NET_MONTHLY).unwrap(), dec("713.96"));
    }

    /// PR-006: amounts beyond the decimal range fail instead of panicking
    #[test]
    fn test_huge_gross_is_invalid_number() {
        let gross = dec("10000000000000000000000000000");
        let input = reference_input().with(inputs::GROSS_MONTHLY, gross);
        let spec = rule_set(&PayrollConfig::default()).unwrap();

        match evaluate(&spec, &input) {
            Err(EngineError::InvalidNumber { context, message }) => {
                assert_eq!(context, fields::GROSS_ANNUAL);
                assert!(message.contains("overflows"));
            }
            other => panic!("Expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_holiday_days_is_invalid_number() {
        let input = reference_input().with(inputs::UNUSED_HOLIDAY_DAYS, Decimal::MAX);
        let spec = rule_set(&PayrollConfig::default()).unwrap();

        match evaluate(&spec, &input) {
            Err(EngineError::InvalidNumber { context, .. }) => {
                assert_eq!(context, fields::UNUSED_HOLIDAY_PAY);
            }
            other => panic!("Expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_high_income_gets_no_bonus_or_credit() {
        let input = reference_input().with(inputs::GROSS_MONTHLY, dec("5000"));
        let output = run(&input);

        assert_eq!(output.get(fields::GROSS_ANNUAL).unwrap(), dec("70000"));
        assert_eq!(output.get(fields::TAX_CREDIT).unwrap(), Decimal::ZERO);
        assert_eq!(output.get(fields::INCOME_BONUS).unwrap(), Decimal::ZERO);
        assert_eq!(
            output.get(fields::NET_WITHOUT_BONUS).unwrap(),
            output.get(fields::NET_MONTHLY).unwrap()
        );
    }

    #[test]
    fn test_months_per_year_changes_bonus_estimate() {
        let input = reference_input().with(inputs::MONTHS_PER_YEAR, dec("13"));
        let output = run(&input);

        // 1816.20 * 13 = 23610.60, below the taper window.
        assert_eq!(output.get(fields::PRESUMED_ANNUAL_INCOME).unwrap(), dec("23610.60"));
        assert_eq!(output.get(fields::INCOME_BONUS).unwrap(), dec("81.53"));
    }

    /// PR-004: zero paid days is an explicit error
    #[test]
    fn test_zero_paid_days_is_invalid_number() {
        let input = reference_input().with(inputs::PAID_DAYS_PER_MONTH, Decimal::ZERO);
        let spec = rule_set(&PayrollConfig::default()).unwrap();

        match evaluate(&spec, &input) {
            Err(EngineError::InvalidNumber { context, .. }) => {
                assert_eq!(context, fields::DAILY_PAY);
            }
            other => panic!("Expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_input_is_reported() {
        let input = InputRecord::new().with(inputs::GROSS_MONTHLY, dec("2000"));
        let spec = rule_set(&PayrollConfig::default()).unwrap();

        assert!(matches!(
            evaluate(&spec, &input),
            Err(EngineError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = PayrollConfig::default();
        config.bonus.taper_low = config.bonus.taper_high;
        assert!(matches!(
            rule_set(&config),
            Err(EngineError::Configuration { .. })
        ));
    }

    #[test]
    fn test_output_lists_every_field_in_declaration_order() {
        let spec = rule_set(&PayrollConfig::default()).unwrap();
        let output = evaluate(&spec, &reference_input()).unwrap();

        let names: Vec<&str> = output.iter().map(|(name, _)| name).collect();
        assert_eq!(names, spec.field_names().collect::<Vec<_>>());
        assert_eq!(names.first(), Some(&fields::DAILY_PAY));
        assert_eq!(names.last(), Some(&fields::TAX_RATE));
    }

    #[test]
    fn test_trace_shows_net_monthly_dependencies() {
        let spec = rule_set(&PayrollConfig::default()).unwrap();
        let (_, trace) = evaluate_with_trace(&spec, &reference_input()).unwrap();

        assert_eq!(
            trace.dependencies_of(fields::NET_MONTHLY).unwrap(),
            &[fields::TOTAL_COMPENSATION, fields::TOTAL_WITHHOLDINGS]
        );
        assert_eq!(trace.steps.len(), spec.len());
    }
}
