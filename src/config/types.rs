//! Configuration types for the payroll rule set.
//!
//! This module contains the strongly-typed configuration structures that are
//! deserialized from YAML. Every constant the payroll rules use lives here,
//! so swapping rates or brackets never touches the evaluator or the
//! tiered-rate calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{Schedule, Tier, percent};
use crate::error::{EngineError, EngineResult};

/// Descriptive metadata about a payroll configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollMetadata {
    /// The human-readable name of the configuration.
    pub name: String,
    /// The region whose surtax schedule is configured.
    pub region: String,
}

/// Income tax configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxConfig {
    /// The progressive schedule applied to taxable annual income.
    pub schedule: Schedule,
    /// Taxable annual income at or below which no income tax is due.
    pub exemption_threshold: Decimal,
}

/// Social contribution configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionConfig {
    /// Employee contribution rate for standard contracts.
    pub standard_rate: Decimal,
    /// Employee contribution rate for apprenticeship contracts.
    pub apprentice_rate: Decimal,
    /// Solidarity contribution rate on the rounded contribution base.
    pub solidarity_rate: Decimal,
    /// Fixed monthly supplementary health fund withholding.
    pub supplementary_fund: Decimal,
    /// Fixed monthly bilateral body contribution.
    pub bilateral_contribution: Decimal,
}

/// Employee tax credit configuration.
///
/// The annual credit has three bands on gross annual income `G`:
/// - `G <= full_credit_limit`: `full_credit`
/// - `G <= middle_limit`: `middle_base_credit + middle_variable_credit * (middle_limit - G) / (middle_limit - full_credit_limit)`
/// - `G <= upper_limit`: `middle_base_credit * (upper_limit - G) / (upper_limit - middle_limit)`
/// - above: nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCreditConfig {
    /// Days the annual credit is spread over.
    pub days_per_year: Decimal,
    /// Upper bound of the full-credit band.
    pub full_credit_limit: Decimal,
    /// Annual credit in the full-credit band.
    pub full_credit: Decimal,
    /// Upper bound of the middle band.
    pub middle_limit: Decimal,
    /// Fixed part of the middle-band credit.
    pub middle_base_credit: Decimal,
    /// Variable part of the middle-band credit.
    pub middle_variable_credit: Decimal,
    /// Income above which no credit is due.
    pub upper_limit: Decimal,
}

/// Income bonus configuration.
///
/// The full monthly bonus is paid up to `taper_low` of presumed annual income
/// and shrinks linearly to zero at `taper_high`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusConfig {
    /// The monthly bonus below the taper window.
    pub full_amount: Decimal,
    /// Start of the taper window.
    pub taper_low: Decimal,
    /// End of the taper window.
    pub taper_high: Decimal,
}

/// The complete payroll configuration.
///
/// `PayrollConfig::default()` carries the built-in Italian constants; a YAML
/// file loaded through [`ConfigLoader`](super::ConfigLoader) can replace them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Configuration metadata.
    pub metadata: PayrollMetadata,
    /// Income tax settings.
    pub income_tax: IncomeTaxConfig,
    /// Regional surtax schedule on taxable annual income.
    pub regional_surtax: Schedule,
    /// Social contribution settings.
    pub contributions: ContributionConfig,
    /// Tax credit bands.
    pub tax_credit: TaxCreditConfig,
    /// Income bonus taper.
    pub bonus: BonusConfig,
}

impl PayrollConfig {
    /// Checks the constraints that deserialization alone cannot express.
    ///
    /// Schedules are already validated when they are built; this checks the
    /// remaining rates, amounts and band limits.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        let contributions = &self.contributions;
        for (field, rate) in [
            ("contributions.standard_rate", contributions.standard_rate),
            ("contributions.apprentice_rate", contributions.apprentice_rate),
            ("contributions.solidarity_rate", contributions.solidarity_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(invalid(field, format!("rate {} is outside [0, 1]", rate)));
            }
        }

        for (field, amount) in [
            ("contributions.supplementary_fund", contributions.supplementary_fund),
            ("contributions.bilateral_contribution", contributions.bilateral_contribution),
            ("income_tax.exemption_threshold", self.income_tax.exemption_threshold),
            ("bonus.full_amount", self.bonus.full_amount),
        ] {
            if amount < Decimal::ZERO {
                return Err(invalid(field, format!("amount {} is negative", amount)));
            }
        }

        if self.bonus.taper_low >= self.bonus.taper_high {
            return Err(invalid(
                "bonus.taper_low",
                format!(
                    "taper window [{}, {}] is empty",
                    self.bonus.taper_low, self.bonus.taper_high
                ),
            ));
        }

        let credit = &self.tax_credit;
        if credit.days_per_year <= Decimal::ZERO {
            return Err(invalid("tax_credit.days_per_year", "must be positive"));
        }
        if !(Decimal::ZERO <= credit.full_credit_limit
            && credit.full_credit_limit < credit.middle_limit
            && credit.middle_limit < credit.upper_limit)
        {
            return Err(invalid(
                "tax_credit.middle_limit",
                "band limits must be strictly ascending",
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::Configuration {
        field: field.to_string(),
        message: message.into(),
    }
}

fn tier(threshold: i64, rate_percent: Decimal) -> Tier {
    Tier::new(Decimal::from(threshold), percent(rate_percent))
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            metadata: PayrollMetadata {
                name: "Italian employee payroll".to_string(),
                region: "Lombardia".to_string(),
            },
            income_tax: IncomeTaxConfig {
                schedule: Schedule::new_unchecked(vec![
                    tier(0, Decimal::from(23)),
                    tier(15_000, Decimal::from(27)),
                    tier(28_000, Decimal::from(38)),
                    tier(55_000, Decimal::from(41)),
                    tier(75_000, Decimal::from(43)),
                ]),
                exemption_threshold: Decimal::from(5_000),
            },
            regional_surtax: Schedule::new_unchecked(vec![
                tier(0, Decimal::new(123, 2)),
                tier(15_000, Decimal::new(158, 2)),
                tier(28_000, Decimal::new(172, 2)),
                tier(55_000, Decimal::new(173, 2)),
                tier(75_000, Decimal::new(174, 2)),
            ]),
            contributions: ContributionConfig {
                standard_rate: percent(Decimal::new(919, 2)),
                apprentice_rate: percent(Decimal::new(584, 2)),
                solidarity_rate: Decimal::ZERO,
                supplementary_fund: Decimal::from(2),
                bilateral_contribution: Decimal::ZERO,
            },
            tax_credit: TaxCreditConfig {
                days_per_year: Decimal::from(365),
                full_credit_limit: Decimal::from(8_000),
                full_credit: Decimal::from(1_880),
                middle_limit: Decimal::from(28_000),
                middle_base_credit: Decimal::from(978),
                middle_variable_credit: Decimal::from(902),
                upper_limit: Decimal::from(55_000),
            },
            bonus: BonusConfig {
                full_amount: Decimal::new(8153, 2),
                taper_low: Decimal::from(24_000),
                taper_high: Decimal::from(26_000),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(PayrollConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_rates() {
        let config = PayrollConfig::default();
        assert_eq!(config.contributions.standard_rate, dec("0.0919"));
        assert_eq!(config.contributions.apprentice_rate, dec("0.0584"));
        assert_eq!(config.income_tax.schedule.tiers()[1].rate, dec("0.27"));
        assert_eq!(config.regional_surtax.tiers()[0].rate, dec("0.0123"));
        assert_eq!(config.bonus.full_amount, dec("81.53"));
    }

    #[test]
    fn test_empty_taper_window_is_rejected() {
        let mut config = PayrollConfig::default();
        config.bonus.taper_high = config.bonus.taper_low;

        match config.validate() {
            Err(EngineError::Configuration { field, .. }) => assert_eq!(field, "bonus.taper_low"),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_contribution_rate_out_of_range_is_rejected() {
        let mut config = PayrollConfig::default();
        config.contributions.apprentice_rate = dec("5.84");

        match config.validate() {
            Err(EngineError::Configuration { field, .. }) => {
                assert_eq!(field, "contributions.apprentice_rate")
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let mut config = PayrollConfig::default();
        config.contributions.supplementary_fund = dec("-2");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unordered_credit_bands_are_rejected() {
        let mut config = PayrollConfig::default();
        config.tax_credit.middle_limit = dec("60000");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_days_per_year_is_rejected() {
        let mut config = PayrollConfig::default();
        config.tax_credit.days_per_year = Decimal::ZERO;
        assert!(config.validate().is_err());
    }
}
