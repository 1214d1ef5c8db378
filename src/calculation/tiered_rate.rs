//! Progressive (tiered) rate calculation.
//!
//! This module provides the [`Schedule`] type and the marginal-bracket
//! algorithm used for both the income tax and the regional surtax. The
//! calculator knows nothing about either: thresholds and rates come entirely
//! from the schedule it is given.
//!
//! ## Algorithm
//!
//! For each tier `i` the taxable slice is `min(V, threshold[i + 1]) - threshold[i]`,
//! floored at zero, with the last tier unbounded. The amount owed is the sum of
//! `rate[i] * slice[i]`. Money below a threshold is always taxed at the lower
//! tier's rate, so a value sitting exactly on a threshold owes nothing at the
//! upper tier's rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single tier of a progressive schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// The value at which this tier starts applying.
    pub threshold: Decimal,
    /// The marginal rate applied to the slice of value inside this tier.
    pub rate: Decimal,
}

impl Tier {
    /// Creates a new tier.
    pub fn new(threshold: Decimal, rate: Decimal) -> Self {
        Self { threshold, rate }
    }
}

/// A validated progressive schedule.
///
/// Tiers are guaranteed to start at zero, to have strictly ascending
/// thresholds and to carry rates in `[0, 1]`. The guarantee holds for
/// schedules deserialized from configuration as well, since deserialization
/// goes through [`Schedule::new`].
///
/// # Example
///
/// ```
/// use netpay_engine::calculation::{Schedule, Tier};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let schedule = Schedule::new(vec![
///     Tier::new(dec("0"), dec("0.23")),
///     Tier::new(dec("15000"), dec("0.27")),
///     Tier::new(dec("28000"), dec("0.38")),
/// ])
/// .unwrap();
///
/// assert_eq!(schedule.amount_owed(dec("28000")), dec("6960"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct Schedule {
    tiers: Vec<Tier>,
}

impl Schedule {
    /// Validates the tiers and builds a schedule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchedule` if:
    /// - the schedule has no tiers
    /// - the first threshold is not zero
    /// - thresholds are not strictly ascending (unsorted or duplicated)
    /// - any rate is outside `[0, 1]`
    pub fn new(tiers: Vec<Tier>) -> EngineResult<Self> {
        let Some(first) = tiers.first() else {
            return Err(EngineError::InvalidSchedule {
                message: "a schedule needs at least one tier".to_string(),
            });
        };

        if !first.threshold.is_zero() {
            return Err(EngineError::InvalidSchedule {
                message: format!("first threshold must be 0, got {}", first.threshold),
            });
        }

        for (i, tier) in tiers.iter().enumerate() {
            if tier.rate < Decimal::ZERO || tier.rate > Decimal::ONE {
                return Err(EngineError::InvalidSchedule {
                    message: format!("tier {} has rate {} outside [0, 1]", i, tier.rate),
                });
            }
        }

        for (i, pair) in tiers.windows(2).enumerate() {
            if pair[1].threshold <= pair[0].threshold {
                return Err(EngineError::InvalidSchedule {
                    message: format!(
                        "thresholds must be strictly ascending: tier {} ({}) follows tier {} ({})",
                        i + 1,
                        pair[1].threshold,
                        i,
                        pair[0].threshold
                    ),
                });
            }
        }

        Ok(Self { tiers })
    }

    /// Builds a schedule from built-in tiers that are valid by construction.
    pub(crate) fn new_unchecked(tiers: Vec<Tier>) -> Self {
        debug_assert!(Schedule::new(tiers.clone()).is_ok());
        Self { tiers }
    }

    /// Returns the tiers in ascending threshold order.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Computes the total amount owed on `value` under this schedule.
    ///
    /// Values at or below zero owe nothing. Rates never exceed one, so the
    /// amount owed never exceeds `value` and every finite input has a result.
    pub fn amount_owed(&self, value: Decimal) -> Decimal {
        if value <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        self.tiers
            .iter()
            .enumerate()
            .fold(Decimal::ZERO, |total, (i, tier)| {
                let upper = self
                    .tiers
                    .get(i + 1)
                    .map_or(value, |next| value.min(next.threshold));
                let slice = (upper - tier.threshold).max(Decimal::ZERO);
                total.saturating_add(tier.rate.saturating_mul(slice))
            })
    }
}

impl TryFrom<Vec<Tier>> for Schedule {
    type Error = EngineError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        Schedule::new(tiers)
    }
}

impl From<Schedule> for Vec<Tier> {
    fn from(schedule: Schedule) -> Self {
        schedule.tiers
    }
}
