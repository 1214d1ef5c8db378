//! The raw input record supplied to an evaluation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::to_decimal;
use crate::error::{EngineError, EngineResult};

/// Raw, immutable inputs for one evaluation.
///
/// Values are decimals; boolean flags are stored as `0` or `1`. Rules only
/// get a shared reference to the record, so nothing can change it while an
/// evaluation is running.
///
/// # Example
///
/// ```
/// use netpay_engine::models::InputRecord;
/// use rust_decimal::Decimal;
///
/// let input = InputRecord::new()
///     .with("grossMonthly", Decimal::from(2000))
///     .with_flag("apprenticeship", false);
///
/// assert_eq!(input.get("grossMonthly").unwrap(), Decimal::from(2000));
/// assert!(!input.flag("apprenticeship").unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputRecord {
    values: BTreeMap<String, Decimal>,
}

impl InputRecord {
    /// Creates an empty input record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record with `name` set to `value`.
    pub fn with(mut self, name: impl Into<String>, value: Decimal) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Returns the record with the flag `name` stored as `1` or `0`.
    pub fn with_flag(self, name: impl Into<String>, value: bool) -> Self {
        let stored = if value { Decimal::ONE } else { Decimal::ZERO };
        self.with(name, stored)
    }

    /// Builds a record from floating-point values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNumber` naming the first input that is NaN or infinite.
    pub fn from_f64<'a, I>(values: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut record = Self::new();
        for (name, value) in values {
            record.values.insert(name.to_string(), to_decimal(value, name)?);
        }
        Ok(record)
    }

    /// Returns the value of input `name`.
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` if the record does not contain `name`.
    pub fn get(&self, name: &str) -> EngineResult<Decimal> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| EngineError::MissingInput {
                name: name.to_string(),
            })
    }

    /// Returns input `name` read as a flag: any non-zero value is `true`.
    pub fn flag(&self, name: &str) -> EngineResult<bool> {
        Ok(!self.get(name)?.is_zero())
    }

    /// Returns an iterator over the inputs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}
