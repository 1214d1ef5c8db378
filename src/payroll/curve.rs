//! Salary curves: the payroll rule set evaluated across a range of gross pay.
//!
//! A curve is the data behind a chart of net pay (or any other field) against
//! gross monthly pay. Drawing it is left to the caller.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::debug;

use crate::calculation::{checked_div, checked_sub};
use crate::error::{EngineError, EngineResult};
use crate::models::{InputRecord, OutputRecord};

use super::PayrollCalculator;
use super::fields::inputs;

/// Upper bound on the number of points a single curve may hold.
pub const MAX_CURVE_POINTS: usize = 10_000;

/// An inclusive range of gross monthly pay sampled every `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurveRange {
    /// The first gross monthly pay.
    pub start: Decimal,
    /// The last gross monthly pay (included if the steps land on it).
    pub end: Decimal,
    /// The distance between samples.
    pub step: Decimal,
}

impl CurveRange {
    /// Creates a new range.
    pub fn new(start: Decimal, end: Decimal, step: Decimal) -> Self {
        Self { start, end, step }
    }

    fn validate(&self) -> EngineResult<usize> {
        if self.step <= Decimal::ZERO {
            return Err(EngineError::Configuration {
                field: "step".to_string(),
                message: format!("step must be positive, got {}", self.step),
            });
        }
        if self.start > self.end {
            return Err(EngineError::Configuration {
                field: "start".to_string(),
                message: format!("start {} is after end {}", self.start, self.end),
            });
        }

        let span = checked_sub(self.end, self.start, "step")?;
        let count = checked_div(span, self.step, "step")?.floor() + Decimal::ONE;
        if count > Decimal::from(MAX_CURVE_POINTS as u64) {
            return Err(EngineError::Configuration {
                field: "step".to_string(),
                message: format!(
                    "range would produce {} points, more than {}",
                    count, MAX_CURVE_POINTS
                ),
            });
        }

        Ok(count.to_usize().unwrap_or(MAX_CURVE_POINTS))
    }
}

/// One sample of a salary curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurvePoint {
    /// The gross monthly pay this point was evaluated at.
    pub gross_monthly: Decimal,
    /// The full output record for that gross pay.
    pub output: OutputRecord,
}

/// The payroll rule set evaluated at each gross pay of a [`CurveRange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryCurve {
    points: Vec<CurvePoint>,
}

impl SalaryCurve {
    /// Returns the points in ascending gross pay order.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Returns the polyline of `field` against gross monthly pay.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the output records have no such field.
    pub fn series(&self, field: &str) -> EngineResult<Vec<(Decimal, Decimal)>> {
        self.points
            .iter()
            .map(|point| Ok((point.gross_monthly, point.output.get(field)?)))
            .collect()
    }
}

impl PayrollCalculator {
    /// Evaluates the rule set for every gross monthly pay in `range`.
    ///
    /// All inputs other than gross monthly pay are taken from `template`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for an empty, reversed or oversized range,
    /// `InvalidNumber` for a range wider than the decimal type can measure,
    /// and the first evaluation error otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use netpay_engine::config::PayrollConfig;
    /// use netpay_engine::models::InputRecord;
    /// use netpay_engine::payroll::{CurveRange, PayrollCalculator, PayrollInput};
    /// use rust_decimal::Decimal;
    ///
    /// let calculator = PayrollCalculator::new(&PayrollConfig::default()).unwrap();
    /// let template: InputRecord = PayrollInput::new(Decimal::ZERO).into();
    /// let range = CurveRange::new(Decimal::from(1000), Decimal::from(3000), Decimal::from(500));
    ///
    /// let curve = calculator.salary_curve(&template, &range).unwrap();
    /// assert_eq!(curve.points().len(), 5);
    /// ```
    pub fn salary_curve(
        &self,
        template: &InputRecord,
        range: &CurveRange,
    ) -> EngineResult<SalaryCurve> {
        let count = range.validate()?;
        let mut points = Vec::with_capacity(count);

        for n in 0..count {
            // Never past `end`, so this stays in range.
            let gross = range.start + range.step * Decimal::from(n as u64);
            let input = template.clone().with(inputs::GROSS_MONTHLY, gross);
            let output = self.calculate(&input)?;
            points.push(CurvePoint {
                gross_monthly: gross,
                output,
            });
        }

        debug!(points = points.len(), "Salary curve computed");

        Ok(SalaryCurve { points })
    }
}
