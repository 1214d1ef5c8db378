//! The Italian payroll rule set.
//!
//! This module expresses gross-to-net payroll as a [`GraphSpec`]: daily pay,
//! annual gross, social contributions (standard or apprentice rate), taxable
//! income, progressive income tax less the employee tax credit, regional
//! surtax, the tapered income bonus, and finally net monthly pay.
//!
//! [`PayrollCalculator`] builds the spec once from a [`PayrollConfig`] and
//! evaluates it for any number of inputs.

pub mod curve;
pub mod fields;
mod input;
mod policy;
mod rules;

use std::time::Instant;

use tracing::info;

use crate::config::PayrollConfig;
use crate::engine::{GraphSpec, evaluate, evaluate_with_trace};
use crate::error::EngineResult;
use crate::models::{EvaluationTrace, InputRecord, OutputRecord};

pub use curve::{CurvePoint, CurveRange, SalaryCurve};
pub use input::PayrollInput;
pub use policy::{
    annual_tax_credit, income_bonus, monthly_income_tax, monthly_regional_surtax,
    monthly_tax_credit,
};
pub use rules::rule_set;

/// Evaluates the payroll rule set for a single input.
///
/// The graph spec is built from `config` on every call; use a
/// [`PayrollCalculator`] to evaluate many inputs against one configuration.
///
/// # Example
///
/// ```
/// use netpay_engine::config::PayrollConfig;
/// use netpay_engine::models::InputRecord;
/// use netpay_engine::payroll::{calculate, PayrollInput};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input: InputRecord = PayrollInput::new(Decimal::from(2000)).into();
/// let output = calculate(&PayrollConfig::default(), &input).unwrap();
///
/// assert_eq!(output.get("netMonthly").unwrap(), Decimal::from_str("1455.94").unwrap());
/// ```
pub fn calculate(config: &PayrollConfig, input: &InputRecord) -> EngineResult<OutputRecord> {
    PayrollCalculator::new(config)?.calculate(input)
}

/// The payroll rule set built once and reused across evaluations.
///
/// The calculator only holds the immutable graph spec, so it can be shared
/// between threads and used for concurrent evaluations.
#[derive(Debug)]
pub struct PayrollCalculator {
    spec: GraphSpec,
}

impl PayrollCalculator {
    /// Builds the rule set from `config`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if `config` is invalid.
    pub fn new(config: &PayrollConfig) -> EngineResult<Self> {
        Ok(Self {
            spec: rule_set(config)?,
        })
    }

    /// Returns the underlying graph spec.
    pub fn spec(&self) -> &GraphSpec {
        &self.spec
    }

    /// Evaluates every payroll field for `input`.
    pub fn calculate(&self, input: &InputRecord) -> EngineResult<OutputRecord> {
        evaluate(&self.spec, input)
    }

    /// Evaluates every payroll field for `input` and returns the trace too.
    pub fn calculate_with_trace(
        &self,
        input: &InputRecord,
    ) -> EngineResult<(OutputRecord, EvaluationTrace)> {
        let start_time = Instant::now();
        let (output, trace) = evaluate_with_trace(&self.spec, input)?;

        info!(
            net_monthly = %output.get(fields::NET_MONTHLY)?,
            steps = trace.steps.len(),
            duration_us = start_time.elapsed().as_micros() as u64,
            "Payroll calculation completed"
        );

        Ok((output, trace))
    }
}
