//! Evaluation trace models.
//!
//! A trace records how an evaluation resolved its fields: the order in which
//! each field finished, the value it produced and the fields its rule read.
//! It is the dependency graph the evaluator inferred, made visible.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single resolved field in the evaluation trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    /// The position at which this field finished resolving, starting at 1.
    pub step_number: u32,
    /// The field that was resolved.
    pub field: String,
    /// The value the field's rule returned.
    pub value: Decimal,
    /// The fields the rule read directly, in the order it read them.
    pub dependencies: Vec<String>,
}

/// The complete trace of one evaluation.
///
/// Steps are in resolution order, so every field appears after all the
/// fields it depends on.
///
/// # Example
///
/// ```
/// use netpay_engine::models::EvaluationTrace;
///
/// let trace = EvaluationTrace {
///     steps: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.step("netMonthly").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationTrace {
    /// The resolved fields in resolution order.
    pub steps: Vec<TraceStep>,
    /// The total evaluation duration in microseconds.
    pub duration_us: u64,
}

impl EvaluationTrace {
    /// Returns the step that resolved `field`, if any.
    pub fn step(&self, field: &str) -> Option<&TraceStep> {
        self.steps.iter().find(|s| s.field == field)
    }

    /// Returns the direct dependencies recorded for `field`.
    pub fn dependencies_of(&self, field: &str) -> Option<&[String]> {
        self.step(field).map(|s| s.dependencies.as_slice())
    }
}
