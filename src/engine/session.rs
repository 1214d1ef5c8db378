//! Lazy, memoized evaluation of a graph spec.
//!
//! [`evaluate`] resolves every field of a [`GraphSpec`] against one
//! [`InputRecord`]. There is no dependency declaration and no topological
//! sort: each rule reads the fields it needs through [`Outputs::get`], and a
//! field is computed the first time something asks for it.
//!
//! ## Resolution
//!
//! `get(name)`:
//! 1. memoized: return the stored value without calling the rule again
//! 2. currently being computed: fail with `CircularDependency`
//! 3. not declared: fail with `UnknownField`
//! 4. otherwise mark it in progress, run its rule, memoize and return
//!
//! After that, every declared field is forced in declaration order so the
//! output record is complete even for fields nothing else reads.
//!
//! Session state (memo table, in-progress marks) belongs to one call of
//! [`evaluate`] and is dropped when it returns, so evaluations never observe
//! each other's values.

use std::iter;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{EvaluationTrace, InputRecord, OutputRecord, TraceStep};

use super::graph_spec::GraphSpec;

/// The output accessor handed to every derivation rule.
///
/// Holds the per-evaluation memo table and the stack of fields currently
/// being computed. It is only ever reachable through `&mut`, so one session
/// is driven by exactly one rule at a time.
pub struct Outputs<'a> {
    spec: &'a GraphSpec,
    input: &'a InputRecord,
    memo: Vec<Option<Decimal>>,
    in_progress: Vec<bool>,
    stack: Vec<usize>,
    recorder: Option<TraceRecorder>,
}

impl<'a> Outputs<'a> {
    fn new(spec: &'a GraphSpec, input: &'a InputRecord, traced: bool) -> Self {
        Self {
            spec,
            input,
            memo: vec![None; spec.len()],
            in_progress: vec![false; spec.len()],
            stack: Vec::new(),
            recorder: traced.then(TraceRecorder::default),
        }
    }

    /// Returns the value of field `name`, computing it on first access.
    ///
    /// # Errors
    ///
    /// - `UnknownField` if the spec does not declare `name`
    /// - `CircularDependency` if `name` is already being computed further up
    ///   the current chain of accesses
    /// - any error returned by the rule of `name` or of a field it reads
    pub fn get(&mut self, name: &str) -> EngineResult<Decimal> {
        let position = self
            .spec
            .position(name)
            .ok_or_else(|| EngineError::UnknownField {
                name: name.to_string(),
            })?;

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record_read(position);
        }

        self.resolve(position)
    }

    /// Returns the raw input record of this evaluation.
    pub fn input(&self) -> &InputRecord {
        self.input
    }

    fn resolve(&mut self, position: usize) -> EngineResult<Decimal> {
        if let Some(value) = self.memo[position] {
            return Ok(value);
        }

        if self.in_progress[position] {
            return Err(self.cycle_error(position));
        }

        let spec = self.spec;
        let input = self.input;

        self.in_progress[position] = true;
        self.stack.push(position);
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.enter();
        }

        let result = (spec.rule(position))(input, self);

        self.stack.pop();
        self.in_progress[position] = false;

        match result {
            Ok(value) => {
                self.memo[position] = Some(value);
                if let Some(recorder) = self.recorder.as_mut() {
                    recorder.leave(spec, position, value);
                }
                Ok(value)
            }
            Err(err) => {
                // A caller may recover from this error, so its reads must
                // not end up in the caller's frame.
                if let Some(recorder) = self.recorder.as_mut() {
                    recorder.abandon();
                }
                Err(err)
            }
        }
    }

    fn cycle_error(&self, position: usize) -> EngineError {
        let start = self
            .stack
            .iter()
            .position(|&p| p == position)
            .unwrap_or(0);

        let cycle = self.stack[start..]
            .iter()
            .chain(iter::once(&position))
            .map(|&p| self.spec.name(p).to_string())
            .collect();

        EngineError::CircularDependency { cycle }
    }

    fn into_parts(self) -> EngineResult<(OutputRecord, Option<EvaluationTrace>)> {
        let spec = self.spec;
        let fields = self
            .memo
            .into_iter()
            .enumerate()
            .map(|(position, value)| {
                let name = spec.name(position).to_string();
                match value {
                    Some(value) => Ok((name, value)),
                    None => Err(EngineError::UnknownField { name }),
                }
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let trace = self.recorder.map(|recorder| EvaluationTrace {
            steps: recorder.steps,
            duration_us: 0,
        });

        Ok((OutputRecord::from_ordered(fields), trace))
    }
}

#[derive(Default)]
struct TraceRecorder {
    frames: Vec<Vec<usize>>,
    steps: Vec<TraceStep>,
}

impl TraceRecorder {
    fn record_read(&mut self, position: usize) {
        if let Some(frame) = self.frames.last_mut() {
            if !frame.contains(&position) {
                frame.push(position);
            }
        }
    }

    fn enter(&mut self) {
        self.frames.push(Vec::new());
    }

    fn abandon(&mut self) {
        self.frames.pop();
    }

    fn leave(&mut self, spec: &GraphSpec, position: usize, value: Decimal) {
        let reads = self.frames.pop().unwrap_or_default();
        self.steps.push(TraceStep {
            step_number: self.steps.len() as u32 + 1,
            field: spec.name(position).to_string(),
            value,
            dependencies: reads.iter().map(|&p| spec.name(p).to_string()).collect(),
        });
    }
}

/// Resolves every field of `spec` against `input`.
///
/// Each rule runs at most once, and never before the fields it reads have
/// been resolved. The returned record lists fields in declaration order.
///
/// # Errors
///
/// Returns the first error hit while resolving: `UnknownField`,
/// `CircularDependency`, or whatever a rule returned (`MissingInput`,
/// `InvalidNumber`, ...). The error only aborts this evaluation.
///
/// # Example
///
/// ```
/// use netpay_engine::engine::{evaluate, GraphSpec};
/// use netpay_engine::models::InputRecord;
/// use rust_decimal::Decimal;
///
/// let spec = GraphSpec::builder()
///     .field("total", |_, o| Ok(o.get("a")? + o.get("b")?))
///     .field("a", |i, _| i.get("x"))
///     .field("b", |_, o| Ok(o.get("a")? * Decimal::TEN))
///     .build()
///     .unwrap();
///
/// let output = evaluate(&spec, &InputRecord::new().with("x", Decimal::ONE)).unwrap();
/// assert_eq!(output.get("total").unwrap(), Decimal::from(11));
/// ```
pub fn evaluate(spec: &GraphSpec, input: &InputRecord) -> EngineResult<OutputRecord> {
    run(spec, input, false).map(|(record, _)| record)
}

/// Resolves every field like [`evaluate`] and also returns the trace of how
/// the fields were resolved.
pub fn evaluate_with_trace(
    spec: &GraphSpec,
    input: &InputRecord,
) -> EngineResult<(OutputRecord, EvaluationTrace)> {
    run(spec, input, true).map(|(record, trace)| (record, trace.unwrap_or_default()))
}

fn run(
    spec: &GraphSpec,
    input: &InputRecord,
    traced: bool,
) -> EngineResult<(OutputRecord, Option<EvaluationTrace>)> {
    let start_time = Instant::now();
    let mut outputs = Outputs::new(spec, input, traced);

    for position in 0..spec.len() {
        if let Err(err) = outputs.resolve(position) {
            warn!(
                field = spec.name(position),
                error = %err,
                "Evaluation failed"
            );
            return Err(err);
        }
    }

    let (record, mut trace) = outputs.into_parts()?;
    let duration = start_time.elapsed();
    if let Some(trace) = trace.as_mut() {
        trace.duration_us = duration.as_micros() as u64;
    }

    debug!(
        fields = record.len(),
        duration_us = duration.as_micros() as u64,
        "Evaluation completed"
    );

    Ok((record, trace))
}
