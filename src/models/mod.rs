//! Data models exchanged with the net salary engine.
//!
//! This module contains the input record callers supply, the output record
//! the evaluator returns and the optional evaluation trace.

mod evaluation_trace;
mod input_record;
mod output_record;

pub use evaluation_trace::{EvaluationTrace, TraceStep};
pub use input_record::InputRecord;
pub use output_record::OutputRecord;
