//! The derived-field evaluator.
//!
//! A [`GraphSpec`] declares named derivation rules; [`evaluate`] resolves all
//! of them against an input record, inferring the evaluation order from the
//! fields each rule reads through [`Outputs::get`].

mod graph_spec;
mod session;

pub use graph_spec::{DerivationRule, GraphSpec, GraphSpecBuilder};
pub use session::{Outputs, evaluate, evaluate_with_trace};
