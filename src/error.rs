//! Error types for the net salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the evaluator, the tiered-rate calculator and the
//! payroll configuration can report.

use thiserror::Error;

/// The main error type for the net salary engine.
///
/// Every error is local to the call that produced it: a failed evaluation
/// leaves no state behind that could affect another evaluation.
///
/// # Example
///
/// ```
/// use netpay_engine::error::EngineError;
///
/// let error = EngineError::UnknownField {
///     name: "netYearly".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown field: netYearly");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A graph spec or payroll configuration is malformed.
    #[error("Invalid configuration for '{field}': {message}")]
    Configuration {
        /// The field that violated the configuration rules.
        field: String,
        /// A description of the violation.
        message: String,
    },

    /// A tiered-rate schedule is malformed.
    #[error("Invalid schedule: {message}")]
    InvalidSchedule {
        /// A description of what made the schedule invalid.
        message: String,
    },

    /// A field was referenced that the graph spec does not declare.
    #[error("Unknown field: {name}")]
    UnknownField {
        /// The name that was not found.
        name: String,
    },

    /// A field depends on itself through a chain of accesses.
    #[error("Circular dependency: {}", .cycle.join(" -> "))]
    CircularDependency {
        /// The chain of fields being resolved, ending back at the repeated field.
        cycle: Vec<String>,
    },

    /// A value was not a finite number, or a division had a zero divisor.
    #[error("Invalid number in {context}: {message}")]
    InvalidNumber {
        /// Where the value was encountered.
        context: String,
        /// A description of the problem.
        message: String,
    },

    /// A rule read an input that the input record does not contain.
    #[error("Missing input: {name}")]
    MissingInput {
        /// The input name that was requested.
        name: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
