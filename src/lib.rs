//! Net Salary Engine for Italian payroll
//!
//! This crate estimates a net monthly salary from gross-pay inputs. It is
//! built from a lazy, memoized derived-field evaluator, a schedule-agnostic
//! progressive rate calculator, and the payroll rule set that sits on top.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod payroll;
