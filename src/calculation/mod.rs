//! Numeric building blocks for the net salary engine.
//!
//! This module contains the rounding primitives every derivation rule uses
//! and the schedule-agnostic progressive rate calculator.

mod rounding;
mod tiered_rate;

pub use rounding::{
    checked_add, checked_div, checked_mul, checked_sub, percent, round_to_cents, round_to_unit,
    to_decimal,
};
pub use tiered_rate::{Schedule, Tier};
