//! Graph spec construction and validation.
//!
//! A [`GraphSpec`] is an ordered set of named derivation rules. It is built
//! once through [`GraphSpecBuilder`], validated at that point, and then shared
//! read-only by any number of evaluations.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::InputRecord;

use super::session::Outputs;

/// A derivation rule: a pure function of the raw inputs and other fields.
///
/// Rules read other fields through [`Outputs::get`]; those reads are how the
/// evaluator learns the dependency graph.
pub type DerivationRule =
    Box<dyn Fn(&InputRecord, &mut Outputs<'_>) -> EngineResult<Decimal> + Send + Sync>;

struct FieldRule {
    name: String,
    rule: DerivationRule,
}

/// A validated, immutable mapping from field name to derivation rule.
///
/// Declaration order is preserved and decides the order of the output
/// record; it has no effect on the values.
pub struct GraphSpec {
    fields: Vec<FieldRule>,
    index: HashMap<String, usize>,
}

impl GraphSpec {
    /// Starts building a new graph spec.
    pub fn builder() -> GraphSpecBuilder {
        GraphSpecBuilder::default()
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn name(&self, position: usize) -> &str {
        &self.fields[position].name
    }

    pub(crate) fn rule(&self, position: usize) -> &DerivationRule {
        &self.fields[position].rule
    }
}

impl fmt::Debug for GraphSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphSpec")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects field declarations and validates them into a [`GraphSpec`].
///
/// # Example
///
/// ```
/// use netpay_engine::engine::{evaluate, GraphSpec};
/// use netpay_engine::models::InputRecord;
/// use rust_decimal::Decimal;
///
/// let spec = GraphSpec::builder()
///     .field("doubled", |_, o| Ok(o.get("base")? * Decimal::TWO))
///     .field("base", |i, _| i.get("value"))
///     .build()
///     .unwrap();
///
/// let input = InputRecord::new().with("value", Decimal::from(21));
/// let output = evaluate(&spec, &input).unwrap();
/// assert_eq!(output.get("doubled").unwrap(), Decimal::from(42));
/// ```
#[derive(Default)]
pub struct GraphSpecBuilder {
    fields: Vec<FieldRule>,
}

impl GraphSpecBuilder {
    /// Declares field `name` computed by `rule`.
    pub fn field<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&InputRecord, &mut Outputs<'_>) -> EngineResult<Decimal> + Send + Sync + 'static,
    {
        self.fields.push(FieldRule {
            name: name.into(),
            rule: Box::new(rule),
        });
        self
    }

    /// Validates the declarations and builds the graph spec.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` naming the offending field if a field name is
    /// empty or declared more than once.
    pub fn build(self) -> EngineResult<GraphSpec> {
        let mut index = HashMap::with_capacity(self.fields.len());

        for (position, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(EngineError::Configuration {
                    field: field.name.clone(),
                    message: format!("field #{} has an empty name", position + 1),
                });
            }
            if index.insert(field.name.clone(), position).is_some() {
                return Err(EngineError::Configuration {
                    field: field.name.clone(),
                    message: "field is declared more than once".to_string(),
                });
            }
        }

        Ok(GraphSpec {
            fields: self.fields,
            index,
        })
    }
}
