//! The fully resolved output of an evaluation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{EngineError, EngineResult};

/// Every declared field of a graph spec mapped to its resolved value.
///
/// Fields are kept in declaration order, which is also the order in which the
/// record serializes, so a UI rendering label/value rows gets a stable layout
/// regardless of the order the evaluator happened to resolve fields in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    fields: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl OutputRecord {
    /// Builds a record from `(name, value)` pairs in declaration order.
    pub(crate) fn from_ordered(fields: Vec<(String, Decimal)>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
        Self { fields, index }
    }

    /// Returns the value of field `name`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the record has no such field.
    pub fn get(&self, name: &str) -> EngineResult<Decimal> {
        self.index
            .get(name)
            .map(|&i| self.fields[i].1)
            .ok_or_else(|| EngineError::UnknownField {
                name: name.to_string(),
            })
    }

    /// Returns true if the record contains field `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over the fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OutputRecord {
        OutputRecord::from_ordered(vec![
            ("netMonthly".to_string(), Decimal::new(145594, 2)),
            ("dailyPay".to_string(), Decimal::new(7692, 2)),
        ])
    }

    #[test]
    fn test_get_known_field() {
        assert_eq!(sample().get("dailyPay").unwrap(), Decimal::new(7692, 2));
    }

    #[test]
    fn test_get_unknown_field_is_error() {
        match sample().get("missing") {
            Err(EngineError::UnknownField { name }) => assert_eq!(name, "missing"),
            other => panic!("Expected UnknownField, got {:?}", other),
        }
    }

    #[test]
    fn test_iter_keeps_declaration_order() {
        let record = sample();
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["netMonthly", "dailyPay"]);
        assert_eq!(record.len(), 2);
        assert!(record.contains("netMonthly"));
    }

    #[test]
    fn test_serializes_in_declaration_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"netMonthly":"1455.94","dailyPay":"76.92"}"#);
    }
}
