//! Attribute patching by name
//!
//! Overrides are applied one at a time. Every override produces exactly one
//! outcome, and no outcome stops the batch: unknown names are logged and
//! skipped, and so are values of the wrong type.

pub mod setters;

pub use setters::{AttributeSetter, SetterKind, SetterTable};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::Item;

/// A scalar attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl AttributeValue {
    fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Int(_) => "integer",
            AttributeValue::Float(_) => "float",
            AttributeValue::Str(_) => "string",
        }
    }

    fn mismatch(&self, name: &str, expected: &'static str) -> PatchError {
        PatchError::TypeMismatch {
            name: name.to_string(),
            expected,
            found: self.type_name(),
        }
    }

    pub fn as_i32(&self, name: &str) -> Result<i32, PatchError> {
        match self {
            AttributeValue::Int(v) => i32::try_from(*v).map_err(|_| self.mismatch(name, "i32")),
            _ => Err(self.mismatch(name, "i32")),
        }
    }

    pub fn as_u32(&self, name: &str) -> Result<u32, PatchError> {
        match self {
            AttributeValue::Int(v) => u32::try_from(*v).map_err(|_| self.mismatch(name, "u32")),
            _ => Err(self.mismatch(name, "u32")),
        }
    }

    /// Integers widen. Floats narrow to f32 only if the result is finite.
    pub fn as_f32(&self, name: &str) -> Result<f32, PatchError> {
        match self {
            AttributeValue::Int(v) => Ok(*v as f32),
            AttributeValue::Float(v) => {
                let narrowed = *v as f32;
                if narrowed.is_finite() {
                    Ok(narrowed)
                } else {
                    Err(self.mismatch(name, "finite f32"))
                }
            }
            AttributeValue::Str(_) => Err(self.mismatch(name, "f32")),
        }
    }

    pub fn as_str(&self, name: &str) -> Result<&str, PatchError> {
        match self {
            AttributeValue::Str(s) => Ok(s),
            _ => Err(self.mismatch(name, "string")),
        }
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        AttributeValue::Int(v.into())
    }
}

impl From<u32> for AttributeValue {
    fn from(v: u32) -> Self {
        AttributeValue::Int(v.into())
    }
}

impl From<f32> for AttributeValue {
    fn from(v: f32) -> Self {
        AttributeValue::Float(v.into())
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Str(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Str(v)
    }
}

/// One name/value pair to apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeOverride {
    pub name: String,
    pub value: AttributeValue,
}

impl AttributeOverride {
    pub fn new(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatchError {
    #[error("attribute '{0}' not found")]
    AttributeNotFound(String),

    #[error("attribute '{name}' expects {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// What happened to a single override
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOutcome {
    Field,
    Property,
    NotFound,
    Rejected(PatchError),
}

impl PatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PatchOutcome::Field | PatchOutcome::Property)
    }
}

/// Per-override outcomes of one patch pass, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchReport {
    pub outcomes: Vec<(String, PatchOutcome)>,
}

impl PatchReport {
    pub fn applied(&self) -> Vec<&str> {
        self.names_where(PatchOutcome::is_applied)
    }

    pub fn not_found(&self) -> Vec<&str> {
        self.names_where(|o| matches!(o, PatchOutcome::NotFound))
    }

    pub fn rejected(&self) -> Vec<&str> {
        self.names_where(|o| matches!(o, PatchOutcome::Rejected(_)))
    }

    fn names_where(&self, pred: impl Fn(&PatchOutcome) -> bool) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| pred(o))
            .map(|(n, _)| n.as_str())
            .collect()
    }
}

/// Apply a single override through the table
pub fn apply_override(
    item: &mut Item,
    table: &SetterTable,
    attribute: &AttributeOverride,
) -> PatchOutcome {
    let Some((kind, setter)) = table.lookup(&attribute.name) else {
        tracing::warn!(
            "Attribute '{}' not found on {}, skipping",
            attribute.name,
            item.name()
        );
        return PatchOutcome::NotFound;
    };

    match setter(item, &attribute.name, &attribute.value) {
        Ok(()) => {
            tracing::debug!("Set {} = {:?} ({:?})", attribute.name, attribute.value, kind);
            match kind {
                SetterKind::Field => PatchOutcome::Field,
                SetterKind::Property => PatchOutcome::Property,
            }
        }
        Err(e) => {
            tracing::error!("Failed to set {} on {}: {}", attribute.name, item.name(), e);
            PatchOutcome::Rejected(e)
        }
    }
}

/// Apply every override in order; never stops early
pub fn apply_overrides(
    item: &mut Item,
    table: &SetterTable,
    overrides: &[AttributeOverride],
) -> PatchReport {
    let outcomes = overrides
        .iter()
        .map(|attribute| (attribute.name.clone(), apply_override(item, table, attribute)))
        .collect();
    PatchReport { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ItemId;

    fn make_item() -> Item {
        Item::new(ItemId(40), "MilitaryBackpack")
            .with_weight(1.0)
            .with_value(2800)
            .with_quality(3)
    }

    #[test]
    fn test_unknown_attribute_does_not_stop_batch() {
        let mut item = make_item();
        let table = SetterTable::for_items();
        let overrides = vec![
            AttributeOverride::new("durability", 5),
            AttributeOverride::new("value", 1_000_000),
        ];

        let report = apply_overrides(&mut item, &table, &overrides);

        assert_eq!(report.not_found(), vec!["durability"]);
        assert_eq!(report.applied(), vec!["value"]);
        assert_eq!(item.value(), 1_000_000);
    }

    #[test]
    fn test_type_mismatch_is_rejected_and_skipped() {
        let mut item = make_item();
        let table = SetterTable::for_items();
        let overrides = vec![
            AttributeOverride::new("quality", 4.5f32),
            AttributeOverride::new("weight", "heavy"),
            AttributeOverride::new("order", 7),
        ];

        let report = apply_overrides(&mut item, &table, &overrides);

        assert_eq!(report.rejected(), vec!["quality", "weight"]);
        assert_eq!(item.quality(), 3);
        assert_eq!(item.weight(), 1.0);
        assert_eq!(item.order(), 7);
    }

    #[test]
    fn test_int_widens_into_float_attribute() {
        let mut item = make_item();
        let table = SetterTable::for_items();
        let outcome = apply_override(&mut item, &table, &AttributeOverride::new("weight", 3));
        assert_eq!(outcome, PatchOutcome::Field);
        assert_eq!(item.weight(), 3.0);
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let mut item = make_item();
        let table = SetterTable::for_items();
        let overrides = vec![
            AttributeOverride::new("weight", AttributeValue::Float(1e300)),
            AttributeOverride::new("Weight", AttributeValue::Float(f64::NAN)),
            AttributeOverride::new("weight", AttributeValue::Float(f64::NEG_INFINITY)),
        ];

        let report = apply_overrides(&mut item, &table, &overrides);

        assert_eq!(report.rejected(), vec!["weight", "Weight", "weight"]);
        assert!(report.applied().is_empty());
        assert_eq!(item.weight(), 1.0);
    }

    #[test]
    fn test_float_within_range_narrows() {
        let mut item = make_item();
        let table = SetterTable::for_items();
        let outcome = apply_override(
            &mut item,
            &table,
            &AttributeOverride::new("weight", AttributeValue::Float(2.5)),
        );
        assert_eq!(outcome, PatchOutcome::Field);
        assert_eq!(item.weight(), 2.5);
    }

    #[test]
    fn test_property_outcome() {
        let mut item = make_item();
        let table = SetterTable::for_items();
        let outcome = apply_override(
            &mut item,
            &table,
            &AttributeOverride::new("DisplayName", "militarybackpack_ultra"),
        );
        assert_eq!(outcome, PatchOutcome::Property);
        assert_eq!(item.display_name(), "militarybackpack_ultra");
    }

    #[test]
    fn test_type_id_out_of_range() {
        let mut item = make_item();
        let table = SetterTable::for_items();
        let outcome = apply_override(&mut item, &table, &AttributeOverride::new("typeID", -1));
        assert!(matches!(outcome, PatchOutcome::Rejected(PatchError::TypeMismatch { .. })));
        assert_eq!(item.type_id(), ItemId(40));
    }

    #[test]
    fn test_value_deserializes_untagged() {
        #[derive(Deserialize)]
        struct Wrapper {
            v: Vec<AttributeValue>,
        }
        let parsed: Wrapper = toml::from_str(r#"v = [1, 2.5, "x"]"#).unwrap();
        assert_eq!(
            parsed.v,
            vec![
                AttributeValue::Int(1),
                AttributeValue::Float(2.5),
                AttributeValue::Str("x".to_string()),
            ]
        );
    }
}
