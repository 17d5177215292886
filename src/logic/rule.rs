use crate::field::FieldValue;
use crate::logic::Operator;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// One entry on a rule's right-hand side: a literal, or a back-reference to
/// another field's current value.
///
/// On the wire a back-reference is an object of the shape
/// `{"field_key": "other_field"}`; anything else is a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(FieldValue),
    FieldRef(String),
}

impl Operand {
    pub fn literal(value: impl Into<FieldValue>) -> Self {
        Operand::Literal(value.into())
    }

    pub fn field_ref(key: impl Into<String>) -> Self {
        Operand::FieldRef(key.into())
    }

    pub(crate) fn from_json(value: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = &value {
            if map.len() == 1 {
                if let Some(serde_json::Value::String(key)) = map.get("field_key") {
                    return Operand::FieldRef(key.clone());
                }
            }
        }
        Operand::Literal(FieldValue::from(value))
    }
}

impl Serialize for Operand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Operand::Literal(value) => value.serialize(serializer),
            Operand::FieldRef(key) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("field_key", key)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Operand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Operand::from_json(value))
    }
}

/// A fully resolved predicate: by the time a rule reaches the engine it
/// always carries a concrete operator and field key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRule {
    pub field_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    pub comparison: Operator,
    #[serde(default)]
    pub values: Vec<Operand>,
}

impl ComparisonRule {
    pub fn new(field_key: impl Into<String>, comparison: Operator) -> Self {
        Self {
            field_key: field_key.into(),
            field_type: None,
            comparison,
            values: Vec::new(),
        }
    }

    pub fn with_values(mut self, values: Vec<Operand>) -> Self {
        self.values = values;
        self
    }
}

/// One row of an element's `hide_ifs` list.
///
/// Rows sharing an `index` form an AND group; distinct indices are OR'd
/// together. The element-level `show_logic` flag then optionally inverts the
/// combined result ("show only when true" vs "hide when true").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HideIf {
    #[serde(default)]
    pub index: u32,
    #[serde(flatten)]
    pub rule: ComparisonRule,
}
