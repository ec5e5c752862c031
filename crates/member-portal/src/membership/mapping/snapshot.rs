use serde_json::{Map, Value};

use super::table::MappingTable;
use super::MappingError;
use crate::wire::object_rows;

/// Nested snapshot of an application taken when it was rejected.
///
/// Every section is optional; absent or malformed sections read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedSnapshot {
    pub main: Map<String, Value>,
    pub addresses: Vec<Map<String, Value>>,
    pub representatives: Vec<Map<String, Value>>,
    pub business_types: Vec<Map<String, Value>>,
    pub products: Vec<Map<String, Value>>,
    pub documents: Vec<Map<String, Value>>,
    extra: Map<String, Value>,
}

impl NestedSnapshot {
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        let main = match take_any(&mut object, &["main"]) {
            Some(Value::Object(main)) => main,
            _ => Map::new(),
        };
        let addresses = object_rows(take_any(&mut object, &["addresses", "address"]).as_ref());
        let representatives = object_rows(take_any(&mut object, &["representatives"]).as_ref());
        let business_types =
            object_rows(take_any(&mut object, &["businessTypes", "business_types"]).as_ref());
        let products = object_rows(take_any(&mut object, &["products"]).as_ref());
        let documents = object_rows(take_any(&mut object, &["documents"]).as_ref());

        Self {
            main,
            addresses,
            representatives,
            business_types,
            products,
            documents,
            extra: object,
        }
    }

    /// Rows of a secondary section, first matching alias wins.
    pub fn section(&self, aliases: &[&str]) -> Vec<Map<String, Value>> {
        aliases
            .iter()
            .find_map(|key| self.extra.get(*key))
            .map(|value| object_rows(Some(value)))
            .unwrap_or_default()
    }
}

fn take_any(object: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter().find_map(|key| object.remove(*key))
}

/// Rejection data after shape detection.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionPayload {
    /// Already in the wizard's flat shape; passed through untouched.
    Flat(Map<String, Value>),
    Nested(NestedSnapshot),
}

impl RejectionPayload {
    pub fn classify(raw: Value, table: &MappingTable) -> Result<Self, MappingError> {
        match raw {
            Value::String(encoded) => {
                let decoded: Value = serde_json::from_str(&encoded)
                    .map_err(|source| MappingError::InvalidJson(source.to_string()))?;
                match decoded {
                    Value::String(_) => Err(MappingError::UnexpectedShape("string")),
                    other => Self::classify(other, table),
                }
            }
            Value::Null => Ok(Self::Nested(NestedSnapshot::default())),
            Value::Object(object) if object.contains_key(table.flat_marker) => {
                Ok(Self::Flat(object))
            }
            Value::Object(object) => Ok(Self::Nested(NestedSnapshot::from_object(object))),
            Value::Array(_) => Err(MappingError::UnexpectedShape("array")),
            Value::Bool(_) => Err(MappingError::UnexpectedShape("boolean")),
            Value::Number(_) => Err(MappingError::UnexpectedShape("number")),
        }
    }
}
