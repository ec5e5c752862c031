use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::domain::DocumentType;

/// Key holding the representative rows in every membership form.
pub const REPRESENTATIVES_KEY: &str = "representatives";

/// Flat key/value form state the wizard steps bind to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatForm(Map<String, Value>);

impl FlatForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn representatives(&self) -> &[Value] {
        self.0
            .get(REPRESENTATIVES_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn representatives_mut(&mut self) -> &mut Vec<Value> {
        let slot = self
            .0
            .entry(REPRESENTATIVES_KEY)
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(rows) => rows,
            _ => unreachable!("slot was just normalized to an array"),
        }
    }

    pub fn primary_representative(&self) -> Option<usize> {
        self.representatives().iter().position(|row| {
            row.get("isPrimary")
                .and_then(Value::as_bool)
                .unwrap_or(false)
        })
    }

    /// Stored URL of a document, `None` when it has to be uploaded again.
    pub fn document_url(&self, document_type: DocumentType) -> Option<&str> {
        self.get_str(document_type.as_str())
            .filter(|url| !url.trim().is_empty())
    }

    pub fn missing_documents(&self, expected: &[DocumentType]) -> Vec<DocumentType> {
        expected
            .iter()
            .copied()
            .filter(|document_type| self.document_url(*document_type).is_none())
            .collect()
    }
}

impl From<Map<String, Value>> for FlatForm {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}
