//! Reshape a rejected application's nested snapshot into the flat form a wizard edits.
//!
//! One declarative [`MappingTable`] per membership type drives a single generic mapper.

mod snapshot;
mod step_hint;
mod table;
mod tables;

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

use super::domain::{AddressType, DocumentType, MembershipType};
use super::form::FlatForm;
use crate::wire::{first_present, is_truthy, scalar_text};

pub use snapshot::{NestedSnapshot, RejectionPayload};
pub use step_hint::initial_step;
pub use table::{
    AddressLayout, AffiliationRule, BusinessTypeRule, CollectionRule, ColumnRule, FieldRule,
    MappingTable, TagShape,
};
pub use tables::table_for;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("rejection data is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("rejection data must be an object, found {0}")]
    UnexpectedShape(&'static str),
}

const DOCUMENT_TYPE_SOURCES: &[&str] = &["document_type", "documentType"];
const DOCUMENT_URL_SOURCES: &[&str] = &["file_url", "cloudinary_url", "file_path", "fileUrl"];
const ADDRESS_TYPE_SOURCES: &[&str] = &["address_type", "addressType"];
const PRIMARY_SOURCES: &[&str] = &["is_primary", "isPrimary"];
const OTHER_TAG: &str = "other";

static ROW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_row_key(prefix: &str) -> String {
    let id = ROW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}

/// Map raw rejection data (object, JSON string or already-flat form) for `membership_type`.
pub fn map_rejection_data(
    membership_type: MembershipType,
    raw: Value,
) -> Result<FlatForm, MappingError> {
    let table = table_for(membership_type);
    match RejectionPayload::classify(raw, table)? {
        RejectionPayload::Flat(form) => Ok(FlatForm::from_map(form)),
        RejectionPayload::Nested(snapshot) => Ok(table.apply(&snapshot)),
    }
}

impl MappingTable {
    /// Apply the table to a nested snapshot. Never fails: absent sections map to defaults.
    pub fn apply(&self, snapshot: &NestedSnapshot) -> FlatForm {
        let mut form = FlatForm::new();

        for rule in self.scalars {
            form.insert(rule.column.dest, column_value(&snapshot.main, &rule.column));
        }

        form.insert(self.address_layout.dest(), self.map_addresses(&snapshot.addresses));
        form.insert(
            self.representatives.dest,
            Value::Array(self.map_representatives(&snapshot.representatives)),
        );

        let (tags, other_detail) = self.map_business_types(&snapshot.business_types);
        form.insert(self.business_types.dest, tags);
        form.insert(self.business_types.other_dest, Value::String(other_detail));

        form.insert(
            self.products.dest,
            Value::Array(map_collection(&self.products, &snapshot.products)),
        );

        for affiliation in self.affiliations {
            let rows = snapshot.section(affiliation.snapshot_keys);
            let (ids, names) = map_affiliation(affiliation, &rows);
            form.insert(affiliation.ids_dest, Value::Array(ids));
            form.insert(affiliation.names_dest, Value::Array(names));
        }

        for document_type in self.documents {
            let url = find_document_url(&snapshot.documents, *document_type)
                .map(Value::String)
                .unwrap_or(Value::Null);
            form.insert(document_type.as_str(), url);
        }

        form
    }

    fn map_addresses(&self, rows: &[Map<String, Value>]) -> Value {
        match self.address_layout {
            AddressLayout::Single { .. } => {
                let address = match rows.first() {
                    Some(row) => self.address_from_row(row, None),
                    None => self.blank_address(None),
                };
                Value::Object(address)
            }
            AddressLayout::ByType { .. } => {
                let mut by_type = Map::new();
                for address_type in AddressType::ALL {
                    let source = find_address(rows, address_type)
                        .or_else(|| (rows.len() == 1).then(|| &rows[0]));
                    let address = match source {
                        Some(row) => self.address_from_row(row, Some(address_type)),
                        None => self.blank_address(Some(address_type)),
                    };
                    by_type.insert(address_type.code().to_string(), Value::Object(address));
                }
                Value::Object(by_type)
            }
        }
    }

    fn address_from_row(
        &self,
        row: &Map<String, Value>,
        address_type: Option<AddressType>,
    ) -> Map<String, Value> {
        let mut address = map_row(self.address_columns, row);
        if let Some(address_type) = address_type {
            address.insert(
                "addressType".to_string(),
                Value::String(address_type.code().to_string()),
            );
        }
        address
    }

    fn blank_address(&self, address_type: Option<AddressType>) -> Map<String, Value> {
        self.address_from_row(&Map::new(), address_type)
    }

    fn map_representatives(&self, rows: &[Map<String, Value>]) -> Vec<Value> {
        if rows.is_empty() {
            let mut placeholder = map_row(self.representatives.columns, &Map::new());
            placeholder.insert(
                "id".to_string(),
                Value::String(next_row_key(self.representatives.key_prefix)),
            );
            placeholder.insert("isPrimary".to_string(), Value::Bool(true));
            return vec![Value::Object(placeholder)];
        }

        let primary_index = rows
            .iter()
            .position(|row| first_present(row, PRIMARY_SOURCES).is_some_and(is_truthy))
            .unwrap_or(0);

        map_collection(&self.representatives, rows)
            .into_iter()
            .enumerate()
            .map(|(index, mut row)| {
                if let Value::Object(fields) = &mut row {
                    fields.insert("isPrimary".to_string(), Value::Bool(index == primary_index));
                }
                row
            })
            .collect()
    }

    fn map_business_types(&self, rows: &[Map<String, Value>]) -> (Value, String) {
        let rule = &self.business_types;
        let mut tags: Vec<String> = Vec::new();
        let mut other_detail = String::new();

        for row in rows {
            let Some(tag) = first_present(row, rule.tag_sources).and_then(scalar_text) else {
                continue;
            };
            let tag = tag.trim().to_string();
            if tag.is_empty() {
                continue;
            }
            if tag == OTHER_TAG && other_detail.is_empty() {
                if let Some(detail) = first_present(row, rule.detail_sources).and_then(scalar_text)
                {
                    other_detail = detail;
                }
            }
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let shaped = match rule.shape {
            TagShape::List => Value::Array(tags.into_iter().map(Value::String).collect()),
            TagShape::Map => Value::Object(
                tags.into_iter()
                    .map(|tag| (tag, Value::Bool(true)))
                    .collect(),
            ),
        };

        (shaped, other_detail)
    }
}

fn column_value(row: &Map<String, Value>, column: &ColumnRule) -> Value {
    first_present(row, column.sources)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

fn map_row(columns: &[ColumnRule], row: &Map<String, Value>) -> Map<String, Value> {
    columns
        .iter()
        .map(|column| (column.dest.to_string(), column_value(row, column)))
        .collect()
}

fn map_collection(rule: &CollectionRule, rows: &[Map<String, Value>]) -> Vec<Value> {
    rows.iter()
        .map(|row| {
            let mut mapped = map_row(rule.columns, row);
            mapped.insert(
                "id".to_string(),
                Value::String(next_row_key(rule.key_prefix)),
            );
            Value::Object(mapped)
        })
        .collect()
}

fn map_affiliation(rule: &AffiliationRule, rows: &[Map<String, Value>]) -> (Vec<Value>, Vec<Value>) {
    rows.iter()
        .filter_map(|row| {
            let id = first_present(row, rule.id_sources).and_then(scalar_text)?;
            let name = first_present(row, rule.name_sources)
                .and_then(scalar_text)
                .unwrap_or_default();
            Some((Value::String(id), Value::String(name)))
        })
        .unzip()
}

fn find_address(rows: &[Map<String, Value>], address_type: AddressType) -> Option<&Map<String, Value>> {
    rows.iter().find(|row| {
        first_present(row, ADDRESS_TYPE_SOURCES)
            .and_then(scalar_text)
            .is_some_and(|code| code.trim() == address_type.code())
    })
}

/// Stored URL for `document_type`, or `None` when the applicant must upload it again.
pub fn find_document_url(rows: &[Map<String, Value>], document_type: DocumentType) -> Option<String> {
    rows.iter()
        .filter(|row| {
            first_present(row, DOCUMENT_TYPE_SOURCES)
                .and_then(Value::as_str)
                .is_some_and(|kind| kind == document_type.as_str())
        })
        .find_map(|row| {
            first_present(row, DOCUMENT_URL_SOURCES)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
        })
}
