use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::status::{Status, StatusContext};
use crate::wire::{deserialize_id, deserialize_optional_text, parse_timestamp};

/// Family of request an operation card tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    MemberVerification,
    ContactMessage,
    AddressUpdate,
    ProfileUpdate,
    Other,
}

impl OperationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            OperationKind::MemberVerification => "member_verification",
            OperationKind::ContactMessage => "contact_message",
            OperationKind::AddressUpdate => "address_update",
            OperationKind::ProfileUpdate => "profile_update",
            OperationKind::Other => "other",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            OperationKind::MemberVerification => "ยืนยันสมาชิกเดิม",
            OperationKind::ContactMessage => "ติดต่อเจ้าหน้าที่",
            OperationKind::AddressUpdate => "แก้ไขที่อยู่",
            OperationKind::ProfileUpdate => "แก้ไขข้อมูลสมาชิก",
            OperationKind::Other => "รายการอื่น ๆ",
        }
    }

    /// Statuses a card of this kind can be in.
    pub const fn statuses(self) -> &'static [Status] {
        match self {
            OperationKind::ContactMessage => &[Status::Unread, Status::Read, Status::Replied],
            OperationKind::MemberVerification
            | OperationKind::AddressUpdate
            | OperationKind::ProfileUpdate => &[Status::Pending, Status::Approved, Status::Rejected],
            OperationKind::Other => &Status::ALL,
        }
    }

    pub const fn status_context(self) -> StatusContext {
        match self {
            OperationKind::ContactMessage => StatusContext::ContactMessage,
            OperationKind::AddressUpdate => StatusContext::AddressUpdate,
            _ => StatusContext::Operation,
        }
    }

    /// Classify the free-form `type` the generic operations endpoint reports.
    pub fn from_raw(raw: &str) -> OperationKind {
        let normalized = raw.trim().to_lowercase();
        if let Ok(kind) = normalized.parse::<OperationKind>() {
            return kind;
        }
        if normalized.contains("ยืนยันสมาชิก") || normalized.contains("verification") {
            OperationKind::MemberVerification
        } else if normalized.contains("ติดต่อ") || normalized.contains("contact") {
            OperationKind::ContactMessage
        } else if normalized.contains("ที่อยู่") || normalized.contains("address") {
            OperationKind::AddressUpdate
        } else if normalized.contains("ข้อมูลสมาชิก") || normalized.contains("profile") {
            OperationKind::ProfileUpdate
        } else {
            OperationKind::Other
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "member_verification" | "verification" => Ok(OperationKind::MemberVerification),
            "contact_message" | "contact" => Ok(OperationKind::ContactMessage),
            "address_update" => Ok(OperationKind::AddressUpdate),
            "profile_update" => Ok(OperationKind::ProfileUpdate),
            "other" => Ok(OperationKind::Other),
            other => Err(format!("unknown operation type '{other}'")),
        }
    }
}

/// Row of `/api/dashboard/operation-status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OperationRow {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Value,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub created_at: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "deserialize_optional_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub member_code: Option<String>,
}

/// Row of `/api/dashboard/operation-status/contact-message-status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContactMessageRow {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Value,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub created_at: Option<String>,
}

/// Row of `/api/member/verification-status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerificationRow {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub member_code: Option<String>,
    #[serde(default)]
    pub status: Value,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub reject_reason: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub created_at: Option<String>,
}

/// Normalized dashboard card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub created_at: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: OperationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_code: Option<String>,
}

impl Operation {
    pub fn key(&self) -> (OperationKind, &str) {
        (self.kind, self.id.as_str())
    }

    /// Case-insensitive match against title, company name, member code and description.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(self.title.as_str()),
            self.company_name.as_deref(),
            self.member_code.as_deref(),
            Some(self.description.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

fn created_at(kind: OperationKind, id: &str, raw: Option<&str>) -> Option<NaiveDateTime> {
    let parsed = raw.and_then(parse_timestamp);
    if parsed.is_none() {
        tracing::warn!(%kind, id, created_at = ?raw, "skipping operation without a usable timestamp");
    }
    parsed
}

fn status_or_none(kind: OperationKind, id: &str, raw: &Value) -> Status {
    Status::from_raw(raw).unwrap_or_else(|| {
        tracing::warn!(%kind, id, status = %raw, "unrecognized status");
        Status::None
    })
}

impl OperationRow {
    pub fn normalize(self) -> Option<Operation> {
        let kind = self
            .kind
            .as_deref()
            .map(OperationKind::from_raw)
            .unwrap_or(OperationKind::Other);
        let created_at = created_at(kind, &self.id, self.created_at.as_deref())?;
        Some(Operation {
            status: status_or_none(kind, &self.id, &self.status),
            title: self.title.unwrap_or_else(|| kind.title().to_string()),
            description: self.description.unwrap_or_default(),
            created_at,
            kind,
            company_name: self.company_name,
            member_code: self.member_code,
            id: self.id,
        })
    }
}

impl ContactMessageRow {
    pub fn normalize(self) -> Option<Operation> {
        let kind = OperationKind::ContactMessage;
        let created_at = created_at(kind, &self.id, self.created_at.as_deref())?;
        Some(Operation {
            status: status_or_none(kind, &self.id, &self.status),
            title: self.subject.unwrap_or_else(|| kind.title().to_string()),
            description: self.message.unwrap_or_default(),
            created_at,
            kind,
            company_name: None,
            member_code: None,
            id: self.id,
        })
    }
}

impl VerificationRow {
    pub fn normalize(self) -> Option<Operation> {
        let kind = OperationKind::MemberVerification;
        let created_at = created_at(kind, &self.id, self.created_at.as_deref())?;
        let status = status_or_none(kind, &self.id, &self.status);
        let description = match (&self.reject_reason, status) {
            (Some(reason), Status::Rejected) => reason.clone(),
            _ => [self.company_name.as_deref(), self.member_code.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" "),
        };
        Some(Operation {
            status,
            title: kind.title().to_string(),
            description,
            created_at,
            kind,
            company_name: self.company_name,
            member_code: self.member_code,
            id: self.id,
        })
    }
}

/// Merge supplementary cards into the base list.
///
/// Pairs of `(type, id)` stay unique: the first occurrence wins, so base rows take precedence.
/// The result is ordered newest first; equal timestamps keep their merge order.
pub fn merge(base: Vec<Operation>, extra: impl IntoIterator<Item = Operation>) -> Vec<Operation> {
    let mut seen: HashSet<(OperationKind, String)> = HashSet::new();
    let mut merged: Vec<Operation> = base
        .into_iter()
        .chain(extra)
        .filter(|operation| seen.insert((operation.kind, operation.id.clone())))
        .collect();
    merged.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_types_are_classified() {
        assert_eq!(
            OperationKind::from_raw("ยืนยันสมาชิกเดิม"),
            OperationKind::MemberVerification
        );
        assert_eq!(
            OperationKind::from_raw("contact_message"),
            OperationKind::ContactMessage
        );
        assert_eq!(
            OperationKind::from_raw("แก้ไขที่อยู่"),
            OperationKind::AddressUpdate
        );
        assert_eq!(OperationKind::from_raw("สมัครสมาชิก"), OperationKind::Other);
    }

    #[test]
    fn verification_rows_use_numeric_status_codes() {
        let row: VerificationRow = serde_json::from_value(json!({
            "id": 4,
            "company_name": "บริษัท ทดสอบ จำกัด",
            "member_code": "AC-0042",
            "status": 2,
            "reject_reason": "เลขทะเบียนไม่ตรง",
            "created_at": "2024-02-01 08:00:00"
        }))
        .expect("row decodes");
        let operation = row.normalize().expect("normalizes");
        assert_eq!(operation.status, Status::Rejected);
        assert_eq!(operation.description, "เลขทะเบียนไม่ตรง");
        assert_eq!(operation.id, "4");
    }

    #[test]
    fn rows_without_timestamps_are_dropped() {
        let row: ContactMessageRow =
            serde_json::from_value(json!({ "id": "m1", "subject": "สอบถาม", "status": "read" }))
                .expect("row decodes");
        assert!(row.normalize().is_none());
    }

    #[test]
    fn search_covers_company_and_member_code() {
        let row: OperationRow = serde_json::from_value(json!({
            "id": 1,
            "title": "แก้ไขข้อมูลสมาชิก",
            "status": "pending",
            "created_at": "2024-01-10T10:00:00Z",
            "type": "profile_update",
            "company_name": "Siam Steel",
            "member_code": "OC-1001"
        }))
        .expect("row decodes");
        let operation = row.normalize().expect("normalizes");
        assert!(operation.matches_search("siam"));
        assert!(operation.matches_search("oc-10"));
        assert!(!operation.matches_search("plastic"));
    }
}
