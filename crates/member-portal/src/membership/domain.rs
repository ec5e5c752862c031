use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wire::{deserialize_id, deserialize_optional_text, deserialize_timestamp};

/// The four membership application classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    /// Ordinary member (factory).
    Oc,
    /// Trade-association member.
    Am,
    /// Associate member, corporate.
    Ac,
    /// Associate member, individual.
    Ic,
}

impl MembershipType {
    pub const ALL: [MembershipType; 4] = [
        MembershipType::Oc,
        MembershipType::Am,
        MembershipType::Ac,
        MembershipType::Ic,
    ];

    /// Path segment used by the upstream endpoints.
    pub const fn code(self) -> &'static str {
        match self {
            MembershipType::Oc => "oc",
            MembershipType::Am => "am",
            MembershipType::Ac => "ac",
            MembershipType::Ic => "ic",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MembershipType::Oc => "สามัญ-โรงงาน",
            MembershipType::Am => "สามัญ-สมาคมการค้า",
            MembershipType::Ac => "สมทบ-นิติบุคคล",
            MembershipType::Ic => "สมทบ-บุคคลธรรมดา",
        }
    }

    /// Whether a resubmission must carry a non-blank comment for the reviewer.
    pub const fn comment_policy(self) -> CommentPolicy {
        match self {
            MembershipType::Am => CommentPolicy::Required,
            MembershipType::Oc | MembershipType::Ac | MembershipType::Ic => CommentPolicy::Optional,
        }
    }

    pub const fn is_individual(self) -> bool {
        matches!(self, MembershipType::Ic)
    }
}

impl fmt::Display for MembershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown membership type '{0}'")]
pub struct UnknownMembershipType(pub String);

impl FromStr for MembershipType {
    type Err = UnknownMembershipType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "oc" => Ok(MembershipType::Oc),
            "am" => Ok(MembershipType::Am),
            "ac" => Ok(MembershipType::Ac),
            "ic" => Ok(MembershipType::Ic),
            _ => Err(UnknownMembershipType(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentPolicy {
    Required,
    Optional,
}

/// Identifier of an application within its membership type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MembershipId(#[serde(deserialize_with = "deserialize_id")] pub String);

impl fmt::Display for MembershipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed vocabulary of `document_type` values attached to applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    CompanyRegistration,
    FactoryLicense,
    IndustrialEstateLicense,
    ProductionImages,
    AssociationCertificate,
    MemberList,
    IdCardDocument,
    CompanyStamp,
    AuthorizedSignature,
}

impl DocumentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            DocumentType::CompanyRegistration => "companyRegistration",
            DocumentType::FactoryLicense => "factoryLicense",
            DocumentType::IndustrialEstateLicense => "industrialEstateLicense",
            DocumentType::ProductionImages => "productionImages",
            DocumentType::AssociationCertificate => "associationCertificate",
            DocumentType::MemberList => "memberList",
            DocumentType::IdCardDocument => "idCardDocument",
            DocumentType::CompanyStamp => "companyStamp",
            DocumentType::AuthorizedSignature => "authorizedSignature",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DocumentType::CompanyRegistration => "หนังสือรับรองการจดทะเบียนนิติบุคคล",
            DocumentType::FactoryLicense => "ใบอนุญาตประกอบกิจการโรงงาน",
            DocumentType::IndustrialEstateLicense => "ใบอนุญาตนิคมอุตสาหกรรม",
            DocumentType::ProductionImages => "รูปภาพการผลิต",
            DocumentType::AssociationCertificate => "หนังสือรับรองการจดทะเบียนสมาคม",
            DocumentType::MemberList => "รายชื่อสมาชิกสมาคม",
            DocumentType::IdCardDocument => "สำเนาบัตรประชาชน",
            DocumentType::CompanyStamp => "ตราประทับบริษัท",
            DocumentType::AuthorizedSignature => "ลายมือชื่อผู้มีอำนาจลงนาม",
        }
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(Value::String(raw.trim().to_string()))
            .map_err(|_| format!("unknown document type '{raw}'"))
    }
}

/// Address slots an application carries, keyed by the backend's type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressType {
    Office,
    Mailing,
    TaxInvoice,
}

impl AddressType {
    pub const ALL: [AddressType; 3] = [
        AddressType::Office,
        AddressType::Mailing,
        AddressType::TaxInvoice,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            AddressType::Office => "1",
            AddressType::Mailing => "2",
            AddressType::TaxInvoice => "3",
        }
    }
}

/// Rejection record returned by `/api/membership/rejected-applications/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedApplication {
    pub membership_type: MembershipType,
    pub membership_id: MembershipId,
    /// Structured reason; shape varies between reviewers' tooling so it stays opaque.
    #[serde(default)]
    pub rejection_reason: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub admin_note: Option<String>,
    /// Snapshot at rejection time: a nested object, its JSON encoding, or an already-flat form.
    #[serde(default)]
    pub rejection_data: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentType {
    Admin,
    Applicant,
}

/// One entry of the append-only conversation attached to an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentEntry {
    pub comment_type: CommentType,
    pub comment_text: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: NaiveDateTime,
}
