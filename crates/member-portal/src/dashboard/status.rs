use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status of any dashboard card, across verification requests, contact messages and
/// update requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Approved,
    Rejected,
    Unread,
    Read,
    Replied,
    None,
    Error,
}

/// Card family a status is rendered for; some families word the same status differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusContext {
    Operation,
    ContactMessage,
    AddressUpdate,
    ProductUpdate,
    SocialMedia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPresentation {
    pub icon: &'static str,
    pub label: &'static str,
    pub css_class: &'static str,
}

impl Status {
    pub const ALL: [Status; 8] = [
        Status::Pending,
        Status::Approved,
        Status::Rejected,
        Status::Unread,
        Status::Read,
        Status::Replied,
        Status::None,
        Status::Error,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
            Status::Unread => "unread",
            Status::Read => "read",
            Status::Replied => "replied",
            Status::None => "none",
            Status::Error => "error",
        }
    }

    /// Read a raw backend value: status words, or the numeric verification codes
    /// `0` pending, `1` approved, `2` rejected (as numbers or strings).
    pub fn from_raw(value: &Value) -> Option<Status> {
        match value {
            Value::Number(number) => number.as_i64().and_then(Self::from_code),
            Value::String(text) => text.parse().ok(),
            Value::Null => Some(Status::None),
            _ => None,
        }
    }

    fn from_code(code: i64) -> Option<Status> {
        match code {
            0 => Some(Status::Pending),
            1 => Some(Status::Approved),
            2 => Some(Status::Rejected),
            _ => None,
        }
    }

    pub fn presentation(self, context: StatusContext) -> StatusPresentation {
        let (icon, css_class) = match self {
            Status::Pending => ("clock", "bg-yellow-100 text-yellow-800"),
            Status::Approved => ("check-circle", "bg-green-100 text-green-800"),
            Status::Rejected => ("x-circle", "bg-red-100 text-red-800"),
            Status::Unread => ("mail", "bg-blue-100 text-blue-800"),
            Status::Read => ("mail-open", "bg-gray-100 text-gray-800"),
            Status::Replied => ("reply", "bg-green-100 text-green-800"),
            Status::None => ("minus-circle", "bg-gray-100 text-gray-600"),
            Status::Error => ("alert-triangle", "bg-red-100 text-red-800"),
        };
        StatusPresentation {
            icon,
            label: self.label(context),
            css_class,
        }
    }

    pub fn label(self, context: StatusContext) -> &'static str {
        match (self, context) {
            (Status::Pending, StatusContext::AddressUpdate | StatusContext::ProductUpdate) => {
                "รอการอนุมัติ"
            }
            (Status::Pending, _) => "รอพิจารณา",
            (Status::Approved, StatusContext::SocialMedia) => "เผยแพร่แล้ว",
            (Status::Approved, _) => "อนุมัติแล้ว",
            (Status::Rejected, StatusContext::AddressUpdate | StatusContext::ProductUpdate) => {
                "ไม่อนุมัติ"
            }
            (Status::Rejected, _) => "ปฏิเสธ",
            (Status::Unread, _) => "ยังไม่อ่าน",
            (Status::Read, _) => "อ่านแล้ว",
            (Status::Replied, _) => "ตอบกลับแล้ว",
            (Status::None, StatusContext::SocialMedia) => "ยังไม่ได้เพิ่มข้อมูล",
            (Status::None, _) => "ไม่มีข้อมูล",
            (Status::Error, _) => "เกิดข้อผิดพลาด",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        if let Ok(code) = normalized.parse::<i64>() {
            return Self::from_code(code).ok_or_else(|| format!("unknown status code '{raw}'"));
        }
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("unknown status '{raw}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_words_and_verification_codes() {
        assert_eq!(Status::from_raw(&json!("Replied")), Some(Status::Replied));
        assert_eq!(Status::from_raw(&json!(0)), Some(Status::Pending));
        assert_eq!(Status::from_raw(&json!("2")), Some(Status::Rejected));
        assert_eq!(Status::from_raw(&Value::Null), Some(Status::None));
        assert_eq!(Status::from_raw(&json!(7)), None);
        assert_eq!(Status::from_raw(&json!("archived")), None);
    }

    #[test]
    fn wording_depends_on_context() {
        assert_eq!(
            Status::Pending.presentation(StatusContext::AddressUpdate).label,
            "รอการอนุมัติ"
        );
        assert_eq!(
            Status::Pending.presentation(StatusContext::Operation).label,
            "รอพิจารณา"
        );
        let approved = Status::Approved.presentation(StatusContext::ContactMessage);
        assert_eq!(approved.icon, "check-circle");
        assert_eq!(approved.css_class, "bg-green-100 text-green-800");
    }
}
