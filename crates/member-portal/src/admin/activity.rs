use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wire::{deserialize_id, deserialize_optional_text, deserialize_optional_timestamp};

pub const DEFAULT_ACTIVITY_PAGE: u32 = 1;
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 10;
pub const MAX_ACTIVITY_LIMIT: u32 = 100;

/// One reviewer action from the admin audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "action_type", default)]
    pub action_type: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub description: Option<String>,
    #[serde(
        alias = "admin_name",
        alias = "adminUsername",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub admin_name: Option<String>,
    #[serde(
        alias = "created_at",
        default,
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl Activity {
    /// Thai caption for the action; unknown actions show their raw code.
    pub fn label(&self) -> &str {
        match self.action_type.as_str() {
            "login" => "เข้าสู่ระบบ",
            "approve_member" | "approve_membership" => "อนุมัติสมาชิก",
            "reject_member" | "reject_membership" => "ปฏิเสธสมาชิก",
            "approve_address_update" => "อนุมัติการแก้ไขที่อยู่",
            "reject_address_update" => "ปฏิเสธการแก้ไขที่อยู่",
            "approve_profile_update" => "อนุมัติการแก้ไขข้อมูลสมาชิก",
            "reject_profile_update" => "ปฏิเสธการแก้ไขข้อมูลสมาชิก",
            "contact_message_response" => "ตอบกลับข้อความติดต่อ",
            "create_admin" | "invite_admin" => "เชิญผู้ดูแลระบบ",
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPage {
    #[serde(default)]
    pub activities: Vec<Activity>,
    pub pagination: Pagination,
}

impl ActivityPage {
    pub fn empty(query: &ActivityQuery) -> Self {
        Self {
            activities: Vec::new(),
            pagination: Pagination {
                current_page: query.page,
                total_pages: 0,
                total_items: 0,
                limit: query.limit,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ActivityQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_ACTIVITY_PAGE,
            limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }
}

impl ActivityQuery {
    /// Pages start at 1 and a page holds at most [`MAX_ACTIVITY_LIMIT`] rows.
    pub fn validate(&self) -> Result<(), String> {
        if self.page == 0 {
            return Err("page must be 1 or greater".to_string());
        }
        if !(1..=MAX_ACTIVITY_LIMIT).contains(&self.limit) {
            return Err(format!("limit must be between 1 and {MAX_ACTIVITY_LIMIT}"));
        }
        Ok(())
    }
}

fn default_page() -> u32 {
    DEFAULT_ACTIVITY_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_ACTIVITY_LIMIT
}
