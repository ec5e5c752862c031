use serde::{Deserialize, Serialize};

use crate::auth::validation::{PasswordCriteria, PASSWORD_MISMATCH_MESSAGE, PASSWORD_POLICY_MESSAGE};
use crate::validation::ValidationErrors;
use crate::wire::deserialize_optional_text;

/// What the backend knows about a pending admin invitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteDetails {
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCompletion {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl InviteCompletion {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.token.trim().is_empty() {
            errors.push("token", "ลิงก์คำเชิญไม่ถูกต้องหรือหมดอายุ");
        }
        if self.name.trim().is_empty() {
            errors.push("name", "กรุณากรอกชื่อ");
        }
        if !PasswordCriteria::evaluate(&self.password).satisfies_policy() {
            errors.push("password", PASSWORD_POLICY_MESSAGE);
        }
        if self.password != self.confirm_password {
            errors.push("confirmPassword", PASSWORD_MISMATCH_MESSAGE);
        }
        errors.into_result()
    }
}
