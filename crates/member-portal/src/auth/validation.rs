use serde::{Deserialize, Serialize};

use crate::validation::{is_valid_email, ValidationErrors};

pub const LOGIN_REQUIRED_MESSAGE: &str = "กรุณากรอกอีเมลและรหัสผ่าน";
pub const PASSWORD_POLICY_MESSAGE: &str =
    "รหัสผ่านต้องมีอย่างน้อย 8 ตัวอักษร ประกอบด้วยตัวพิมพ์ใหญ่ ตัวเลข และอักขระพิเศษ";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "รหัสผ่านไม่ตรงกัน";

const MIN_PASSWORD_LENGTH: usize = 8;
const RECOMMENDED_PASSWORD_LENGTH: usize = 12;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginForm {
    /// Both fields must be present; the password is not trimmed.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationErrors::single("credentials", LOGIN_REQUIRED_MESSAGE));
        }
        Ok(())
    }
}

/// Individual password rules as shown beside the strength meter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCriteria {
    pub min_length: bool,
    pub recommended_length: bool,
    pub uppercase: bool,
    pub digit: bool,
    pub special: bool,
}

impl PasswordCriteria {
    pub fn evaluate(password: &str) -> Self {
        let length = password.chars().count();
        Self {
            min_length: length >= MIN_PASSWORD_LENGTH,
            recommended_length: length >= RECOMMENDED_PASSWORD_LENGTH,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            special: password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        }
    }

    /// What registration and password reset insist on. The 12-character length is advisory.
    pub fn satisfies_policy(&self) -> bool {
        self.min_length && self.uppercase && self.digit && self.special
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordStrength {
    pub criteria: PasswordCriteria,
    pub score: u8,
    pub max_score: u8,
    pub label: &'static str,
}

impl PasswordStrength {
    pub const MAX_SCORE: u8 = 3;

    /// Zero until the minimum length holds, then a point each for uppercase, digit and special.
    pub fn of(password: &str) -> Self {
        let criteria = PasswordCriteria::evaluate(password);
        let score = if criteria.min_length {
            [criteria.uppercase, criteria.digit, criteria.special]
                .into_iter()
                .filter(|met| *met)
                .count() as u8
        } else {
            0
        };
        Self {
            criteria,
            score,
            max_score: Self::MAX_SCORE,
            label: strength_label(score),
        }
    }
}

fn strength_label(score: u8) -> &'static str {
    match score {
        0 => "ไม่ผ่านเกณฑ์",
        1 => "อ่อน",
        2 => "ปานกลาง",
        _ => "แข็งแรง",
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing)]
    pub confirm_password: String,
    #[serde(default, skip_serializing)]
    pub accept_terms: bool,
}

impl RegistrationForm {
    /// Every failing field is reported, in form order.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_thai_name(&mut errors, "firstName", &self.first_name, "ชื่อ");
        check_thai_name(&mut errors, "lastName", &self.last_name, "นามสกุล");

        if self.email.trim().is_empty() {
            errors.push("email", "กรุณากรอกอีเมล");
        } else if !is_valid_email(&self.email) {
            errors.push("email", "รูปแบบอีเมลไม่ถูกต้อง");
        }

        if !is_valid_phone(&self.phone) {
            errors.push("phone", "เบอร์โทรศัพท์ต้องเป็นตัวเลข 9-10 หลัก");
        }

        check_new_password(&mut errors, &self.password, &self.confirm_password);

        if !self.accept_terms {
            errors.push("acceptTerms", "กรุณายอมรับเงื่อนไขการใช้บริการ");
        }

        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordForm {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.token.trim().is_empty() {
            errors.push("token", "ลิงก์รีเซ็ตรหัสผ่านไม่ถูกต้องหรือหมดอายุ");
        }
        check_new_password(&mut errors, &self.password, &self.confirm_password);
        errors.into_result()
    }
}

/// Email-only forms: forgot password and resend verification.
pub fn validate_email_field(email: &str) -> Result<(), ValidationErrors> {
    if email.trim().is_empty() {
        return Err(ValidationErrors::single("email", "กรุณากรอกอีเมล"));
    }
    if !is_valid_email(email) {
        return Err(ValidationErrors::single("email", "รูปแบบอีเมลไม่ถูกต้อง"));
    }
    Ok(())
}

fn check_new_password(errors: &mut ValidationErrors, password: &str, confirmation: &str) {
    if !PasswordCriteria::evaluate(password).satisfies_policy() {
        errors.push("password", PASSWORD_POLICY_MESSAGE);
    }
    if password != confirmation {
        errors.push("confirmPassword", PASSWORD_MISMATCH_MESSAGE);
    }
}

fn check_thai_name(errors: &mut ValidationErrors, field: &'static str, value: &str, label: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, format!("กรุณากรอก{label}"));
    } else if !is_thai_text(value) {
        errors.push(field, format!("{label}ต้องเป็นภาษาไทยเท่านั้น"));
    }
}

/// Thai script (U+0E00..U+0E7F) and inner spaces only.
pub fn is_thai_text(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value
            .chars()
            .all(|c| c == ' ' || ('\u{0E00}'..='\u{0E7F}').contains(&c))
}

/// 9 or 10 digits once dashes and spaces are removed.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: Vec<char> = phone
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();
    (9..=10).contains(&digits.len()) && digits.iter().all(char::is_ascii_digit)
}
