//! Guest contact form: messages from visitors who are not signed in.

use std::future::Future;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::ApiError;
use crate::error::AppError;
use crate::validation::{is_valid_email, ValidationErrors};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl GuestMessage {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.push("name", "กรุณากรอกชื่อ-นามสกุล");
        }
        if self.email.trim().is_empty() {
            errors.push("email", "กรุณากรอกอีเมล");
        } else if !is_valid_email(&self.email) {
            errors.push("email", "รูปแบบอีเมลไม่ถูกต้อง");
        }
        if self.subject.trim().is_empty() {
            errors.push("subject", "กรุณาระบุหัวข้อ");
        }
        if self.message.trim().is_empty() {
            errors.push("message", "กรุณากรอกข้อความ");
        }
        errors.into_result()
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|phone| !phone.is_empty())
                .map(str::to_string),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

/// `POST /api/contact/not-user-message`.
pub trait ContactGateway: Send + Sync {
    fn send_guest_message(
        &self,
        message: &GuestMessage,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

pub struct ContactService<G> {
    gateway: Arc<G>,
}

impl<G> ContactService<G>
where
    G: ContactGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn send(&self, message: &GuestMessage) -> Result<(), ContactError> {
        message.validate()?;
        let message = message.trimmed();
        self.gateway.send_guest_message(&message).await?;
        tracing::info!(subject = %message.subject, "guest message forwarded");
        Ok(())
    }
}

pub fn contact_router<G>(service: Arc<ContactService<G>>) -> Router
where
    G: ContactGateway + 'static,
{
    Router::new()
        .route("/api/v1/contact", post(send_handler::<G>))
        .with_state(service)
}

pub(crate) async fn send_handler<G>(
    State(service): State<Arc<ContactService<G>>>,
    Json(message): Json<GuestMessage>,
) -> Result<(StatusCode, Json<Value>), AppError>
where
    G: ContactGateway + 'static,
{
    service.send(&message).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "success": true,
            "message": "ส่งข้อความเรียบร้อยแล้ว เจ้าหน้าที่จะติดต่อกลับโดยเร็วที่สุด",
        })),
    ))
}
