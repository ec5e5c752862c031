//! Existing-member lookups: the member detail summary and verification submissions.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::ApiError;
use crate::error::AppError;
use crate::membership::MembershipType;
use crate::validation::ValidationErrors;
use crate::wire::{deserialize_id, deserialize_optional_text};

/// Industrial group or provincial chapter the member belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberGroup {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(
        default,
        alias = "name_th",
        alias = "nameTh",
        deserialize_with = "deserialize_optional_text"
    )]
    pub name: Option<String>,
}

/// Membership-group summary from `/api/member-detail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetail {
    #[serde(alias = "member_code", alias = "MEMBER_CODE")]
    pub member_code: String,
    #[serde(
        default,
        alias = "company_name",
        alias = "company_name_th",
        alias = "COMPANY_NAME",
        deserialize_with = "deserialize_optional_text"
    )]
    pub company_name: Option<String>,
    #[serde(
        default,
        alias = "company_name_en",
        deserialize_with = "deserialize_optional_text"
    )]
    pub company_name_en: Option<String>,
    #[serde(
        default,
        alias = "member_type",
        alias = "MEMBER_TYPE",
        deserialize_with = "deserialize_optional_text"
    )]
    pub member_type: Option<String>,
    #[serde(default, alias = "tax_id", deserialize_with = "deserialize_optional_text")]
    pub tax_id: Option<String>,
    #[serde(default, alias = "industrial_groups")]
    pub industrial_groups: Vec<MemberGroup>,
    #[serde(default, alias = "provincial_chapters")]
    pub provincial_chapters: Vec<MemberGroup>,
}

impl MemberDetail {
    /// The member's class, whether the backend reports the code or the Thai label.
    pub fn membership_type(&self) -> Option<MembershipType> {
        let raw = self.member_type.as_deref()?.trim();
        raw.parse::<MembershipType>().ok().or_else(|| {
            MembershipType::ALL
                .into_iter()
                .find(|candidate| candidate.label() == raw)
        })
    }
}

/// Claim of an existing membership by a portal user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberConfirmation {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub member_code: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl MemberConfirmation {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.user_id.trim().is_empty() {
            errors.push("userId", "ไม่พบข้อมูลผู้ใช้ กรุณาเข้าสู่ระบบใหม่");
        }
        if self.member_code.trim().is_empty() {
            errors.push("memberCode", "กรุณาระบุรหัสสมาชิก");
        }
        let tax_id = self.tax_id.trim();
        if tax_id.len() != 13 || !tax_id.chars().all(|c| c.is_ascii_digit()) {
            errors.push("taxId", "เลขประจำตัวผู้เสียภาษีต้องเป็นตัวเลข 13 หลัก");
        }
        errors.into_result()
    }
}

/// Withdrawal of a verification submission that has not been reviewed yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionWithdrawal {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub submission_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MemberError {
    #[error("member '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

pub trait MemberGateway: Send + Sync {
    /// `None` when no member has the code.
    fn member_detail(
        &self,
        member_code: &str,
    ) -> impl Future<Output = Result<Option<MemberDetail>, ApiError>> + Send;

    fn confirm_member(
        &self,
        confirmation: &MemberConfirmation,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn delete_submission(
        &self,
        withdrawal: &SubmissionWithdrawal,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

pub struct MemberService<G> {
    gateway: Arc<G>,
}

impl<G> MemberService<G>
where
    G: MemberGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn detail(&self, member_code: &str) -> Result<MemberDetail, MemberError> {
        let member_code = member_code.trim();
        if member_code.is_empty() {
            return Err(ValidationErrors::single("memberCode", "กรุณาระบุรหัสสมาชิก").into());
        }
        self.gateway
            .member_detail(member_code)
            .await?
            .ok_or_else(|| MemberError::NotFound(member_code.to_string()))
    }

    pub async fn confirm(&self, confirmation: &MemberConfirmation) -> Result<(), MemberError> {
        confirmation.validate()?;
        self.gateway.confirm_member(confirmation).await?;
        tracing::info!(
            user_id = %confirmation.user_id,
            member_code = %confirmation.member_code,
            "existing membership claim submitted"
        );
        Ok(())
    }

    pub async fn withdraw(&self, withdrawal: &SubmissionWithdrawal) -> Result<(), MemberError> {
        let mut errors = ValidationErrors::new();
        if withdrawal.user_id.trim().is_empty() {
            errors.push("userId", "ไม่พบข้อมูลผู้ใช้ กรุณาเข้าสู่ระบบใหม่");
        }
        if withdrawal.submission_id.trim().is_empty() {
            errors.push("submissionId", "ไม่พบรายการที่ต้องการลบ");
        }
        errors.into_result()?;
        self.gateway.delete_submission(withdrawal).await?;
        tracing::info!(submission_id = %withdrawal.submission_id, "verification submission withdrawn");
        Ok(())
    }
}

pub fn member_router<G>(service: Arc<MemberService<G>>) -> Router
where
    G: MemberGateway + 'static,
{
    Router::new()
        .route("/api/v1/members/confirm", post(confirm_handler::<G>))
        .route(
            "/api/v1/members/submissions/withdraw",
            post(withdraw_handler::<G>),
        )
        .route("/api/v1/members/:member_code", get(detail_handler::<G>))
        .with_state(service)
}

pub(crate) async fn detail_handler<G>(
    State(service): State<Arc<MemberService<G>>>,
    Path(member_code): Path<String>,
) -> Result<Json<Value>, AppError>
where
    G: MemberGateway + 'static,
{
    let detail = service.detail(&member_code).await?;
    let membership_type = detail.membership_type();
    Ok(Json(json!({
        "member": detail,
        "membershipType": membership_type,
        "membershipLabel": membership_type.map(MembershipType::label),
    })))
}

pub(crate) async fn confirm_handler<G>(
    State(service): State<Arc<MemberService<G>>>,
    Json(confirmation): Json<MemberConfirmation>,
) -> Result<(StatusCode, Json<Value>), AppError>
where
    G: MemberGateway + 'static,
{
    service.confirm(&confirmation).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "success": true,
            "message": "ส่งคำขอยืนยันสมาชิกเดิมเรียบร้อยแล้ว กรุณารอการตรวจสอบ",
        })),
    ))
}

pub(crate) async fn withdraw_handler<G>(
    State(service): State<Arc<MemberService<G>>>,
    Json(withdrawal): Json<SubmissionWithdrawal>,
) -> Result<Json<Value>, AppError>
where
    G: MemberGateway + 'static,
{
    service.withdraw(&withdrawal).await?;
    Ok(Json(json!({ "success": true })))
}
