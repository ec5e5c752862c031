use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::gateway::AuthGateway;
use super::service::AuthService;
use super::validation::{LoginForm, PasswordStrength, RegistrationForm, ResetPasswordForm};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct PasswordProbe {
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmailRequest {
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenQuery {
    #[serde(default)]
    token: String,
}

pub fn auth_router<G>(service: Arc<AuthService<G>>) -> Router
where
    G: AuthGateway + 'static,
{
    Router::new()
        .route("/api/v1/auth/login", post(login_handler::<G>))
        .route("/api/v1/auth/register", post(register_handler::<G>))
        .route("/api/v1/auth/password-strength", post(password_strength_handler))
        .route("/api/v1/auth/forgot-password", post(forgot_password_handler::<G>))
        .route("/api/v1/auth/reset-password", post(reset_password_handler::<G>))
        .route(
            "/api/v1/auth/resend-verification",
            post(resend_verification_handler::<G>),
        )
        .route("/api/v1/auth/verify-email", get(verify_email_handler::<G>))
        .with_state(service)
}

pub(crate) async fn login_handler<G>(
    State(service): State<Arc<AuthService<G>>>,
    Json(form): Json<LoginForm>,
) -> Result<Json<Value>, AppError>
where
    G: AuthGateway + 'static,
{
    let user = service.login(&form).await?;
    Ok(Json(json!({
        "success": true,
        "user": user,
        "rememberMe": form.remember_me,
    })))
}

pub(crate) async fn register_handler<G>(
    State(service): State<Arc<AuthService<G>>>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<Value>), AppError>
where
    G: AuthGateway + 'static,
{
    service.register(&form).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "ลงทะเบียนสำเร็จ กรุณาตรวจสอบอีเมลเพื่อยืนยันบัญชี",
        })),
    ))
}

pub(crate) async fn password_strength_handler(
    Json(probe): Json<PasswordProbe>,
) -> Json<PasswordStrength> {
    Json(PasswordStrength::of(&probe.password))
}

pub(crate) async fn forgot_password_handler<G>(
    State(service): State<Arc<AuthService<G>>>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<Value>, AppError>
where
    G: AuthGateway + 'static,
{
    service.forgot_password(&request.email).await?;
    Ok(Json(json!({
        "success": true,
        "message": "หากอีเมลนี้มีอยู่ในระบบ เราได้ส่งลิงก์สำหรับตั้งรหัสผ่านใหม่แล้ว",
    })))
}

pub(crate) async fn reset_password_handler<G>(
    State(service): State<Arc<AuthService<G>>>,
    Json(form): Json<ResetPasswordForm>,
) -> Result<Json<Value>, AppError>
where
    G: AuthGateway + 'static,
{
    service.reset_password(&form).await?;
    Ok(Json(json!({ "success": true })))
}

pub(crate) async fn resend_verification_handler<G>(
    State(service): State<Arc<AuthService<G>>>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<Value>, AppError>
where
    G: AuthGateway + 'static,
{
    service.resend_verification(&request.email).await?;
    Ok(Json(json!({ "success": true })))
}

pub(crate) async fn verify_email_handler<G>(
    State(service): State<Arc<AuthService<G>>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Value>, AppError>
where
    G: AuthGateway + 'static,
{
    service.verify_email(&query.token).await?;
    Ok(Json(json!({ "success": true })))
}
