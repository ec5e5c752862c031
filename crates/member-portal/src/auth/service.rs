use std::sync::Arc;

use super::gateway::AuthGateway;
use super::session::SessionUser;
use super::validation::{validate_email_field, LoginForm, RegistrationForm, ResetPasswordForm};
use crate::api::ApiError;
use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

/// Validates auth forms locally and forwards only well-formed ones upstream.
pub struct AuthService<G> {
    gateway: Arc<G>,
}

impl<G> AuthService<G>
where
    G: AuthGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn login(&self, form: &LoginForm) -> Result<SessionUser, AuthError> {
        form.validate()?;
        let user = self.gateway.login(form.email.trim(), &form.password).await?;
        tracing::info!(user_id = %user.id, "member signed in");
        Ok(user)
    }

    pub async fn register(&self, form: &RegistrationForm) -> Result<(), AuthError> {
        if let Err(errors) = form.validate() {
            tracing::debug!(fields = %errors, "registration blocked locally");
            return Err(errors.into());
        }
        self.gateway.register(form).await?;
        tracing::info!("registration accepted, awaiting email verification");
        Ok(())
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        validate_email_field(email)?;
        self.gateway.forgot_password(email.trim()).await?;
        Ok(())
    }

    pub async fn reset_password(&self, form: &ResetPasswordForm) -> Result<(), AuthError> {
        form.validate()?;
        self.gateway
            .reset_password(form.token.trim(), &form.password)
            .await?;
        Ok(())
    }

    pub async fn resend_verification(&self, email: &str) -> Result<(), AuthError> {
        validate_email_field(email)?;
        self.gateway.resend_verification(email.trim()).await?;
        Ok(())
    }

    pub async fn verify_email(&self, token: &str) -> Result<(), AuthError> {
        if token.trim().is_empty() {
            return Err(ValidationErrors::single("token", "ลิงก์ยืนยันอีเมลไม่ถูกต้อง").into());
        }
        self.gateway.verify_email(token.trim()).await?;
        Ok(())
    }
}
