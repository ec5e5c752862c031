use std::future::Future;

use super::session::SessionUser;
use super::validation::RegistrationForm;
use crate::api::ApiError;

/// Upstream `/api/auth/*` endpoints.
pub trait AuthGateway: Send + Sync {
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<SessionUser, ApiError>> + Send;

    fn register(
        &self,
        form: &RegistrationForm,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn forgot_password(&self, email: &str) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn reset_password(
        &self,
        token: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn resend_verification(&self, email: &str)
        -> impl Future<Output = Result<(), ApiError>> + Send;

    fn verify_email(&self, token: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}
