use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::api::ApiError;
use crate::auth::gateway::AuthGateway;
use crate::auth::service::AuthService;
use crate::auth::session::SessionUser;
use crate::auth::validation::RegistrationForm;

pub(super) const MEMBER_EMAIL: &str = "somchai@example.co.th";
pub(super) const MEMBER_PASSWORD: &str = "Secret#2024";

/// Records every upstream call so tests can prove validation short-circuits.
#[derive(Default)]
pub(super) struct MemoryAuth {
    accounts: Mutex<HashMap<String, (String, SessionUser)>>,
    calls: Mutex<Vec<&'static str>>,
}

impl MemoryAuth {
    pub(super) fn with_member() -> Self {
        let auth = Self::default();
        auth.accounts.lock().expect("accounts mutex poisoned").insert(
            MEMBER_EMAIL.to_string(),
            (
                MEMBER_PASSWORD.to_string(),
                SessionUser {
                    id: "17".to_string(),
                    email: MEMBER_EMAIL.to_string(),
                    first_name: Some("สมชาย".to_string()),
                    last_name: Some("ใจดี".to_string()),
                    role: Some("member".to_string()),
                },
            ),
        );
        auth
    }

    pub(super) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }
}

impl AuthGateway for MemoryAuth {
    async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ApiError> {
        self.record("login");
        let accounts = self.accounts.lock().expect("accounts mutex poisoned");
        match accounts.get(email) {
            Some((stored, user)) if stored == password => Ok(user.clone()),
            _ => Err(ApiError::Status {
                status: 401,
                message: Some("อีเมลหรือรหัสผ่านไม่ถูกต้อง".to_string()),
            }),
        }
    }

    async fn register(&self, form: &RegistrationForm) -> Result<(), ApiError> {
        self.record("register");
        let mut accounts = self.accounts.lock().expect("accounts mutex poisoned");
        if accounts.contains_key(form.email.trim()) {
            return Err(ApiError::Rejected {
                message: "อีเมลนี้ถูกใช้งานแล้ว".to_string(),
            });
        }
        let user = SessionUser {
            id: (accounts.len() + 100).to_string(),
            email: form.email.trim().to_string(),
            first_name: Some(form.first_name.clone()),
            last_name: Some(form.last_name.clone()),
            role: None,
        };
        accounts.insert(user.email.clone(), (form.password.clone(), user));
        Ok(())
    }

    async fn forgot_password(&self, _email: &str) -> Result<(), ApiError> {
        self.record("forgot_password");
        Ok(())
    }

    async fn reset_password(&self, _token: &str, _password: &str) -> Result<(), ApiError> {
        self.record("reset_password");
        Ok(())
    }

    async fn resend_verification(&self, _email: &str) -> Result<(), ApiError> {
        self.record("resend_verification");
        Ok(())
    }

    async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        self.record("verify_email");
        if token == "expired" {
            return Err(ApiError::Status {
                status: 400,
                message: Some("ลิงก์ยืนยันหมดอายุแล้ว".to_string()),
            });
        }
        Ok(())
    }
}

pub(super) fn build_service(gateway: MemoryAuth) -> (Arc<AuthService<MemoryAuth>>, Arc<MemoryAuth>) {
    let gateway = Arc::new(gateway);
    (Arc::new(AuthService::new(gateway.clone())), gateway)
}

pub(super) fn valid_registration() -> RegistrationForm {
    RegistrationForm {
        first_name: "สมหญิง".to_string(),
        last_name: "รักไทย".to_string(),
        email: "somying@example.co.th".to_string(),
        phone: "081-234-5678".to_string(),
        password: "Strong#Pass1".to_string(),
        confirm_password: "Strong#Pass1".to_string(),
        accept_terms: true,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
