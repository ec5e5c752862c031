use crate::admin::AdminError;
use crate::api::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::contact::ContactError;
use crate::dashboard::DashboardError;
use crate::member::MemberError;
use crate::membership::{MappingError, ResubmissionServiceError, SubmissionError, WizardError};
use crate::telemetry::TelemetryError;
use crate::validation::ValidationErrors;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Upstream(ApiError),
    Mapping(MappingError),
    Wizard(WizardError),
    Submission(SubmissionError),
    Dashboard(DashboardError),
    Validation(ValidationErrors),
    Malformed(String),
    NotFound(String),
}

impl AppError {
    /// Message shown to the member; internal failures never leak their details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Upstream(err) => err.user_message(),
            AppError::Submission(err) => err.user_message(),
            AppError::Dashboard(err) => err.user_message(),
            AppError::Validation(errors) => errors
                .first_message()
                .unwrap_or(GENERIC_ERROR_MESSAGE)
                .to_string(),
            AppError::Wizard(err) => err.to_string(),
            AppError::Malformed(message) | AppError::NotFound(message) => message.clone(),
            AppError::Mapping(_)
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Wizard(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Submission(SubmissionError::CommentRequired(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Submission(SubmissionError::Upstream { source, .. }) => {
                upstream_status(source)
            }
            AppError::Dashboard(DashboardError::Filter(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Dashboard(DashboardError::Superseded) => StatusCode::CONFLICT,
            AppError::Dashboard(DashboardError::Upstream(source)) | AppError::Upstream(source) => {
                upstream_status(source)
            }
            AppError::Malformed(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Mapping(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Upstream client errors pass through; anything else is the gateway's fault.
fn upstream_status(error: &ApiError) -> StatusCode {
    match error {
        ApiError::Status { status, .. } if (400..500).contains(status) => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ApiError::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::InvalidPath(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Upstream(err) => write!(f, "upstream error: {}", err),
            AppError::Mapping(err) => write!(f, "mapping error: {}", err),
            AppError::Wizard(err) => write!(f, "wizard error: {}", err),
            AppError::Submission(err) => write!(f, "submission error: {}", err),
            AppError::Dashboard(err) => write!(f, "dashboard error: {}", err),
            AppError::Validation(err) => write!(f, "{}", err),
            AppError::Malformed(message) => write!(f, "malformed request: {}", message),
            AppError::NotFound(message) => write!(f, "not found: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Upstream(err) => Some(err),
            AppError::Mapping(err) => Some(err),
            AppError::Wizard(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::Dashboard(err) => Some(err),
            AppError::Validation(err) => Some(err),
            AppError::Malformed(_) | AppError::NotFound(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let mut body = json!({ "success": false, "error": self.user_message() });
        match &self {
            AppError::Validation(errors) => body["fields"] = json!(errors),
            AppError::Submission(err) if !err.completed().is_empty() => {
                body["completed"] = json!(err.completed());
                if !err.uploaded_documents().is_empty() {
                    body["uploadedDocuments"] = json!(err.uploaded_documents());
                }
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ApiError> for AppError {
    fn from(value: ApiError) -> Self {
        Self::Upstream(value)
    }
}

impl From<MappingError> for AppError {
    fn from(value: MappingError) -> Self {
        Self::Mapping(value)
    }
}

impl From<WizardError> for AppError {
    fn from(value: WizardError) -> Self {
        Self::Wizard(value)
    }
}

impl From<SubmissionError> for AppError {
    fn from(value: SubmissionError) -> Self {
        Self::Submission(value)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<DashboardError> for AppError {
    fn from(value: DashboardError) -> Self {
        match value {
            DashboardError::Upstream(err) => Self::Upstream(err),
            other => Self::Dashboard(other),
        }
    }
}

impl From<ResubmissionServiceError> for AppError {
    fn from(value: ResubmissionServiceError) -> Self {
        match value {
            ResubmissionServiceError::NotFound(id) => {
                Self::NotFound(format!("ไม่พบข้อมูลใบสมัครที่ถูกปฏิเสธ ({id})"))
            }
            ResubmissionServiceError::ApplicationNotFound(membership_type, membership_id) => {
                Self::NotFound(format!("ไม่พบข้อมูลใบสมัคร ({membership_type}/{membership_id})"))
            }
            ResubmissionServiceError::Mapping(err) => Self::Mapping(err),
            ResubmissionServiceError::Submission(err) => Self::Submission(err),
            ResubmissionServiceError::Upstream(err) => Self::Upstream(err),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::Validation(errors) => Self::Validation(errors),
            AuthError::Upstream(err) => Self::Upstream(err),
        }
    }
}

impl From<AdminError> for AppError {
    fn from(value: AdminError) -> Self {
        match value {
            AdminError::Query(message) => Self::Malformed(message),
            AdminError::Validation(errors) => Self::Validation(errors),
            AdminError::Upstream(err) => Self::Upstream(err),
        }
    }
}

impl From<MemberError> for AppError {
    fn from(value: MemberError) -> Self {
        match value {
            MemberError::NotFound(code) => {
                Self::NotFound(format!("ไม่พบข้อมูลสมาชิกรหัส {code}"))
            }
            MemberError::Validation(errors) => Self::Validation(errors),
            MemberError::Upstream(err) => Self::Upstream(err),
        }
    }
}

impl From<ContactError> for AppError {
    fn from(value: ContactError) -> Self {
        match value {
            ContactError::Validation(errors) => Self::Validation(errors),
            ContactError::Upstream(err) => Self::Upstream(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::{MembershipType, SubmissionStage};

    #[test]
    fn upstream_client_errors_pass_through() {
        let error = AppError::from(ApiError::Status {
            status: 401,
            message: Some("อีเมลหรือรหัสผ่านไม่ถูกต้อง".to_string()),
        });
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.user_message(), "อีเมลหรือรหัสผ่านไม่ถูกต้อง");

        let error = AppError::from(ApiError::Status {
            status: 503,
            message: None,
        });
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn unusable_path_ids_are_bad_requests() {
        let error = AppError::from(ApiError::InvalidPath("..".to_string()));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn validation_and_submission_errors_map_to_unprocessable() {
        let error = AppError::from(ValidationErrors::single("email", "กรุณากรอกอีเมล"));
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error.user_message(), "กรุณากรอกอีเมล");

        let error = AppError::from(SubmissionError::CommentRequired(MembershipType::Am));
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn internal_errors_hide_details() {
        let error = AppError::from(ConfigError::InvalidPort);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);

        let error = AppError::from(SubmissionError::Upstream {
            stage: SubmissionStage::Update,
            completed: vec![SubmissionStage::Comment],
            uploaded_documents: Vec::new(),
            source: ApiError::Decode("bad".to_string()),
        });
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    }
}
