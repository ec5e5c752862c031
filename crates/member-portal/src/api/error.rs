/// Shown when the upstream backend cannot be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "เกิดข้อผิดพลาดในการเชื่อมต่อ กรุณาลองใหม่อีกครั้ง";

/// Shown when the upstream failed without saying why.
pub const GENERIC_ERROR_MESSAGE: &str = "เกิดข้อผิดพลาด กรุณาลองใหม่อีกครั้ง";

/// Failure talking to the upstream membership backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("upstream unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream responded with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("upstream rejected the request: {message}")]
    Rejected { message: String },
    #[error("unexpected upstream payload: {0}")]
    Decode(String),
    /// An id that cannot stand as a single upstream path segment, or an unusable base URL.
    #[error("invalid upstream path: {0}")]
    InvalidPath(String),
}

impl ApiError {
    /// Message suitable for showing to the member: the backend's own wording when it sent one,
    /// otherwise a generic Thai fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Rejected { message } => message.clone(),
            ApiError::Status { message: None, .. }
            | ApiError::Decode(_)
            | ApiError::InvalidPath(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}
