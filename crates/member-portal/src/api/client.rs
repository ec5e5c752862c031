use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::envelope::{decode, unwrap_envelope};
use super::error::ApiError;
use crate::admin::{ActivityPage, ActivityQuery, AdminGateway, InviteDetails};
use crate::auth::{AuthGateway, RegistrationForm, SessionUser};
use crate::config::UpstreamConfig;
use crate::contact::{ContactGateway, GuestMessage};
use crate::dashboard::{ContactMessageRow, DashboardGateway, OperationRow, VerificationRow};
use crate::member::{MemberConfirmation, MemberDetail, MemberGateway, SubmissionWithdrawal};
use crate::membership::{
    CommentEntry, DocumentUpload, FlatForm, MembershipGateway, MembershipId, MembershipType,
    RejectedApplication,
};

pub type ClientResult<T> = Result<T, ApiError>;

/// HTTP client for the membership backend. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    base: Url,
    base_url: String,
}

impl PortalClient {
    pub fn new(config: &UpstreamConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|err| ApiError::InvalidPath(format!("{base_url}: {err}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidPath(base_url));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fixed endpoint path such as `/api/auth/login`.
    fn url(&self, path: &str) -> ClientResult<Url> {
        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
        self.endpoint(&segments)
    }

    /// URL built one segment at a time. Each segment is percent-encoded on its own, so an id
    /// carrying `/`, `?` or `#` stays inside its segment.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(segment.trim(), "" | "." | ".."))
        {
            return Err(ApiError::InvalidPath(format!(
                "unusable path segment '{segment}'"
            )));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidPath(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send and read the body as JSON. Error bodies that are not JSON read as `null`.
    async fn send(&self, request: RequestBuilder) -> ClientResult<(u16, Value)> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::Transport)?;

        if bytes.is_empty() {
            return Ok((status.as_u16(), Value::Null));
        }
        match serde_json::from_slice(&bytes) {
            Ok(body) => Ok((status.as_u16(), body)),
            Err(err) if status.is_success() => Err(err.into()),
            Err(_) => Ok((status.as_u16(), Value::Null)),
        }
    }

    async fn get_value(&self, url: Url, query: &[(&str, &str)]) -> ClientResult<Value> {
        let (status, body) = self.send(self.http.get(url).query(query)).await?;
        unwrap_envelope(status, body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let (status, body) = self.send(self.http.get(url).query(query)).await?;
        decode(status, body)
    }

    /// `None` on 404 or an empty `data`.
    async fn get_optional<T: DeserializeOwned>(&self, url: Url) -> ClientResult<Option<T>> {
        match self.get_value(url, &[]).await {
            Ok(Value::Null) => Ok(None),
            Ok(data) => Ok(Some(serde_json::from_value(data)?)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
        keys: &[&str],
    ) -> ClientResult<Vec<T>> {
        let data = self.get_value(url, query).await?;
        extract_list(data, keys)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> ClientResult<Value> {
        let (status, body) = self.send(self.http.post(url).json(body)).await?;
        unwrap_envelope(status, body)
    }
}

/// Collections arrive as a bare array, under one of `keys`, or as the only array in an object.
fn extract_list<T: DeserializeOwned>(data: Value, keys: &[&str]) -> ClientResult<Vec<T>> {
    let rows = match data {
        Value::Null => return Ok(Vec::new()),
        Value::Array(rows) => rows,
        Value::Object(mut map) => {
            let keyed = keys
                .iter()
                .find_map(|key| map.remove(*key).filter(Value::is_array));
            match keyed.or_else(|| map.into_iter().map(|(_, value)| value).find(Value::is_array)) {
                Some(Value::Array(rows)) => rows,
                _ => Vec::new(),
            }
        }
        other => return Err(ApiError::Decode(format!("expected a list, found {other}"))),
    };
    Ok(serde_json::from_value(Value::Array(rows))?)
}

/// Some endpoints wrap the record once more, e.g. `{ user: {...} }`.
fn unwrap_field(data: Value, key: &str) -> Value {
    match data {
        Value::Object(mut map) if map.get(key).is_some_and(Value::is_object) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        other => other,
    }
}

impl MembershipGateway for PortalClient {
    async fn rejected_application(
        &self,
        rejection_id: &str,
    ) -> ClientResult<Option<RejectedApplication>> {
        let url = self.endpoint(&["api", "membership", "rejected-applications", rejection_id])?;
        self.get_optional(url).await
    }

    async fn application_summary(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
    ) -> ClientResult<Option<Value>> {
        let url = self.endpoint(&[
            "api",
            "membership",
            membership_type.code(),
            "summary",
            &membership_id.0,
        ])?;
        self.get_optional(url).await
    }

    async fn post_comment(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
        comment: &str,
    ) -> ClientResult<()> {
        let url = self.endpoint(&[
            "api",
            "membership",
            membership_type.code(),
            &membership_id.0,
            "comment",
        ])?;
        self.post_json(url, &json!({ "comment": comment })).await?;
        Ok(())
    }

    async fn update_application(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
        form: &FlatForm,
    ) -> ClientResult<()> {
        let versioned = format!("{}-v4", membership_type.code());
        let url = self.endpoint(&["api", "membership", &versioned, &membership_id.0, "update"])?;
        self.post_json(url, form).await?;
        Ok(())
    }

    async fn upload_document(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
        upload: &DocumentUpload,
    ) -> ClientResult<()> {
        let url = self.endpoint(&[
            "api",
            "membership",
            membership_type.code(),
            &membership_id.0,
            "documents",
        ])?;
        let file = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type())
            .map_err(ApiError::Transport)?;
        let form = Form::new()
            .text("documentType", upload.document_type.as_str())
            .part("file", file);

        let (status, body) = self.send(self.http.post(url).multipart(form)).await?;
        unwrap_envelope(status, body)?;
        Ok(())
    }

    async fn user_comments(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
    ) -> ClientResult<Vec<CommentEntry>> {
        let url = self.endpoint(&[
            "api",
            "membership",
            "user-comments",
            membership_type.code(),
            &membership_id.0,
        ])?;
        self.get_list(url, &[], &["comments"]).await
    }
}

impl DashboardGateway for PortalClient {
    async fn operations(&self, user_id: &str) -> ClientResult<Vec<OperationRow>> {
        let url = self.url("/api/dashboard/operation-status")?;
        self.get_list(url, &[("userId", user_id)], &["operations"])
            .await
    }

    async fn contact_messages(&self, user_id: &str) -> ClientResult<Vec<ContactMessageRow>> {
        let url = self.url("/api/dashboard/operation-status/contact-message-status")?;
        self.get_list(url, &[("userId", user_id)], &["messages", "contactMessages"])
            .await
    }

    async fn verifications(&self, user_id: &str) -> ClientResult<Vec<VerificationRow>> {
        let url = self.url("/api/member/verification-status")?;
        self.get_list(url, &[("userId", user_id)], &["submissions", "verifications"])
            .await
    }
}

impl AuthGateway for PortalClient {
    async fn login(&self, email: &str, password: &str) -> ClientResult<SessionUser> {
        let url = self.url("/api/auth/login")?;
        let data = self
            .post_json(url, &json!({ "email": email, "password": password }))
            .await?;
        Ok(serde_json::from_value(unwrap_field(data, "user"))?)
    }

    async fn register(&self, form: &RegistrationForm) -> ClientResult<()> {
        self.post_json(self.url("/api/auth/register")?, form).await?;
        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> ClientResult<()> {
        let url = self.url("/api/auth/forgot-password")?;
        self.post_json(url, &json!({ "email": email })).await?;
        Ok(())
    }

    async fn reset_password(&self, token: &str, password: &str) -> ClientResult<()> {
        let url = self.url("/api/auth/reset-password")?;
        self.post_json(url, &json!({ "token": token, "password": password }))
            .await?;
        Ok(())
    }

    async fn resend_verification(&self, email: &str) -> ClientResult<()> {
        let url = self.url("/api/auth/resend-verification")?;
        self.post_json(url, &json!({ "email": email })).await?;
        Ok(())
    }

    async fn verify_email(&self, token: &str) -> ClientResult<()> {
        let url = self.url("/api/auth/verify-email")?;
        self.get_value(url, &[("token", token)]).await?;
        Ok(())
    }
}

impl AdminGateway for PortalClient {
    async fn recent_activities(&self, query: ActivityQuery) -> ClientResult<ActivityPage> {
        let url = self.url("/api/admin/recent-activities")?;
        let page = query.page.to_string();
        let limit = query.limit.to_string();
        self.get_json(url, &[("page", page.as_str()), ("limit", limit.as_str())])
            .await
    }

    async fn verify_invite(&self, token: &str) -> ClientResult<InviteDetails> {
        let url = self.url("/api/admin/invite/verify")?;
        let data = self.post_json(url, &json!({ "token": token })).await?;
        Ok(serde_json::from_value(unwrap_field(data, "invite"))?)
    }

    async fn complete_invite(&self, token: &str, name: &str, password: &str) -> ClientResult<()> {
        let url = self.url("/api/admin/invite/complete")?;
        self.post_json(
            url,
            &json!({ "token": token, "name": name, "password": password }),
        )
        .await?;
        Ok(())
    }
}

impl MemberGateway for PortalClient {
    async fn member_detail(&self, member_code: &str) -> ClientResult<Option<MemberDetail>> {
        let url = self.url("/api/member-detail")?;
        let data = match self.get_value(url, &[("memberCode", member_code)]).await {
            Ok(data) => data,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };
        let record = match data {
            Value::Array(rows) => rows.into_iter().next(),
            Value::Null => None,
            other => Some(other),
        };
        record
            .map(|record| serde_json::from_value(record).map_err(ApiError::from))
            .transpose()
    }

    async fn confirm_member(&self, confirmation: &MemberConfirmation) -> ClientResult<()> {
        self.post_json(self.url("/api/member/confirm")?, confirmation)
            .await?;
        Ok(())
    }

    async fn delete_submission(&self, withdrawal: &SubmissionWithdrawal) -> ClientResult<()> {
        self.post_json(self.url("/api/member/delete-submission")?, withdrawal)
            .await?;
        Ok(())
    }
}

impl ContactGateway for PortalClient {
    async fn send_guest_message(&self, message: &GuestMessage) -> ClientResult<()> {
        self.post_json(self.url("/api/contact/not-user-message")?, message)
            .await?;
        Ok(())
    }
}
