use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{CommentEntry, CommentPolicy, DocumentType, MembershipId, MembershipType};
use super::form::FlatForm;
use super::gateway::MembershipGateway;
use super::mapping::{table_for, MappingError};
use super::steps::StepDefinition;
use super::wizard::StepWizard;
use crate::api::ApiError;

pub const COMMENT_REQUIRED_MESSAGE: &str = "กรุณาระบุข้อความชี้แจงก่อนส่งใบสมัครอีกครั้ง";

/// A replacement file chosen by the applicant for one document slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub document_type: DocumentType,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// JSON part of a resubmission: explanation for the reviewer plus the edited form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResubmissionPayload {
    #[serde(default)]
    pub comment: String,
    pub form_data: FlatForm,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResubmissionRequest {
    pub comment: String,
    pub form_data: FlatForm,
    pub documents: Vec<DocumentUpload>,
}

impl From<ResubmissionPayload> for ResubmissionRequest {
    fn from(payload: ResubmissionPayload) -> Self {
        Self {
            comment: payload.comment,
            form_data: payload.form_data,
            documents: Vec::new(),
        }
    }
}

/// Upstream calls made during a resubmission, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStage {
    Comment,
    Update,
    Documents,
}

impl SubmissionStage {
    pub fn label(self) -> &'static str {
        match self {
            SubmissionStage::Comment => "comment",
            SubmissionStage::Update => "update",
            SubmissionStage::Documents => "documents",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub membership_type: MembershipType,
    pub membership_id: MembershipId,
    pub completed: Vec<SubmissionStage>,
    pub uploaded_documents: Vec<DocumentType>,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("a comment is required for {0} resubmissions")]
    CommentRequired(MembershipType),
    #[error("{} stage failed: {source}", stage.label())]
    Upstream {
        stage: SubmissionStage,
        completed: Vec<SubmissionStage>,
        /// Uploads accepted before the failing call; only non-empty when `stage` is documents.
        uploaded_documents: Vec<DocumentType>,
        #[source]
        source: ApiError,
    },
}

impl SubmissionError {
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::CommentRequired(_) => COMMENT_REQUIRED_MESSAGE.to_string(),
            SubmissionError::Upstream { source, .. } => source.user_message(),
        }
    }

    /// Stages that reached the upstream successfully before the failure.
    pub fn completed(&self) -> &[SubmissionStage] {
        match self {
            SubmissionError::CommentRequired(_) => &[],
            SubmissionError::Upstream { completed, .. } => completed,
        }
    }

    pub fn uploaded_documents(&self) -> &[DocumentType] {
        match self {
            SubmissionError::CommentRequired(_) => &[],
            SubmissionError::Upstream {
                uploaded_documents, ..
            } => uploaded_documents,
        }
    }
}

/// Everything the resubmission page needs to render a pre-filled wizard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResubmissionDraft {
    pub membership_type: MembershipType,
    pub membership_id: MembershipId,
    pub rejection_reason: Option<Value>,
    pub admin_note: Option<String>,
    pub current_step: u8,
    pub steps: &'static [StepDefinition],
    pub form_data: FlatForm,
    pub documents_to_reupload: Vec<DocumentType>,
}

impl ResubmissionDraft {
    /// Snapshot of a wizard positioned on its opening step, with the slots still lacking a file.
    pub fn from_wizard(
        wizard: StepWizard,
        membership_id: MembershipId,
        rejection_reason: Option<Value>,
        admin_note: Option<String>,
    ) -> Self {
        let membership_type = wizard.membership_type();
        let documents_to_reupload = wizard
            .form()
            .missing_documents(table_for(membership_type).documents);
        Self {
            membership_type,
            membership_id,
            rejection_reason,
            admin_note,
            current_step: wizard.current_step(),
            steps: wizard.steps(),
            form_data: wizard.into_form(),
            documents_to_reupload,
        }
    }
}

/// Current upstream state of an application together with its reviewer conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationOverview {
    pub membership_type: MembershipType,
    pub membership_id: MembershipId,
    pub summary: Value,
    pub comments: Vec<CommentEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum ResubmissionServiceError {
    #[error("rejected application {0} not found")]
    NotFound(String),
    #[error("application {0}/{1} not found")]
    ApplicationNotFound(MembershipType, MembershipId),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

/// Loads rejected applications into wizard drafts and pushes resubmissions upstream.
pub struct ResubmissionService<G> {
    gateway: Arc<G>,
}

impl<G> ResubmissionService<G>
where
    G: MembershipGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn load_draft(
        &self,
        rejection_id: &str,
    ) -> Result<ResubmissionDraft, ResubmissionServiceError> {
        let rejection = self
            .gateway
            .rejected_application(rejection_id)
            .await?
            .ok_or_else(|| ResubmissionServiceError::NotFound(rejection_id.to_string()))?;

        let wizard = StepWizard::from_rejection(&rejection)?;
        tracing::debug!(
            rejection_id,
            membership_type = %rejection.membership_type,
            step = wizard.current_step(),
            "mapped rejected application"
        );

        Ok(ResubmissionDraft::from_wizard(
            wizard,
            rejection.membership_id,
            rejection.rejection_reason,
            rejection.admin_note,
        ))
    }

    /// Summary and comment history are read concurrently. A missing summary is not found;
    /// an unavailable comment history degrades to an empty list.
    pub async fn overview(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
    ) -> Result<ApplicationOverview, ResubmissionServiceError> {
        let (summary, comments) = tokio::join!(
            self.gateway.application_summary(membership_type, membership_id),
            self.gateway.user_comments(membership_type, membership_id),
        );

        let summary = summary?.ok_or_else(|| {
            ResubmissionServiceError::ApplicationNotFound(membership_type, membership_id.clone())
        })?;
        let comments = comments.unwrap_or_else(|err| {
            tracing::warn!(
                membership_type = %membership_type,
                membership_id = %membership_id,
                error = %err,
                "comment history unavailable"
            );
            Vec::new()
        });

        Ok(ApplicationOverview {
            membership_type,
            membership_id: membership_id.clone(),
            summary,
            comments,
        })
    }

    /// Comment, then update, then each upload. Stops at the first failure; earlier
    /// stages stay applied upstream.
    pub async fn submit(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
        request: ResubmissionRequest,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let comment = request.comment.trim();
        if comment.is_empty() && membership_type.comment_policy() == CommentPolicy::Required {
            return Err(SubmissionError::CommentRequired(membership_type));
        }

        let mut completed = Vec::new();

        if !comment.is_empty() {
            self.gateway
                .post_comment(membership_type, membership_id, comment)
                .await
                .map_err(|source| failed(SubmissionStage::Comment, &completed, &[], source))?;
            completed.push(SubmissionStage::Comment);
        }

        self.gateway
            .update_application(membership_type, membership_id, &request.form_data)
            .await
            .map_err(|source| failed(SubmissionStage::Update, &completed, &[], source))?;
        completed.push(SubmissionStage::Update);

        let mut uploaded_documents = Vec::with_capacity(request.documents.len());
        for upload in &request.documents {
            self.gateway
                .upload_document(membership_type, membership_id, upload)
                .await
                .map_err(|source| {
                    failed(
                        SubmissionStage::Documents,
                        &completed,
                        &uploaded_documents,
                        source,
                    )
                })?;
            uploaded_documents.push(upload.document_type);
        }
        if !uploaded_documents.is_empty() {
            completed.push(SubmissionStage::Documents);
        }

        tracing::info!(
            membership_type = %membership_type,
            membership_id = %membership_id,
            uploads = uploaded_documents.len(),
            "resubmission accepted"
        );

        Ok(SubmissionReceipt {
            membership_type,
            membership_id: membership_id.clone(),
            completed,
            uploaded_documents,
        })
    }
}

fn failed(
    stage: SubmissionStage,
    completed: &[SubmissionStage],
    uploaded_documents: &[DocumentType],
    source: ApiError,
) -> SubmissionError {
    tracing::warn!(
        stage = stage.label(),
        uploaded = uploaded_documents.len(),
        error = %source,
        "resubmission stage failed"
    );
    SubmissionError::Upstream {
        stage,
        completed: completed.to_vec(),
        uploaded_documents: uploaded_documents.to_vec(),
        source,
    }
}
