use std::future::Future;

use serde_json::Value;

use super::domain::{CommentEntry, MembershipId, MembershipType, RejectedApplication};
use super::form::FlatForm;
use super::submission::DocumentUpload;
use crate::api::ApiError;

/// Upstream endpoints the resubmission workflow depends on.
pub trait MembershipGateway: Send + Sync {
    /// `None` when the rejection record does not exist.
    fn rejected_application(
        &self,
        rejection_id: &str,
    ) -> impl Future<Output = Result<Option<RejectedApplication>, ApiError>> + Send;

    fn application_summary(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
    ) -> impl Future<Output = Result<Option<Value>, ApiError>> + Send;

    fn post_comment(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
        comment: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn update_application(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
        form: &FlatForm,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn upload_document(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
        upload: &DocumentUpload,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn user_comments(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
    ) -> impl Future<Output = Result<Vec<CommentEntry>, ApiError>> + Send;
}
