use member_portal::api::ApiError;
use member_portal::dashboard::{
    ContactMessageRow, DashboardGateway, OperationRow, VerificationRow,
};
use member_portal::membership::{
    CommentEntry, DocumentUpload, FlatForm, MembershipGateway, MembershipId, MembershipType,
    RejectedApplication,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Upstream call recorded by the in-memory membership backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecordedCall {
    Comment(String),
    Update { fields: usize },
    Upload { document_type: String, bytes: usize },
}

/// Membership backend held in memory for the CLI demo.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMembershipGateway {
    rejections: Arc<Mutex<HashMap<String, RejectedApplication>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl InMemoryMembershipGateway {
    pub(crate) fn with_rejection(rejection_id: &str, rejection: RejectedApplication) -> Self {
        let gateway = Self::default();
        gateway
            .rejections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(rejection_id.to_string(), rejection);
        gateway
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl MembershipGateway for InMemoryMembershipGateway {
    async fn rejected_application(
        &self,
        rejection_id: &str,
    ) -> Result<Option<RejectedApplication>, ApiError> {
        let guard = self.rejections.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(rejection_id).cloned())
    }

    async fn application_summary(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
    ) -> Result<Option<Value>, ApiError> {
        Ok(Some(json!({
            "membershipType": membership_type,
            "membershipId": membership_id.0,
            "status": 2,
        })))
    }

    async fn post_comment(
        &self,
        _membership_type: MembershipType,
        _membership_id: &MembershipId,
        comment: &str,
    ) -> Result<(), ApiError> {
        self.record(RecordedCall::Comment(comment.to_string()));
        Ok(())
    }

    async fn update_application(
        &self,
        _membership_type: MembershipType,
        _membership_id: &MembershipId,
        form: &FlatForm,
    ) -> Result<(), ApiError> {
        self.record(RecordedCall::Update {
            fields: form.as_map().len(),
        });
        Ok(())
    }

    async fn upload_document(
        &self,
        _membership_type: MembershipType,
        _membership_id: &MembershipId,
        upload: &DocumentUpload,
    ) -> Result<(), ApiError> {
        self.record(RecordedCall::Upload {
            document_type: upload.document_type.as_str().to_string(),
            bytes: upload.bytes.len(),
        });
        Ok(())
    }

    async fn user_comments(
        &self,
        _membership_type: MembershipType,
        _membership_id: &MembershipId,
    ) -> Result<Vec<CommentEntry>, ApiError> {
        Ok(Vec::new())
    }
}

/// Dashboard collections held in memory for the CLI demo.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDashboardGateway {
    operations: Vec<OperationRow>,
    contact_messages: Vec<ContactMessageRow>,
    verifications: Vec<VerificationRow>,
}

impl InMemoryDashboardGateway {
    pub(crate) fn new(
        operations: Value,
        contact_messages: Value,
        verifications: Value,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            operations: rows(operations)?,
            contact_messages: rows(contact_messages)?,
            verifications: rows(verifications)?,
        })
    }
}

fn rows<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    Ok(serde_json::from_value(value)?)
}

impl DashboardGateway for InMemoryDashboardGateway {
    async fn operations(&self, _user_id: &str) -> Result<Vec<OperationRow>, ApiError> {
        Ok(self.operations.clone())
    }

    async fn contact_messages(&self, _user_id: &str) -> Result<Vec<ContactMessageRow>, ApiError> {
        Ok(self.contact_messages.clone())
    }

    async fn verifications(&self, _user_id: &str) -> Result<Vec<VerificationRow>, ApiError> {
        Ok(self.verifications.clone())
    }
}
