use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::api::ApiError;
use crate::membership::domain::{
    CommentEntry, CommentType, DocumentType, MembershipId, MembershipType, RejectedApplication,
};
use crate::membership::form::FlatForm;
use crate::membership::gateway::MembershipGateway;
use crate::membership::submission::{DocumentUpload, ResubmissionService};

pub(super) fn ac_snapshot() -> Value {
    json!({
        "main": {
            "company_name_th": "บริษัท ตัวอย่างการผลิต จำกัด",
            "company_name_en": "Example Manufacturing Co., Ltd.",
            "tax_id": "0105561234567",
            "company_email": "contact@example.co.th",
            "number_of_employees": 120
        },
        "addresses": [
            {
                "address_type": "2",
                "address_number": "99/1",
                "street": "พระราม 4",
                "province": "กรุงเทพมหานคร",
                "postal_code": "10110"
            }
        ],
        "representatives": [
            { "first_name_th": "สมชาย", "last_name_th": "ใจดี", "is_primary": 0 },
            { "first_name_th": "สมหญิง", "last_name_th": "รักงาน", "is_primary": "1" }
        ],
        "businessTypes": [
            { "business_type": "manufacturer" },
            { "business_type": "other", "detail": "รับจ้างผลิต" },
            { "business_type": "manufacturer" }
        ],
        "products": [
            { "name_th": "ชิ้นส่วนยานยนต์", "name_en": "Auto parts" }
        ],
        "industrialGroups": [
            { "industry_group_id": 12, "industry_group_name": "กลุ่มอุตสาหกรรมยานยนต์" }
        ],
        "provincialChapters": [
            { "province_chapter_id": "3", "province_chapter_name": "สภาอุตสาหกรรมจังหวัดชลบุรี" }
        ],
        "documents": [
            { "document_type": "companyStamp", "file_url": "https://files.example.org/stamp.png" },
            { "document_type": "companyRegistration", "file_url": "" }
        ]
    })
}

pub(super) fn rejection(
    membership_type: MembershipType,
    id: &str,
    admin_note: Option<&str>,
    rejection_data: Value,
) -> RejectedApplication {
    RejectedApplication {
        membership_type,
        membership_id: MembershipId(id.to_string()),
        rejection_reason: Some(json!({ "code": "incomplete" })),
        admin_note: admin_note.map(str::to_string),
        rejection_data,
    }
}

pub(super) fn object(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().expect("object fixture")
}

pub(super) fn upstream_failure(message: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        message: Some(message.to_string()),
    }
}

/// Upstream call log entry recorded by [`MemoryGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Call {
    Comment(String),
    Update,
    Upload(String),
}

#[derive(Default, Clone)]
pub(super) struct MemoryGateway {
    rejections: Arc<Mutex<HashMap<String, RejectedApplication>>>,
    calls: Arc<Mutex<Vec<Call>>>,
    updates: Arc<Mutex<Vec<FlatForm>>>,
    fail_on: Arc<Mutex<Option<&'static str>>>,
    failing_document: Arc<Mutex<Option<DocumentType>>>,
    summaries: Arc<Mutex<HashMap<(MembershipType, String), Value>>>,
    comments_down: Arc<Mutex<bool>>,
}

impl MemoryGateway {
    pub(super) fn with_rejection(rejection_id: &str, rejection: RejectedApplication) -> Self {
        let gateway = Self::default();
        gateway
            .rejections
            .lock()
            .expect("gateway mutex poisoned")
            .insert(rejection_id.to_string(), rejection);
        gateway
    }

    pub(super) fn with_summary(
        self,
        membership_type: MembershipType,
        membership_id: &str,
        summary: Value,
    ) -> Self {
        self.summaries
            .lock()
            .expect("gateway mutex poisoned")
            .insert((membership_type, membership_id.to_string()), summary);
        self
    }

    pub(super) fn with_comments_down(self) -> Self {
        *self.comments_down.lock().expect("gateway mutex poisoned") = true;
        self
    }

    /// Fail only the upload for one document slot; other uploads go through.
    pub(super) fn fail_upload_of(&self, document_type: DocumentType) {
        *self.failing_document.lock().expect("gateway mutex poisoned") = Some(document_type);
    }

    /// Fail every call of the named kind: `comment`, `update` or `upload`.
    pub(super) fn fail_on(&self, kind: &'static str) {
        *self.fail_on.lock().expect("gateway mutex poisoned") = Some(kind);
    }

    pub(super) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("gateway mutex poisoned").clone()
    }

    pub(super) fn updates(&self) -> Vec<FlatForm> {
        self.updates.lock().expect("gateway mutex poisoned").clone()
    }

    fn check(&self, kind: &str) -> Result<(), ApiError> {
        match *self.fail_on.lock().expect("gateway mutex poisoned") {
            Some(failing) if failing == kind => Err(upstream_failure("ระบบไม่พร้อมให้บริการ")),
            _ => Ok(()),
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("gateway mutex poisoned").push(call);
    }
}

impl MembershipGateway for MemoryGateway {
    async fn rejected_application(
        &self,
        rejection_id: &str,
    ) -> Result<Option<RejectedApplication>, ApiError> {
        Ok(self
            .rejections
            .lock()
            .expect("gateway mutex poisoned")
            .get(rejection_id)
            .cloned())
    }

    async fn application_summary(
        &self,
        membership_type: MembershipType,
        membership_id: &MembershipId,
    ) -> Result<Option<Value>, ApiError> {
        Ok(self
            .summaries
            .lock()
            .expect("gateway mutex poisoned")
            .get(&(membership_type, membership_id.0.clone()))
            .cloned())
    }

    async fn post_comment(
        &self,
        _membership_type: MembershipType,
        _membership_id: &MembershipId,
        comment: &str,
    ) -> Result<(), ApiError> {
        self.check("comment")?;
        self.record(Call::Comment(comment.to_string()));
        Ok(())
    }

    async fn update_application(
        &self,
        _membership_type: MembershipType,
        _membership_id: &MembershipId,
        form: &FlatForm,
    ) -> Result<(), ApiError> {
        self.check("update")?;
        self.record(Call::Update);
        self.updates
            .lock()
            .expect("gateway mutex poisoned")
            .push(form.clone());
        Ok(())
    }

    async fn upload_document(
        &self,
        _membership_type: MembershipType,
        _membership_id: &MembershipId,
        upload: &DocumentUpload,
    ) -> Result<(), ApiError> {
        self.check("upload")?;
        if *self.failing_document.lock().expect("gateway mutex poisoned")
            == Some(upload.document_type)
        {
            return Err(upstream_failure("อัปโหลดไฟล์ไม่สำเร็จ"));
        }
        self.record(Call::Upload(upload.document_type.as_str().to_string()));
        Ok(())
    }

    async fn user_comments(
        &self,
        _membership_type: MembershipType,
        _membership_id: &MembershipId,
    ) -> Result<Vec<CommentEntry>, ApiError> {
        if *self.comments_down.lock().expect("gateway mutex poisoned") {
            return Err(upstream_failure("ระบบไม่พร้อมให้บริการ"));
        }
        Ok(vec![CommentEntry {
            comment_type: CommentType::Admin,
            comment_text: "กรุณาแนบเอกสารเพิ่มเติม".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .expect("valid date")
                .and_hms_opt(9, 0, 0)
                .expect("valid time"),
        }])
    }
}

pub(super) fn build_service(
    gateway: MemoryGateway,
) -> (ResubmissionService<MemoryGateway>, Arc<MemoryGateway>) {
    let gateway = Arc::new(gateway);
    (ResubmissionService::new(gateway.clone()), gateway)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
