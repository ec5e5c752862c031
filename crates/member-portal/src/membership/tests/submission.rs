use super::common::*;
use serde_json::json;

use crate::membership::domain::{CommentType, DocumentType, MembershipId, MembershipType};
use crate::membership::form::FlatForm;
use crate::membership::submission::{
    DocumentUpload, ResubmissionRequest, ResubmissionServiceError, SubmissionError,
    SubmissionStage, COMMENT_REQUIRED_MESSAGE,
};

fn request(comment: &str, documents: Vec<DocumentUpload>) -> ResubmissionRequest {
    ResubmissionRequest {
        comment: comment.to_string(),
        form_data: FlatForm::from_map(object(json!({ "companyName": "บริษัท แก้ไข จำกัด" }))),
        documents,
    }
}

fn stamp_upload() -> DocumentUpload {
    DocumentUpload {
        document_type: DocumentType::CompanyStamp,
        file_name: "stamp.png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

#[tokio::test]
async fn load_draft_maps_rejection_and_lists_missing_documents() {
    let gateway = MemoryGateway::with_rejection(
        "rej-1",
        rejection(
            MembershipType::Ac,
            "77",
            Some("ข้อมูลผู้แทนไม่ถูกต้อง"),
            ac_snapshot(),
        ),
    );
    let (service, _) = build_service(gateway);

    let draft = service.load_draft("rej-1").await.expect("draft loads");

    assert_eq!(draft.membership_type, MembershipType::Ac);
    assert_eq!(draft.membership_id, MembershipId("77".to_string()));
    assert_eq!(draft.current_step, 2);
    assert_eq!(draft.steps.len(), 5);
    assert_eq!(
        draft.form_data.get_str("companyName"),
        Some("บริษัท ตัวอย่างการผลิต จำกัด")
    );
    assert_eq!(
        draft.documents_to_reupload,
        vec![
            DocumentType::CompanyRegistration,
            DocumentType::AuthorizedSignature
        ]
    );
}

#[tokio::test]
async fn load_draft_reports_missing_rejections() {
    let (service, _) = build_service(MemoryGateway::default());
    match service.load_draft("missing").await {
        Err(ResubmissionServiceError::NotFound(id)) => assert_eq!(id, "missing"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn load_draft_surfaces_malformed_snapshots() {
    let gateway = MemoryGateway::with_rejection(
        "rej-2",
        rejection(MembershipType::Oc, "5", None, json!("{broken")),
    );
    let (service, _) = build_service(gateway);
    assert!(matches!(
        service.load_draft("rej-2").await,
        Err(ResubmissionServiceError::Mapping(_))
    ));
}

#[tokio::test]
async fn submit_runs_comment_update_then_uploads_in_order() {
    let (service, gateway) = build_service(MemoryGateway::default());

    let receipt = service
        .submit(
            MembershipType::Ac,
            &MembershipId("77".to_string()),
            request("  แก้ไขข้อมูลผู้แทนแล้ว ", vec![stamp_upload()]),
        )
        .await
        .expect("submission succeeds");

    assert_eq!(
        gateway.calls(),
        vec![
            Call::Comment("แก้ไขข้อมูลผู้แทนแล้ว".to_string()),
            Call::Update,
            Call::Upload("companyStamp".to_string()),
        ]
    );
    assert_eq!(
        receipt.completed,
        vec![
            SubmissionStage::Comment,
            SubmissionStage::Update,
            SubmissionStage::Documents
        ]
    );
    assert_eq!(receipt.uploaded_documents, vec![DocumentType::CompanyStamp]);
    assert_eq!(
        gateway.updates()[0].get_str("companyName"),
        Some("บริษัท แก้ไข จำกัด")
    );
}

#[tokio::test]
async fn blank_comment_is_skipped_for_optional_policies() {
    let (service, gateway) = build_service(MemoryGateway::default());

    let receipt = service
        .submit(
            MembershipType::Oc,
            &MembershipId("9".to_string()),
            request("   ", Vec::new()),
        )
        .await
        .expect("submission succeeds");

    assert_eq!(gateway.calls(), vec![Call::Update]);
    assert_eq!(receipt.completed, vec![SubmissionStage::Update]);
}

#[tokio::test]
async fn association_resubmissions_require_a_comment() {
    let (service, gateway) = build_service(MemoryGateway::default());

    let error = service
        .submit(
            MembershipType::Am,
            &MembershipId("3".to_string()),
            request("", Vec::new()),
        )
        .await
        .expect_err("comment is required");

    assert!(matches!(error, SubmissionError::CommentRequired(MembershipType::Am)));
    assert_eq!(error.user_message(), COMMENT_REQUIRED_MESSAGE);
    assert!(gateway.calls().is_empty(), "validation happens before any call");
}

#[tokio::test]
async fn update_failure_aborts_without_rollback() {
    let gateway = MemoryGateway::default();
    gateway.fail_on("update");
    let (service, gateway) = build_service(gateway);

    let error = service
        .submit(
            MembershipType::Ac,
            &MembershipId("77".to_string()),
            request("ขอส่งใหม่", vec![stamp_upload()]),
        )
        .await
        .expect_err("update fails");

    match &error {
        SubmissionError::Upstream {
            stage, completed, ..
        } => {
            assert_eq!(*stage, SubmissionStage::Update);
            assert_eq!(completed, &vec![SubmissionStage::Comment]);
        }
        other => panic!("expected upstream failure, got {other:?}"),
    }
    assert_eq!(error.user_message(), "ระบบไม่พร้อมให้บริการ");
    assert_eq!(gateway.calls(), vec![Call::Comment("ขอส่งใหม่".to_string())]);
}

#[tokio::test]
async fn upload_failure_reports_comment_and_update_as_done() {
    let gateway = MemoryGateway::default();
    gateway.fail_on("upload");
    let (service, _) = build_service(gateway);

    let error = service
        .submit(
            MembershipType::Ic,
            &MembershipId("11".to_string()),
            request("แนบไฟล์ใหม่", vec![stamp_upload()]),
        )
        .await
        .expect_err("upload fails");

    assert_eq!(
        error.completed(),
        &[SubmissionStage::Comment, SubmissionStage::Update]
    );
}

#[tokio::test]
async fn failed_upload_reports_documents_already_accepted() {
    let gateway = MemoryGateway::default();
    gateway.fail_upload_of(DocumentType::AuthorizedSignature);
    let (service, gateway) = build_service(gateway);

    let signature = DocumentUpload {
        document_type: DocumentType::AuthorizedSignature,
        file_name: "sign.jpg".to_string(),
        bytes: b"JPG".to_vec(),
    };
    let error = service
        .submit(
            MembershipType::Ac,
            &MembershipId("77".to_string()),
            request("แนบไฟล์ใหม่", vec![stamp_upload(), signature]),
        )
        .await
        .expect_err("second upload fails");

    match &error {
        SubmissionError::Upstream { stage, .. } => {
            assert_eq!(*stage, SubmissionStage::Documents)
        }
        other => panic!("expected upstream failure, got {other:?}"),
    }
    assert_eq!(
        error.completed(),
        &[SubmissionStage::Comment, SubmissionStage::Update]
    );
    assert_eq!(error.uploaded_documents(), &[DocumentType::CompanyStamp]);
    assert_eq!(
        gateway.calls(),
        vec![
            Call::Comment("แนบไฟล์ใหม่".to_string()),
            Call::Update,
            Call::Upload("companyStamp".to_string()),
        ]
    );
}

#[tokio::test]
async fn overview_combines_summary_and_comment_history() {
    let gateway = MemoryGateway::default().with_summary(
        MembershipType::Oc,
        "8",
        json!({ "id": 8, "status": 2, "company_name_th": "บริษัท ทดสอบ จำกัด" }),
    );
    let (service, _) = build_service(gateway);

    let overview = service
        .overview(MembershipType::Oc, &MembershipId("8".to_string()))
        .await
        .expect("overview loads");

    assert_eq!(overview.membership_type, MembershipType::Oc);
    assert_eq!(overview.summary["status"], json!(2));
    assert_eq!(overview.comments.len(), 1);
    assert_eq!(overview.comments[0].comment_type, CommentType::Admin);
}

#[tokio::test]
async fn overview_without_summary_is_not_found() {
    let (service, _) = build_service(MemoryGateway::default());

    let result = service
        .overview(MembershipType::Ic, &MembershipId("404".to_string()))
        .await;

    match result {
        Err(ResubmissionServiceError::ApplicationNotFound(membership_type, membership_id)) => {
            assert_eq!(membership_type, MembershipType::Ic);
            assert_eq!(membership_id.0, "404");
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn overview_survives_unavailable_comment_history() {
    let gateway = MemoryGateway::default()
        .with_summary(MembershipType::Am, "3", json!({ "status": 2 }))
        .with_comments_down();
    let (service, _) = build_service(gateway);

    let overview = service
        .overview(MembershipType::Am, &MembershipId("3".to_string()))
        .await
        .expect("summary alone is enough");

    assert!(overview.comments.is_empty());
}

#[test]
fn upload_content_type_is_guessed_from_file_name() {
    assert_eq!(stamp_upload().content_type(), "image/png");
    let unknown = DocumentUpload {
        file_name: "signature".to_string(),
        ..stamp_upload()
    };
    assert_eq!(unknown.content_type(), "application/octet-stream");
}
