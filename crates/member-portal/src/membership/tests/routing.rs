use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::membership::domain::MembershipType;
use crate::membership::resubmission_router;

const BOUNDARY: &str = "portal-test-boundary";

fn multipart_body(payload: &serde_json::Value, files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"payload\"\r\n\r\n{payload}\r\n"
        )
        .as_bytes(),
    );
    for (name, file_name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request builds")
}

#[tokio::test]
async fn draft_route_returns_mapped_form() {
    let gateway = MemoryGateway::with_rejection(
        "15",
        rejection(
            MembershipType::Ac,
            "77",
            Some("Please attach the signature file"),
            ac_snapshot(),
        ),
    );
    let (service, _) = build_service(gateway);
    let router = resubmission_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/v1/resubmissions/drafts/15")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["membershipType"], json!("ac"));
    assert_eq!(payload["membershipId"], json!("77"));
    assert_eq!(payload["currentStep"], json!(4));
    assert_eq!(payload["formData"]["taxId"], json!("0105561234567"));
    assert_eq!(payload["steps"][0]["titleEn"], json!("Company information"));
    assert_eq!(
        payload["documentsToReupload"],
        json!(["companyRegistration", "authorizedSignature"])
    );
}

#[tokio::test]
async fn draft_handler_maps_missing_rejection_to_not_found() {
    let (service, _) = build_service(MemoryGateway::default());

    let response = crate::membership::router::draft_handler::<MemoryGateway>(
        State(Arc::new(service)),
        Path("404".to_string()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
}

#[tokio::test]
async fn resubmit_route_accepts_multipart_payloads() {
    let (service, gateway) = build_service(MemoryGateway::default());
    let router = resubmission_router(Arc::new(service));

    let body = multipart_body(
        &json!({
            "comment": "แก้ไขตามที่แจ้ง",
            "formData": { "companyName": "บริษัท แก้ไข จำกัด" }
        }),
        &[("companyStamp", "stamp.png", b"PNG")],
    );
    let response = router
        .oneshot(multipart_request("/api/v1/resubmissions/ac/77", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["completed"], json!(["comment", "update", "documents"]));
    assert_eq!(payload["uploadedDocuments"], json!(["companyStamp"]));
    assert_eq!(
        gateway.calls(),
        vec![
            Call::Comment("แก้ไขตามที่แจ้ง".to_string()),
            Call::Update,
            Call::Upload("companyStamp".to_string()),
        ]
    );
}

#[tokio::test]
async fn resubmit_route_rejects_missing_association_comment() {
    let (service, gateway) = build_service(MemoryGateway::default());
    let router = resubmission_router(Arc::new(service));

    let body = multipart_body(&json!({ "formData": {} }), &[]);
    let response = router
        .oneshot(multipart_request("/api/v1/resubmissions/am/3", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn resubmit_route_reports_partial_progress_on_upstream_failure() {
    let gateway = MemoryGateway::default();
    gateway.fail_on("upload");
    let (service, _) = build_service(gateway);
    let router = resubmission_router(Arc::new(service));

    let body = multipart_body(
        &json!({ "comment": "ส่งใหม่", "formData": {} }),
        &[("authorizedSignature", "sign.jpg", b"JPG")],
    );
    let response = router
        .oneshot(multipart_request("/api/v1/resubmissions/oc/8", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("ระบบไม่พร้อมให้บริการ"));
    assert_eq!(payload["completed"], json!(["comment", "update"]));
}

#[tokio::test]
async fn resubmit_route_rejects_unknown_types_and_parts() {
    let (service, _) = build_service(MemoryGateway::default());
    let router = resubmission_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(multipart_request(
            "/api/v1/resubmissions/zz/1",
            multipart_body(&json!({ "formData": {} }), &[]),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(multipart_request(
            "/api/v1/resubmissions/oc/1",
            multipart_body(&json!({ "formData": {} }), &[("passport", "p.pdf", b"%PDF")]),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overview_route_returns_summary_and_comments() {
    let gateway = MemoryGateway::default().with_summary(
        MembershipType::Ac,
        "77",
        json!({ "id": 77, "status": 2 }),
    );
    let (service, _) = build_service(gateway);
    let router = resubmission_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/resubmissions/ac/77")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["membershipType"], json!("ac"));
    assert_eq!(payload["membershipId"], json!("77"));
    assert_eq!(payload["summary"]["status"], json!(2));
    assert_eq!(payload["comments"][0]["comment_type"], json!("admin"));

    let response = router
        .oneshot(
            Request::get("/api/v1/resubmissions/ac/78")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resubmit_route_lists_uploads_accepted_before_a_failure() {
    let gateway = MemoryGateway::default();
    gateway.fail_upload_of(crate::membership::domain::DocumentType::AuthorizedSignature);
    let (service, _) = build_service(gateway);
    let router = resubmission_router(Arc::new(service));

    let body = multipart_body(
        &json!({ "comment": "ส่งใหม่", "formData": {} }),
        &[
            ("companyStamp", "stamp.png", b"PNG"),
            ("authorizedSignature", "sign.jpg", b"JPG"),
        ],
    );
    let response = router
        .oneshot(multipart_request("/api/v1/resubmissions/ac/77", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["completed"], json!(["comment", "update"]));
    assert_eq!(payload["uploadedDocuments"], json!(["companyStamp"]));
}
