use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::auth::auth_router;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn login_route_blocks_blank_credentials() {
    let (service, gateway) = build_service(MemoryAuth::with_member());
    let router = auth_router(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({ "email": "", "password": "x" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
    assert_eq!(payload["error"], json!("กรุณากรอกอีเมลและรหัสผ่าน"));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn login_route_returns_user_and_passes_401_through() {
    let (service, _) = build_service(MemoryAuth::with_member());
    let router = auth_router(service);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({ "email": MEMBER_EMAIL, "password": MEMBER_PASSWORD, "rememberMe": true }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["user"]["firstName"], json!("สมชาย"));
    assert_eq!(payload["rememberMe"], json!(true));

    let response = router
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({ "email": MEMBER_EMAIL, "password": "wrong" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("อีเมลหรือรหัสผ่านไม่ถูกต้อง"));
}

#[tokio::test]
async fn register_route_lists_field_errors() {
    let (service, gateway) = build_service(MemoryAuth::default());
    let router = auth_router(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/auth/register",
            json!({ "firstName": "สมหญิง", "password": "abc", "confirmPassword": "abc" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let fields: Vec<&str> = payload["fields"]
        .as_array()
        .expect("fields array")
        .iter()
        .filter_map(|entry| entry["field"].as_str())
        .collect();
    assert_eq!(
        fields,
        vec!["lastName", "email", "phone", "password", "acceptTerms"]
    );
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn register_route_creates_account() {
    let (service, gateway) = build_service(MemoryAuth::default());
    let router = auth_router(service);

    let form = serde_json::to_value(valid_registration()).expect("form serializes");
    let mut body = form.as_object().cloned().expect("object");
    body.insert("confirmPassword".to_string(), json!("Strong#Pass1"));
    body.insert("acceptTerms".to_string(), json!(true));

    let response = router
        .oneshot(post_json("/api/v1/auth/register", Value::Object(body)))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(gateway.calls(), vec!["register"]);
}

#[tokio::test]
async fn password_strength_route_scores_password() {
    let (service, _) = build_service(MemoryAuth::default());
    let router = auth_router(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/auth/password-strength",
            json!({ "password": "abc" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], json!(0));
    assert_eq!(payload["maxScore"], json!(3));
    assert_eq!(
        payload["criteria"],
        json!({
            "minLength": false,
            "recommendedLength": false,
            "uppercase": false,
            "digit": false,
            "special": false
        })
    );
}

#[tokio::test]
async fn verify_email_route_passes_upstream_client_errors() {
    let (service, _) = build_service(MemoryAuth::default());
    let router = auth_router(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/auth/verify-email?token=expired")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("ลิงก์ยืนยันหมดอายุแล้ว"));
}
