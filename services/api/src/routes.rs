use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use member_portal::admin::{admin_router, AdminGateway, AdminService};
use member_portal::auth::{auth_router, AuthGateway, AuthService};
use member_portal::config::DashboardConfig;
use member_portal::contact::{contact_router, ContactGateway, ContactService};
use member_portal::dashboard::{dashboard_router, DashboardGateway, DashboardService};
use member_portal::member::{member_router, MemberGateway, MemberService};
use member_portal::membership::{resubmission_router, MembershipGateway, ResubmissionService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Every portal workflow router, each backed by the same upstream gateway.
pub(crate) fn with_portal_routes<G>(gateway: Arc<G>, dashboard: DashboardConfig) -> Router
where
    G: MembershipGateway
        + DashboardGateway
        + AuthGateway
        + AdminGateway
        + MemberGateway
        + ContactGateway
        + 'static,
{
    probe_routes()
        .merge(resubmission_router(Arc::new(ResubmissionService::new(
            gateway.clone(),
        ))))
        .merge(dashboard_router(Arc::new(DashboardService::new(
            gateway.clone(),
            dashboard,
        ))))
        .merge(auth_router(Arc::new(AuthService::new(gateway.clone()))))
        .merge(admin_router(Arc::new(AdminService::new(gateway.clone()))))
        .merge(member_router(Arc::new(MemberService::new(gateway.clone()))))
        .merge(contact_router(Arc::new(ContactService::new(gateway))))
}

pub(crate) fn probe_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Acquire);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
