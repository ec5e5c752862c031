use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::activity::{ActivityPage, ActivityQuery};
use super::gateway::AdminGateway;
use super::invite::{InviteCompletion, InviteDetails};
use super::service::AdminService;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct InviteToken {
    #[serde(default)]
    token: String,
}

pub fn admin_router<G>(service: Arc<AdminService<G>>) -> Router
where
    G: AdminGateway + 'static,
{
    Router::new()
        .route("/api/v1/admin/activities", get(activities_handler::<G>))
        .route("/api/v1/admin/invite/verify", post(verify_invite_handler::<G>))
        .route(
            "/api/v1/admin/invite/complete",
            post(complete_invite_handler::<G>),
        )
        .with_state(service)
}

pub(crate) async fn activities_handler<G>(
    State(service): State<Arc<AdminService<G>>>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivityPage>, AppError>
where
    G: AdminGateway + 'static,
{
    let page = service.recent_activities(query).await?;
    Ok(Json(page))
}

pub(crate) async fn verify_invite_handler<G>(
    State(service): State<Arc<AdminService<G>>>,
    Json(request): Json<InviteToken>,
) -> Result<Json<InviteDetails>, AppError>
where
    G: AdminGateway + 'static,
{
    let invite = service.verify_invite(&request.token).await?;
    Ok(Json(invite))
}

pub(crate) async fn complete_invite_handler<G>(
    State(service): State<Arc<AdminService<G>>>,
    Json(completion): Json<InviteCompletion>,
) -> Result<Json<Value>, AppError>
where
    G: AdminGateway + 'static,
{
    service.complete_invite(&completion).await?;
    Ok(Json(json!({ "success": true })))
}
