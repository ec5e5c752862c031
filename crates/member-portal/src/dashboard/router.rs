use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use super::filter::{OperationQuery, Page};
use super::gateway::DashboardGateway;
use super::operations::Operation;
use super::service::DashboardService;
use crate::error::AppError;

pub fn dashboard_router<G>(service: Arc<DashboardService<G>>) -> Router
where
    G: DashboardGateway + 'static,
{
    Router::new()
        .route(
            "/api/v1/dashboard/operations",
            get(operations_handler::<G>),
        )
        .with_state(service)
}

pub(crate) async fn operations_handler<G>(
    State(service): State<Arc<DashboardService<G>>>,
    Query(query): Query<OperationQuery>,
) -> Result<Json<Page<Operation>>, AppError>
where
    G: DashboardGateway + 'static,
{
    if query.user_id.trim().is_empty() {
        return Err(AppError::Malformed("userId is required".to_string()));
    }
    let page = service.operations(&query).await?;
    Ok(Json(page))
}
