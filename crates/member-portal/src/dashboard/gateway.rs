use std::future::Future;

use super::operations::{ContactMessageRow, OperationRow, VerificationRow};
use crate::api::ApiError;

/// Upstream collections feeding the operations dashboard, all keyed by user id.
pub trait DashboardGateway: Send + Sync {
    fn operations(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<OperationRow>, ApiError>> + Send;

    fn contact_messages(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<ContactMessageRow>, ApiError>> + Send;

    fn verifications(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<VerificationRow>, ApiError>> + Send;
}
