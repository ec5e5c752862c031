use std::future::Future;

use super::activity::{ActivityPage, ActivityQuery};
use super::invite::InviteDetails;
use crate::api::ApiError;

/// Upstream `/api/admin/*` endpoints used by the admin area.
pub trait AdminGateway: Send + Sync {
    fn recent_activities(
        &self,
        query: ActivityQuery,
    ) -> impl Future<Output = Result<ActivityPage, ApiError>> + Send;

    fn verify_invite(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<InviteDetails, ApiError>> + Send;

    fn complete_invite(
        &self,
        token: &str,
        name: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
