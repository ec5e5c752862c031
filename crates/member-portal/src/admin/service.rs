use std::sync::Arc;

use super::activity::{ActivityPage, ActivityQuery};
use super::gateway::AdminGateway;
use super::invite::{InviteCompletion, InviteDetails};
use crate::api::ApiError;
use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("invalid activity query: {0}")]
    Query(String),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

pub struct AdminService<G> {
    gateway: Arc<G>,
}

impl<G> AdminService<G>
where
    G: AdminGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// A missing activity feed is an empty page, not an error.
    pub async fn recent_activities(&self, query: ActivityQuery) -> Result<ActivityPage, AdminError> {
        query.validate().map_err(AdminError::Query)?;
        match self.gateway.recent_activities(query).await {
            Ok(page) => Ok(page),
            Err(err) if err.is_not_found() => {
                tracing::debug!(page = query.page, "no activities recorded");
                Ok(ActivityPage::empty(&query))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn verify_invite(&self, token: &str) -> Result<InviteDetails, AdminError> {
        if token.trim().is_empty() {
            return Err(ValidationErrors::single("token", "ลิงก์คำเชิญไม่ถูกต้องหรือหมดอายุ").into());
        }
        Ok(self.gateway.verify_invite(token.trim()).await?)
    }

    pub async fn complete_invite(&self, completion: &InviteCompletion) -> Result<(), AdminError> {
        completion.validate()?;
        self.gateway
            .complete_invite(
                completion.token.trim(),
                completion.name.trim(),
                &completion.password,
            )
            .await?;
        tracing::info!("admin invitation accepted");
        Ok(())
    }
}
