use std::sync::Arc;

use super::filter::{FilterError, OperationQuery, Page};
use super::gateway::DashboardGateway;
use super::operations::{merge, Operation};
use super::sequencer::RequestSequencer;
use crate::api::ApiError;
use crate::config::DashboardConfig;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Upstream(#[from] ApiError),
    #[error("superseded by a newer dashboard request")]
    Superseded,
}

impl DashboardError {
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Filter(err) => err.user_message().to_string(),
            DashboardError::Upstream(err) => err.user_message(),
            DashboardError::Superseded => "มีการโหลดข้อมูลใหม่ กรุณารอสักครู่".to_string(),
        }
    }
}

/// Aggregates the operation, contact-message and verification collections into one
/// filtered, paginated list of status cards.
pub struct DashboardService<G> {
    gateway: Arc<G>,
    sequencer: RequestSequencer,
    page_size: usize,
}

impl<G> DashboardService<G>
where
    G: DashboardGateway + 'static,
{
    pub fn new(gateway: Arc<G>, config: DashboardConfig) -> Self {
        Self {
            gateway,
            sequencer: RequestSequencer::new(),
            page_size: config.page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch, merge and filter a user's operations.
    ///
    /// A newer call for the same user cancels this one with [`DashboardError::Superseded`].
    pub async fn operations(
        &self,
        query: &OperationQuery,
    ) -> Result<Page<Operation>, DashboardError> {
        let filter = query.filter()?;
        let user_id = query.user_id.trim();

        let ticket = self.sequencer.begin(user_id);
        let outcome = tokio::select! {
            biased;
            _ = ticket.superseded() => None,
            merged = self.collect(user_id) => Some(merged),
        };
        let current = ticket.is_current();
        self.sequencer.finish(&ticket);

        let merged = match outcome {
            Some(merged) if current => merged?,
            _ => {
                tracing::debug!(user_id, sequence = ticket.sequence(), "discarding stale dashboard response");
                return Err(DashboardError::Superseded);
            }
        };

        let filtered = filter.apply(merged);
        Ok(Page::paginate(
            filtered,
            query.page.unwrap_or(1),
            self.page_size,
        ))
    }

    /// All three collections concurrently. The base list is required; the supplementary
    /// ones degrade to empty with a warning.
    pub async fn collect(&self, user_id: &str) -> Result<Vec<Operation>, DashboardError> {
        let (operations, messages, verifications) = tokio::join!(
            self.gateway.operations(user_id),
            self.gateway.contact_messages(user_id),
            self.gateway.verifications(user_id),
        );

        let base: Vec<Operation> = operations?
            .into_iter()
            .filter_map(|row| row.normalize())
            .collect();

        let messages = messages.unwrap_or_else(|err| {
            tracing::warn!(user_id, error = %err, "contact message status unavailable");
            Vec::new()
        });
        let verifications = verifications.unwrap_or_else(|err| {
            tracing::warn!(user_id, error = %err, "verification status unavailable");
            Vec::new()
        });

        let extra = messages
            .into_iter()
            .filter_map(|row| row.normalize())
            .chain(verifications.into_iter().filter_map(|row| row.normalize()));

        Ok(merge(base, extra))
    }
}
