//! Member dashboard: status cards merged from several upstream collections.

pub mod filter;
pub mod gateway;
pub mod operations;
pub mod router;
pub mod sequencer;
pub mod service;
pub mod status;

#[cfg(test)]
mod tests {
    mod aggregation;
    mod common;
    mod routing;
}

pub use filter::{DateRange, FilterError, OperationFilter, OperationQuery, Page};
pub use gateway::DashboardGateway;
pub use operations::{
    merge, ContactMessageRow, Operation, OperationKind, OperationRow, VerificationRow,
};
pub use router::dashboard_router;
pub use sequencer::{RequestSequencer, RequestTicket};
pub use service::{DashboardError, DashboardService};
pub use status::{Status, StatusContext, StatusPresentation};
