//! Admin area: the recent-activity audit feed and admin invitations.

pub mod activity;
pub mod gateway;
pub mod invite;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests {
    mod common;
    mod routing;
}

pub use activity::{Activity, ActivityPage, ActivityQuery, Pagination};
pub use gateway::AdminGateway;
pub use invite::{InviteCompletion, InviteDetails};
pub use router::admin_router;
pub use service::{AdminError, AdminService};
