//! Typed access to the upstream membership REST backend.

mod client;
mod envelope;
mod error;

pub use client::PortalClient;
pub use error::{ApiError, GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
