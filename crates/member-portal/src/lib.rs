//! Member portal workflows for the industry association.
//!
//! The crate holds the membership application mapping and wizard state, the resubmission flow,
//! dashboard aggregation, auth validation and a typed client for the upstream REST backend.
//! Each workflow ships an axum router so the API service can compose them.

pub mod admin;
pub mod api;
pub mod auth;
pub mod config;
pub mod contact;
pub mod dashboard;
pub mod error;
pub mod member;
pub mod membership;
pub mod telemetry;
pub mod validation;
pub(crate) mod wire;
