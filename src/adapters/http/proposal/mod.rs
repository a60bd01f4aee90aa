//! HTTP adapter for the proposal module.
//!
//! Exposes proposal creation, drift and resync, versioning and task-tracker
//! projection via REST endpoints. See [`routes::proposal_router`] for the
//! full route list.

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::ProposalAppState;
pub use routes::proposal_router;
