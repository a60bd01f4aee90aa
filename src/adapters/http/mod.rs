//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod proposal;

use axum::routing::get;
use axum::Router;

// Re-export key types for convenience
pub use proposal::proposal_router;
pub use proposal::ProposalAppState;

/// Builds the full application router: proposal endpoints plus `GET /health`.
pub fn router(state: ProposalAppState) -> Router {
    proposal_router()
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
