//! Route configuration for proposal endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    check_drift, create_proposal, create_version, get_version, list_versions, preview_projection,
    push_projection, resync_snapshot, update_content, ProposalAppState,
};

/// Creates the proposal router with all endpoints.
///
/// Routes:
/// - `POST /api/proposals` - Create a proposal from an assessment
/// - `PUT /api/proposals/:id/content` - Replace editable content
/// - `GET /api/proposals/:id/drift` - Drift check
/// - `POST /api/proposals/:id/snapshot/resync` - Replace the snapshot
/// - `GET /api/proposals/:id/versions` - List versions
/// - `POST /api/proposals/:id/versions` - Export a version (requires `X-User-Id`)
/// - `GET /api/proposals/:id/versions/:version_id` - Fetch a version
/// - `GET /api/proposals/:id/projection/preview` - Preview the task hierarchy
/// - `POST /api/proposals/:id/projection/push` - Push to the task tracker
pub fn proposal_router() -> Router<ProposalAppState> {
    Router::new()
        .route("/api/proposals", post(create_proposal))
        .route("/api/proposals/:id/content", put(update_content))
        .route("/api/proposals/:id/drift", get(check_drift))
        .route("/api/proposals/:id/snapshot/resync", post(resync_snapshot))
        .route(
            "/api/proposals/:id/versions",
            get(list_versions).post(create_version),
        )
        .route("/api/proposals/:id/versions/:version_id", get(get_version))
        .route("/api/proposals/:id/projection/preview", get(preview_projection))
        .route("/api/proposals/:id/projection/push", post(push_projection))
}
