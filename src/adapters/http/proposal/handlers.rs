//! HTTP handlers for proposal endpoints.
//!
//! These handlers connect Axum routes to the application layer command and
//! query handlers. Every handler is built per request from the shared ports.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::application::handlers::{
    CheckDriftCommand, CheckDriftHandler, CreateProposalFromAssessmentCommand,
    CreateProposalFromAssessmentHandler, CreateVersionCommand, CreateVersionHandler,
    GetVersionHandler, GetVersionQuery, ListVersionsHandler, ListVersionsQuery,
    PreviewProjectionHandler, PreviewProjectionQuery, PushProjectionCommand,
    PushProjectionHandler, ResyncSnapshotCommand, ResyncSnapshotHandler,
    UpdateProposalContentCommand, UpdateProposalContentHandler,
};
use crate::domain::foundation::{CustomerId, ProposalId, UserId, VersionId};
use crate::domain::proposal::{ProposalContent, ProposalError};
use crate::ports::{
    AssessmentStore, CustomerDirectory, EventPublisher, ProposalRepository, SectionRepository,
    TaskTracker, VersionRepository,
};

use super::dto::{
    CreateProposalRequest, CreateVersionRequest, DriftResponse, ErrorResponse, ProposalResponse,
    ResyncResponse, VersionSummary,
};

/// Header carrying the identity of the caller exporting a version.
pub const USER_ID_HEADER: &str = "X-User-Id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct ProposalAppState {
    pub assessment_store: Arc<dyn AssessmentStore>,
    pub customer_directory: Arc<dyn CustomerDirectory>,
    pub proposal_repository: Arc<dyn ProposalRepository>,
    pub section_repository: Arc<dyn SectionRepository>,
    pub version_repository: Arc<dyn VersionRepository>,
    pub task_tracker: Arc<dyn TaskTracker>,
    pub event_publisher: Arc<dyn EventPublisher>,
}

impl ProposalAppState {
    pub fn create_proposal_handler(&self) -> CreateProposalFromAssessmentHandler {
        CreateProposalFromAssessmentHandler::new(
            self.assessment_store.clone(),
            self.customer_directory.clone(),
            self.proposal_repository.clone(),
            self.section_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn update_content_handler(&self) -> UpdateProposalContentHandler {
        UpdateProposalContentHandler::new(self.proposal_repository.clone())
    }

    pub fn check_drift_handler(&self) -> CheckDriftHandler {
        CheckDriftHandler::new(
            self.proposal_repository.clone(),
            self.assessment_store.clone(),
        )
    }

    pub fn resync_snapshot_handler(&self) -> ResyncSnapshotHandler {
        ResyncSnapshotHandler::new(
            self.proposal_repository.clone(),
            self.assessment_store.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn create_version_handler(&self) -> CreateVersionHandler {
        CreateVersionHandler::new(
            self.proposal_repository.clone(),
            self.section_repository.clone(),
            self.version_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn get_version_handler(&self) -> GetVersionHandler {
        GetVersionHandler::new(self.version_repository.clone())
    }

    pub fn list_versions_handler(&self) -> ListVersionsHandler {
        ListVersionsHandler::new(
            self.proposal_repository.clone(),
            self.version_repository.clone(),
        )
    }

    pub fn preview_projection_handler(&self) -> PreviewProjectionHandler {
        PreviewProjectionHandler::new(
            self.proposal_repository.clone(),
            self.section_repository.clone(),
            self.customer_directory.clone(),
        )
    }

    pub fn push_projection_handler(&self) -> PushProjectionHandler {
        PushProjectionHandler::new(
            self.proposal_repository.clone(),
            self.section_repository.clone(),
            self.customer_directory.clone(),
            self.task_tracker.clone(),
            self.event_publisher.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Caller Context
// ════════════════════════════════════════════════════════════════════════════════

/// Identity of the caller, read from the `X-User-Id` header.
#[derive(Debug, Clone)]
pub struct Exporter {
    pub user_id: UserId,
}

/// Rejection type for Exporter extraction.
pub struct ExporterRequired;

impl IntoResponse for ExporterRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::bad_request(format!("{} header is required", USER_ID_HEADER));
        (StatusCode::BAD_REQUEST, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for Exporter
where
    S: Send + Sync,
{
    type Rejection = ExporterRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get(USER_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| UserId::new(s).ok())
                .ok_or(ExporterRequired)?;

            Ok(Exporter { user_id })
        })
    }
}

fn parse_proposal_id(raw: &str) -> Result<ProposalId, ProposalApiError> {
    raw.parse()
        .map_err(|_| ProposalApiError::BadRequest("Invalid proposal ID format".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Proposal Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/proposals - Create a proposal from a customer's assessment
pub async fn create_proposal(
    State(state): State<ProposalAppState>,
    Json(request): Json<CreateProposalRequest>,
) -> Result<impl IntoResponse, ProposalApiError> {
    let customer_id = CustomerId::new(request.customer_id)
        .map_err(|e| ProposalApiError::from(ProposalError::from(e)))?;

    let cmd = CreateProposalFromAssessmentCommand {
        customer_id,
        assessment_type: request.assessment_type,
        grouping: request.grouping,
        title: request.title,
    };
    let result = state.create_proposal_handler().handle(cmd).await?;

    let response = ProposalResponse::from(&result.proposal).with_sections(result.sections);
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/proposals/:id/content - Replace the editable prose
pub async fn update_content(
    State(state): State<ProposalAppState>,
    Path(proposal_id): Path<String>,
    Json(content): Json<ProposalContent>,
) -> Result<impl IntoResponse, ProposalApiError> {
    let proposal_id = parse_proposal_id(&proposal_id)?;

    let cmd = UpdateProposalContentCommand {
        proposal_id,
        content,
    };
    let proposal = state.update_content_handler().handle(cmd).await?;

    Ok(Json(ProposalResponse::from(&proposal)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Snapshot Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/proposals/:id/drift - Compare the snapshot against the live assessment
pub async fn check_drift(
    State(state): State<ProposalAppState>,
    Path(proposal_id): Path<String>,
) -> Result<impl IntoResponse, ProposalApiError> {
    let proposal_id = parse_proposal_id(&proposal_id)?;

    let check = state
        .check_drift_handler()
        .handle(CheckDriftCommand { proposal_id })
        .await?;

    Ok(Json(DriftResponse::from(check)))
}

/// POST /api/proposals/:id/snapshot/resync - Replace the snapshot with live data
pub async fn resync_snapshot(
    State(state): State<ProposalAppState>,
    Path(proposal_id): Path<String>,
) -> Result<impl IntoResponse, ProposalApiError> {
    let proposal_id = parse_proposal_id(&proposal_id)?;

    let result = state
        .resync_snapshot_handler()
        .handle(ResyncSnapshotCommand { proposal_id })
        .await?;

    Ok(Json(ResyncResponse {
        assessment_id: result.assessment_id,
        snapshot: result.snapshot,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Version Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/proposals/:id/versions - Export a new numbered version
pub async fn create_version(
    State(state): State<ProposalAppState>,
    Path(proposal_id): Path<String>,
    exporter: Exporter,
    request: Option<Json<CreateVersionRequest>>,
) -> Result<impl IntoResponse, ProposalApiError> {
    let proposal_id = parse_proposal_id(&proposal_id)?;
    let request = request.map(|Json(r)| r).unwrap_or_default();

    let cmd = CreateVersionCommand {
        proposal_id,
        exported_by: exporter.user_id,
        artifact_url: request.artifact_url,
    };
    let version = state.create_version_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(version)))
}

/// GET /api/proposals/:id/versions - List versions, ascending
pub async fn list_versions(
    State(state): State<ProposalAppState>,
    Path(proposal_id): Path<String>,
) -> Result<impl IntoResponse, ProposalApiError> {
    let proposal_id = parse_proposal_id(&proposal_id)?;

    let versions = state
        .list_versions_handler()
        .handle(ListVersionsQuery { proposal_id })
        .await?;

    let summaries: Vec<VersionSummary> = versions.iter().map(VersionSummary::from).collect();
    Ok(Json(summaries))
}

/// GET /api/proposals/:id/versions/:version_id - Fetch one version with its snapshots
pub async fn get_version(
    State(state): State<ProposalAppState>,
    Path((proposal_id, version_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ProposalApiError> {
    let proposal_id = parse_proposal_id(&proposal_id)?;
    let version_id: VersionId = version_id
        .parse()
        .map_err(|_| ProposalApiError::BadRequest("Invalid version ID format".to_string()))?;

    let version = state
        .get_version_handler()
        .handle(GetVersionQuery {
            version_id,
            expected_proposal_id: proposal_id,
        })
        .await?;

    Ok(Json(version))
}

// ════════════════════════════════════════════════════════════════════════════════
// Projection Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/proposals/:id/projection/preview - Show the hierarchy a push would create
pub async fn preview_projection(
    State(state): State<ProposalAppState>,
    Path(proposal_id): Path<String>,
) -> Result<impl IntoResponse, ProposalApiError> {
    let proposal_id = parse_proposal_id(&proposal_id)?;

    let preview = state
        .preview_projection_handler()
        .handle(PreviewProjectionQuery { proposal_id })
        .await?;

    Ok(Json(preview))
}

/// POST /api/proposals/:id/projection/push - Create the hierarchy in the task tracker
pub async fn push_projection(
    State(state): State<ProposalAppState>,
    Path(proposal_id): Path<String>,
) -> Result<impl IntoResponse, ProposalApiError> {
    let proposal_id = parse_proposal_id(&proposal_id)?;

    let result = state
        .push_projection_handler()
        .handle(PushProjectionCommand { proposal_id })
        .await?;

    Ok((StatusCode::CREATED, Json(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ProposalApiError {
    BadRequest(String),
    Proposal(ProposalError),
}

impl From<ProposalError> for ProposalApiError {
    fn from(err: ProposalError) -> Self {
        ProposalApiError::Proposal(err)
    }
}

impl IntoResponse for ProposalApiError {
    fn into_response(self) -> axum::response::Response {
        let err = match self {
            ProposalApiError::BadRequest(msg) => {
                return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(msg)))
                    .into_response();
            }
            ProposalApiError::Proposal(err) => err,
        };

        let status = match &err {
            ProposalError::Validation { .. } => StatusCode::BAD_REQUEST,
            ProposalError::NotFound { .. } => StatusCode::NOT_FOUND,
            ProposalError::Conflict(_) | ProposalError::AlreadyPushed { .. } => {
                StatusCode::CONFLICT
            }
            ProposalError::ExternalService { .. } => StatusCode::BAD_GATEWAY,
            ProposalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %err, "Request failed");
        }

        let mut body = ErrorResponse::new(err.code(), err.to_string());
        match &err {
            ProposalError::Validation { field, .. } => {
                body = body.with_details(json!({ "field": field }));
            }
            ProposalError::AlreadyPushed { existing } => {
                body = body.with_details(json!({ "existingProject": existing }));
            }
            ProposalError::ExternalService { step, .. } => {
                body = body.with_details(json!({ "step": step }));
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proposal::ExternalRef;

    async fn body_json(err: ProposalApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_code() {
        let (status, body) =
            body_json(ProposalError::not_found("Version", "v-1").into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "VERSION_NOT_FOUND");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn already_pushed_maps_to_409_with_existing_project() {
        let existing = ExternalRef::new("42", "https://tracker/projects/42");
        let (status, body) = body_json(ProposalError::AlreadyPushed { existing }.into()).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["details"]["existingProject"]["id"], "42");
    }

    #[tokio::test]
    async fn external_failure_maps_to_502_with_step() {
        let (status, body) =
            body_json(ProposalError::external("create project", "timed out").into()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "EXTERNAL_SERVICE_ERROR");
        assert_eq!(body["details"]["step"], "create project");
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_field() {
        let (status, body) =
            body_json(ProposalError::validation("title", "must not be empty").into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "title");
    }

    #[tokio::test]
    async fn bad_request_uses_plain_code() {
        let (status, body) =
            body_json(ProposalApiError::BadRequest("Invalid proposal ID format".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}
