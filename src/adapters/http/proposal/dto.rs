//! Request and response bodies for the proposal endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::builder::GroupingMode;
use crate::domain::drift::{DriftCheck, DriftReport};
use crate::domain::foundation::{AssessmentId, AssessmentType, Timestamp};
use crate::domain::proposal::{
    ExternalRef, OverallRating, Proposal, ProposalContent, ProposalStatus, ProposalType, Section,
    Snapshot,
};
use crate::domain::version::Version;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/proposals`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    pub customer_id: String,
    pub assessment_type: AssessmentType,
    #[serde(default)]
    pub grouping: GroupingMode,
    pub title: Option<String>,
}

/// Body of `POST /api/proposals/:id/versions`. The body itself is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVersionRequest {
    pub artifact_url: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalResponse {
    pub id: String,
    pub customer_id: String,
    pub title: String,
    pub proposal_type: ProposalType,
    pub status: ProposalStatus,
    pub linked_assessment_ids: Vec<AssessmentId>,
    pub snapshot: Option<Snapshot>,
    pub overall_rating: OverallRating,
    pub total_hours: f64,
    pub total_investment: f64,
    pub current_version: u32,
    pub external_project: Option<ExternalRef>,
    pub content: ProposalContent,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
}

impl ProposalResponse {
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = Some(sections);
        self
    }
}

impl From<&Proposal> for ProposalResponse {
    fn from(p: &Proposal) -> Self {
        Self {
            id: p.id().to_string(),
            customer_id: p.customer_id().to_string(),
            title: p.title().to_string(),
            proposal_type: p.proposal_type(),
            status: p.status(),
            linked_assessment_ids: p.linked_assessment_ids().to_vec(),
            snapshot: p.snapshot().cloned(),
            overall_rating: p.overall_rating(),
            total_hours: p.total_hours(),
            total_investment: p.total_investment(),
            current_version: p.current_version(),
            external_project: p.external_project().cloned(),
            content: p.content().clone(),
            created_at: p.created_at(),
            updated_at: p.updated_at(),
            sections: None,
        }
    }
}

/// Drift outcome. `report` is present only when `status` is `compared`;
/// otherwise exactly one of the degenerate flags is set to `true`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DriftReport>,
    #[serde(skip_serializing_if = "is_false")]
    pub no_snapshot: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_diagnostic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub diagnostic_not_found: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl From<DriftCheck> for DriftResponse {
    fn from(check: DriftCheck) -> Self {
        Self {
            status: check.as_str(),
            report: check.report().cloned(),
            no_snapshot: matches!(check, DriftCheck::NoSnapshot),
            no_diagnostic: matches!(check, DriftCheck::NoDiagnostic),
            diagnostic_not_found: matches!(check, DriftCheck::DiagnosticNotFound),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResyncResponse {
    pub assessment_id: AssessmentId,
    pub snapshot: Snapshot,
}

/// A version without its frozen snapshots, for listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub id: String,
    pub version_number: u32,
    pub content_checksum: String,
    pub exported_by: String,
    pub exported_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_url: Option<String>,
}

impl From<&Version> for VersionSummary {
    fn from(v: &Version) -> Self {
        Self {
            id: v.id().to_string(),
            version_number: v.version_number().as_u32(),
            content_checksum: v.content_checksum().to_string(),
            exported_by: v.exported_by().to_string(),
            exported_at: v.exported_at(),
            artifact_url: v.artifact_url().map(str::to_string),
        }
    }
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
