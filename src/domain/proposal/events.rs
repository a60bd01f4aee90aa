//! Domain events emitted by proposal operations.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, AssessmentId, CustomerId, EventId, ProposalId, Timestamp, VersionId,
};

use super::{ExternalRef, OverallRating};

/// Published when a proposal is generated from an assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalCreated {
    pub event_id: EventId,
    pub proposal_id: ProposalId,
    pub customer_id: CustomerId,
    pub assessment_id: AssessmentId,
    pub overall_rating: OverallRating,
    pub section_count: usize,
    pub created_at: Timestamp,
}

domain_event!(
    ProposalCreated,
    event_type = "proposal.created.v1",
    aggregate_id = proposal_id,
    aggregate_type = "Proposal",
    occurred_at = created_at,
    event_id = event_id
);

/// Published when a proposal's snapshot is replaced from live data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResynced {
    pub event_id: EventId,
    pub proposal_id: ProposalId,
    pub assessment_id: AssessmentId,
    pub process_count: usize,
    pub resynced_at: Timestamp,
}

domain_event!(
    SnapshotResynced,
    event_type = "proposal.snapshot_resynced.v1",
    aggregate_id = proposal_id,
    aggregate_type = "Proposal",
    occurred_at = resynced_at,
    event_id = event_id
);

/// Published when a new immutable version is exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionExported {
    pub event_id: EventId,
    pub proposal_id: ProposalId,
    pub version_id: VersionId,
    pub version_number: u32,
    pub exported_by: String,
    pub exported_at: Timestamp,
}

domain_event!(
    VersionExported,
    event_type = "proposal.version_exported.v1",
    aggregate_id = proposal_id,
    aggregate_type = "Proposal",
    occurred_at = exported_at,
    event_id = event_id
);

/// Published when a proposal has been fully projected into the task tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPushed {
    pub event_id: EventId,
    pub proposal_id: ProposalId,
    pub project: ExternalRef,
    pub milestones: usize,
    pub task_lists: usize,
    pub tasks: usize,
    pub pushed_at: Timestamp,
}

domain_event!(
    ProjectPushed,
    event_type = "proposal.project_pushed.v1",
    aggregate_id = proposal_id,
    aggregate_type = "Proposal",
    occurred_at = pushed_at,
    event_id = event_id
);
