//! CheckDriftHandler - Query handler comparing a proposal's snapshot with live data.

use std::sync::Arc;

use crate::domain::drift::{DriftCheck, DriftDetector};
use crate::domain::foundation::ProposalId;
use crate::domain::proposal::ProposalError;
use crate::ports::{AssessmentStore, ProposalRepository};

use super::{LinkedAssessmentResolver, Resolution};

/// Query to check a proposal for drift.
#[derive(Debug, Clone)]
pub struct CheckDriftCommand {
    pub proposal_id: ProposalId,
}

/// Handler for drift checks. Never mutates state.
pub struct CheckDriftHandler {
    proposal_repository: Arc<dyn ProposalRepository>,
    resolver: LinkedAssessmentResolver,
}

impl CheckDriftHandler {
    pub fn new(
        proposal_repository: Arc<dyn ProposalRepository>,
        assessment_store: Arc<dyn AssessmentStore>,
    ) -> Self {
        Self {
            proposal_repository,
            resolver: LinkedAssessmentResolver::new(assessment_store),
        }
    }

    pub async fn handle(&self, cmd: CheckDriftCommand) -> Result<DriftCheck, ProposalError> {
        let proposal = self
            .proposal_repository
            .find_by_id(&cmd.proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("load proposal", e))?
            .ok_or_else(|| ProposalError::not_found("Proposal", cmd.proposal_id))?;

        let Some(snapshot) = proposal.snapshot() else {
            tracing::debug!(proposal_id = %cmd.proposal_id, "Drift check skipped: no snapshot");
            return Ok(DriftCheck::NoSnapshot);
        };

        let check = match self.resolver.resolve(&proposal).await? {
            Resolution::NoLink => DriftCheck::NoDiagnostic,
            Resolution::NotFound => DriftCheck::DiagnosticNotFound,
            Resolution::Found(assessment) => {
                DriftCheck::Compared(DriftDetector::compare(snapshot, &assessment.processes))
            }
        };

        match check.report() {
            Some(report) => tracing::info!(
                proposal_id = %cmd.proposal_id,
                has_changes = report.has_changes,
                changes = report.change_count(),
                "Drift check completed"
            ),
            None => tracing::warn!(
                proposal_id = %cmd.proposal_id,
                outcome = check.as_str(),
                "Drift check could not compare"
            ),
        }

        Ok(check)
    }
}
