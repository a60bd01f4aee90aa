//! LinkedAssessmentResolver - finds the live assessment a proposal is linked to.

use std::sync::Arc;

use crate::domain::assessment::Assessment;
use crate::domain::foundation::AssessmentType;
use crate::domain::proposal::{Proposal, ProposalError};
use crate::ports::AssessmentStore;

/// Result of resolving a proposal's linked assessment.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The proposal carries no linked assessment ids.
    NoLink,
    /// No live assessment of any type has a linked id.
    NotFound,
    Found(Assessment),
}

/// Scans assessment types in `AssessmentType::RESOLUTION_ORDER` and returns
/// the first live assessment whose id the proposal links to.
pub struct LinkedAssessmentResolver {
    assessment_store: Arc<dyn AssessmentStore>,
}

impl LinkedAssessmentResolver {
    pub fn new(assessment_store: Arc<dyn AssessmentStore>) -> Self {
        Self { assessment_store }
    }

    /// # Errors
    ///
    /// `ExternalService` (step `assessment_store`) if a lookup fails. The
    /// scan stops at the first failure.
    pub async fn resolve(&self, proposal: &Proposal) -> Result<Resolution, ProposalError> {
        if proposal.linked_assessment_ids().is_empty() {
            return Ok(Resolution::NoLink);
        }

        for assessment_type in AssessmentType::RESOLUTION_ORDER {
            let candidate = self
                .assessment_store
                .find_by_customer_and_type(proposal.customer_id(), assessment_type)
                .await
                .map_err(|e| {
                    tracing::error!(
                        proposal_id = %proposal.id(),
                        assessment_type = assessment_type.as_str(),
                        error = %e,
                        "Assessment lookup failed"
                    );
                    ProposalError::from_port("assessment_store", e)
                })?;

            if let Some(assessment) = candidate {
                if proposal.is_linked_to(&assessment.id) {
                    return Ok(Resolution::Found(assessment));
                }
            }
        }

        Ok(Resolution::NotFound)
    }
}
