//! PreviewProjectionHandler - Query handler for the would-be task hierarchy.

use std::sync::Arc;

use crate::domain::foundation::ProposalId;
use crate::domain::projection::{build_preview, Preview};
use crate::domain::proposal::ProposalError;
use crate::ports::{CustomerDirectory, ProposalRepository, SectionRepository};

use super::company_name;

/// Query for a projection preview.
#[derive(Debug, Clone)]
pub struct PreviewProjectionQuery {
    pub proposal_id: ProposalId,
}

/// Handler for projection previews. Makes no external calls.
pub struct PreviewProjectionHandler {
    proposal_repository: Arc<dyn ProposalRepository>,
    section_repository: Arc<dyn SectionRepository>,
    customer_directory: Arc<dyn CustomerDirectory>,
}

impl PreviewProjectionHandler {
    pub fn new(
        proposal_repository: Arc<dyn ProposalRepository>,
        section_repository: Arc<dyn SectionRepository>,
        customer_directory: Arc<dyn CustomerDirectory>,
    ) -> Self {
        Self {
            proposal_repository,
            section_repository,
            customer_directory,
        }
    }

    pub async fn handle(&self, query: PreviewProjectionQuery) -> Result<Preview, ProposalError> {
        let proposal = self
            .proposal_repository
            .find_by_id(&query.proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("load proposal", e))?
            .ok_or_else(|| ProposalError::not_found("Proposal", query.proposal_id))?;

        let sections = self
            .section_repository
            .list_by_proposal(&query.proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("list sections", e))?;

        let company = company_name(self.customer_directory.as_ref(), proposal.customer_id()).await?;

        Ok(build_preview(&company, &proposal, &sections))
    }
}
