//! UpdateProposalContentHandler - replaces a proposal's narrative content.

use std::sync::Arc;

use crate::domain::foundation::ProposalId;
use crate::domain::proposal::{Proposal, ProposalContent, ProposalError};
use crate::ports::ProposalRepository;

use crate::application::handlers::save_proposal;

/// Command to replace a proposal's content.
#[derive(Debug, Clone)]
pub struct UpdateProposalContentCommand {
    pub proposal_id: ProposalId,
    pub content: ProposalContent,
}

/// Handler for content edits. Exported versions are unaffected.
pub struct UpdateProposalContentHandler {
    proposal_repository: Arc<dyn ProposalRepository>,
}

impl UpdateProposalContentHandler {
    pub fn new(proposal_repository: Arc<dyn ProposalRepository>) -> Self {
        Self { proposal_repository }
    }

    pub async fn handle(&self, cmd: UpdateProposalContentCommand) -> Result<Proposal, ProposalError> {
        let proposal = self
            .proposal_repository
            .find_by_id(&cmd.proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("load proposal", e))?
            .ok_or_else(|| ProposalError::not_found("Proposal", cmd.proposal_id))?;

        let content = cmd.content;
        let proposal = save_proposal(self.proposal_repository.as_ref(), proposal, |p| {
            p.update_content(content.clone());
            Ok(())
        })
        .await?;

        tracing::info!(proposal_id = %cmd.proposal_id, "Proposal content updated");

        Ok(proposal)
    }
}
