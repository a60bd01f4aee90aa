//! ListVersionsHandler - Query handler for a proposal's export history.

use std::sync::Arc;

use crate::domain::foundation::ProposalId;
use crate::domain::proposal::ProposalError;
use crate::domain::version::Version;
use crate::ports::{ProposalRepository, VersionRepository};

/// Query for all versions of a proposal.
#[derive(Debug, Clone)]
pub struct ListVersionsQuery {
    pub proposal_id: ProposalId,
}

/// Handler listing versions in ascending number order.
pub struct ListVersionsHandler {
    proposal_repository: Arc<dyn ProposalRepository>,
    version_repository: Arc<dyn VersionRepository>,
}

impl ListVersionsHandler {
    pub fn new(
        proposal_repository: Arc<dyn ProposalRepository>,
        version_repository: Arc<dyn VersionRepository>,
    ) -> Self {
        Self {
            proposal_repository,
            version_repository,
        }
    }

    pub async fn handle(&self, query: ListVersionsQuery) -> Result<Vec<Version>, ProposalError> {
        self.proposal_repository
            .find_by_id(&query.proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("load proposal", e))?
            .ok_or_else(|| ProposalError::not_found("Proposal", query.proposal_id))?;

        let mut versions = self
            .version_repository
            .list_by_proposal(&query.proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("list versions", e))?;
        versions.sort_by_key(Version::version_number);

        Ok(versions)
    }
}
