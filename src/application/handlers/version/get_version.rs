//! GetVersionHandler - Query handler for a single exported version.

use std::sync::Arc;

use crate::domain::foundation::{ProposalId, VersionId};
use crate::domain::proposal::ProposalError;
use crate::domain::version::Version;
use crate::ports::VersionRepository;

/// Query for a version scoped to the proposal it is requested under.
#[derive(Debug, Clone)]
pub struct GetVersionQuery {
    pub version_id: VersionId,
    pub expected_proposal_id: ProposalId,
}

/// Handler for version lookups.
///
/// A version requested under the wrong proposal is reported as not found,
/// the same as a missing one.
pub struct GetVersionHandler {
    version_repository: Arc<dyn VersionRepository>,
}

impl GetVersionHandler {
    pub fn new(version_repository: Arc<dyn VersionRepository>) -> Self {
        Self { version_repository }
    }

    pub async fn handle(&self, query: GetVersionQuery) -> Result<Version, ProposalError> {
        let version = self
            .version_repository
            .find_by_id(&query.version_id)
            .await
            .map_err(|e| ProposalError::from_port("load version", e))?;

        match version {
            Some(version) if version.belongs_to(&query.expected_proposal_id) => Ok(version),
            Some(_) => {
                tracing::warn!(
                    version_id = %query.version_id,
                    proposal_id = %query.expected_proposal_id,
                    "Version requested under another proposal"
                );
                Err(ProposalError::not_found("Version", query.version_id))
            }
            None => Err(ProposalError::not_found("Version", query.version_id)),
        }
    }
}
