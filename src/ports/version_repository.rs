//! Version repository port.
//!
//! Versions are append-only. There is no update or delete.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProposalId, VersionId};
use crate::domain::version::{Version, VersionNumber};

/// Repository port for immutable proposal versions.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Inserts a new version.
    ///
    /// Implementations must enforce uniqueness of
    /// `(proposal_id, version_number)`.
    ///
    /// # Errors
    ///
    /// - `DuplicateVersion` if the number is already taken for the proposal
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, version: &Version) -> Result<(), DomainError>;

    /// Lists a proposal's versions ordered by number ascending.
    async fn list_by_proposal(&self, proposal_id: &ProposalId) -> Result<Vec<Version>, DomainError>;

    /// Find a version by its ID regardless of proposal.
    async fn find_by_id(&self, id: &VersionId) -> Result<Option<Version>, DomainError>;

    /// Highest version number recorded for the proposal.
    async fn latest_number(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<VersionNumber>, DomainError> {
        Ok(self
            .list_by_proposal(proposal_id)
            .await?
            .iter()
            .map(Version::version_number)
            .max())
    }
}
