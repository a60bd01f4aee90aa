//! Section repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProposalId};
use crate::domain::proposal::{Section, SectionDraft};

/// Repository port for proposal sections.
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Lists a proposal's sections in `sort_order`.
    async fn list_by_proposal(&self, proposal_id: &ProposalId) -> Result<Vec<Section>, DomainError>;

    /// Creates sections from drafts under a proposal, returning them with
    /// their assigned ids.
    async fn bulk_create(
        &self,
        proposal_id: &ProposalId,
        drafts: Vec<SectionDraft>,
    ) -> Result<Vec<Section>, DomainError>;

    /// Update an existing section.
    ///
    /// # Errors
    ///
    /// - `SectionNotFound` if the section doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, section: &Section) -> Result<(), DomainError>;
}
