//! Proposal repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProposalId};
use crate::domain::proposal::Proposal;

/// Repository port for Proposal aggregate persistence.
#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Find a proposal by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError>;

    /// Save a new proposal.
    ///
    /// # Errors
    ///
    /// - `Conflict` if a proposal with the same ID exists
    /// - `DatabaseError` on persistence failure
    async fn create(&self, proposal: &Proposal) -> Result<(), DomainError>;

    /// Update an existing proposal.
    ///
    /// Applies only while the stored revision still equals
    /// `proposal.revision()`; the stored revision then advances by one.
    ///
    /// # Errors
    ///
    /// - `ProposalNotFound` if the proposal doesn't exist
    /// - `ConcurrencyConflict` if another update landed since it was loaded
    /// - `DatabaseError` on persistence failure
    async fn update(&self, proposal: &Proposal) -> Result<(), DomainError>;
}
