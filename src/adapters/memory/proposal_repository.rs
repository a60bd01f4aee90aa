//! In-memory proposal repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId};
use crate::domain::proposal::Proposal;
use crate::ports::ProposalRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProposalRepository {
    proposals: Arc<RwLock<HashMap<ProposalId, Proposal>>>,
}

impl InMemoryProposalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored proposals.
    pub async fn len(&self) -> usize {
        self.proposals.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.proposals.read().await.is_empty()
    }
}

#[async_trait]
impl ProposalRepository for InMemoryProposalRepository {
    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError> {
        Ok(self.proposals.read().await.get(id).cloned())
    }

    async fn create(&self, proposal: &Proposal) -> Result<(), DomainError> {
        let mut proposals = self.proposals.write().await;
        if proposals.contains_key(&proposal.id()) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Proposal {} already exists", proposal.id()),
            ));
        }
        proposals.insert(proposal.id(), proposal.clone());
        Ok(())
    }

    async fn update(&self, proposal: &Proposal) -> Result<(), DomainError> {
        let mut proposals = self.proposals.write().await;
        let Some(stored) = proposals.get_mut(&proposal.id()) else {
            return Err(DomainError::new(
                ErrorCode::ProposalNotFound,
                proposal.id().to_string(),
            ));
        };
        if stored.revision() != proposal.revision() {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!(
                    "Proposal {} changed since revision {}",
                    proposal.id(),
                    proposal.revision()
                ),
            ));
        }

        let mut saved = proposal.clone();
        saved.mark_saved();
        *stored = saved;
        Ok(())
    }
}
