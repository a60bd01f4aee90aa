//! In-memory version repository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId, VersionId};
use crate::domain::version::Version;
use crate::ports::VersionRepository;

/// Append-only version store.
///
/// `(proposal_id, version_number)` is unique; the check and the insert
/// happen under one write lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVersionRepository {
    versions: Arc<RwLock<Vec<Version>>>,
}

impl InMemoryVersionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VersionRepository for InMemoryVersionRepository {
    async fn insert(&self, version: &Version) -> Result<(), DomainError> {
        let mut versions = self.versions.write().await;
        let taken = versions.iter().any(|v| {
            v.proposal_id() == version.proposal_id()
                && v.version_number() == version.version_number()
        });
        if taken {
            return Err(DomainError::new(
                ErrorCode::DuplicateVersion,
                format!(
                    "{} already exists for proposal {}",
                    version.version_number(),
                    version.proposal_id()
                ),
            ));
        }
        versions.push(version.clone());
        Ok(())
    }

    async fn list_by_proposal(&self, proposal_id: &ProposalId) -> Result<Vec<Version>, DomainError> {
        let mut found: Vec<Version> = self
            .versions
            .read()
            .await
            .iter()
            .filter(|v| v.belongs_to(proposal_id))
            .cloned()
            .collect();
        found.sort_by_key(Version::version_number);
        Ok(found)
    }

    async fn find_by_id(&self, id: &VersionId) -> Result<Option<Version>, DomainError> {
        Ok(self
            .versions
            .read()
            .await
            .iter()
            .find(|v| &v.id() == id)
            .cloned())
    }
}
