//! In-memory section repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId, SectionId};
use crate::domain::proposal::{sort_sections, Section, SectionDraft};
use crate::ports::SectionRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemorySectionRepository {
    sections: Arc<RwLock<HashMap<SectionId, Section>>>,
}

impl InMemorySectionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SectionRepository for InMemorySectionRepository {
    async fn list_by_proposal(&self, proposal_id: &ProposalId) -> Result<Vec<Section>, DomainError> {
        let mut found: Vec<Section> = self
            .sections
            .read()
            .await
            .values()
            .filter(|s| &s.proposal_id == proposal_id)
            .cloned()
            .collect();
        sort_sections(&mut found);
        Ok(found)
    }

    async fn bulk_create(
        &self,
        proposal_id: &ProposalId,
        drafts: Vec<SectionDraft>,
    ) -> Result<Vec<Section>, DomainError> {
        let created: Vec<Section> = drafts
            .into_iter()
            .map(|draft| Section::from_draft(*proposal_id, draft))
            .collect();

        let mut sections = self.sections.write().await;
        let taken: Vec<u32> = sections
            .values()
            .filter(|s| &s.proposal_id == proposal_id)
            .map(|s| s.sort_order)
            .collect();
        for (i, section) in created.iter().enumerate() {
            let clashes = taken.contains(&section.sort_order)
                || created[..i].iter().any(|s| s.sort_order == section.sort_order);
            if clashes {
                return Err(DomainError::new(
                    ErrorCode::Conflict,
                    format!(
                        "sort_order {} already used in proposal {}",
                        section.sort_order, proposal_id
                    ),
                ));
            }
        }

        for section in &created {
            sections.insert(section.id, section.clone());
        }
        Ok(created)
    }

    async fn update(&self, section: &Section) -> Result<(), DomainError> {
        let mut sections = self.sections.write().await;
        match sections.get_mut(&section.id) {
            Some(stored) => {
                *stored = section.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SectionNotFound,
                section.id.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, sort_order: u32) -> SectionDraft {
        SectionDraft {
            title: title.to_string(),
            description: String::new(),
            deliverables: vec![],
            hours: 0.0,
            rate: 0.0,
            start_date: None,
            end_date: None,
            addressed_process_names: vec![],
            sort_order,
        }
    }

    #[tokio::test]
    async fn lists_only_the_proposal_sections_in_order() {
        let repo = InMemorySectionRepository::new();
        let pid = ProposalId::new();
        repo.bulk_create(&pid, vec![draft("Second", 1), draft("First", 0)])
            .await
            .unwrap();
        repo.bulk_create(&ProposalId::new(), vec![draft("Other", 0)])
            .await
            .unwrap();

        let titles: Vec<String> = repo
            .list_by_proposal(&pid)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn duplicate_sort_order_is_rejected_atomically() {
        let repo = InMemorySectionRepository::new();
        let pid = ProposalId::new();

        let err = repo
            .bulk_create(&pid, vec![draft("A", 0), draft("B", 0)])
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(repo.list_by_proposal(&pid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_records_milestone_id() {
        let repo = InMemorySectionRepository::new();
        let pid = ProposalId::new();
        let mut section = repo.bulk_create(&pid, vec![draft("A", 0)]).await.unwrap().remove(0);

        section.external_milestone_id = Some("m-1".to_string());
        repo.update(&section).await.unwrap();

        let stored = repo.list_by_proposal(&pid).await.unwrap();
        assert_eq!(stored[0].external_milestone_id.as_deref(), Some("m-1"));
    }
}
