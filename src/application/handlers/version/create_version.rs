//! CreateVersionHandler - freezes the current proposal as the next version.

use std::sync::Arc;

use crate::domain::foundation::{EventId, ProposalId, SerializableDomainEvent, UserId};
use crate::domain::proposal::{ProposalError, VersionExported};
use crate::domain::version::{Version, VersionNumber};
use crate::ports::{EventPublisher, ProposalRepository, SectionRepository, VersionRepository};

use crate::application::handlers::{publish_or_log, save_proposal};

/// Command to export a new version.
#[derive(Debug, Clone)]
pub struct CreateVersionCommand {
    pub proposal_id: ProposalId,
    pub exported_by: UserId,
    /// Location of the rendered artifact, if one was produced.
    pub artifact_url: Option<String>,
}

/// Handler for version export.
///
/// Numbering is `1 + max(existing)`. Two concurrent exports can compute the
/// same number; the version store rejects the second insert and the caller
/// receives `Conflict`. Once the insert succeeds the export succeeds: the
/// proposal counter and the event are best effort.
pub struct CreateVersionHandler {
    proposal_repository: Arc<dyn ProposalRepository>,
    section_repository: Arc<dyn SectionRepository>,
    version_repository: Arc<dyn VersionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateVersionHandler {
    pub fn new(
        proposal_repository: Arc<dyn ProposalRepository>,
        section_repository: Arc<dyn SectionRepository>,
        version_repository: Arc<dyn VersionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            proposal_repository,
            section_repository,
            version_repository,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: CreateVersionCommand) -> Result<Version, ProposalError> {
        // 1. Read current content and sections
        let proposal = self
            .proposal_repository
            .find_by_id(&cmd.proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("load proposal", e))?
            .ok_or_else(|| ProposalError::not_found("Proposal", cmd.proposal_id))?;

        let sections = self
            .section_repository
            .list_by_proposal(&cmd.proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("list sections", e))?;

        // 2. Number and freeze
        let latest = self
            .version_repository
            .latest_number(&cmd.proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("read latest version", e))?;
        let number = VersionNumber::next_after(latest);

        let version = Version::freeze(
            cmd.proposal_id,
            number,
            proposal.content().clone(),
            sections,
            cmd.exported_by.clone(),
            cmd.artifact_url,
        )?;

        // 3. Insert; uniqueness is enforced by the store
        self.version_repository.insert(&version).await.map_err(|e| {
            let err = ProposalError::from_port("insert version", e);
            if matches!(err, ProposalError::Conflict(_)) {
                tracing::warn!(
                    proposal_id = %cmd.proposal_id,
                    version_number = number.as_u32(),
                    "Version number already taken"
                );
            }
            err
        })?;

        // 4. Advance the proposal's counter, keeping writes that landed meanwhile.
        // The version row is committed, so a failure here is logged, not returned.
        if let Err(err) = save_proposal(self.proposal_repository.as_ref(), proposal, |p| {
            p.record_version(number.as_u32());
            Ok(())
        })
        .await
        {
            tracing::error!(
                proposal_id = %cmd.proposal_id,
                version_number = number.as_u32(),
                error = %err,
                "Version stored but proposal counter not advanced"
            );
        }

        tracing::info!(
            proposal_id = %cmd.proposal_id,
            version_number = number.as_u32(),
            exported_by = %cmd.exported_by,
            "Version exported"
        );

        let event = VersionExported {
            event_id: EventId::new(),
            proposal_id: cmd.proposal_id,
            version_id: version.id(),
            version_number: number.as_u32(),
            exported_by: cmd.exported_by.to_string(),
            exported_at: version.exported_at(),
        };
        publish_or_log(
            self.event_publisher.as_ref(),
            event.to_envelope().with_user_id(cmd.exported_by.to_string()),
        )
        .await;

        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::*;
    use crate::domain::foundation::{DomainError, VersionId};
    use crate::domain::proposal::{ProposalContent, Section};

    struct Fixture {
        proposals: Arc<MockProposalRepository>,
        versions: Arc<MockVersionRepository>,
        events: Arc<MockEventPublisher>,
        handler: CreateVersionHandler,
    }

    fn fixture(
        proposals: MockProposalRepository,
        sections: MockSectionRepository,
        versions: MockVersionRepository,
    ) -> Fixture {
        let proposals = Arc::new(proposals);
        let versions = Arc::new(versions);
        let events = Arc::new(MockEventPublisher::default());
        let handler = CreateVersionHandler::new(
            proposals.clone(),
            Arc::new(sections),
            versions.clone(),
            events.clone(),
        );
        Fixture {
            proposals,
            versions,
            events,
            handler,
        }
    }

    fn command(proposal_id: ProposalId) -> CreateVersionCommand {
        CreateVersionCommand {
            proposal_id,
            exported_by: UserId::new("user-1").unwrap(),
            artifact_url: None,
        }
    }

    #[tokio::test]
    async fn numbers_versions_from_one_without_gaps() {
        let proposal = proposal_linked_to(vec![], None);
        let id = proposal.id();
        let f = fixture(
            MockProposalRepository::with(proposal),
            MockSectionRepository::default(),
            MockVersionRepository::default(),
        );

        for _ in 0..4 {
            f.handler.handle(command(id)).await.unwrap();
        }

        let numbers: Vec<u32> = f
            .versions
            .all()
            .iter()
            .map(|v| v.version_number().as_u32())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(f.proposals.get(&id).unwrap().current_version(), 4);
        assert_eq!(f.events.event_types().len(), 4);
    }

    #[tokio::test]
    async fn freezes_current_content_and_sections() {
        let proposal = proposal_linked_to(vec![], None);
        let id = proposal.id();
        let sections = vec![
            Section::from_draft(id, draft("Second", &[], 1)),
            Section::from_draft(id, draft("First", &["Runbook"], 0)),
        ];
        let f = fixture(
            MockProposalRepository::with(proposal.clone()),
            MockSectionRepository::with(sections),
            MockVersionRepository::default(),
        );

        let version = f.handler.handle(command(id)).await.unwrap();

        assert_eq!(version.content_snapshot(), proposal.content());
        assert_eq!(version.sections_snapshot().len(), 2);
        assert_eq!(version.sections_snapshot()[0].title, "First");
        assert!(version.verify_checksum());
    }

    #[tokio::test]
    async fn later_edits_do_not_change_existing_versions() {
        let proposal = proposal_linked_to(vec![], None);
        let id = proposal.id();
        let f = fixture(
            MockProposalRepository::with(proposal),
            MockSectionRepository::default(),
            MockVersionRepository::default(),
        );
        let v1 = f.handler.handle(command(id)).await.unwrap();

        let mut edited = f.proposals.get(&id).unwrap();
        edited.update_content(ProposalContent::with_summary("Rewritten"));
        f.proposals.update(&edited).await.unwrap();
        let v2 = f.handler.handle(command(id)).await.unwrap();

        let stored = f.versions.all();
        assert_eq!(stored[0], v1);
        assert_eq!(stored[0].content_snapshot().executive_summary, "Summary");
        assert_eq!(v2.content_snapshot().executive_summary, "Rewritten");
    }

    /// Reports no versions, like a reader that raced a concurrent export.
    struct StaleVersionRepository(MockVersionRepository);

    #[async_trait::async_trait]
    impl VersionRepository for StaleVersionRepository {
        async fn insert(&self, version: &Version) -> Result<(), DomainError> {
            self.0.insert(version).await
        }

        async fn list_by_proposal(&self, id: &ProposalId) -> Result<Vec<Version>, DomainError> {
            self.0.list_by_proposal(id).await
        }

        async fn find_by_id(&self, id: &VersionId) -> Result<Option<Version>, DomainError> {
            self.0.find_by_id(id).await
        }

        async fn latest_number(&self, _id: &ProposalId) -> Result<Option<VersionNumber>, DomainError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn racing_export_surfaces_conflict() {
        let proposal = proposal_linked_to(vec![], None);
        let id = proposal.id();
        let proposals = Arc::new(MockProposalRepository::with(proposal));
        let versions = Arc::new(StaleVersionRepository(MockVersionRepository::default()));
        let handler = CreateVersionHandler::new(
            proposals.clone(),
            Arc::new(MockSectionRepository::default()),
            versions.clone(),
            Arc::new(MockEventPublisher::default()),
        );
        handler.handle(command(id)).await.unwrap();

        let err = handler.handle(command(id)).await.unwrap_err();

        assert!(matches!(err, ProposalError::Conflict(_)));
        assert_eq!(versions.0.all().len(), 1);
        assert_eq!(proposals.get(&id).unwrap().current_version(), 1);
    }

    #[tokio::test]
    async fn missing_proposal_is_not_found() {
        let f = fixture(
            MockProposalRepository::default(),
            MockSectionRepository::default(),
            MockVersionRepository::default(),
        );

        let err = f.handler.handle(command(ProposalId::new())).await.unwrap_err();

        assert!(matches!(err, ProposalError::NotFound { .. }));
        assert!(f.versions.all().is_empty());
    }

    #[tokio::test]
    async fn publish_failure_keeps_the_export_and_its_number() {
        let proposal = proposal_linked_to(vec![], None);
        let id = proposal.id();
        let versions = Arc::new(MockVersionRepository::default());
        let handler = CreateVersionHandler::new(
            Arc::new(MockProposalRepository::with(proposal)),
            Arc::new(MockSectionRepository::default()),
            versions.clone(),
            Arc::new(MockEventPublisher::failing()),
        );

        let version = handler.handle(command(id)).await.unwrap();
        let next = handler.handle(command(id)).await.unwrap();

        assert_eq!(version.version_number().as_u32(), 1);
        assert_eq!(next.version_number().as_u32(), 2);
        assert_eq!(versions.all().len(), 2);
    }

    #[tokio::test]
    async fn counter_save_survives_a_concurrent_proposal_write() {
        let proposal = proposal_linked_to(vec![], None);
        let id = proposal.id();
        let f = fixture(
            MockProposalRepository::with(proposal).conflicting(1),
            MockSectionRepository::default(),
            MockVersionRepository::default(),
        );

        f.handler.handle(command(id)).await.unwrap();

        assert_eq!(f.proposals.get(&id).unwrap().current_version(), 1);
        assert_eq!(f.versions.all().len(), 1);
    }

    #[tokio::test]
    async fn counter_failure_after_insert_still_returns_the_version() {
        let proposal = proposal_linked_to(vec![], None);
        let id = proposal.id();
        let f = fixture(
            MockProposalRepository::failing_updates(proposal),
            MockSectionRepository::default(),
            MockVersionRepository::default(),
        );

        let version = f.handler.handle(command(id)).await.unwrap();

        assert_eq!(f.versions.all(), vec![version]);
        assert_eq!(f.events.event_types(), vec!["proposal.version_exported.v1"]);
    }
}
