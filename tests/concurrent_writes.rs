//! Writes that race on the same proposal over the in-memory adapters.
//!
//! Covers:
//! 1. A push that lands while an export is numbering keeps its project reference
//! 2. A content edit that lands while an export is numbering is kept
//! 3. Many simultaneous exports never share a version number

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use sow_engine::adapters::{
    InMemoryCustomerDirectory, InMemoryEventBus, InMemoryProposalRepository,
    InMemorySectionRepository, InMemoryVersionRepository,
};
use sow_engine::application::handlers::{
    CreateVersionCommand, CreateVersionHandler, PushProjectionCommand, PushProjectionHandler,
    UpdateProposalContentCommand, UpdateProposalContentHandler,
};
use sow_engine::domain::foundation::{CustomerId, DomainError, ProposalId, UserId, VersionId};
use sow_engine::domain::proposal::{
    ExternalRef, NewProposal, OverallRating, Proposal, ProposalContent, ProposalError,
    ProposalType,
};
use sow_engine::domain::version::{Version, VersionNumber};
use sow_engine::ports::{ProposalRepository, TaskTracker, TaskTrackerError, VersionRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

#[derive(Default)]
struct CountingTracker {
    projects: Mutex<usize>,
}

impl CountingTracker {
    fn projects(&self) -> usize {
        *self.projects.lock().unwrap()
    }
}

#[async_trait]
impl TaskTracker for CountingTracker {
    async fn create_project(&self, _name: &str, _company: &str) -> Result<ExternalRef, TaskTrackerError> {
        let mut projects = self.projects.lock().unwrap();
        *projects += 1;
        let id = format!("project-{}", projects);
        Ok(ExternalRef::new(id.clone(), format!("https://tracker.test/{}", id)))
    }

    async fn create_milestone(
        &self,
        _project_id: &str,
        name: &str,
        _deadline: Option<NaiveDate>,
    ) -> Result<ExternalRef, TaskTrackerError> {
        Ok(ExternalRef::new(name, format!("https://tracker.test/{}", name)))
    }

    async fn create_task_list(
        &self,
        _project_id: &str,
        _milestone_id: &str,
        name: &str,
    ) -> Result<ExternalRef, TaskTrackerError> {
        Ok(ExternalRef::new(name, format!("https://tracker.test/{}", name)))
    }

    async fn create_task(&self, _task_list_id: &str, content: &str) -> Result<ExternalRef, TaskTrackerError> {
        Ok(ExternalRef::new(content, format!("https://tracker.test/{}", content)))
    }
}

/// Another writer that runs once, between an export loading the proposal
/// and saving its counter.
enum Interleave {
    Push(Arc<PushProjectionHandler>, ProposalId),
    Edit(Arc<UpdateProposalContentHandler>, UpdateProposalContentCommand),
}

/// Version store that lets one interleaved writer run while numbering.
struct InterleavingVersions {
    inner: InMemoryVersionRepository,
    interleave: Mutex<Option<Interleave>>,
}

impl InterleavingVersions {
    fn new(interleave: Interleave) -> Self {
        Self {
            inner: InMemoryVersionRepository::new(),
            interleave: Mutex::new(Some(interleave)),
        }
    }
}

#[async_trait]
impl VersionRepository for InterleavingVersions {
    async fn insert(&self, version: &Version) -> Result<(), DomainError> {
        self.inner.insert(version).await
    }

    async fn list_by_proposal(&self, proposal_id: &ProposalId) -> Result<Vec<Version>, DomainError> {
        self.inner.list_by_proposal(proposal_id).await
    }

    async fn find_by_id(&self, id: &VersionId) -> Result<Option<Version>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn latest_number(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<VersionNumber>, DomainError> {
        let pending = self.interleave.lock().unwrap().take();
        match pending {
            Some(Interleave::Push(handler, id)) => {
                handler.handle(PushProjectionCommand { proposal_id: id }).await.unwrap();
            }
            Some(Interleave::Edit(handler, cmd)) => {
                handler.handle(cmd).await.unwrap();
            }
            None => {}
        }
        self.inner.latest_number(proposal_id).await
    }
}

struct World {
    proposals: Arc<InMemoryProposalRepository>,
    sections: Arc<InMemorySectionRepository>,
    tracker: Arc<CountingTracker>,
    events: Arc<InMemoryEventBus>,
}

impl World {
    fn new() -> Self {
        Self {
            proposals: Arc::new(InMemoryProposalRepository::new()),
            sections: Arc::new(InMemorySectionRepository::new()),
            tracker: Arc::new(CountingTracker::default()),
            events: Arc::new(InMemoryEventBus::new()),
        }
    }

    async fn seed(&self) -> ProposalId {
        let proposal = Proposal::draft(NewProposal {
            customer_id: CustomerId::new("acme").unwrap(),
            title: "Acme Engagement".to_string(),
            proposal_type: ProposalType::TypeA,
            linked_assessment_ids: vec![],
            snapshot: None,
            overall_rating: OverallRating::Healthy,
            content: ProposalContent::with_summary("Original"),
        })
        .unwrap();
        self.proposals.create(&proposal).await.unwrap();
        proposal.id()
    }

    fn push(&self) -> PushProjectionHandler {
        PushProjectionHandler::new(
            self.proposals.clone(),
            self.sections.clone(),
            Arc::new(InMemoryCustomerDirectory::new()),
            self.tracker.clone(),
            self.events.clone(),
        )
    }

    fn edit(&self) -> UpdateProposalContentHandler {
        UpdateProposalContentHandler::new(self.proposals.clone())
    }

    fn export(&self, versions: Arc<dyn VersionRepository>) -> CreateVersionHandler {
        CreateVersionHandler::new(
            self.proposals.clone(),
            self.sections.clone(),
            versions,
            self.events.clone(),
        )
    }

    async fn stored(&self, id: &ProposalId) -> Proposal {
        self.proposals.find_by_id(id).await.unwrap().unwrap()
    }
}

fn export_command(proposal_id: ProposalId) -> CreateVersionCommand {
    CreateVersionCommand {
        proposal_id,
        exported_by: UserId::new("user-1").unwrap(),
        artifact_url: None,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn push_during_export_keeps_project_and_blocks_second_push() {
    let world = World::new();
    let id = world.seed().await;
    let push = Arc::new(world.push());
    let versions = Arc::new(InterleavingVersions::new(Interleave::Push(push.clone(), id)));

    let version = world.export(versions).handle(export_command(id)).await.unwrap();

    let stored = world.stored(&id).await;
    let project = stored.external_project().cloned().unwrap();
    assert_eq!(project.id, "project-1");
    assert_eq!(stored.current_version(), version.version_number().as_u32());

    let err = push.handle(PushProjectionCommand { proposal_id: id }).await.unwrap_err();
    assert_eq!(err, ProposalError::AlreadyPushed { existing: project });
    assert_eq!(world.tracker.projects(), 1);
}

#[tokio::test]
async fn edit_during_export_is_kept() {
    let world = World::new();
    let id = world.seed().await;
    let edit = UpdateProposalContentCommand {
        proposal_id: id,
        content: ProposalContent::with_summary("Edited mid-export"),
    };
    let versions = Arc::new(InterleavingVersions::new(Interleave::Edit(
        Arc::new(world.edit()),
        edit,
    )));

    let version = world.export(versions).handle(export_command(id)).await.unwrap();

    let stored = world.stored(&id).await;
    assert_eq!(stored.content().executive_summary, "Edited mid-export");
    assert_eq!(stored.current_version(), 1);
    // The export froze what it loaded before the edit.
    assert_eq!(version.content_snapshot().executive_summary, "Original");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_exports_never_share_a_number() {
    const EXPORTS: usize = 12;

    let world = World::new();
    let id = world.seed().await;
    let versions = Arc::new(InMemoryVersionRepository::new());
    let handler = Arc::new(world.export(versions.clone()));

    let tasks: Vec<_> = (0..EXPORTS)
        .map(|_| {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(export_command(id)).await })
        })
        .collect();

    let mut won = Vec::new();
    for task in tasks {
        match task.await.unwrap() {
            Ok(version) => won.push(version.version_number().as_u32()),
            Err(err) => assert!(
                matches!(err, ProposalError::Conflict(_)),
                "losing export must surface Conflict, got {:?}",
                err
            ),
        }
    }

    assert!(!won.is_empty());
    let distinct: HashSet<u32> = won.iter().copied().collect();
    assert_eq!(distinct.len(), won.len(), "numbers handed out twice: {:?}", won);

    let stored: Vec<u32> = versions
        .list_by_proposal(&id)
        .await
        .unwrap()
        .iter()
        .map(|v| v.version_number().as_u32())
        .collect();
    let expected: Vec<u32> = (1..=won.len() as u32).collect();
    assert_eq!(stored, expected);

    // Numbering carries on from the stored maximum once the race is over.
    let next = handler.handle(export_command(id)).await.unwrap();
    assert_eq!(next.version_number().as_u32(), won.len() as u32 + 1);
}
