//! ResyncSnapshotHandler - Command handler replacing a proposal's snapshot.

use std::sync::Arc;

use crate::domain::foundation::{
    AssessmentId, EventId, ProposalId, SerializableDomainEvent, Timestamp,
};
use crate::domain::proposal::{ProposalError, Snapshot, SnapshotResynced};
use crate::ports::{AssessmentStore, EventPublisher, ProposalRepository};

use super::{LinkedAssessmentResolver, Resolution};
use crate::application::handlers::{publish_or_log, save_proposal};

/// Command to re-freeze a proposal's snapshot from live data.
#[derive(Debug, Clone)]
pub struct ResyncSnapshotCommand {
    pub proposal_id: ProposalId,
}

/// Result of a successful resync.
#[derive(Debug, Clone)]
pub struct ResyncSnapshotResult {
    pub snapshot: Snapshot,
    pub assessment_id: AssessmentId,
}

/// Handler for snapshot resync.
///
/// The new snapshot fully replaces the old one. Nothing is merged.
pub struct ResyncSnapshotHandler {
    proposal_repository: Arc<dyn ProposalRepository>,
    resolver: LinkedAssessmentResolver,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ResyncSnapshotHandler {
    pub fn new(
        proposal_repository: Arc<dyn ProposalRepository>,
        assessment_store: Arc<dyn AssessmentStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            proposal_repository,
            resolver: LinkedAssessmentResolver::new(assessment_store),
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ResyncSnapshotCommand,
    ) -> Result<ResyncSnapshotResult, ProposalError> {
        // 1. Load proposal
        let proposal = self
            .proposal_repository
            .find_by_id(&cmd.proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("load proposal", e))?
            .ok_or_else(|| ProposalError::not_found("Proposal", cmd.proposal_id))?;

        // 2. Resolve the live assessment
        let assessment = match self.resolver.resolve(&proposal).await? {
            Resolution::Found(assessment) => assessment,
            Resolution::NoLink => {
                return Err(ProposalError::validation(
                    "linked_assessment_ids",
                    "proposal is not linked to an assessment",
                ));
            }
            Resolution::NotFound => {
                tracing::warn!(proposal_id = %cmd.proposal_id, "No live assessment for resync");
                return Err(ProposalError::not_found(
                    "Assessment",
                    format!("linked to proposal {}", cmd.proposal_id),
                ));
            }
        };

        // 3. Replace snapshot and persist
        let now = Timestamp::now();
        let snapshot = Snapshot::capture(&assessment.processes, now);
        save_proposal(self.proposal_repository.as_ref(), proposal, |p| {
            p.replace_snapshot(snapshot.clone());
            Ok(())
        })
        .await?;

        tracing::info!(
            proposal_id = %cmd.proposal_id,
            assessment_id = %assessment.id,
            processes = snapshot.processes().len(),
            "Snapshot resynced"
        );

        // 4. Publish event
        let event = SnapshotResynced {
            event_id: EventId::new(),
            proposal_id: cmd.proposal_id,
            assessment_id: assessment.id,
            process_count: snapshot.processes().len(),
            resynced_at: now,
        };
        publish_or_log(self.event_publisher.as_ref(), event.to_envelope()).await;

        Ok(ResyncSnapshotResult {
            snapshot,
            assessment_id: assessment.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::*;
    use crate::domain::assessment::ProcessAssessment;
    use crate::domain::foundation::{AssessmentType, ProcessStatus};

    struct Fixture {
        proposals: Arc<MockProposalRepository>,
        store: Arc<MockAssessmentStore>,
        events: Arc<MockEventPublisher>,
        handler: ResyncSnapshotHandler,
    }

    fn fixture(proposals: MockProposalRepository, store: MockAssessmentStore) -> Fixture {
        let proposals = Arc::new(proposals);
        let store = Arc::new(store);
        let events = Arc::new(MockEventPublisher::default());
        let handler = ResyncSnapshotHandler::new(proposals.clone(), store.clone(), events.clone());
        Fixture {
            proposals,
            store,
            events,
            handler,
        }
    }

    fn live_processes() -> Vec<ProcessAssessment> {
        vec![
            ProcessAssessment::new("Lead Routing", "Sales", ProcessStatus::Warning, true),
            ProcessAssessment::new("Invoicing", "Finance", ProcessStatus::Healthy, false),
        ]
    }

    #[tokio::test]
    async fn overwrites_snapshot_with_live_processes() {
        let live = assessment(AssessmentType::TypeA, live_processes());
        let stale = Snapshot::capture(
            &[ProcessAssessment::new("Payroll", "People", ProcessStatus::Careful, true)],
            Timestamp::now(),
        );
        let proposal = proposal_linked_to(vec![live.id], Some(stale));
        let id = proposal.id();
        let f = fixture(
            MockProposalRepository::with(proposal),
            MockAssessmentStore::with(vec![live.clone()]),
        );

        let result = f.handler.handle(ResyncSnapshotCommand { proposal_id: id }).await.unwrap();

        let stored = f.proposals.get(&id).unwrap();
        assert_eq!(stored.snapshot(), Some(&result.snapshot));
        assert!(!result.snapshot.contains("Payroll"));
        assert!(result.snapshot.contains("Lead Routing"));
        assert_eq!(result.assessment_id, live.id);
        assert_eq!(f.events.event_types(), vec!["proposal.snapshot_resynced.v1"]);
    }

    #[tokio::test]
    async fn resync_twice_yields_equal_processes() {
        let live = assessment(AssessmentType::TypeB, live_processes());
        let proposal = proposal_linked_to(vec![live.id], None);
        let id = proposal.id();
        let f = fixture(
            MockProposalRepository::with(proposal),
            MockAssessmentStore::with(vec![live]),
        );

        let first = f.handler.handle(ResyncSnapshotCommand { proposal_id: id }).await.unwrap();
        let second = f.handler.handle(ResyncSnapshotCommand { proposal_id: id }).await.unwrap();

        assert_eq!(first.snapshot.processes(), second.snapshot.processes());
        assert_eq!(f.proposals.update_count(), 2);
    }

    #[tokio::test]
    async fn picks_up_live_edits() {
        let live = assessment(AssessmentType::TypeA, live_processes());
        let proposal = proposal_linked_to(vec![live.id], None);
        let id = proposal.id();
        let f = fixture(
            MockProposalRepository::with(proposal),
            MockAssessmentStore::with(vec![live.clone()]),
        );
        f.handler.handle(ResyncSnapshotCommand { proposal_id: id }).await.unwrap();

        let mut edited = live.clone();
        edited.processes[1].status = ProcessStatus::Unable;
        f.store.replace(edited);
        let result = f.handler.handle(ResyncSnapshotCommand { proposal_id: id }).await.unwrap();

        let invoicing = result
            .snapshot
            .processes()
            .iter()
            .find(|p| p.name == "Invoicing")
            .unwrap();
        assert_eq!(invoicing.status, ProcessStatus::Unable);
    }

    #[tokio::test]
    async fn missing_proposal_is_not_found() {
        let f = fixture(MockProposalRepository::default(), MockAssessmentStore::default());

        let err = f
            .handler
            .handle(ResyncSnapshotCommand {
                proposal_id: ProposalId::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProposalError::NotFound { resource: "Proposal", .. }));
    }

    #[tokio::test]
    async fn unlinked_proposal_is_validation_error() {
        let proposal = proposal_linked_to(vec![], None);
        let id = proposal.id();
        let f = fixture(MockProposalRepository::with(proposal), MockAssessmentStore::default());

        let err = f.handler.handle(ResyncSnapshotCommand { proposal_id: id }).await.unwrap_err();

        assert!(matches!(err, ProposalError::Validation { .. }));
        assert!(f.events.event_types().is_empty());
    }

    #[tokio::test]
    async fn unresolved_link_is_not_found() {
        let proposal = proposal_linked_to(vec![AssessmentId::new()], None);
        let id = proposal.id();
        let f = fixture(MockProposalRepository::with(proposal), MockAssessmentStore::default());

        let err = f.handler.handle(ResyncSnapshotCommand { proposal_id: id }).await.unwrap_err();

        assert!(matches!(err, ProposalError::NotFound { resource: "Assessment", .. }));
        assert_eq!(f.proposals.update_count(), 0);
    }

    #[tokio::test]
    async fn persistence_failure_is_external_service_error() {
        let live = assessment(AssessmentType::TypeA, live_processes());
        let proposal = proposal_linked_to(vec![live.id], None);
        let id = proposal.id();
        let f = fixture(
            MockProposalRepository::failing_updates(proposal),
            MockAssessmentStore::with(vec![live]),
        );

        let err = f.handler.handle(ResyncSnapshotCommand { proposal_id: id }).await.unwrap_err();

        assert_eq!(
            err,
            ProposalError::ExternalService {
                step: "update proposal".to_string(),
                message: "Simulated failure".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn publish_failure_does_not_fail_the_committed_resync() {
        let live = assessment(AssessmentType::TypeA, live_processes());
        let proposal = proposal_linked_to(vec![live.id], None);
        let id = proposal.id();
        let proposals = Arc::new(MockProposalRepository::with(proposal));
        let handler = ResyncSnapshotHandler::new(
            proposals.clone(),
            Arc::new(MockAssessmentStore::with(vec![live])),
            Arc::new(MockEventPublisher::failing()),
        );

        let result = handler.handle(ResyncSnapshotCommand { proposal_id: id }).await.unwrap();

        assert_eq!(proposals.get(&id).unwrap().snapshot(), Some(&result.snapshot));
    }
}
