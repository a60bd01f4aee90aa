//! CreateProposalFromAssessmentHandler - drafts a proposal from a live assessment.

use std::sync::Arc;

use crate::domain::builder::{AutoBuildInput, AutoBuilder, GroupingMode};
use crate::domain::foundation::{
    AssessmentType, CustomerId, EventId, SerializableDomainEvent, Timestamp,
};
use crate::domain::proposal::{
    NewProposal, Proposal, ProposalContent, ProposalCreated, ProposalError, ProposalType, Section,
    Snapshot,
};
use crate::ports::{
    AssessmentStore, CustomerDirectory, EventPublisher, ProposalRepository, SectionRepository,
};

use crate::application::handlers::{publish_or_log, save_proposal};

/// Command to create a proposal from a customer's assessment.
#[derive(Debug, Clone)]
pub struct CreateProposalFromAssessmentCommand {
    pub customer_id: CustomerId,
    pub assessment_type: AssessmentType,
    pub grouping: GroupingMode,
    /// Defaults to "{customer} {assessment type} Engagement".
    pub title: Option<String>,
}

/// Result of successful proposal creation.
#[derive(Debug, Clone)]
pub struct CreateProposalResult {
    pub proposal: Proposal,
    pub sections: Vec<Section>,
}

/// Handler for proposal creation.
pub struct CreateProposalFromAssessmentHandler {
    assessment_store: Arc<dyn AssessmentStore>,
    customer_directory: Arc<dyn CustomerDirectory>,
    proposal_repository: Arc<dyn ProposalRepository>,
    section_repository: Arc<dyn SectionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateProposalFromAssessmentHandler {
    pub fn new(
        assessment_store: Arc<dyn AssessmentStore>,
        customer_directory: Arc<dyn CustomerDirectory>,
        proposal_repository: Arc<dyn ProposalRepository>,
        section_repository: Arc<dyn SectionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            assessment_store,
            customer_directory,
            proposal_repository,
            section_repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateProposalFromAssessmentCommand,
    ) -> Result<CreateProposalResult, ProposalError> {
        // 1. Load the live assessment
        let assessment = self
            .assessment_store
            .find_by_customer_and_type(&cmd.customer_id, cmd.assessment_type)
            .await
            .map_err(|e| ProposalError::from_port("assessment_store", e))?
            .ok_or_else(|| {
                ProposalError::not_found(
                    "Assessment",
                    format!("{}/{}", cmd.customer_id, cmd.assessment_type.as_str()),
                )
            })?;

        // 2. Resolve the customer's display name
        let customer_name = self
            .customer_directory
            .display_name(&cmd.customer_id)
            .await
            .map_err(|e| ProposalError::from_port("customer_directory", e))?
            .unwrap_or_else(|| cmd.customer_id.to_string());

        // 3. Draft sections and summary
        let output = AutoBuilder::build(&AutoBuildInput {
            processes: assessment.processes.clone(),
            grouping: cmd.grouping,
            customer_name: customer_name.clone(),
            assessment_type: cmd.assessment_type,
        });
        let overall_rating = output.overall_rating();

        // 4. Create the proposal with a fresh snapshot
        let title = cmd.title.unwrap_or_else(|| {
            format!("{} {} Engagement", customer_name, cmd.assessment_type.label())
        });
        let proposal = Proposal::draft(NewProposal {
            customer_id: cmd.customer_id.clone(),
            title,
            proposal_type: ProposalType::from(cmd.assessment_type),
            linked_assessment_ids: vec![assessment.id],
            snapshot: Some(Snapshot::capture(&assessment.processes, Timestamp::now())),
            overall_rating,
            content: ProposalContent::with_summary(output.executive_summary),
        })?;

        self.proposal_repository
            .create(&proposal)
            .await
            .map_err(|e| ProposalError::from_port("create proposal", e))?;

        // 5. Persist sections and totals
        let sections = self
            .section_repository
            .bulk_create(&proposal.id(), output.sections)
            .await
            .map_err(|e| ProposalError::from_port("create sections", e))?;

        let proposal = save_proposal(self.proposal_repository.as_ref(), proposal, |p| {
            p.recalculate_totals(&sections);
            Ok(())
        })
        .await?;

        tracing::info!(
            proposal_id = %proposal.id(),
            assessment_id = %assessment.id,
            sections = sections.len(),
            overall_rating = overall_rating.as_str(),
            "Proposal created from assessment"
        );

        // 6. Publish event
        let event = ProposalCreated {
            event_id: EventId::new(),
            proposal_id: proposal.id(),
            customer_id: cmd.customer_id,
            assessment_id: assessment.id,
            overall_rating,
            section_count: sections.len(),
            created_at: proposal.created_at(),
        };
        publish_or_log(self.event_publisher.as_ref(), event.to_envelope()).await;

        Ok(CreateProposalResult { proposal, sections })
    }
}
