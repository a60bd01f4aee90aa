//! Proposal aggregate - the statement of work.

use crate::domain::foundation::{
    AssessmentId, CustomerId, ProposalId, Timestamp, ValidationError,
};

use super::{
    round_cents, ExternalRef, OverallRating, ProposalContent, ProposalError, ProposalStatus,
    ProposalType, Section, Snapshot,
};

/// Inputs for a brand new proposal.
#[derive(Debug, Clone)]
pub struct NewProposal {
    pub customer_id: CustomerId,
    pub title: String,
    pub proposal_type: ProposalType,
    pub linked_assessment_ids: Vec<AssessmentId>,
    pub snapshot: Option<Snapshot>,
    pub overall_rating: OverallRating,
    pub content: ProposalContent,
}

/// The Proposal aggregate root.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    id: ProposalId,
    customer_id: CustomerId,
    title: String,
    proposal_type: ProposalType,
    status: ProposalStatus,

    // Assessment linkage
    linked_assessment_ids: Vec<AssessmentId>,
    snapshot: Option<Snapshot>,
    overall_rating: OverallRating,

    // Commercials
    total_hours: f64,
    total_investment: f64,

    // Export and projection state
    current_version: u32,
    external_project: Option<ExternalRef>,

    content: ProposalContent,

    created_at: Timestamp,
    updated_at: Timestamp,

    /// Stored revision this copy was read at. Bumped by every successful save.
    revision: u32,
}

impl Proposal {
    // ════════════════════════════════════════════════════════════════════════════════
    // Construction
    // ════════════════════════════════════════════════════════════════════════════════

    /// Creates a new draft proposal.
    pub fn draft(new: NewProposal) -> Result<Self, ValidationError> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: ProposalId::new(),
            customer_id: new.customer_id,
            title,
            proposal_type: new.proposal_type,
            status: ProposalStatus::Draft,
            linked_assessment_ids: new.linked_assessment_ids,
            snapshot: new.snapshot,
            overall_rating: new.overall_rating,
            total_hours: 0.0,
            total_investment: 0.0,
            current_version: 0,
            external_project: None,
            content: new.content,
            created_at: now,
            updated_at: now,
            revision: 0,
        })
    }

    /// Reconstitutes a proposal from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProposalId,
        customer_id: CustomerId,
        title: String,
        proposal_type: ProposalType,
        status: ProposalStatus,
        linked_assessment_ids: Vec<AssessmentId>,
        snapshot: Option<Snapshot>,
        overall_rating: OverallRating,
        total_hours: f64,
        total_investment: f64,
        current_version: u32,
        external_project: Option<ExternalRef>,
        content: ProposalContent,
        created_at: Timestamp,
        updated_at: Timestamp,
        revision: u32,
    ) -> Self {
        Self {
            id,
            customer_id,
            title,
            proposal_type,
            status,
            linked_assessment_ids,
            snapshot,
            overall_rating,
            total_hours,
            total_investment,
            current_version,
            external_project,
            content,
            created_at,
            updated_at,
            revision,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════════════

    pub fn id(&self) -> ProposalId {
        self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn proposal_type(&self) -> ProposalType {
        self.proposal_type
    }

    pub fn status(&self) -> ProposalStatus {
        self.status
    }

    pub fn linked_assessment_ids(&self) -> &[AssessmentId] {
        &self.linked_assessment_ids
    }

    /// Returns true if `id` is one of the proposal's linked assessments.
    pub fn is_linked_to(&self, id: &AssessmentId) -> bool {
        self.linked_assessment_ids.contains(id)
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn overall_rating(&self) -> OverallRating {
        self.overall_rating
    }

    pub fn total_hours(&self) -> f64 {
        self.total_hours
    }

    pub fn total_investment(&self) -> f64 {
        self.total_investment
    }

    /// Number of the latest exported version, 0 if never exported.
    pub fn current_version(&self) -> u32 {
        self.current_version
    }

    pub fn external_project(&self) -> Option<&ExternalRef> {
        self.external_project.as_ref()
    }

    pub fn content(&self) -> &ProposalContent {
        &self.content
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Revision a store update must still find for the write to apply.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Mutations
    // ════════════════════════════════════════════════════════════════════════════════

    /// Replaces the snapshot wholesale. Earlier snapshot state, including any
    /// manual adjustments, is discarded.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
        self.touch();
    }

    /// Replaces the narrative content.
    pub fn update_content(&mut self, content: ProposalContent) {
        self.content = content;
        self.touch();
    }

    /// Records that version `number` was exported. The counter never moves
    /// backwards.
    pub fn record_version(&mut self, number: u32) {
        self.current_version = self.current_version.max(number);
        self.touch();
    }

    /// Links the external project created for this proposal.
    ///
    /// # Errors
    ///
    /// `AlreadyPushed` with the existing reference if a project is already linked.
    pub fn attach_external_project(&mut self, project: ExternalRef) -> Result<(), ProposalError> {
        if let Some(existing) = &self.external_project {
            return Err(ProposalError::AlreadyPushed {
                existing: existing.clone(),
            });
        }
        self.external_project = Some(project);
        self.touch();
        Ok(())
    }

    /// Recomputes hour and investment totals from the given sections.
    pub fn recalculate_totals(&mut self, sections: &[Section]) {
        self.total_hours = round_cents(sections.iter().map(|s| s.hours).sum());
        self.total_investment = round_cents(sections.iter().map(Section::investment).sum());
        self.touch();
    }

    /// Advances the revision after the store accepted an update of this copy.
    pub fn mark_saved(&mut self) {
        self.revision += 1;
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
