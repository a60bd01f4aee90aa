//! Mock ports shared by handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::assessment::{Assessment, ProcessAssessment};
use crate::domain::foundation::{
    AssessmentId, AssessmentType, CustomerId, DomainError, ErrorCode, EventEnvelope, ProposalId,
    VersionId,
};
use crate::domain::proposal::{
    ExternalRef, NewProposal, OverallRating, Proposal, ProposalContent, ProposalType, Section,
    SectionDraft, Snapshot,
};
use crate::domain::version::Version;
use crate::ports::{
    AssessmentStore, CustomerDirectory, EventPublisher, ProposalRepository, SectionRepository,
    TaskTracker, TaskTrackerError, VersionRepository,
};

// ─────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────

pub fn customer() -> CustomerId {
    CustomerId::new("acme").unwrap()
}

pub fn assessment(assessment_type: AssessmentType, processes: Vec<ProcessAssessment>) -> Assessment {
    Assessment::new(AssessmentId::new(), customer(), assessment_type, processes).unwrap()
}

pub fn proposal_linked_to(ids: Vec<AssessmentId>, snapshot: Option<Snapshot>) -> Proposal {
    Proposal::draft(NewProposal {
        customer_id: customer(),
        title: "Acme Engagement".to_string(),
        proposal_type: ProposalType::TypeA,
        linked_assessment_ids: ids,
        snapshot,
        overall_rating: OverallRating::Healthy,
        content: ProposalContent::with_summary("Summary"),
    })
    .unwrap()
}

pub fn draft(title: &str, deliverables: &[&str], sort_order: u32) -> SectionDraft {
    SectionDraft {
        title: title.to_string(),
        description: String::new(),
        deliverables: deliverables.iter().map(|d| d.to_string()).collect(),
        hours: 10.0,
        rate: 150.0,
        start_date: None,
        end_date: NaiveDate::from_ymd_opt(2024, 12, 31),
        addressed_process_names: vec![],
        sort_order,
    }
}

fn db_failure() -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, "Simulated failure")
}

// ─────────────────────────────────────────────────────────────────────
// Stores
// ─────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockAssessmentStore {
    assessments: Mutex<Vec<Assessment>>,
    pub fail: bool,
    lookups: Mutex<Vec<AssessmentType>>,
}

impl MockAssessmentStore {
    pub fn with(assessments: Vec<Assessment>) -> Self {
        Self {
            assessments: Mutex::new(assessments),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn replace(&self, assessment: Assessment) {
        let mut assessments = self.assessments.lock().unwrap();
        assessments.retain(|a| a.assessment_type != assessment.assessment_type);
        assessments.push(assessment);
    }

    pub fn lookups(&self) -> Vec<AssessmentType> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssessmentStore for MockAssessmentStore {
    async fn find_by_customer_and_type(
        &self,
        customer_id: &CustomerId,
        assessment_type: AssessmentType,
    ) -> Result<Option<Assessment>, DomainError> {
        self.lookups.lock().unwrap().push(assessment_type);
        if self.fail {
            return Err(db_failure());
        }
        Ok(self
            .assessments
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.customer_id == customer_id && a.assessment_type == assessment_type)
            .cloned())
    }
}

#[derive(Default)]
pub struct MockCustomerDirectory {
    names: HashMap<String, String>,
}

impl MockCustomerDirectory {
    pub fn with(customer_id: &str, name: &str) -> Self {
        Self {
            names: HashMap::from([(customer_id.to_string(), name.to_string())]),
        }
    }
}

#[async_trait]
impl CustomerDirectory for MockCustomerDirectory {
    async fn display_name(&self, customer_id: &CustomerId) -> Result<Option<String>, DomainError> {
        Ok(self.names.get(customer_id.as_str()).cloned())
    }
}

#[derive(Default)]
pub struct MockProposalRepository {
    proposals: Mutex<Vec<Proposal>>,
    pub fail_update: bool,
    updates: Mutex<usize>,
    conflicts_left: Mutex<usize>,
}

impl MockProposalRepository {
    pub fn with(proposal: Proposal) -> Self {
        Self {
            proposals: Mutex::new(vec![proposal]),
            ..Default::default()
        }
    }

    pub fn failing_updates(proposal: Proposal) -> Self {
        Self {
            proposals: Mutex::new(vec![proposal]),
            fail_update: true,
            ..Default::default()
        }
    }

    /// Rejects the next `n` updates as concurrent writes.
    pub fn conflicting(self, n: usize) -> Self {
        *self.conflicts_left.lock().unwrap() = n;
        self
    }

    pub fn get(&self, id: &ProposalId) -> Option<Proposal> {
        self.proposals
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id() == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<Proposal> {
        self.proposals.lock().unwrap().clone()
    }

    pub fn update_count(&self) -> usize {
        *self.updates.lock().unwrap()
    }
}

#[async_trait]
impl ProposalRepository for MockProposalRepository {
    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError> {
        Ok(self.get(id))
    }

    async fn create(&self, proposal: &Proposal) -> Result<(), DomainError> {
        self.proposals.lock().unwrap().push(proposal.clone());
        Ok(())
    }

    async fn update(&self, proposal: &Proposal) -> Result<(), DomainError> {
        if self.fail_update {
            return Err(db_failure());
        }
        {
            let mut conflicts_left = self.conflicts_left.lock().unwrap();
            if *conflicts_left > 0 {
                *conflicts_left -= 1;
                return Err(DomainError::new(ErrorCode::ConcurrencyConflict, "Simulated race"));
            }
        }
        let mut proposals = self.proposals.lock().unwrap();
        match proposals.iter_mut().find(|p| p.id() == proposal.id()) {
            Some(existing) if existing.revision() != proposal.revision() => Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!("revision {} is stale", proposal.revision()),
            )),
            Some(existing) => {
                let mut saved = proposal.clone();
                saved.mark_saved();
                *existing = saved;
                *self.updates.lock().unwrap() += 1;
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ProposalNotFound,
                proposal.id().to_string(),
            )),
        }
    }
}

#[derive(Default)]
pub struct MockSectionRepository {
    sections: Mutex<Vec<Section>>,
}

impl MockSectionRepository {
    pub fn with(sections: Vec<Section>) -> Self {
        Self {
            sections: Mutex::new(sections),
        }
    }

    pub fn all(&self) -> Vec<Section> {
        self.sections.lock().unwrap().clone()
    }
}

#[async_trait]
impl SectionRepository for MockSectionRepository {
    async fn list_by_proposal(&self, proposal_id: &ProposalId) -> Result<Vec<Section>, DomainError> {
        let mut sections: Vec<Section> = self
            .sections
            .lock()
            .unwrap()
            .iter()
            .filter(|s| &s.proposal_id == proposal_id)
            .cloned()
            .collect();
        crate::domain::proposal::sort_sections(&mut sections);
        Ok(sections)
    }

    async fn bulk_create(
        &self,
        proposal_id: &ProposalId,
        drafts: Vec<SectionDraft>,
    ) -> Result<Vec<Section>, DomainError> {
        let created: Vec<Section> = drafts
            .into_iter()
            .map(|d| Section::from_draft(*proposal_id, d))
            .collect();
        self.sections.lock().unwrap().extend(created.iter().cloned());
        Ok(created)
    }

    async fn update(&self, section: &Section) -> Result<(), DomainError> {
        let mut sections = self.sections.lock().unwrap();
        match sections.iter_mut().find(|s| s.id == section.id) {
            Some(existing) => {
                *existing = section.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SectionNotFound,
                section.id.to_string(),
            )),
        }
    }
}

#[derive(Default)]
pub struct MockVersionRepository {
    versions: Mutex<Vec<Version>>,
}

impl MockVersionRepository {
    pub fn with(versions: Vec<Version>) -> Self {
        Self {
            versions: Mutex::new(versions),
        }
    }

    pub fn all(&self) -> Vec<Version> {
        self.versions.lock().unwrap().clone()
    }
}

#[async_trait]
impl VersionRepository for MockVersionRepository {
    async fn insert(&self, version: &Version) -> Result<(), DomainError> {
        let mut versions = self.versions.lock().unwrap();
        if versions.iter().any(|v| {
            v.proposal_id() == version.proposal_id() && v.version_number() == version.version_number()
        }) {
            return Err(DomainError::new(
                ErrorCode::DuplicateVersion,
                format!("version {} already exists", version.version_number()),
            ));
        }
        versions.push(version.clone());
        Ok(())
    }

    async fn list_by_proposal(&self, proposal_id: &ProposalId) -> Result<Vec<Version>, DomainError> {
        let mut versions: Vec<Version> = self
            .versions
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.belongs_to(proposal_id))
            .cloned()
            .collect();
        versions.sort_by_key(|v| v.version_number());
        Ok(versions)
    }

    async fn find_by_id(&self, id: &VersionId) -> Result<Option<Version>, DomainError> {
        Ok(self
            .versions
            .lock()
            .unwrap()
            .iter()
            .find(|v| &v.id() == id)
            .cloned())
    }
}

// ─────────────────────────────────────────────────────────────────────
// External systems
// ─────────────────────────────────────────────────────────────────────

/// Records every created object as `"{kind}:{name}"` and can be told to
/// fail on the n-th call of a kind.
#[derive(Default)]
pub struct MockTaskTracker {
    calls: Mutex<Vec<String>>,
    fail_on: Option<(&'static str, usize)>,
}

impl MockTaskTracker {
    pub fn failing_on(kind: &'static str, nth: usize) -> Self {
        Self {
            fail_on: Some((kind, nth)),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(&format!("{}:", kind)))
            .count()
    }

    fn record(&self, kind: &'static str, name: &str) -> Result<ExternalRef, TaskTrackerError> {
        let mut calls = self.calls.lock().unwrap();
        let nth = calls
            .iter()
            .filter(|c| c.starts_with(&format!("{}:", kind)))
            .count()
            + 1;
        if self.fail_on == Some((kind, nth)) {
            return Err(TaskTrackerError::api(500, format!("{} failed", kind)));
        }
        calls.push(format!("{}:{}", kind, name));
        let id = format!("{}-{}", kind, nth);
        Ok(ExternalRef::new(id.clone(), format!("https://tracker.test/{}", id)))
    }
}

#[async_trait]
impl TaskTracker for MockTaskTracker {
    async fn create_project(&self, name: &str, _company: &str) -> Result<ExternalRef, TaskTrackerError> {
        self.record("project", name)
    }

    async fn create_milestone(
        &self,
        _project_id: &str,
        name: &str,
        _deadline: Option<NaiveDate>,
    ) -> Result<ExternalRef, TaskTrackerError> {
        self.record("milestone", name)
    }

    async fn create_task_list(
        &self,
        _project_id: &str,
        _milestone_id: &str,
        name: &str,
    ) -> Result<ExternalRef, TaskTrackerError> {
        self.record("task_list", name)
    }

    async fn create_task(
        &self,
        _task_list_id: &str,
        content: &str,
    ) -> Result<ExternalRef, TaskTrackerError> {
        self.record("task", content)
    }
}

#[derive(Default)]
pub struct MockEventPublisher {
    published: Mutex<Vec<EventEnvelope>>,
    fail: bool,
}

impl MockEventPublisher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn event_types(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(ErrorCode::InternalError, "Simulated broker outage"));
        }
        self.published.lock().unwrap().push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(ErrorCode::InternalError, "Simulated broker outage"));
        }
        self.published.lock().unwrap().extend(events);
        Ok(())
    }
}
