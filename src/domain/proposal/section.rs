//! Sections - scoped units of work within a proposal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProposalId, SectionId};

/// A section before it is attached to a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDraft {
    pub title: String,
    pub description: String,
    pub deliverables: Vec<String>,
    pub hours: f64,
    pub rate: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub addressed_process_names: Vec<String>,
    pub sort_order: u32,
}

/// A persisted section of a proposal.
///
/// `addressed_process_names` name processes from the snapshot current at
/// creation time. They are not repaired when a later resync drops a process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub proposal_id: ProposalId,
    pub title: String,
    pub description: String,
    pub deliverables: Vec<String>,
    pub hours: f64,
    pub rate: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub addressed_process_names: Vec<String>,
    /// Position within the proposal, unique per proposal.
    pub sort_order: u32,
    pub external_milestone_id: Option<String>,
}

impl Section {
    /// Materializes a draft under a proposal with a fresh id.
    pub fn from_draft(proposal_id: ProposalId, draft: SectionDraft) -> Self {
        Self {
            id: SectionId::new(),
            proposal_id,
            title: draft.title,
            description: draft.description,
            deliverables: draft.deliverables,
            hours: draft.hours,
            rate: draft.rate,
            start_date: draft.start_date,
            end_date: draft.end_date,
            addressed_process_names: draft.addressed_process_names,
            sort_order: draft.sort_order,
            external_milestone_id: None,
        }
    }

    /// Price of this section: hours times rate.
    pub fn investment(&self) -> f64 {
        self.hours * self.rate
    }

    /// Deliverables with blank lines removed.
    pub fn non_blank_deliverables(&self) -> impl Iterator<Item = &str> {
        self.deliverables
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
    }

    /// Returns true if the section lists at least one non-blank deliverable.
    pub fn has_deliverables(&self) -> bool {
        self.non_blank_deliverables().next().is_some()
    }
}

/// Sorts sections into presentation order.
pub fn sort_sections(sections: &mut [Section]) {
    sections.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.title.cmp(&b.title)));
}
