//! Preview - the task hierarchy a push would create.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SectionId;
use crate::domain::proposal::{sort_sections, Proposal, Section};

use super::{ProjectTemplate, TemplateCatalog, TemplateKey};

/// Where a task list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskListSource {
    /// The section's own deliverables.
    Deliverables,
    /// A phase of the project template.
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewTask {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewTaskList {
    pub name: String,
    pub source: TaskListSource,
    pub tasks: Vec<PreviewTask>,
}

/// One milestone per section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMilestone {
    pub section_id: SectionId,
    pub name: String,
    pub deadline: Option<NaiveDate>,
    pub task_lists: Vec<PreviewTaskList>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewProject {
    pub name: String,
    pub template: TemplateKey,
}

/// The full hierarchy for one proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub company: String,
    pub project: PreviewProject,
    pub milestones: Vec<PreviewMilestone>,
}

impl Preview {
    pub fn task_list_count(&self) -> usize {
        self.milestones.iter().map(|m| m.task_lists.len()).sum()
    }

    pub fn task_count(&self) -> usize {
        self.milestones
            .iter()
            .flat_map(|m| &m.task_lists)
            .map(|l| l.tasks.len())
            .sum()
    }
}

/// Expands a proposal's sections against its template.
///
/// # Algorithm
/// Sections are taken in `sort_order`. Each becomes a milestone holding:
/// 1. a `"{title} — Deliverables"` list with one task per non-blank
///    deliverable, only if there is at least one
/// 2. one `"{title} — {phase}"` list per template phase with the phase's tasks
///
/// Task list total is Σ(phase count + 1 if the section has deliverables).
pub fn build_preview(company: &str, proposal: &Proposal, sections: &[Section]) -> Preview {
    let template = TemplateCatalog::for_proposal_type(proposal.proposal_type());

    let mut ordered = sections.to_vec();
    sort_sections(&mut ordered);

    Preview {
        company: company.to_string(),
        project: PreviewProject {
            name: proposal.title().to_string(),
            template: template.key,
        },
        milestones: ordered
            .iter()
            .map(|section| milestone(section, template))
            .collect(),
    }
}

fn milestone(section: &Section, template: &ProjectTemplate) -> PreviewMilestone {
    let mut task_lists = Vec::with_capacity(template.phase_count() + 1);

    if section.has_deliverables() {
        task_lists.push(PreviewTaskList {
            name: format!("{} — Deliverables", section.title),
            source: TaskListSource::Deliverables,
            tasks: section
                .non_blank_deliverables()
                .map(|d| PreviewTask {
                    content: d.to_string(),
                })
                .collect(),
        });
    }

    for phase in template.phases {
        task_lists.push(PreviewTaskList {
            name: format!("{} — {}", section.title, phase.name),
            source: TaskListSource::Template,
            tasks: phase
                .tasks
                .iter()
                .map(|t| PreviewTask {
                    content: t.to_string(),
                })
                .collect(),
        });
    }

    PreviewMilestone {
        section_id: section.id,
        name: section.title.clone(),
        deadline: section.end_date,
        task_lists,
    }
}
