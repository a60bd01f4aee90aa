//! Auto-Builder - drafts proposal sections from assessment processes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{count_statuses, ProcessAssessment, StatusCounts};
use crate::domain::foundation::AssessmentType;
use crate::domain::proposal::{OverallRating, SectionDraft};

use super::summary::executive_summary;

/// Up to this many selected processes, each gets its own section.
pub const PER_PROCESS_THRESHOLD: usize = 5;

/// How selected processes are turned into sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    /// One section per process for small selections, otherwise one per function.
    #[default]
    ByFunction,
    /// Always one section per process.
    PerProcess,
}

/// Input to the Auto-Builder.
#[derive(Debug, Clone)]
pub struct AutoBuildInput {
    pub processes: Vec<ProcessAssessment>,
    pub grouping: GroupingMode,
    pub customer_name: String,
    pub assessment_type: AssessmentType,
}

/// Drafted sections and summary.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoBuildOutput {
    pub sections: Vec<SectionDraft>,
    pub executive_summary: String,
    /// Counts over the full input, not just the selection.
    pub status_counts: StatusCounts,
}

impl AutoBuildOutput {
    /// Overall rating derived from the status counts.
    pub fn overall_rating(&self) -> OverallRating {
        OverallRating::classify(&self.status_counts)
    }
}

/// Stateless section and summary synthesis.
pub struct AutoBuilder;

impl AutoBuilder {
    /// Drafts sections and an executive summary.
    ///
    /// # Algorithm
    /// 1. Sort processes by `(function, name)`
    /// 2. Select processes flagged for the engagement, falling back to
    ///    processes at warning or unable when none are flagged
    /// 3. Emit one section per process, or one per function group when the
    ///    selection exceeds `PER_PROCESS_THRESHOLD` under `ByFunction`
    /// 4. Summarize the full input
    ///
    /// # Edge Cases
    /// - Empty input: no sections and a neutral summary
    /// - Nothing flagged and nothing critical: no sections
    pub fn build(input: &AutoBuildInput) -> AutoBuildOutput {
        let mut processes: Vec<&ProcessAssessment> = input.processes.iter().collect();
        processes.sort_by(|a, b| (&a.function, &a.name).cmp(&(&b.function, &b.name)));

        let selected = Self::select(&processes);

        let sections = if input.grouping == GroupingMode::PerProcess
            || selected.len() <= PER_PROCESS_THRESHOLD
        {
            Self::per_process_sections(&selected)
        } else {
            Self::per_function_sections(&selected)
        };

        let status_counts = count_statuses(&input.processes);
        let executive_summary = executive_summary(
            &input.customer_name,
            input.assessment_type,
            &input.processes,
            &status_counts,
            selected.len(),
            sections.len(),
        );

        AutoBuildOutput {
            sections,
            executive_summary,
            status_counts,
        }
    }

    fn select<'a>(sorted: &[&'a ProcessAssessment]) -> Vec<&'a ProcessAssessment> {
        let flagged: Vec<&ProcessAssessment> = sorted
            .iter()
            .copied()
            .filter(|p| p.add_to_engagement)
            .collect();
        if !flagged.is_empty() {
            return flagged;
        }
        sorted
            .iter()
            .copied()
            .filter(|p| p.status.is_critical())
            .collect()
    }

    fn per_process_sections(selected: &[&ProcessAssessment]) -> Vec<SectionDraft> {
        selected
            .iter()
            .enumerate()
            .map(|(index, process)| {
                section(
                    process.name.clone(),
                    format!(
                        "Remediate the {} process in {}, currently assessed as {}.",
                        process.name,
                        process.function,
                        process.status.label()
                    ),
                    &[*process],
                    index,
                )
            })
            .collect()
    }

    fn per_function_sections(selected: &[&ProcessAssessment]) -> Vec<SectionDraft> {
        let mut groups: BTreeMap<&str, Vec<&ProcessAssessment>> = BTreeMap::new();
        for process in selected {
            groups.entry(process.function.as_str()).or_default().push(*process);
        }

        groups
            .into_iter()
            .enumerate()
            .map(|(index, (function, members))| {
                let names: Vec<&str> = members.iter().map(|p| p.name.as_str()).collect();
                section(
                    function.to_string(),
                    format!(
                        "Improve {} {} processes: {}.",
                        members.len(),
                        function,
                        names.join(", ")
                    ),
                    &members,
                    index,
                )
            })
            .collect()
    }
}

fn section(
    title: String,
    description: String,
    members: &[&ProcessAssessment],
    index: usize,
) -> SectionDraft {
    SectionDraft {
        title,
        description,
        deliverables: members.iter().map(|p| deliverable_line(p)).collect(),
        hours: 0.0,
        rate: 0.0,
        start_date: None,
        end_date: None,
        addressed_process_names: members.iter().map(|p| p.name.clone()).collect(),
        sort_order: index as u32,
    }
}

fn deliverable_line(process: &ProcessAssessment) -> String {
    match process.outcome_text() {
        Some(outcome) => format!("{} ({}): {}", process.name, process.status.label(), outcome),
        None => format!("{} ({})", process.name, process.status.label()),
    }
}
