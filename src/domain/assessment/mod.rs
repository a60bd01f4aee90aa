//! Assessment domain module.
//!
//! Assessments are authored and mutated outside this engine. The types here
//! are read-only inputs: the engine snapshots them, compares against them, and
//! synthesizes proposal sections from them, but never writes them back.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::domain::foundation::{
    AssessmentId, AssessmentType, CustomerId, ProcessStatus, ValidationError,
};

/// One graded business process inside an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProcessAssessment {
    /// Process name, unique within its assessment.
    pub name: String,
    /// Business function the process belongs to (e.g. "Sales").
    pub function: String,
    pub status: ProcessStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    /// Whether the assessor flagged this process for the engagement.
    #[serde(default)]
    pub add_to_engagement: bool,
}

impl ProcessAssessment {
    /// Convenience constructor used by adapters and tests.
    pub fn new(
        name: impl Into<String>,
        function: impl Into<String>,
        status: ProcessStatus,
        add_to_engagement: bool,
    ) -> Self {
        Self {
            name: name.into(),
            function: function.into(),
            status,
            outcome: None,
            add_to_engagement,
        }
    }

    /// Attaches a desired outcome description.
    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    /// Outcome text if present and non-blank.
    pub fn outcome_text(&self) -> Option<&str> {
        self.outcome.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// A graded survey of a customer's business processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: AssessmentId,
    pub customer_id: CustomerId,
    pub assessment_type: AssessmentType,
    pub processes: Vec<ProcessAssessment>,
}

impl Assessment {
    /// Builds an assessment, checking the boundary invariants: process
    /// names are non-blank and unique.
    pub fn new(
        id: AssessmentId,
        customer_id: CustomerId,
        assessment_type: AssessmentType,
        processes: Vec<ProcessAssessment>,
    ) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for process in &processes {
            if process.name.trim().is_empty() {
                return Err(ValidationError::empty_field("processes.name"));
            }
            if !seen.insert(process.name.as_str()) {
                return Err(ValidationError::invalid_format(
                    "processes.name",
                    format!("duplicate process name '{}'", process.name),
                ));
            }
        }

        Ok(Self {
            id,
            customer_id,
            assessment_type,
            processes,
        })
    }
}

/// Number of processes per status. Only statuses that occur are present.
pub type StatusCounts = BTreeMap<ProcessStatus, usize>;

/// Counts processes per status over the whole slice.
pub fn count_statuses(processes: &[ProcessAssessment]) -> StatusCounts {
    let mut counts = StatusCounts::new();
    for process in processes {
        *counts.entry(process.status).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> CustomerId {
        CustomerId::new("acme").unwrap()
    }

    #[test]
    fn rejects_duplicate_process_names() {
        let result = Assessment::new(
            AssessmentId::new(),
            customer(),
            AssessmentType::TypeA,
            vec![
                ProcessAssessment::new("Invoicing", "Finance", ProcessStatus::Healthy, false),
                ProcessAssessment::new("Invoicing", "Sales", ProcessStatus::Warning, true),
            ],
        );
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn rejects_blank_process_names() {
        let result = Assessment::new(
            AssessmentId::new(),
            customer(),
            AssessmentType::TypeA,
            vec![ProcessAssessment::new(" ", "Finance", ProcessStatus::Healthy, false)],
        );
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn accepts_empty_process_list() {
        let assessment =
            Assessment::new(AssessmentId::new(), customer(), AssessmentType::TypeC, vec![]).unwrap();
        assert!(assessment.processes.is_empty());
    }

    #[test]
    fn process_deserializes_from_camel_case() {
        let json = r#"{"name":"Lead Routing","function":"Sales","status":"warning","addToEngagement":true}"#;
        let process: ProcessAssessment = serde_json::from_str(json).unwrap();
        assert!(process.add_to_engagement);
        assert_eq!(process.status, ProcessStatus::Warning);
        assert_eq!(process.outcome, None);
    }

    #[test]
    fn process_rejects_unknown_fields() {
        let json = r#"{"name":"X","function":"Y","status":"healthy","colour":"red"}"#;
        assert!(serde_json::from_str::<ProcessAssessment>(json).is_err());
    }

    #[test]
    fn count_statuses_only_lists_present_statuses() {
        let processes = vec![
            ProcessAssessment::new("A", "Sales", ProcessStatus::Warning, true),
            ProcessAssessment::new("B", "Sales", ProcessStatus::Warning, false),
            ProcessAssessment::new("C", "Finance", ProcessStatus::Healthy, false),
        ];
        let counts = count_statuses(&processes);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&ProcessStatus::Warning], 2);
        assert_eq!(counts[&ProcessStatus::Healthy], 1);
        assert!(!counts.contains_key(&ProcessStatus::Na));
    }

    #[test]
    fn blank_outcome_is_treated_as_absent() {
        let process = ProcessAssessment::new("X", "Y", ProcessStatus::Healthy, false).with_outcome("  ");
        assert_eq!(process.outcome_text(), None);
    }
}
