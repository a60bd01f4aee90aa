//! Executive summary synthesis.

use std::collections::BTreeMap;

use crate::domain::assessment::{ProcessAssessment, StatusCounts};
use crate::domain::foundation::{AssessmentType, ProcessStatus};

/// Status distribution of one business function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionHealth {
    pub function: String,
    pub total: usize,
    pub critical: usize,
}

impl FunctionHealth {
    /// Share of the function's processes in the critical bucket.
    pub fn critical_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.critical as f64 / self.total as f64
        }
    }
}

/// Finds the function with the worst status distribution.
///
/// Worst means highest critical ratio. Ties go to the higher critical
/// count, then to the alphabetically first function name. Returns `None`
/// when no process is in the critical bucket.
pub fn worst_function(processes: &[ProcessAssessment]) -> Option<FunctionHealth> {
    let mut by_function: BTreeMap<&str, FunctionHealth> = BTreeMap::new();
    for process in processes {
        let entry = by_function
            .entry(process.function.as_str())
            .or_insert_with(|| FunctionHealth {
                function: process.function.clone(),
                total: 0,
                critical: 0,
            });
        entry.total += 1;
        if process.status.is_critical() {
            entry.critical += 1;
        }
    }

    // Alphabetically first name ranks highest on a full tie.
    by_function
        .into_values()
        .filter(|health| health.critical > 0)
        .max_by(|a, b| {
            a.critical_ratio()
                .total_cmp(&b.critical_ratio())
                .then(a.critical.cmp(&b.critical))
                .then(b.function.cmp(&a.function))
        })
}

pub(super) fn executive_summary(
    customer_name: &str,
    assessment_type: AssessmentType,
    processes: &[ProcessAssessment],
    counts: &StatusCounts,
    selected: usize,
    sections: usize,
) -> String {
    if processes.is_empty() {
        return format!(
            "{} has no assessed processes on record for the {} assessment. \
             Scope for this engagement will be defined with the customer.",
            customer_name,
            assessment_type.label()
        );
    }

    let mut summary = format!(
        "{}'s {} assessment reviewed {}: {}.",
        customer_name,
        assessment_type.label(),
        plural(processes.len(), "process", "processes"),
        describe_counts(counts)
    );

    match worst_function(processes) {
        Some(worst) => summary.push_str(&format!(
            " {} shows the weakest results, with {} of {} at warning or unable to assess.",
            worst.function,
            worst.critical,
            plural(worst.total, "process", "processes")
        )),
        None => summary.push_str(" No function shows critical findings."),
    }

    if selected == 0 {
        summary.push_str(" No processes were selected for this engagement.");
    } else {
        summary.push_str(&format!(
            " This proposal addresses {} across {}.",
            plural(selected, "process", "processes"),
            plural(sections, "section", "sections")
        ));
    }

    summary
}

fn describe_counts(counts: &StatusCounts) -> String {
    ProcessStatus::ALL
        .iter()
        .filter_map(|status| {
            counts
                .get(status)
                .map(|count| format!("{} {}", count, status.label()))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {}", one)
    } else {
        format!("{} {}", count, many)
    }
}
