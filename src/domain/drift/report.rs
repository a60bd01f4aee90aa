//! Drift report types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProcessStatus, Timestamp};

/// A process whose status differs between snapshot and live data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub name: String,
    pub previous: ProcessStatus,
    pub current: ProcessStatus,
}

/// Difference between a snapshot and the live assessment. All lists are
/// sorted by process name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftReport {
    pub has_changes: bool,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub status_changed: Vec<StatusChange>,
    pub snapshot_at: Timestamp,
}

impl DriftReport {
    /// Total number of differences across all three lists.
    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.status_changed.len()
    }
}

/// Outcome of a drift check.
///
/// Only `Compared` carries a report. The other variants describe why no
/// comparison was possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftCheck {
    /// Snapshot and live assessment were compared.
    Compared(DriftReport),
    /// The proposal has never captured a snapshot.
    NoSnapshot,
    /// The proposal is not linked to any assessment.
    NoDiagnostic,
    /// The proposal is linked, but no live assessment matches the link.
    DiagnosticNotFound,
}

impl DriftCheck {
    /// Returns the report if a comparison happened.
    pub fn report(&self) -> Option<&DriftReport> {
        match self {
            DriftCheck::Compared(report) => Some(report),
            _ => None,
        }
    }

    /// Short machine name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftCheck::Compared(_) => "compared",
            DriftCheck::NoSnapshot => "no_snapshot",
            DriftCheck::NoDiagnostic => "no_diagnostic",
            DriftCheck::DiagnosticNotFound => "diagnostic_not_found",
        }
    }
}
