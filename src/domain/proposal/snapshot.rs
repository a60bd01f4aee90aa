//! Snapshot - the proposal's frozen copy of its linked assessment.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::ProcessAssessment;
use crate::domain::foundation::{ProcessStatus, Timestamp};

/// A process as it looked when the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SnapshotProcess {
    pub name: String,
    pub status: ProcessStatus,
    pub add_to_engagement: bool,
}

impl From<&ProcessAssessment> for SnapshotProcess {
    fn from(process: &ProcessAssessment) -> Self {
        Self {
            name: process.name.clone(),
            status: process.status,
            add_to_engagement: process.add_to_engagement,
        }
    }
}

/// Immutable copy of assessment state embedded in a proposal.
///
/// Snapshots are never merged or patched: a resync replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Snapshot {
    processes: Vec<SnapshotProcess>,
    snapshot_at: Timestamp,
}

impl Snapshot {
    /// Captures the given live processes at `snapshot_at`.
    pub fn capture(processes: &[ProcessAssessment], snapshot_at: Timestamp) -> Self {
        Self {
            processes: processes.iter().map(SnapshotProcess::from).collect(),
            snapshot_at,
        }
    }

    /// Reconstitutes a snapshot from persistence.
    pub fn reconstitute(processes: Vec<SnapshotProcess>, snapshot_at: Timestamp) -> Self {
        Self {
            processes,
            snapshot_at,
        }
    }

    pub fn processes(&self) -> &[SnapshotProcess] {
        &self.processes
    }

    pub fn snapshot_at(&self) -> Timestamp {
        self.snapshot_at
    }

    /// Returns true if a process with this name was captured.
    pub fn contains(&self, name: &str) -> bool {
        self.processes.iter().any(|p| p.name == name)
    }
}
