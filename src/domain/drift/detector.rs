//! Drift Detector - set difference and status comparison by process name.

use std::collections::BTreeMap;

use crate::domain::assessment::ProcessAssessment;
use crate::domain::foundation::ProcessStatus;
use crate::domain::proposal::Snapshot;

use super::{DriftReport, StatusChange};

/// Stateless drift computation.
pub struct DriftDetector;

impl DriftDetector {
    /// Compares a snapshot against live processes.
    ///
    /// # Algorithm
    /// Both sides are reduced to `name -> status` maps.
    /// - `added`: live names absent from the snapshot
    /// - `removed`: snapshot names absent from live data
    /// - `status_changed`: names on both sides whose status differs
    ///
    /// # Edge Cases
    /// - Duplicate names: the last occurrence wins on either side
    /// - Both sides empty: no changes
    pub fn compare(snapshot: &Snapshot, live: &[ProcessAssessment]) -> DriftReport {
        let before: BTreeMap<&str, ProcessStatus> = snapshot
            .processes()
            .iter()
            .map(|p| (p.name.as_str(), p.status))
            .collect();
        let after: BTreeMap<&str, ProcessStatus> =
            live.iter().map(|p| (p.name.as_str(), p.status)).collect();

        let added: Vec<String> = after
            .keys()
            .filter(|name| !before.contains_key(*name))
            .map(|name| name.to_string())
            .collect();

        let removed: Vec<String> = before
            .keys()
            .filter(|name| !after.contains_key(*name))
            .map(|name| name.to_string())
            .collect();

        let status_changed: Vec<StatusChange> = before
            .iter()
            .filter_map(|(name, previous)| {
                after
                    .get(name)
                    .filter(|current| *current != previous)
                    .map(|current| StatusChange {
                        name: name.to_string(),
                        previous: *previous,
                        current: *current,
                    })
            })
            .collect();

        let has_changes = !added.is_empty() || !removed.is_empty() || !status_changed.is_empty();

        DriftReport {
            has_changes,
            added,
            removed,
            status_changed,
            snapshot_at: snapshot.snapshot_at(),
        }
    }
}
