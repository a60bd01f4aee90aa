//! Snapshot handlers - drift checks and resync against live assessments.

mod check_drift;
mod resolver;
mod resync_snapshot;

pub use check_drift::{CheckDriftCommand, CheckDriftHandler};
pub use resolver::{LinkedAssessmentResolver, Resolution};
pub use resync_snapshot::{ResyncSnapshotCommand, ResyncSnapshotHandler, ResyncSnapshotResult};
