//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! handler receives its ports as `Arc<dyn Port>` and returns `ProposalError`.

mod persistence;
pub mod projection;
pub mod proposal;
pub mod snapshot;
pub mod version;

#[cfg(test)]
pub(crate) mod testing;

pub(crate) use persistence::{publish_or_log, save_proposal};

pub use projection::{
    PreviewProjectionHandler, PreviewProjectionQuery, PushProjectionCommand,
    PushProjectionHandler, PushResult,
};
pub use proposal::{
    CreateProposalFromAssessmentCommand, CreateProposalFromAssessmentHandler,
    CreateProposalResult, UpdateProposalContentCommand, UpdateProposalContentHandler,
};
pub use snapshot::{
    CheckDriftCommand, CheckDriftHandler, LinkedAssessmentResolver, Resolution,
    ResyncSnapshotCommand, ResyncSnapshotHandler, ResyncSnapshotResult,
};
pub use version::{
    CreateVersionCommand, CreateVersionHandler, GetVersionHandler, GetVersionQuery,
    ListVersionsHandler, ListVersionsQuery,
};
