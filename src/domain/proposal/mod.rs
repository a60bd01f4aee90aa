//! Proposal module - the Statement of Work aggregate and its parts.

mod aggregate;
mod content;
mod errors;
mod events;
mod section;
mod snapshot;
mod values;

pub use aggregate::{NewProposal, Proposal};
pub use content::ProposalContent;
pub use errors::ProposalError;
pub use events::{ProjectPushed, ProposalCreated, SnapshotResynced, VersionExported};
pub use section::{sort_sections, Section, SectionDraft};
pub use snapshot::{Snapshot, SnapshotProcess};
pub use values::{
    round_cents, ExternalRef, OverallRating, ProposalStatus, ProposalType, CRITICAL_THRESHOLD,
    MODERATE_THRESHOLD, WARNING_THRESHOLD,
};
