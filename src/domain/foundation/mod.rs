//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the SOW engine domain.

mod assessment_type;
mod errors;
mod events;
mod ids;
mod process_status;
mod timestamp;

pub use assessment_type::AssessmentType;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{AssessmentId, CustomerId, ProposalId, SectionId, UserId, VersionId};
pub use process_status::ProcessStatus;
pub use timestamp::Timestamp;
