//! Proposal handlers - creation from an assessment and content edits.

mod create_from_assessment;
mod update_content;

pub use create_from_assessment::{
    CreateProposalFromAssessmentCommand, CreateProposalFromAssessmentHandler, CreateProposalResult,
};
pub use update_content::{UpdateProposalContentCommand, UpdateProposalContentHandler};
