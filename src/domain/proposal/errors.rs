//! Proposal-specific error types.

use thiserror::Error;

use super::ExternalRef;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors surfaced by proposal operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProposalError {
    /// A required field is missing or malformed.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// The requested resource does not exist (or is not visible under the
    /// given parent).
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// The operation collides with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The proposal was already projected into the task tracker.
    #[error("Proposal already pushed to external project {existing}")]
    AlreadyPushed { existing: ExternalRef },

    /// A collaborator (store, external API) failed. `step` names the call.
    #[error("External service failed during {step}: {message}")]
    ExternalService { step: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProposalError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProposalError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        ProposalError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn external(step: impl Into<String>, message: impl Into<String>) -> Self {
        ProposalError::ExternalService {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Wraps a port failure, recording which step was running.
    pub fn from_port(step: &str, err: DomainError) -> Self {
        match ProposalError::from(err) {
            ProposalError::ExternalService { message, .. } => ProposalError::ExternalService {
                step: step.to_string(),
                message,
            },
            other => other,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProposalError::Validation { .. } => ErrorCode::ValidationFailed,
            ProposalError::NotFound { resource, .. } => match *resource {
                "Section" => ErrorCode::SectionNotFound,
                "Version" => ErrorCode::VersionNotFound,
                "Assessment" => ErrorCode::AssessmentNotFound,
                _ => ErrorCode::ProposalNotFound,
            },
            ProposalError::Conflict(_) => ErrorCode::Conflict,
            ProposalError::AlreadyPushed { .. } => ErrorCode::AlreadyPushed,
            ProposalError::ExternalService { .. } => ErrorCode::ExternalServiceError,
            ProposalError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationError> for ProposalError {
    fn from(err: ValidationError) -> Self {
        ProposalError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ProposalError {
    fn from(err: DomainError) -> Self {
        let code = err.code;
        if code.is_validation() {
            let field = err
                .details
                .get("field")
                .cloned()
                .unwrap_or_else(|| "unknown".to_string());
            return ProposalError::Validation {
                field,
                message: err.message,
            };
        }

        match code {
            ErrorCode::ProposalNotFound => ProposalError::NotFound {
                resource: "Proposal",
                id: err.message,
            },
            ErrorCode::SectionNotFound => ProposalError::NotFound {
                resource: "Section",
                id: err.message,
            },
            ErrorCode::VersionNotFound => ProposalError::NotFound {
                resource: "Version",
                id: err.message,
            },
            ErrorCode::AssessmentNotFound => ProposalError::NotFound {
                resource: "Assessment",
                id: err.message,
            },
            ErrorCode::Conflict
            | ErrorCode::ConcurrencyConflict
            | ErrorCode::DuplicateVersion
            | ErrorCode::AlreadyPushed => {
                ProposalError::Conflict(err.message)
            }
            ErrorCode::DatabaseError | ErrorCode::ExternalServiceError => {
                let step = err
                    .details
                    .get("operation")
                    .cloned()
                    .unwrap_or_else(|| "persistence".to_string());
                ProposalError::ExternalService {
                    step,
                    message: err.message,
                }
            }
            _ => ProposalError::Internal(err.to_string()),
        }
    }
}
