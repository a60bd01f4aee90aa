//! PostgreSQL adapters - Database implementations for the store ports.
//!
//! - `PostgresAssessmentStore` - Reads live assessments (never writes them)
//! - `PostgresCustomerDirectory` - Customer display names
//! - `PostgresProposalRepository` - Proposal aggregate with JSONB snapshot/content
//! - `PostgresSectionRepository` - Proposal sections
//! - `PostgresVersionRepository` - Append-only export versions
//!
//! Schema lives in `migrations/`.

mod assessment_store;
mod customer_directory;
mod proposal_repository;
mod section_repository;
mod version_repository;

pub use assessment_store::PostgresAssessmentStore;
pub use customer_directory::PostgresCustomerDirectory;
pub use proposal_repository::PostgresProposalRepository;
pub use section_repository::PostgresSectionRepository;
pub use version_repository::PostgresVersionRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Builds the error for a stored value that no longer parses.
fn invalid_column(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::InvalidFormat,
        format!("Invalid {} in database: {}", column, err),
    )
    .with_detail("field", column)
}
