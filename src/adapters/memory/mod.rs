//! In-memory adapters.
//!
//! Process-local implementations of the store ports, used by the
//! integration tests and by the server when no database is configured.
//! Nothing here survives a restart.

mod assessment_store;
mod customer_directory;
mod proposal_repository;
mod section_repository;
mod version_repository;

pub use assessment_store::InMemoryAssessmentStore;
pub use customer_directory::InMemoryCustomerDirectory;
pub use proposal_repository::InMemoryProposalRepository;
pub use section_repository::InMemorySectionRepository;
pub use version_repository::InMemoryVersionRepository;
