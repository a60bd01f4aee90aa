//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `AssessmentStore` - Live assessment data (read-only)
//! - `CustomerDirectory` - Customer display names
//! - `ProposalRepository`, `SectionRepository`, `VersionRepository` - Proposal persistence
//!
//! ## External Ports
//!
//! - `TaskTracker` - External project/milestone/task hierarchy
//! - `EventPublisher` - Domain event publishing

mod assessment_store;
mod customer_directory;
mod event_publisher;
mod proposal_repository;
mod section_repository;
mod task_tracker;
mod version_repository;

pub use assessment_store::AssessmentStore;
pub use customer_directory::CustomerDirectory;
pub use event_publisher::EventPublisher;
pub use proposal_repository::ProposalRepository;
pub use section_repository::SectionRepository;
pub use task_tracker::{TaskTracker, TaskTrackerError};
pub use version_repository::VersionRepository;
