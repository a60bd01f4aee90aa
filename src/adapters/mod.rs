//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event publishers (in-memory bus, tracing log)
//! - `http` - Axum REST surface
//! - `memory` - In-memory stores for tests and database-less runs
//! - `postgres` - sqlx-backed stores
//! - `task_tracker` - reqwest client for the external task tracker

pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod task_tracker;

pub use events::{InMemoryEventBus, TracingEventPublisher};
pub use memory::{
    InMemoryAssessmentStore, InMemoryCustomerDirectory, InMemoryProposalRepository,
    InMemorySectionRepository, InMemoryVersionRepository,
};
pub use postgres::{
    PostgresAssessmentStore, PostgresCustomerDirectory, PostgresProposalRepository,
    PostgresSectionRepository, PostgresVersionRepository,
};
pub use task_tracker::{HttpTaskTracker, HttpTaskTrackerConfig};
