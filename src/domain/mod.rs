//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `assessment` - Read-only assessment input
//! - `proposal` - Proposal aggregate, snapshot, sections, content
//! - `drift` - Snapshot vs live comparison
//! - `builder` - Section and executive summary synthesis
//! - `version` - Immutable export history
//! - `projection` - Template expansion into a task hierarchy

pub mod assessment;
pub mod builder;
pub mod drift;
pub mod foundation;
pub mod projection;
pub mod proposal;
pub mod version;
