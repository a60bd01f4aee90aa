//! Version handlers - export snapshots and their retrieval.

mod create_version;
mod get_version;
mod list_versions;

pub use create_version::{CreateVersionCommand, CreateVersionHandler};
pub use get_version::{GetVersionHandler, GetVersionQuery};
pub use list_versions::{ListVersionsHandler, ListVersionsQuery};
