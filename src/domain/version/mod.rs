//! Version module - immutable export history of a proposal.

mod number;
mod record;

pub use number::VersionNumber;
pub use record::{ExportSource, Version};
