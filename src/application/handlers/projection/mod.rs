//! Projection handlers - previewing and pushing the task hierarchy.

mod preview_projection;
mod push_projection;

pub use preview_projection::{PreviewProjectionHandler, PreviewProjectionQuery};
pub use push_projection::{PushProjectionCommand, PushProjectionHandler, PushResult};

use crate::domain::foundation::CustomerId;
use crate::domain::proposal::ProposalError;
use crate::ports::CustomerDirectory;

/// Customer display name, falling back to the raw customer id.
async fn company_name(
    directory: &dyn CustomerDirectory,
    customer_id: &CustomerId,
) -> Result<String, ProposalError> {
    Ok(directory
        .display_name(customer_id)
        .await
        .map_err(|e| ProposalError::from_port("customer_directory", e))?
        .unwrap_or_else(|| customer_id.to_string()))
}
