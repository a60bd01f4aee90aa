//! CustomerDirectory port - customer display names.

use async_trait::async_trait;

use crate::domain::foundation::{CustomerId, DomainError};

/// Looks up customer details owned by another system.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Returns the customer's display name, or `None` if unknown.
    async fn display_name(&self, customer_id: &CustomerId) -> Result<Option<String>, DomainError>;
}
