//! In-memory customer directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{CustomerId, DomainError};
use crate::ports::CustomerDirectory;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerDirectory {
    names: Arc<RwLock<HashMap<CustomerId, String>>>,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, customer_id: CustomerId, display_name: impl Into<String>) {
        self.names
            .write()
            .await
            .insert(customer_id, display_name.into());
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn display_name(&self, customer_id: &CustomerId) -> Result<Option<String>, DomainError> {
        Ok(self.names.read().await.get(customer_id).cloned())
    }
}
