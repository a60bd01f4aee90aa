//! PostgreSQL implementation of CustomerDirectory.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{CustomerId, DomainError};
use crate::ports::CustomerDirectory;

#[derive(Debug, Clone)]
pub struct PostgresCustomerDirectory {
    pool: PgPool,
}

impl PostgresCustomerDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerDirectory for PostgresCustomerDirectory {
    async fn display_name(&self, customer_id: &CustomerId) -> Result<Option<String>, DomainError> {
        sqlx::query_scalar("SELECT display_name FROM customers WHERE id = $1")
            .bind(customer_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("look up customer", e))
    }
}
