//! PostgreSQL implementation of AssessmentStore.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::assessment::{Assessment, ProcessAssessment};
use crate::domain::foundation::{AssessmentId, AssessmentType, CustomerId, DomainError, ProcessStatus};
use crate::ports::AssessmentStore;

use super::invalid_column;

/// Reads the live assessment for a customer and type.
#[derive(Debug, Clone)]
pub struct PostgresAssessmentStore {
    pool: PgPool,
}

impl PostgresAssessmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProcessRow {
    name: String,
    function: String,
    status: String,
    outcome: Option<String>,
    add_to_engagement: bool,
}

impl ProcessRow {
    fn into_process(self) -> Result<ProcessAssessment, DomainError> {
        let status: ProcessStatus = self
            .status
            .parse()
            .map_err(|e| invalid_column("assessment_processes.status", e))?;
        Ok(ProcessAssessment {
            name: self.name,
            function: self.function,
            status,
            outcome: self.outcome,
            add_to_engagement: self.add_to_engagement,
        })
    }
}

#[async_trait]
impl AssessmentStore for PostgresAssessmentStore {
    async fn find_by_customer_and_type(
        &self,
        customer_id: &CustomerId,
        assessment_type: AssessmentType,
    ) -> Result<Option<Assessment>, DomainError> {
        let id: Option<uuid::Uuid> = sqlx::query_scalar(
            "SELECT id FROM assessments WHERE customer_id = $1 AND assessment_type = $2",
        )
        .bind(customer_id.as_str())
        .bind(assessment_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("find assessment", e))?;

        let Some(id) = id else {
            return Ok(None);
        };

        let rows: Vec<ProcessRow> = sqlx::query_as(
            r#"
            SELECT name, function, status, outcome, add_to_engagement
            FROM assessment_processes
            WHERE assessment_id = $1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("load assessment processes", e))?;

        let processes = rows
            .into_iter()
            .map(ProcessRow::into_process)
            .collect::<Result<Vec<_>, _>>()?;

        let assessment = Assessment::new(
            AssessmentId::from_uuid(id),
            customer_id.clone(),
            assessment_type,
            processes,
        )
        .map_err(|e| invalid_column("assessment_processes.name", e))?;

        Ok(Some(assessment))
    }
}
