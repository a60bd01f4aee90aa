//! PostgreSQL implementation of ProposalRepository.
//!
//! The snapshot and the editable content are stored as JSONB; everything
//! else is a plain column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    AssessmentId, CustomerId, DomainError, ErrorCode, ProposalId, Timestamp,
};
use crate::domain::proposal::{ExternalRef, Proposal, ProposalContent, Snapshot};
use crate::ports::ProposalRepository;

use super::invalid_column;

#[derive(Debug, Clone)]
pub struct PostgresProposalRepository {
    pool: PgPool,
}

impl PostgresProposalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx query mapping.
#[derive(Debug, sqlx::FromRow)]
struct ProposalRow {
    id: Uuid,
    customer_id: String,
    title: String,
    proposal_type: String,
    status: String,
    linked_assessment_ids: Vec<Uuid>,
    snapshot: Option<Json<Snapshot>>,
    overall_rating: String,
    total_hours: f64,
    total_investment: f64,
    current_version: i32,
    external_project_id: Option<String>,
    external_project_url: Option<String>,
    content: Json<ProposalContent>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    revision: i32,
}

impl ProposalRow {
    fn into_proposal(self) -> Result<Proposal, DomainError> {
        let customer_id =
            CustomerId::new(self.customer_id).map_err(|e| invalid_column("customer_id", e))?;
        let proposal_type = self
            .proposal_type
            .parse()
            .map_err(|e| invalid_column("proposal_type", e))?;
        let status = self.status.parse().map_err(|e| invalid_column("status", e))?;
        let overall_rating = self
            .overall_rating
            .parse()
            .map_err(|e| invalid_column("overall_rating", e))?;
        let current_version = u32::try_from(self.current_version)
            .map_err(|e| invalid_column("current_version", e))?;
        let revision =
            u32::try_from(self.revision).map_err(|e| invalid_column("revision", e))?;
        let external_project = match (self.external_project_id, self.external_project_url) {
            (Some(id), Some(url)) => Some(ExternalRef::new(id, url)),
            (None, None) => None,
            _ => {
                return Err(invalid_column(
                    "external_project",
                    "id and url must be set together",
                ))
            }
        };

        Ok(Proposal::reconstitute(
            ProposalId::from_uuid(self.id),
            customer_id,
            self.title,
            proposal_type,
            status,
            self.linked_assessment_ids
                .into_iter()
                .map(AssessmentId::from_uuid)
                .collect(),
            self.snapshot.map(|s| s.0),
            overall_rating,
            self.total_hours,
            self.total_investment,
            current_version,
            external_project,
            self.content.0,
            Timestamp::from_datetime(self.created_at),
            Timestamp::from_datetime(self.updated_at),
            revision,
        ))
    }
}

fn linked_uuids(proposal: &Proposal) -> Vec<Uuid> {
    proposal
        .linked_assessment_ids()
        .iter()
        .map(|id| *id.as_uuid())
        .collect()
}

#[async_trait]
impl ProposalRepository for PostgresProposalRepository {
    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, DomainError> {
        let row: Option<ProposalRow> = sqlx::query_as(
            r#"
            SELECT id, customer_id, title, proposal_type, status, linked_assessment_ids,
                   snapshot, overall_rating, total_hours, total_investment, current_version,
                   external_project_id, external_project_url, content, created_at, updated_at,
                   revision
            FROM proposals
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("load proposal", e))?;

        row.map(ProposalRow::into_proposal).transpose()
    }

    async fn create(&self, proposal: &Proposal) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO proposals (
                id, customer_id, title, proposal_type, status, linked_assessment_ids,
                snapshot, overall_rating, total_hours, total_investment, current_version,
                external_project_id, external_project_url, content, created_at, updated_at,
                revision
            ) VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16,
                $17
            )
            "#,
        )
        .bind(proposal.id().as_uuid())
        .bind(proposal.customer_id().as_str())
        .bind(proposal.title())
        .bind(proposal.proposal_type().as_str())
        .bind(proposal.status().as_str())
        .bind(linked_uuids(proposal))
        .bind(proposal.snapshot().map(Json))
        .bind(proposal.overall_rating().as_str())
        .bind(proposal.total_hours())
        .bind(proposal.total_investment())
        .bind(proposal.current_version() as i32)
        .bind(proposal.external_project().map(|p| p.id.as_str()))
        .bind(proposal.external_project().map(|p| p.url.as_str()))
        .bind(Json(proposal.content()))
        .bind(proposal.created_at().as_datetime())
        .bind(proposal.updated_at().as_datetime())
        .bind(proposal.revision() as i32)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::new(
                    ErrorCode::Conflict,
                    format!("Proposal {} already exists", proposal.id()),
                ))
            }
            Err(e) => Err(DomainError::database("insert proposal", e)),
        }
    }

    async fn update(&self, proposal: &Proposal) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE proposals
            SET
                title = $2,
                status = $3,
                linked_assessment_ids = $4,
                snapshot = $5,
                overall_rating = $6,
                total_hours = $7,
                total_investment = $8,
                current_version = $9,
                external_project_id = $10,
                external_project_url = $11,
                content = $12,
                updated_at = $13,
                revision = revision + 1
            WHERE id = $1 AND revision = $14
            "#,
        )
        .bind(proposal.id().as_uuid())
        .bind(proposal.title())
        .bind(proposal.status().as_str())
        .bind(linked_uuids(proposal))
        .bind(proposal.snapshot().map(Json))
        .bind(proposal.overall_rating().as_str())
        .bind(proposal.total_hours())
        .bind(proposal.total_investment())
        .bind(proposal.current_version() as i32)
        .bind(proposal.external_project().map(|p| p.id.as_str()))
        .bind(proposal.external_project().map(|p| p.url.as_str()))
        .bind(Json(proposal.content()))
        .bind(proposal.updated_at().as_datetime())
        .bind(proposal.revision() as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update proposal", e))?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM proposals WHERE id = $1)",
            )
            .bind(proposal.id().as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("check proposal", e))?;

            if exists {
                return Err(DomainError::new(
                    ErrorCode::ConcurrencyConflict,
                    format!(
                        "Proposal {} changed since revision {}",
                        proposal.id(),
                        proposal.revision()
                    ),
                ));
            }
            return Err(DomainError::new(
                ErrorCode::ProposalNotFound,
                proposal.id().to_string(),
            ));
        }
        Ok(())
    }
}
