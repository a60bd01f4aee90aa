//! PostgreSQL implementation of VersionRepository.
//!
//! `proposal_versions` carries `UNIQUE (proposal_id, version_number)`; two
//! exports racing for the same number leave exactly one row, and the loser
//! gets `DuplicateVersion`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, ProposalId, Timestamp, UserId, VersionId,
};
use crate::domain::proposal::{ProposalContent, Section};
use crate::domain::version::{Version, VersionNumber};
use crate::ports::VersionRepository;

use super::invalid_column;

#[derive(Debug, Clone)]
pub struct PostgresVersionRepository {
    pool: PgPool,
}

impl PostgresVersionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VersionRow {
    id: Uuid,
    proposal_id: Uuid,
    version_number: i32,
    content_snapshot: Json<ProposalContent>,
    sections_snapshot: Json<Vec<Section>>,
    content_checksum: String,
    exported_by: String,
    exported_at: DateTime<Utc>,
    artifact_url: Option<String>,
}

impl VersionRow {
    fn into_version(self) -> Result<Version, DomainError> {
        let number = u32::try_from(self.version_number)
            .map_err(|e| invalid_column("version_number", e))
            .and_then(|n| VersionNumber::new(n).map_err(|e| invalid_column("version_number", e)))?;
        let exported_by =
            UserId::new(self.exported_by).map_err(|e| invalid_column("exported_by", e))?;

        Ok(Version::reconstitute(
            VersionId::from_uuid(self.id),
            ProposalId::from_uuid(self.proposal_id),
            number,
            self.content_snapshot.0,
            self.sections_snapshot.0,
            self.content_checksum,
            exported_by,
            Timestamp::from_datetime(self.exported_at),
            self.artifact_url,
        ))
    }
}

const SELECT_VERSION: &str = r#"
    SELECT id, proposal_id, version_number, content_snapshot, sections_snapshot,
           content_checksum, exported_by, exported_at, artifact_url
    FROM proposal_versions
"#;

#[async_trait]
impl VersionRepository for PostgresVersionRepository {
    async fn insert(&self, version: &Version) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO proposal_versions (
                id, proposal_id, version_number, content_snapshot, sections_snapshot,
                content_checksum, exported_by, exported_at, artifact_url
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(version.id().as_uuid())
        .bind(version.proposal_id().as_uuid())
        .bind(version.version_number().as_u32() as i32)
        .bind(Json(version.content_snapshot()))
        .bind(Json(version.sections_snapshot()))
        .bind(version.content_checksum())
        .bind(version.exported_by().as_str())
        .bind(version.exported_at().as_datetime())
        .bind(version.artifact_url())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::new(
                    ErrorCode::DuplicateVersion,
                    format!(
                        "{} already exists for proposal {}",
                        version.version_number(),
                        version.proposal_id()
                    ),
                ))
            }
            Err(e) => Err(DomainError::database("insert version", e)),
        }
    }

    async fn list_by_proposal(&self, proposal_id: &ProposalId) -> Result<Vec<Version>, DomainError> {
        let rows: Vec<VersionRow> =
            sqlx::query_as(&format!("{} WHERE proposal_id = $1 ORDER BY version_number", SELECT_VERSION))
                .bind(proposal_id.as_uuid())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::database("list versions", e))?;

        rows.into_iter().map(VersionRow::into_version).collect()
    }

    async fn find_by_id(&self, id: &VersionId) -> Result<Option<Version>, DomainError> {
        let row: Option<VersionRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_VERSION))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("load version", e))?;

        row.map(VersionRow::into_version).transpose()
    }

    async fn latest_number(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<VersionNumber>, DomainError> {
        let max: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(version_number) FROM proposal_versions WHERE proposal_id = $1",
        )
        .bind(proposal_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("read latest version", e))?;

        max.map(|n| {
            u32::try_from(n)
                .map_err(|e| invalid_column("version_number", e))
                .and_then(|n| VersionNumber::new(n).map_err(|e| invalid_column("version_number", e)))
        })
        .transpose()
    }
}
