//! PostgreSQL implementation of SectionRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId, SectionId};
use crate::domain::proposal::{Section, SectionDraft};
use crate::ports::SectionRepository;

use super::invalid_column;

#[derive(Debug, Clone)]
pub struct PostgresSectionRepository {
    pool: PgPool,
}

impl PostgresSectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SectionRow {
    id: Uuid,
    proposal_id: Uuid,
    title: String,
    description: String,
    deliverables: Vec<String>,
    hours: f64,
    rate: f64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    addressed_process_names: Vec<String>,
    sort_order: i32,
    external_milestone_id: Option<String>,
}

impl SectionRow {
    fn into_section(self) -> Result<Section, DomainError> {
        let sort_order =
            u32::try_from(self.sort_order).map_err(|e| invalid_column("sort_order", e))?;
        Ok(Section {
            id: SectionId::from_uuid(self.id),
            proposal_id: ProposalId::from_uuid(self.proposal_id),
            title: self.title,
            description: self.description,
            deliverables: self.deliverables,
            hours: self.hours,
            rate: self.rate,
            start_date: self.start_date,
            end_date: self.end_date,
            addressed_process_names: self.addressed_process_names,
            sort_order,
            external_milestone_id: self.external_milestone_id,
        })
    }
}

#[async_trait]
impl SectionRepository for PostgresSectionRepository {
    async fn list_by_proposal(&self, proposal_id: &ProposalId) -> Result<Vec<Section>, DomainError> {
        let rows: Vec<SectionRow> = sqlx::query_as(
            r#"
            SELECT id, proposal_id, title, description, deliverables, hours, rate,
                   start_date, end_date, addressed_process_names, sort_order,
                   external_milestone_id
            FROM sections
            WHERE proposal_id = $1
            ORDER BY sort_order, title
            "#,
        )
        .bind(proposal_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list sections", e))?;

        rows.into_iter().map(SectionRow::into_section).collect()
    }

    async fn bulk_create(
        &self,
        proposal_id: &ProposalId,
        drafts: Vec<SectionDraft>,
    ) -> Result<Vec<Section>, DomainError> {
        let sections: Vec<Section> = drafts
            .into_iter()
            .map(|draft| Section::from_draft(*proposal_id, draft))
            .collect();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("begin section insert", e))?;

        for section in &sections {
            let result = sqlx::query(
                r#"
                INSERT INTO sections (
                    id, proposal_id, title, description, deliverables, hours, rate,
                    start_date, end_date, addressed_process_names, sort_order,
                    external_milestone_id
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(section.id.as_uuid())
            .bind(section.proposal_id.as_uuid())
            .bind(&section.title)
            .bind(&section.description)
            .bind(&section.deliverables)
            .bind(section.hours)
            .bind(section.rate)
            .bind(section.start_date)
            .bind(section.end_date)
            .bind(&section.addressed_process_names)
            .bind(section.sort_order as i32)
            .bind(&section.external_milestone_id)
            .execute(&mut *tx)
            .await;

            match result {
                Ok(_) => {}
                Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                    return Err(DomainError::new(
                        ErrorCode::Conflict,
                        format!(
                            "sort_order {} already used in proposal {}",
                            section.sort_order, proposal_id
                        ),
                    ));
                }
                Err(e) => return Err(DomainError::database("insert section", e)),
            }
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("commit section insert", e))?;

        Ok(sections)
    }

    async fn update(&self, section: &Section) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sections
            SET
                title = $2,
                description = $3,
                deliverables = $4,
                hours = $5,
                rate = $6,
                start_date = $7,
                end_date = $8,
                addressed_process_names = $9,
                sort_order = $10,
                external_milestone_id = $11
            WHERE id = $1
            "#,
        )
        .bind(section.id.as_uuid())
        .bind(&section.title)
        .bind(&section.description)
        .bind(&section.deliverables)
        .bind(section.hours)
        .bind(section.rate)
        .bind(section.start_date)
        .bind(section.end_date)
        .bind(&section.addressed_process_names)
        .bind(section.sort_order as i32)
        .bind(&section.external_milestone_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update section", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SectionNotFound,
                section.id.to_string(),
            ));
        }
        Ok(())
    }
}
