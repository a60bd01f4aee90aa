//! PushProjectionHandler - Command handler realizing the preview in the task tracker.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{EventId, ProposalId, SerializableDomainEvent, Timestamp};
use crate::domain::projection::build_preview;
use crate::domain::proposal::{ExternalRef, ProjectPushed, ProposalError};
use crate::ports::{
    CustomerDirectory, EventPublisher, ProposalRepository, SectionRepository, TaskTracker,
};

use super::company_name;
use crate::application::handlers::{publish_or_log, save_proposal};

/// Command to push a proposal into the task tracker.
#[derive(Debug, Clone)]
pub struct PushProjectionCommand {
    pub proposal_id: ProposalId,
}

/// What a successful push created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushResult {
    pub project: ExternalRef,
    pub milestones: usize,
    pub task_lists: usize,
    pub tasks: usize,
}

/// Objects created so far, reported when a push stops part way.
#[derive(Debug, Default)]
struct Progress {
    project: Option<ExternalRef>,
    milestones: usize,
    task_lists: usize,
    tasks: usize,
}

impl Progress {
    fn describe(&self) -> String {
        match &self.project {
            None => "nothing was created".to_string(),
            Some(project) => format!(
                "already created: project {}, {} milestone(s), {} task list(s), {} task(s)",
                project, self.milestones, self.task_lists, self.tasks
            ),
        }
    }

    fn fail(&self, proposal_id: ProposalId, step: String, cause: impl std::fmt::Display) -> ProposalError {
        let context = self.describe();
        tracing::error!(
            proposal_id = %proposal_id,
            step = %step,
            error = %cause,
            created = %context,
            "Projection push failed"
        );
        ProposalError::external(step, format!("{} ({})", cause, context))
    }
}

/// Handler for projection pushes.
///
/// A proposal is pushed at most once: if it already references an external
/// project the push is refused before any external call. External ids are
/// written back as soon as they exist, so a failed push leaves the project
/// reference (and any milestone ids) on the proposal and its sections.
/// Nothing is rolled back or retried.
pub struct PushProjectionHandler {
    proposal_repository: Arc<dyn ProposalRepository>,
    section_repository: Arc<dyn SectionRepository>,
    customer_directory: Arc<dyn CustomerDirectory>,
    task_tracker: Arc<dyn TaskTracker>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl PushProjectionHandler {
    pub fn new(
        proposal_repository: Arc<dyn ProposalRepository>,
        section_repository: Arc<dyn SectionRepository>,
        customer_directory: Arc<dyn CustomerDirectory>,
        task_tracker: Arc<dyn TaskTracker>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            proposal_repository,
            section_repository,
            customer_directory,
            task_tracker,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: PushProjectionCommand) -> Result<PushResult, ProposalError> {
        let proposal_id = cmd.proposal_id;

        // 1. Load and check idempotency
        let proposal = self
            .proposal_repository
            .find_by_id(&proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("load proposal", e))?
            .ok_or_else(|| ProposalError::not_found("Proposal", proposal_id))?;

        if let Some(existing) = proposal.external_project() {
            tracing::warn!(
                proposal_id = %proposal_id,
                project_id = %existing.id,
                "Push refused: proposal already has an external project"
            );
            return Err(ProposalError::AlreadyPushed {
                existing: existing.clone(),
            });
        }

        // 2. Build the hierarchy
        let mut sections = self
            .section_repository
            .list_by_proposal(&proposal_id)
            .await
            .map_err(|e| ProposalError::from_port("list sections", e))?;
        let company = company_name(self.customer_directory.as_ref(), proposal.customer_id()).await?;
        let preview = build_preview(&company, &proposal, &sections);

        let mut progress = Progress::default();

        // 3. Project, persisted immediately
        let project = self
            .task_tracker
            .create_project(&preview.project.name, &company)
            .await
            .map_err(|e| progress.fail(proposal_id, "create project".to_string(), e))?;
        progress.project = Some(project.clone());

        save_proposal(self.proposal_repository.as_ref(), proposal, |p| {
            p.attach_external_project(project.clone())
        })
        .await
        .map_err(|e| progress.fail(proposal_id, "persist project reference".to_string(), e))?;

        tracing::info!(
            proposal_id = %proposal_id,
            project_id = %project.id,
            template = %preview.project.template,
            "External project created"
        );

        // 4. Milestones, task lists, tasks
        for milestone in &preview.milestones {
            let created = self
                .task_tracker
                .create_milestone(&project.id, &milestone.name, milestone.deadline)
                .await
                .map_err(|e| {
                    progress.fail(proposal_id, format!("create milestone '{}'", milestone.name), e)
                })?;
            progress.milestones += 1;

            if let Some(section) = sections.iter_mut().find(|s| s.id == milestone.section_id) {
                section.external_milestone_id = Some(created.id.clone());
                self.section_repository.update(section).await.map_err(|e| {
                    progress.fail(
                        proposal_id,
                        format!("persist milestone id for '{}'", milestone.name),
                        e,
                    )
                })?;
            }

            for list in &milestone.task_lists {
                let task_list = self
                    .task_tracker
                    .create_task_list(&project.id, &created.id, &list.name)
                    .await
                    .map_err(|e| progress.fail(proposal_id, format!("create task list '{}'", list.name), e))?;
                progress.task_lists += 1;

                for task in &list.tasks {
                    self.task_tracker
                        .create_task(&task_list.id, &task.content)
                        .await
                        .map_err(|e| {
                            progress.fail(proposal_id, format!("create task in '{}'", list.name), e)
                        })?;
                    progress.tasks += 1;
                }
            }
        }

        let result = PushResult {
            project,
            milestones: progress.milestones,
            task_lists: progress.task_lists,
            tasks: progress.tasks,
        };

        tracing::info!(
            proposal_id = %proposal_id,
            milestones = result.milestones,
            task_lists = result.task_lists,
            tasks = result.tasks,
            "Projection pushed"
        );

        let event = ProjectPushed {
            event_id: EventId::new(),
            proposal_id,
            project: result.project.clone(),
            milestones: result.milestones,
            task_lists: result.task_lists,
            tasks: result.tasks,
            pushed_at: Timestamp::now(),
        };
        publish_or_log(self.event_publisher.as_ref(), event.to_envelope()).await;

        Ok(result)
    }
}
