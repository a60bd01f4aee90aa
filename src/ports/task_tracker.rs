//! TaskTracker port - the external project/milestone/task hierarchy.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::proposal::ExternalRef;

/// Task tracker errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskTrackerError {
    /// The API rejected the credentials.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The API answered with an error status.
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be understood.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl TaskTrackerError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

impl From<TaskTrackerError> for DomainError {
    fn from(err: TaskTrackerError) -> Self {
        DomainError::new(ErrorCode::ExternalServiceError, err.to_string())
    }
}

/// Port for the external task-tracking system.
///
/// Every call creates exactly one remote object. Implementations do not
/// retry.
#[async_trait]
pub trait TaskTracker: Send + Sync {
    /// Creates a project for the company.
    async fn create_project(&self, name: &str, company: &str) -> Result<ExternalRef, TaskTrackerError>;

    /// Creates a milestone in a project.
    async fn create_milestone(
        &self,
        project_id: &str,
        name: &str,
        deadline: Option<NaiveDate>,
    ) -> Result<ExternalRef, TaskTrackerError>;

    /// Creates a task list attached to a milestone.
    async fn create_task_list(
        &self,
        project_id: &str,
        milestone_id: &str,
        name: &str,
    ) -> Result<ExternalRef, TaskTrackerError>;

    /// Creates a task in a task list.
    async fn create_task(
        &self,
        task_list_id: &str,
        content: &str,
    ) -> Result<ExternalRef, TaskTrackerError>;
}
