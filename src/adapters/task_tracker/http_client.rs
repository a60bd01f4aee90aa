//! HTTP Task Tracker - Implementation of TaskTracker over the tracker's REST API.
//!
//! # Endpoints
//!
//! | Call | Request |
//! |------|---------|
//! | project | `POST {base}/projects` `{name, company}` |
//! | milestone | `POST {base}/projects/{project}/milestones` `{name, deadline}` |
//! | task list | `POST {base}/projects/{project}/task_lists` `{name, milestone_id}` |
//! | task | `POST {base}/task_lists/{list}/tasks` `{content}` |
//!
//! Every endpoint answers with `{id, url}`; `id` may be a number or a string.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpTaskTrackerConfig::new("https://tracker.example.com/api", api_key)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let tracker = HttpTaskTracker::new(config)?;
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::TaskTrackerConfig;
use crate::domain::proposal::ExternalRef;
use crate::ports::{TaskTracker, TaskTrackerError};

/// Configuration for the HTTP task tracker.
#[derive(Debug, Clone)]
pub struct HttpTaskTrackerConfig {
    api_key: Secret<String>,
    /// Base URL of the API (no trailing slash required).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpTaskTrackerConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl From<&TaskTrackerConfig> for HttpTaskTrackerConfig {
    fn from(config: &TaskTrackerConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        }
    }
}

/// Task tracker client over HTTP.
pub struct HttpTaskTracker {
    config: HttpTaskTrackerConfig,
    client: Client,
}

impl HttpTaskTracker {
    pub fn new(config: HttpTaskTrackerConfig) -> Result<Self, TaskTrackerError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TaskTrackerError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Posts `body` to `path` and reads the created object's reference.
    async fn create<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ExternalRef, TaskTrackerError> {
        let response = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TaskTrackerError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    TaskTrackerError::Network(format!("Connection failed: {}", e))
                } else {
                    TaskTrackerError::Network(e.to_string())
                }
            })?;

        let response = Self::check_status(response).await?;
        let created: CreatedObject = response
            .json()
            .await
            .map_err(|e| TaskTrackerError::Parse(format!("Failed to parse response: {}", e)))?;

        Ok(created.into_ref())
    }

    async fn check_status(response: Response) -> Result<Response, TaskTrackerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }
}

/// Maps a non-success status and body to an error.
fn status_error(status: u16, body: &str) -> TaskTrackerError {
    match status {
        401 | 403 => TaskTrackerError::AuthenticationFailed,
        _ => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.error.or(b.message))
                .unwrap_or_else(|| body.trim().to_string());
            TaskTrackerError::api(status, message)
        }
    }
}

#[async_trait]
impl TaskTracker for HttpTaskTracker {
    async fn create_project(&self, name: &str, company: &str) -> Result<ExternalRef, TaskTrackerError> {
        self.create("projects", &NewProject { name, company }).await
    }

    async fn create_milestone(
        &self,
        project_id: &str,
        name: &str,
        deadline: Option<NaiveDate>,
    ) -> Result<ExternalRef, TaskTrackerError> {
        self.create(
            &format!("projects/{}/milestones", project_id),
            &NewMilestone { name, deadline },
        )
        .await
    }

    async fn create_task_list(
        &self,
        project_id: &str,
        milestone_id: &str,
        name: &str,
    ) -> Result<ExternalRef, TaskTrackerError> {
        self.create(
            &format!("projects/{}/task_lists", project_id),
            &NewTaskList { name, milestone_id },
        )
        .await
    }

    async fn create_task(
        &self,
        task_list_id: &str,
        content: &str,
    ) -> Result<ExternalRef, TaskTrackerError> {
        self.create(
            &format!("task_lists/{}/tasks", task_list_id),
            &NewTask { content },
        )
        .await
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct NewProject<'a> {
    name: &'a str,
    company: &'a str,
}

#[derive(Debug, Serialize)]
struct NewMilestone<'a> {
    name: &'a str,
    /// `YYYY-MM-DD`, or null when the section has no end date.
    deadline: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct NewTaskList<'a> {
    name: &'a str,
    milestone_id: &'a str,
}

#[derive(Debug, Serialize)]
struct NewTask<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemoteId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct CreatedObject {
    id: RemoteId,
    url: String,
}

impl CreatedObject {
    fn into_ref(self) -> ExternalRef {
        let id = match self.id {
            RemoteId::Number(n) => n.to_string(),
            RemoteId::Text(s) => s,
        };
        ExternalRef::new(id, self.url)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}
