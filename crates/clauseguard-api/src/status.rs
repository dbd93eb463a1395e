//! Analysis-job status wire types and the live status source.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use clauseguard_common::JobId;

use crate::client::safe_json;
use crate::{ApiClient, ApiError, StatusProvider};

/// Server-reported job state.
///
/// Anything the server reports that we don't know (Celery can surface
/// states like RETRY) deserializes to `Unknown` and is treated like
/// `Pending` by the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Progress,
    Success,
    Failure,
    Unknown,
}

impl TaskState {
    fn from_wire(s: &str) -> Self {
        match s {
            "PENDING" => TaskState::Pending,
            "PROGRESS" => TaskState::Progress,
            "SUCCESS" => TaskState::Success,
            "FAILURE" => TaskState::Failure,
            _ => TaskState::Unknown,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            TaskState::Pending => "PENDING",
            TaskState::Progress => "PROGRESS",
            TaskState::Success => "SUCCESS",
            TaskState::Failure => "FAILURE",
            TaskState::Unknown => "UNKNOWN",
        }
    }

    /// Terminal states stop the poll irreversibly.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Success | TaskState::Failure)
    }
}

impl Serialize for TaskState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for TaskState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TaskState::from_wire(&s))
    }
}

/// One status-endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: TaskState,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn pending() -> Self {
        Self {
            status: TaskState::Pending,
            message: None,
            step: None,
            progress: None,
            redirect: None,
            error: None,
        }
    }
}

/// Visible analysis phase, advanced monotonically from the `step` tokens
/// the worker attaches to progress updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnalysisPhase {
    Received,
    Analyzing,
    Saving,
}

impl AnalysisPhase {
    /// Map a worker step token to a phase. Unknown tokens map to nothing,
    /// leaving the current phase in place.
    pub fn from_step(step: &str) -> Option<Self> {
        match step {
            "analyzing" => Some(AnalysisPhase::Analyzing),
            "saving" => Some(AnalysisPhase::Saving),
            _ => None,
        }
    }

    /// User-facing label for the phase list.
    pub fn label(self) -> &'static str {
        match self {
            AnalysisPhase::Received => "Uploading contract",
            AnalysisPhase::Analyzing => "AI reviewing clauses",
            AnalysisPhase::Saving => "Saving results",
        }
    }
}

impl ApiClient {
    /// GET `task-status/{id}/`.
    pub async fn task_status(&self, job: &JobId) -> Result<StatusResponse, ApiError> {
        let response = self
            .http
            .get(self.endpoint(&format!("task-status/{job}/")))
            .headers(self.base_headers())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let data = safe_json(response).await?;
        serde_json::from_value(data).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl StatusProvider for ApiClient {
    async fn task_status(&self, job: &JobId) -> Result<StatusResponse, ApiError> {
        ApiClient::task_status(self, job).await
    }
}
