//! HTTP client for the ClauseGuard contract-review service.
//!
//! Provides:
//! - Contract submission (file upload and pasted text) with local
//!   validation before anything touches the wire
//! - An analysis-job poller with serialized ticks, a tick budget, and
//!   explicit cancellation
//! - Assistant chat threads scoped to an analyzed contract
//! - Risk-review updates (fire-and-forget)

pub mod chat;
pub mod client;
pub mod config;
pub mod poller;
pub mod risk;
pub mod status;
pub mod submit;

use async_trait::async_trait;
use clauseguard_common::JobId;

pub use chat::{ChatMessage, ChatRole, ChatThread};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use poller::{JobEvent, JobPoller, PollOptions, PollSlot};
pub use risk::RiskStatus;
pub use status::{AnalysisPhase, StatusResponse, TaskState};
pub use submit::SubmitOutcome;

/// Source of analysis-job status. `ApiClient` implements this against the
/// live service; tests drive the poller with scripted fakes.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    async fn task_status(&self, job: &JobId) -> Result<StatusResponse, ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected locally, before any network request.
    #[error("{0}")]
    Validation(String),

    /// The initial submission was refused or unintelligible.
    #[error("submission failed: {0}")]
    Submission(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    /// The server reported the analysis job as failed.
    #[error("analysis failed: {0}")]
    JobFailed(String),

    /// Client-side give-up: the tick budget ran out before a terminal state.
    #[error("analysis timed out after {0} status checks")]
    PollTimeout(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_bare_message() {
        let err = ApiError::Validation("File too large. Maximum size is 10MB.".into());
        assert_eq!(err.to_string(), "File too large. Maximum size is 10MB.");
    }

    #[test]
    fn error_display() {
        let err = ApiError::Submission("HTTP 500: boom".into());
        assert_eq!(err.to_string(), "submission failed: HTTP 500: boom");

        let err = ApiError::JobFailed("bad format".into());
        assert_eq!(err.to_string(), "analysis failed: bad format");

        let err = ApiError::PollTimeout(300);
        assert_eq!(
            err.to_string(),
            "analysis timed out after 300 status checks"
        );
    }
}
