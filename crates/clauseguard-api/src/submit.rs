//! Contract submission: file upload and pasted text.
//!
//! Both paths validate locally first; a rejected submission never issues
//! a network request. The server answers with either a task id (queued
//! analysis, poll for completion) or a direct redirect (already done).

use std::path::Path;

use tracing::{debug, info};

use clauseguard_common::{new_correlation_id, JobId};

use crate::client::safe_json;
use crate::{ApiClient, ApiError};

/// What a successful submission came back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Asynchronous path: poll this job to completion.
    Job(JobId),
    /// Synchronous path: results are already at this location.
    Redirect(String),
}

impl ApiClient {
    /// Upload a contract document for analysis.
    ///
    /// POST `analyze-document/` as multipart with field `contract_pdf`.
    pub async fn analyze_document(&self, path: &Path) -> Result<SubmitOutcome, ApiError> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "contract".to_string());
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if !self
            .config
            .allowed_extensions
            .iter()
            .any(|allowed| *allowed == extension)
        {
            return Err(ApiError::Validation(format!(
                "Unsupported file type. Please upload {} files.",
                join_upper(&self.config.allowed_extensions)
            )));
        }

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ApiError::Validation(format!("Could not read file: {e}")))?;
        if metadata.len() > self.config.max_file_size {
            return Err(ApiError::Validation(format!(
                "File too large. Maximum size is {}MB.",
                self.config.max_file_size_mb()
            )));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Validation(format!("Could not read file: {e}")))?;

        let correlation = new_correlation_id();
        info!(
            %correlation,
            file = %filename,
            size = bytes.len(),
            "submitting document for analysis"
        );

        let file_part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str(mime_for_extension(&extension))
            .map_err(|e| ApiError::Submission(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("contract_pdf", file_part);

        let response = self
            .http
            .post(self.endpoint("analyze-document/"))
            .headers(self.base_headers())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Submission(e.to_string()))?;

        self.submit_outcome(response, &correlation).await
    }

    /// Submit pasted contract text for analysis.
    ///
    /// POST `analyze-text/` with JSON `{"text": ...}`.
    pub async fn analyze_text(&self, text: &str) -> Result<SubmitOutcome, ApiError> {
        let text = text.trim();
        if text.chars().count() < self.config.min_text_chars {
            return Err(ApiError::Validation(format!(
                "Please paste at least {} characters of contract text.",
                self.config.min_text_chars
            )));
        }

        let correlation = new_correlation_id();
        info!(%correlation, chars = text.len(), "submitting pasted text for analysis");

        let response = self
            .http
            .post(self.endpoint("analyze-text/"))
            .headers(self.base_headers())
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| ApiError::Submission(e.to_string()))?;

        self.submit_outcome(response, &correlation).await
    }

    /// Shared response handling for both submission paths.
    async fn submit_outcome(
        &self,
        response: reqwest::Response,
        correlation: &str,
    ) -> Result<SubmitOutcome, ApiError> {
        let status = response.status();
        let data = safe_json(response).await?;

        if !status.is_success() {
            let message = data["error"]
                .as_str()
                .unwrap_or("Upload failed.")
                .to_string();
            return Err(ApiError::Submission(message));
        }

        if let Some(task_id) = data["task_id"].as_str() {
            debug!(correlation, task_id, "analysis queued");
            return Ok(SubmitOutcome::Job(JobId::new(task_id)));
        }
        if let Some(redirect) = data["redirect"].as_str() {
            debug!(correlation, redirect, "analysis completed synchronously");
            return Ok(SubmitOutcome::Redirect(redirect.to_string()));
        }

        Err(ApiError::Submission("Invalid response from server".into()))
    }
}

/// Multipart MIME type for a document extension.
fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "rtf" => "application/rtf",
        "odt" => "application/vnd.oasis.opendocument.text",
        _ => "application/octet-stream",
    }
}

/// "pdf, docx" -> "PDF, DOCX" for the unsupported-type message.
fn join_upper(extensions: &[String]) -> String {
    extensions
        .iter()
        .map(|e| e.to_uppercase())
        .collect::<Vec<_>>()
        .join(", ")
}
