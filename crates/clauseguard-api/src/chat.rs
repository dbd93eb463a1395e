//! Assistant chat scoped to an analyzed contract.
//!
//! A `ChatThread` holds the local transcript and talks to the service's
//! chat endpoint. Chat failures are non-fatal by design: the caller gets
//! an error to surface best-effort and the thread stays usable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use clauseguard_common::ContractId;

use crate::client::safe_json;
use crate::{ApiClient, ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Conversation with the assistant about one contract.
#[derive(Debug)]
pub struct ChatThread {
    contract_id: ContractId,
    messages: Vec<ChatMessage>,
}

/// History entry as the service returns it.
#[derive(Debug, Deserialize)]
struct WireMessage {
    role: ChatRole,
    content: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl ChatThread {
    pub fn new(contract_id: ContractId) -> Self {
        Self {
            contract_id,
            messages: Vec::new(),
        }
    }

    pub fn contract_id(&self) -> ContractId {
        self.contract_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Replace the local transcript with the server-side history.
    ///
    /// GET `chat/{contract_id}/messages/`.
    pub async fn fetch_history(&mut self, client: &ApiClient) -> Result<(), ApiError> {
        let response = client
            .http
            .get(client.endpoint(&format!("chat/{}/messages/", self.contract_id)))
            .headers(client.base_headers())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let data = safe_json(response).await?;
        let wire: Vec<WireMessage> = serde_json::from_value(data["messages"].clone())
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        self.messages = wire
            .into_iter()
            .map(|m| ChatMessage {
                role: m.role,
                content: m.content,
                sent_at: m
                    .created_at
                    .as_deref()
                    .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
                    .map(|t| t.with_timezone(&Utc))
                    .unwrap_or_else(Utc::now),
            })
            .collect();

        debug!(
            contract = %self.contract_id,
            count = self.messages.len(),
            "loaded chat history"
        );
        Ok(())
    }

    /// Send a user message and append the assistant's reply.
    ///
    /// POST `chat/{contract_id}/send/` with `{"message": ...}`. The user
    /// message stays in the transcript even when the request fails, like
    /// a sent bubble awaiting a reply that never came.
    pub async fn send(
        &mut self,
        client: &ApiClient,
        message: impl Into<String>,
    ) -> Result<String, ApiError> {
        let message = message.into();
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(ApiError::Validation("Message cannot be empty.".into()));
        }

        self.messages
            .push(ChatMessage::new(ChatRole::User, trimmed));

        let response = client
            .http
            .post(client.endpoint(&format!("chat/{}/send/", self.contract_id)))
            .headers(client.base_headers())
            .json(&serde_json::json!({ "message": trimmed }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let data = safe_json(response).await?;

        if let Some(reply) = data["reply"].as_str() {
            self.messages
                .push(ChatMessage::new(ChatRole::Assistant, reply));
            return Ok(reply.to_string());
        }

        let error = data["error"]
            .as_str()
            .unwrap_or("Something went wrong.")
            .to_string();
        Err(ApiError::Submission(error))
    }
}
