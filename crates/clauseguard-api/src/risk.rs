//! Risk-review updates and contract deletion.
//!
//! Both are fire-and-forget from the caller's point of view: failures
//! are worth a warning and a best-effort notice, never a retry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use clauseguard_common::{ContractId, RiskId};

use crate::client::safe_json;
use crate::{ApiClient, ApiError};

/// Review decision for one identified risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    Pending,
    Reviewed,
    Accepted,
    Disputed,
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskStatus::Pending => "pending",
            RiskStatus::Reviewed => "reviewed",
            RiskStatus::Accepted => "accepted",
            RiskStatus::Disputed => "disputed",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RiskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RiskStatus::Pending),
            "reviewed" => Ok(RiskStatus::Reviewed),
            "accepted" => Ok(RiskStatus::Accepted),
            "disputed" => Ok(RiskStatus::Disputed),
            other => Err(format!(
                "unknown risk status '{other}' (expected pending, reviewed, accepted, or disputed)"
            )),
        }
    }
}

impl ApiClient {
    /// Record a review decision and note for a risk.
    ///
    /// POST `risk/{id}/update/` with `{"status", "note"}`.
    pub async fn update_risk(
        &self,
        risk_id: RiskId,
        status: RiskStatus,
        note: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint(&format!("risk/{risk_id}/update/")))
            .headers(self.base_headers())
            .json(&serde_json::json!({ "status": status, "note": note }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let http_status = response.status();
        let data = safe_json(response).await?;
        if !http_status.is_success() {
            let message = data["error"]
                .as_str()
                .unwrap_or("Failed to save risk status")
                .to_string();
            return Err(ApiError::Submission(message));
        }
        Ok(())
    }

    /// Remove a contract and its analysis from the account.
    ///
    /// POST `contract/{id}/delete/`.
    pub async fn delete_contract(&self, contract_id: ContractId) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint(&format!("contract/{contract_id}/delete/")))
            .headers(self.base_headers())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let http_status = response.status();
        let data = safe_json(response).await?;
        if !http_status.is_success() {
            let message = data["error"]
                .as_str()
                .unwrap_or("Failed to delete contract")
                .to_string();
            return Err(ApiError::Submission(message));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiConfig;

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(ApiConfig::new(server.url()).with_credentials("tok", "sess")).unwrap()
    }

    #[test]
    fn status_round_trips_strings() {
        for status in [
            RiskStatus::Pending,
            RiskStatus::Reviewed,
            RiskStatus::Accepted,
            RiskStatus::Disputed,
        ] {
            let parsed: RiskStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("escalated".parse::<RiskStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&RiskStatus::Disputed).unwrap();
        assert_eq!(json, "\"disputed\"");
    }

    #[tokio::test]
    async fn update_posts_status_and_note() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/risk/7/update/")
            .match_header("X-CSRFToken", "tok")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "status": "accepted",
                "note": "standard for this vendor"
            })))
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        client
            .update_risk(RiskId(7), RiskStatus::Accepted, "standard for this vendor")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_failure_surfaces_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/risk/7/update/")
            .with_status(400)
            .with_body(r#"{"error": "risk not found"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .update_risk(RiskId(7), RiskStatus::Reviewed, "")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("risk not found"));
    }

    #[tokio::test]
    async fn delete_contract_posts_to_delete_route() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/contract/12/delete/")
            .with_body(r#"{"success": true}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        client.delete_contract(ContractId(12)).await.unwrap();

        mock.assert_async().await;
    }
}
