//! Risk-review and contract-delete commands.
//!
//! Both are fire-and-forget: a failure is logged and shown, but the
//! command itself still exits cleanly rather than suggesting a retry.

use std::sync::Arc;

use tracing::warn;

use clauseguard_api::{ApiClient, RiskStatus};
use clauseguard_common::{ClientError, ContractId, RiskId};

use crate::ui::Console;

pub async fn update(
    client: Arc<ApiClient>,
    risk_id: u64,
    status: RiskStatus,
    note: &str,
) -> Result<(), ClientError> {
    let mut console = Console::new();
    match client.update_risk(RiskId(risk_id), status, note).await {
        Ok(()) => {
            println!("Risk {risk_id} marked {status}.");
        }
        Err(e) => {
            warn!(risk_id, error = %e, "failed to update risk");
            console.error("Failed to save risk status");
        }
    }
    Ok(())
}

pub async fn delete(client: Arc<ApiClient>, contract_id: u64) -> Result<(), ClientError> {
    let mut console = Console::new();
    match client.delete_contract(ContractId(contract_id)).await {
        Ok(()) => {
            println!("Contract {contract_id} deleted.");
        }
        Err(e) => {
            warn!(contract_id, error = %e, "failed to delete contract");
            console.error("Failed to delete contract");
        }
    }
    Ok(())
}
