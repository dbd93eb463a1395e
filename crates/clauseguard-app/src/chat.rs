//! Interactive assistant chat for one contract.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use clauseguard_api::{ApiClient, ApiError, ChatMessage, ChatRole, ChatThread};
use clauseguard_common::{ClientError, ContractId};

use crate::ui::Console;

/// Run the chat loop until EOF or `/quit`.
pub async fn run(client: Arc<ApiClient>, contract_id: u64) -> Result<(), ClientError> {
    let mut console = Console::new();
    let mut thread = ChatThread::new(ContractId(contract_id));

    // History is a nicety; chat works without it.
    if let Err(e) = thread.fetch_history(&client).await {
        warn!(contract_id, error = %e, "could not load chat history");
        console.warning("Could not load earlier messages for this contract.");
    }
    for message in thread.messages() {
        print_bubble(message);
    }

    println!("Ask about this contract. /quit to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("> ");

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "/quit" {
            break;
        }

        let typing = ProgressBar::new_spinner();
        typing.set_style(
            ProgressStyle::with_template("{spinner} assistant is typing...")
                .expect("invalid spinner template"),
        );
        typing.enable_steady_tick(Duration::from_millis(120));

        let result = thread.send(&client, message).await;
        typing.finish_and_clear();

        match result {
            Ok(_) => {
                if let Some(reply) = thread.messages().last() {
                    print_bubble(reply);
                }
            }
            Err(ApiError::Network(e)) => {
                warn!(contract_id, error = %e, "chat request failed");
                console.error("Could not reach the server.");
            }
            Err(e) => {
                warn!(contract_id, error = %e, "chat request rejected");
                console.error(e.to_string());
            }
        }
    }

    Ok(())
}

fn print_bubble(message: &ChatMessage) {
    let who = match message.role {
        ChatRole::User => "you",
        ChatRole::Assistant => "assistant",
    };
    let stamp = message.sent_at.with_timezone(&Local).format("%H:%M");
    println!("[{stamp}] {who}: {}", message.content);
}
