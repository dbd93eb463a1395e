//! The submission flow: validate, submit, poll to completion.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use clauseguard_api::{
    AnalysisPhase, ApiClient, ApiError, JobEvent, PollOptions, PollSlot, SubmitOutcome,
};
use clauseguard_common::{ClientError, JobId};
use clauseguard_config::ClauseGuardConfig;

use crate::ui::{phase_checklist, Console};

/// What the user handed us to analyze.
#[derive(Debug)]
pub enum AnalyzeSource {
    File(PathBuf),
    Text(String),
}

impl AnalyzeSource {
    /// Resolve CLI arguments into a source; `--text -` reads stdin.
    pub async fn from_args(
        file: Option<PathBuf>,
        text: Option<String>,
    ) -> Result<Self, ClientError> {
        match (file, text) {
            (Some(path), None) => Ok(AnalyzeSource::File(path)),
            (None, Some(text)) if text == "-" => {
                let mut buffer = String::new();
                tokio::io::stdin().read_to_string(&mut buffer).await?;
                Ok(AnalyzeSource::Text(buffer))
            }
            (None, Some(text)) => Ok(AnalyzeSource::Text(text)),
            (None, None) => Err(ClientError::Other(
                "nothing to analyze: pass a file path or --text".into(),
            )),
            (Some(_), Some(_)) => unreachable!("clap rejects file together with --text"),
        }
    }
}

/// Run a submission end to end. Returns once the analysis reaches a
/// terminal state, times out, or is cancelled with ctrl-c.
pub async fn run(
    client: Arc<ApiClient>,
    config: &ClauseGuardConfig,
    source: AnalyzeSource,
) -> Result<(), ClientError> {
    let mut console = Console::new();

    let outcome = match source {
        AnalyzeSource::File(path) => client.analyze_document(&path).await,
        AnalyzeSource::Text(text) => client.analyze_text(&text).await,
    };

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            console.error(e.to_string());
            return Err(ClientError::Api(e.to_string()));
        }
    };

    match outcome {
        SubmitOutcome::Redirect(path) => {
            // Synchronous path: the results already exist.
            println!("Analysis complete: {}", absolute_url(client.config(), &path));
            Ok(())
        }
        SubmitOutcome::Job(job) => follow_job(client, config, job, &mut console).await,
    }
}

async fn follow_job(
    client: Arc<ApiClient>,
    config: &ClauseGuardConfig,
    job: JobId,
    console: &mut Console,
) -> Result<(), ClientError> {
    info!(%job, "analysis queued, polling for completion");

    let options = PollOptions {
        interval: Duration::from_secs(config.polling.interval_secs),
        max_polls: config.polling.max_polls,
    };
    let mut slot = PollSlot::new();
    let mut rx = slot.start(client.clone(), job, options);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("invalid spinner template"),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message("Starting analysis...");

    let mut phase = AnalysisPhase::Received;

    loop {
        let event = tokio::select! {
            event = rx.recv() => event,
            _ = tokio::signal::ctrl_c() => {
                slot.stop();
                spinner.abandon_with_message("Analysis cancelled.");
                console.info("Analysis cancelled. The job keeps running server-side.");
                return Ok(());
            }
        };

        match event {
            Some(JobEvent::Progress { message, phase: next }) => {
                if next > phase {
                    phase = next;
                    spinner.println(phase_checklist(phase));
                }
                if let Some(message) = message {
                    spinner.set_message(message);
                }
            }
            Some(JobEvent::Succeeded { redirect }) => {
                spinner.finish_with_message("Analysis complete!");
                // Give the completion state a beat on screen before
                // jumping to the results.
                tokio::time::sleep(Duration::from_millis(config.polling.redirect_delay_ms)).await;
                match redirect {
                    Some(path) => {
                        println!("Results: {}", absolute_url(client.config(), &path));
                    }
                    None => {
                        warn!("analysis succeeded but the server sent no result location");
                        console.warning("Analysis finished but no result location was returned.");
                    }
                }
                return Ok(());
            }
            Some(JobEvent::Failed { error }) => {
                spinner.abandon();
                let err = ApiError::JobFailed(error.clone());
                console.error(error);
                return Err(ClientError::Api(err.to_string()));
            }
            Some(JobEvent::TimedOut) => {
                spinner.abandon();
                let err = ApiError::PollTimeout(config.polling.max_polls);
                console.error("Analysis is taking too long. Please try again.");
                return Err(ClientError::Api(err.to_string()));
            }
            None => {
                // Poll task exited without a terminal event; treat it as
                // cancellation rather than inventing a result.
                spinner.abandon();
                return Ok(());
            }
        }
    }
}

/// Join a server-relative redirect onto the configured base URL.
fn absolute_url(config: &clauseguard_api::ApiConfig, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{}{path}", config.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clauseguard_api::ApiConfig;

    #[test]
    fn absolute_url_joins_relative_redirects() {
        let config = ApiConfig::new("https://clauseguard.example.com");
        assert_eq!(
            absolute_url(&config, "/results/42/"),
            "https://clauseguard.example.com/results/42/"
        );
        assert_eq!(
            absolute_url(&config, "https://elsewhere.example.com/r/1"),
            "https://elsewhere.example.com/r/1"
        );
    }

    #[tokio::test]
    async fn source_resolution_requires_an_input() {
        let err = AnalyzeSource::from_args(None, None).await.unwrap_err();
        assert!(err.to_string().contains("nothing to analyze"));

        let source = AnalyzeSource::from_args(None, Some("some text".into()))
            .await
            .unwrap();
        assert!(matches!(source, AnalyzeSource::Text(t) if t == "some text"));
    }
}
