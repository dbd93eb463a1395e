//! Analysis-job polling.
//!
//! One background task per job checks the status endpoint on a fixed
//! interval and forwards updates over a channel. Ticks are serialized:
//! a status request is awaited before the next tick fires, so a slow
//! response delays the next check instead of stacking requests.
//!
//! At most one job is polled at a time; `PollSlot` holds the active
//! poller and starting a new one cancels and replaces the old.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use clauseguard_common::JobId;

use crate::status::{AnalysisPhase, TaskState};
use crate::StatusProvider;

/// Message shown while the job is queued, before the worker reports anything.
const STARTING_MESSAGE: &str = "Starting analysis...";

/// Fallback when the server reports failure without an error message.
const DEFAULT_FAILURE_MESSAGE: &str = "Analysis failed. Please try again.";

/// One update from the polling task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    Progress {
        message: Option<String>,
        phase: AnalysisPhase,
    },
    Succeeded {
        redirect: Option<String>,
    },
    Failed {
        error: String,
    },
    /// Tick budget exhausted without a terminal state. A client-side
    /// give-up, not a server state.
    TimedOut,
}

/// Polling cadence and give-up policy.
#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
    pub interval: Duration,
    pub max_polls: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_polls: 300,
        }
    }
}

/// Handle to a running poll. Cancels on `stop()` and on drop, so a
/// discarded poller never leaks its timer task.
pub struct JobPoller {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl JobPoller {
    /// Spawn the polling task for `job`. Updates arrive on the returned
    /// receiver; the channel closes when the poll reaches a terminal
    /// state, times out, or is cancelled.
    pub fn spawn(
        provider: Arc<dyn StatusProvider>,
        job: JobId,
        options: PollOptions,
    ) -> (Self, mpsc::Receiver<JobEvent>) {
        let (tx, rx) = mpsc::channel(32);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let handle =
            tokio::spawn(async move { poll_loop(provider, job, options, tx, task_cancel).await });
        (Self { cancel, handle }, rx)
    }

    /// Cancel the poll. The task exits at its next suspension point.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for JobPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// The single active-poll slot. Starting a poll atomically replaces and
/// cancels any previous one; two polling loops never run concurrently.
#[derive(Default)]
pub struct PollSlot {
    active: Option<JobPoller>,
}

impl PollSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever was polling and start a poll for `job`.
    pub fn start(
        &mut self,
        provider: Arc<dyn StatusProvider>,
        job: JobId,
        options: PollOptions,
    ) -> mpsc::Receiver<JobEvent> {
        if let Some(prev) = self.active.take() {
            prev.stop();
        }
        let (poller, rx) = JobPoller::spawn(provider, job, options);
        self.active = Some(poller);
        rx
    }

    /// Cancel the active poll, if any.
    pub fn stop(&mut self) {
        if let Some(poller) = self.active.take() {
            poller.stop();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.as_ref().map_or(false, |p| !p.is_finished())
    }
}

async fn poll_loop(
    provider: Arc<dyn StatusProvider>,
    job: JobId,
    options: PollOptions,
    tx: mpsc::Sender<JobEvent>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(options.interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // Consume the interval's immediate first fire; the first status check
    // happens one full interval after submission.
    ticker.tick().await;

    let mut phase = AnalysisPhase::Received;

    for tick in 1..=options.max_polls {
        // Cancellation is checked first so a stopped poll never issues
        // another request.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(%job, tick, "poll cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(%job, tick, "poll cancelled mid-request");
                return;
            }
            result = provider.task_status(&job) => result,
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                // The server may be transiently unreachable; keep polling.
                warn!(%job, tick, error = %e, "status check failed, continuing");
                continue;
            }
        };

        match response.status {
            TaskState::Success => {
                debug!(%job, tick, redirect = ?response.redirect, "analysis succeeded");
                let _ = tx
                    .send(JobEvent::Succeeded {
                        redirect: response.redirect,
                    })
                    .await;
                return;
            }
            TaskState::Failure => {
                let error = response
                    .error
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
                let _ = tx.send(JobEvent::Failed { error }).await;
                return;
            }
            TaskState::Progress => {
                if let Some(next) = response.step.as_deref().and_then(AnalysisPhase::from_step) {
                    // Step tokens can arrive stale or repeated; the visible
                    // phase only ever advances.
                    phase = phase.max(next);
                }
                let event = JobEvent::Progress {
                    message: response.message,
                    phase,
                };
                if tx.send(event).await.is_err() {
                    return;
                }
            }
            TaskState::Pending | TaskState::Unknown => {
                let event = JobEvent::Progress {
                    message: Some(STARTING_MESSAGE.to_string()),
                    phase,
                };
                if tx.send(event).await.is_err() {
                    return;
                }
            }
        }
    }

    warn!(%job, max_polls = options.max_polls, "analysis timed out client-side");
    let _ = tx.send(JobEvent::TimedOut).await;
}
