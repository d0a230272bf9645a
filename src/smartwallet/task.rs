//! Relay task tracking.
//!
//! A submitted call batch becomes a relay task. `TaskHandle` polls its status
//! until a terminal state, either inline (`wait`) or from a spawned task that
//! streams `TaskEvent`s (`watch`).

use alloy::primitives::TxHash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};

use crate::config::RelayConfig;
use crate::resilience::PollBackoff;
use crate::smartwallet::rpc::RelayTransport;
use crate::smartwallet::types::{
    SmartWalletError, SmartWalletResult, TaskEvent, TaskState, TaskStatus,
};

/// Handle to one relay task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: String,
    transport: Arc<RelayTransport>,
    poll_interval_ms: u64,
    max_poll_interval_ms: u64,
    timeout: Duration,
}

impl TaskHandle {
    pub fn new(id: String, transport: Arc<RelayTransport>, config: &RelayConfig) -> Self {
        Self {
            id,
            transport,
            poll_interval_ms: config.poll_interval_ms,
            max_poll_interval_ms: config.max_poll_interval_ms,
            timeout: Duration::from_secs(config.task_timeout_secs),
        }
    }

    /// Relay task id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Link to the relay's status page for this task.
    pub fn status_url(&self) -> String {
        self.transport.task_status_url(&self.id)
    }

    /// Fetch the current status once.
    pub async fn status(&self) -> SmartWalletResult<TaskStatus> {
        self.transport.task_status(&self.id).await
    }

    /// Poll until the task succeeds and return its transaction hash.
    pub async fn wait(&self) -> SmartWalletResult<TxHash> {
        let status = self.poll_until_terminal(None).await?.ok_or_else(|| {
            SmartWalletError::InvalidResponse(format!("polling of task {} stopped", self.id))
        })?;
        status.transaction_hash.ok_or_else(|| {
            SmartWalletError::InvalidResponse(format!(
                "task {} succeeded without a transaction hash",
                self.id
            ))
        })
    }

    /// Poll in the background and stream progress.
    ///
    /// The channel yields `Pending` on every state change, then exactly one
    /// `Success` or `Error`, then closes. Dropping the receiver stops polling.
    pub fn watch(&self) -> mpsc::UnboundedReceiver<TaskEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = self.clone();

        tokio::spawn(async move {
            let event = match handle.poll_until_terminal(Some(&tx)).await {
                Ok(Some(status)) => TaskEvent::Success(status),
                Ok(None) => return,
                Err(e) => TaskEvent::Error(e.to_string()),
            };
            let _ = tx.send(event);
        });

        rx
    }

    /// Core polling loop. `progress`, when given, receives every new
    /// non-terminal state; `Ok(None)` means its receiver went away.
    ///
    /// Failed status requests are logged and polled again; only the deadline
    /// or a failed terminal state ends the loop with an error.
    async fn poll_until_terminal(
        &self,
        progress: Option<&mpsc::UnboundedSender<TaskEvent>>,
    ) -> SmartWalletResult<Option<TaskStatus>> {
        let deadline = Instant::now() + self.timeout;
        let mut backoff = PollBackoff::new(self.poll_interval_ms, self.max_poll_interval_ms);
        let mut last_state: Option<TaskState> = None;

        loop {
            if progress.is_some_and(|tx| tx.is_closed()) {
                tracing::debug!(task_id = %self.id, "Watcher dropped, polling stopped");
                return Ok(None);
            }

            match self.transport.task_status(&self.id).await {
                Ok(status) => {
                    let state = status.task_state;
                    if last_state != Some(state) {
                        tracing::info!(task_id = %self.id, state = %state, "Task state changed");
                        last_state = Some(state);
                        if let Some(tx) = progress.filter(|_| !state.is_terminal()) {
                            if tx.send(TaskEvent::Pending(status.clone())).is_err() {
                                return Ok(None);
                            }
                        }
                    }

                    match state {
                        TaskState::ExecSuccess => return Ok(Some(status)),
                        TaskState::ExecReverted | TaskState::Cancelled => {
                            return Err(SmartWalletError::TaskFailed {
                                id: self.id.clone(),
                                state,
                                message: status
                                    .last_check_message
                                    .unwrap_or_else(|| "no reason given".to_string()),
                            });
                        }
                        _ => {}
                    }
                }
                Err(e) => {
                    tracing::warn!(task_id = %self.id, error = %e, "Task status request failed");
                }
            }

            let delay = backoff.next_delay();
            if Instant::now() + delay > deadline {
                return Err(SmartWalletError::TaskTimeout {
                    id: self.id.clone(),
                    secs: self.timeout.as_secs(),
                });
            }
            sleep(delay).await;
        }
    }
}
