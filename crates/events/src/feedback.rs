//! Delayed, cancellable user feedback.
//!
//! Views show a "sending..." or "processing payment..." state for a short
//! while before flipping to the result. [`FeedbackScheduler`] runs each such
//! delay as a Tokio task guarded by a child [`CancellationToken`], so a view
//! tearing down (or calling [`FeedbackScheduler::shutdown`]) cancels every
//! pending message and none of them fire afterwards.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::bus::{EventBus, ViewEvent};
use crate::event_types;

/// Default simulated latency.
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Success,
    Info,
    Error,
}

/// A message ready to be shown as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("Feedback was cancelled before it completed")]
    Cancelled,

    #[error("Feedback task failed: {0}")]
    Task(String),
}

// ---------------------------------------------------------------------------
// PendingFeedback
// ---------------------------------------------------------------------------

/// Handle to a scheduled feedback message.
pub struct PendingFeedback {
    token: CancellationToken,
    handle: JoinHandle<Option<Feedback>>,
}

impl PendingFeedback {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the delay to elapse and return the message.
    pub async fn wait(self) -> Result<Feedback, FeedbackError> {
        match self.handle.await {
            Ok(Some(feedback)) => Ok(feedback),
            Ok(None) => Err(FeedbackError::Cancelled),
            Err(e) => Err(FeedbackError::Task(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// FeedbackScheduler
// ---------------------------------------------------------------------------

/// Owner of every pending feedback task of one view.
///
/// Dropping the scheduler cancels all tasks it spawned.
pub struct FeedbackScheduler {
    delay: Duration,
    cancel: CancellationToken,
    bus: Option<Arc<EventBus>>,
}

impl FeedbackScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            cancel: CancellationToken::new(),
            bus: None,
        }
    }

    /// Publish a [`event_types::FEEDBACK_DELIVERED`] event on `bus` whenever
    /// a message completes.
    pub fn with_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `message` to complete after the configured delay.
    ///
    /// Must be called from within a Tokio runtime. Scheduling after
    /// [`shutdown`](Self::shutdown) yields a task that is already cancelled.
    pub fn schedule(&self, kind: FeedbackKind, message: impl Into<String>) -> PendingFeedback {
        let token = self.cancel.child_token();
        let task_token = token.clone();
        let feedback = Feedback {
            kind,
            message: message.into(),
        };
        let delay = self.delay;
        let bus = self.bus.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => {
                    tracing::debug!(message = %feedback.message, "Feedback cancelled");
                    None
                }
                _ = tokio::time::sleep(delay) => {
                    tracing::info!(
                        kind = ?feedback.kind,
                        message = %feedback.message,
                        delay_ms = delay.as_millis() as u64,
                        "Feedback delivered",
                    );
                    if let Some(bus) = bus {
                        bus.publish(
                            ViewEvent::new(event_types::FEEDBACK_DELIVERED).with_payload(
                                serde_json::json!({
                                    "kind": feedback.kind,
                                    "message": feedback.message,
                                }),
                            ),
                        );
                    }
                    Some(feedback)
                }
            }
        });

        PendingFeedback { token, handle }
    }

    /// Cancel every pending and future message of this scheduler.
    pub fn shutdown(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!("Feedback scheduler shutting down");
        }
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Default for FeedbackScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_DELAY)
    }
}

impl Drop for FeedbackScheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
