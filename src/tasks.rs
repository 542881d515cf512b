//! Async task management for the submission workflow.
//!
//! This module runs the GitHub call in a background task while the UI keeps
//! rendering. It uses a tokio channel to communicate the result back to the
//! main event loop.
//!
//! # Architecture
//!
//! The submission follows a simple pattern:
//! 1. The app marks a submission pending after the validation gate passes
//! 2. The main loop hands the pending submission to `TaskSpawner` instead of
//!    awaiting inline
//! 3. The main loop continues rendering and handling events
//! 4. When the call completes, the task sends a `ReportMessage` through the
//!    channel
//! 5. The main loop polls the channel with `try_recv()` and hands the result
//!    to the app, which applies it only if the screen is still attached
//!
//! There is exactly one submission task in flight at a time; the app's
//! submitting state gates re-entry.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::{ApiError, CreateIssueRequest, GithubClient, GithubTarget};
use crate::report::Report;

/// Outcome of one submission attempt, as shown to the user.
///
/// This is a closed set: every API failure folds into one of the error
/// kinds below, each with fixed dialog copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The issue was created.
    Ok {
        /// Browser URL of the created issue.
        issue_url: String,
    },
    /// GitHub rejected a username/password login.
    BadCredentials,
    /// GitHub rejected a token login.
    InvalidToken,
    /// The target repository has its issue tracker disabled.
    IssuesNotEnabled,
    /// Anything else: transport errors, unexpected statuses, bad payloads.
    Unknown,
}

impl SubmissionResult {
    /// Fold an API error into the closed result set.
    ///
    /// A 401 means different things depending on how we authenticated, so
    /// the login kind picks between the token and credentials variants.
    pub fn from_error(error: &ApiError, uses_api_token: bool) -> Self {
        match error {
            ApiError::Unauthorized => {
                if uses_api_token {
                    SubmissionResult::InvalidToken
                } else {
                    SubmissionResult::BadCredentials
                }
            }
            ApiError::IssuesDisabled => SubmissionResult::IssuesNotEnabled,
            _ => SubmissionResult::Unknown,
        }
    }

    /// Dialog copy for failed submissions; `None` for success.
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            SubmissionResult::Ok { .. } => None,
            SubmissionResult::BadCredentials => {
                Some("GitHub rejected the username or password.")
            }
            SubmissionResult::InvalidToken => {
                Some("GitHub rejected the configured API token.")
            }
            SubmissionResult::IssuesNotEnabled => {
                Some("The issue tracker is disabled for the target repository.")
            }
            SubmissionResult::Unknown => {
                Some("An unexpected error occurred while sending the report.")
            }
        }
    }

    /// Whether dismissing this result's dialog closes the screen.
    ///
    /// Credential and tracker problems leave the form open so the user can
    /// adjust and resend; an unknown failure ends the session.
    pub fn closes_screen_on_dismiss(&self) -> bool {
        matches!(self, SubmissionResult::Unknown)
    }
}

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ReportMessage {
    /// A submission attempt finished.
    SubmissionFinished(SubmissionResult),
}

/// Spawns the background submission task.
///
/// Holds a channel sender; the spawn method clones the data it needs and
/// spawns a tokio task that sends its result through the channel. Send
/// failures are ignored since they only mean the UI is gone.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ReportMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ReportMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task that files the report as a GitHub issue.
    pub fn spawn_submit(&self, client: &GithubClient, target: GithubTarget, report: Report) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let request = CreateIssueRequest {
                title: report.title().to_string(),
                body: report.body(),
            };
            let result = match client.create_issue(&target, &request).await {
                Ok(issue) => {
                    info!("Report submitted as issue #{}", issue.number);
                    SubmissionResult::Ok {
                        issue_url: issue.html_url,
                    }
                }
                Err(e) => {
                    warn!("Report submission failed: {}", e);
                    SubmissionResult::from_error(&e, client.login().uses_api_token())
                }
            };
            let _ = tx.send(ReportMessage::SubmissionFinished(result));
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ReportMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}
