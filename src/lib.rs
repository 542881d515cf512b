//! Bugport
//!
//! An embeddable bug report screen for terminal applications. The screen
//! collects a title, description and optional reporter email, attaches a
//! device and app snapshot, and files the report as a GitHub issue. When no
//! guest token is configured (or the reporter opts out of the guest path)
//! it falls back to opening the repository's issue page in a browser with
//! any captured log text on the clipboard.
//!
//! Hosts embed the screen by constructing a [`ReporterApp`] from a
//! [`ReporterConfig`], feeding it terminal events, rendering it into their
//! ratatui frame, and pumping parked submissions through a
//! [`tasks::TaskSpawner`]. See `src/main.rs` for a complete event loop.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod platform;
pub mod report;
pub mod tasks;
pub mod ui;

pub use api::{GithubClient, GithubLogin, GithubTarget};
pub use app::{PendingSubmission, ReportHost, ReporterApp, ScreenState};
pub use config::ReporterConfig;
pub use report::{DeviceInfo, ExtraInfo, Report, LOG_EXTRA_KEY};
pub use tasks::{create_task_channel, ReportMessage, SubmissionResult, TaskSpawner};
