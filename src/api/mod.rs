//! GitHub API client and types.
//!
//! This module provides the interface for filing issues against the GitHub
//! REST API.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::GithubLogin;
pub use client::GithubClient;
pub use error::ApiError;
pub use types::{CreateIssueRequest, CreatedIssue, GithubTarget};
