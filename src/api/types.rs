//! GitHub API request and response types.
//!
//! These types model the subset of the GitHub REST v3 issues API that
//! report submission touches, plus the target-repository coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{ApiError, Result};

/// Coordinates of the repository that receives reports.
///
/// Names `github.com/{username}/{repository}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubTarget {
    username: String,
    repository: String,
}

impl GithubTarget {
    /// Create a target from owner and repository names.
    pub fn new(username: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            repository: repository.into(),
        }
    }

    /// Parse a target from the common `owner/repo` form.
    ///
    /// # Errors
    ///
    /// Returns an error when the string is not exactly two non-empty,
    /// whitespace-free segments separated by one slash.
    pub fn parse(spec: &str) -> Result<Self> {
        let (username, repository) = spec
            .split_once('/')
            .ok_or_else(|| ApiError::InvalidTarget(spec.to_string()))?;
        if username.is_empty()
            || repository.is_empty()
            || repository.contains('/')
            || spec.chars().any(char::is_whitespace)
        {
            return Err(ApiError::InvalidTarget(spec.to_string()));
        }
        Ok(Self::new(username, repository))
    }

    /// The repository owner.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The repository name.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The issue-creation page used by the local/browser flow.
    pub fn new_issue_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/issues/new",
            self.username, self.repository
        )
    }
}

impl fmt::Display for GithubTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.username, self.repository)
    }
}

/// Request body for `POST /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueRequest {
    /// Issue title.
    pub title: String,
    /// Issue body (markdown).
    pub body: String,
}

/// The created issue, as returned by the issues endpoint.
///
/// Only the fields the workflow consumes are modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    /// Browser URL of the created issue.
    pub html_url: String,
    /// Issue number within the repository.
    pub number: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_target() {
        let target = GithubTarget::parse("octocat/hello-world").unwrap();
        assert_eq!(target.username(), "octocat");
        assert_eq!(target.repository(), "hello-world");
        assert_eq!(target.to_string(), "octocat/hello-world");
    }

    #[test]
    fn test_parse_rejects_malformed_specs() {
        for spec in ["", "octocat", "/repo", "owner/", "a/b/c", "owner /repo", "owner/re po"] {
            assert!(
                GithubTarget::parse(spec).is_err(),
                "spec {:?} should be rejected",
                spec
            );
        }
    }

    #[test]
    fn test_new_issue_url() {
        let target = GithubTarget::new("octocat", "hello-world");
        assert_eq!(
            target.new_issue_url(),
            "https://github.com/octocat/hello-world/issues/new"
        );
    }

    #[test]
    fn test_create_issue_request_serializes_title_and_body() {
        let request = CreateIssueRequest {
            title: "Crash on save".to_string(),
            body: "It crashed.".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["title"], "Crash on save");
        assert_eq!(json["body"], "It crashed.");
    }

    #[test]
    fn test_created_issue_deserializes_from_github_shape() {
        let json = r#"{
            "id": 1,
            "number": 1347,
            "state": "open",
            "title": "Crash on save",
            "html_url": "https://github.com/octocat/hello-world/issues/1347",
            "user": {"login": "octocat"}
        }"#;
        let issue: CreatedIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.number, 1347);
        assert_eq!(
            issue.html_url,
            "https://github.com/octocat/hello-world/issues/1347"
        );
    }
}
