//! GitHub API client implementation.
//!
//! This module provides the client used to file issues against the GitHub
//! REST API. It handles authentication headers, request/response processing
//! and error mapping. Submission is a single attempt; a failure goes
//! straight back to the caller.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, info, instrument};

use super::auth::GithubLogin;
use super::error::{ApiError, Result};
use super::types::{CreateIssueRequest, CreatedIssue, GithubTarget};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Public GitHub API endpoint.
const GITHUB_API_BASE: &str = "https://api.github.com";

/// User agent sent with every request; GitHub rejects anonymous clients.
const USER_AGENT: &str = concat!("bugport/", env!("CARGO_PKG_VERSION"));

/// REST API version pin.
const API_VERSION: &str = "2022-11-28";

/// The GitHub API client.
///
/// Cheap to clone; clones share the underlying connection pool, which is
/// what lets the submission task take an owned copy.
#[derive(Debug, Clone)]
pub struct GithubClient {
    /// The HTTP client.
    client: Client,
    /// The API base URL (overridable for GitHub Enterprise and tests).
    base_url: String,
    /// Authentication credentials.
    login: GithubLogin,
}

impl GithubClient {
    /// Create a client against the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(login: GithubLogin) -> Result<Self> {
        Self::with_base_url(login, GITHUB_API_BASE)
    }

    /// Create a client against an explicit API base URL.
    ///
    /// Use this for GitHub Enterprise instances or tests.
    pub fn with_base_url(login: GithubLogin, base_url: &str) -> Result<Self> {
        let client = Self::build_http_client()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            login,
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::Network)
    }

    /// File an issue in the target repository.
    ///
    /// Calls `POST /repos/{owner}/{repo}/issues`. One attempt only.
    ///
    /// # Errors
    ///
    /// Maps GitHub's status codes through [`ApiError::from_status`]; notably
    /// 401 means rejected credentials and 410 means the repository has its
    /// issue tracker disabled.
    #[instrument(skip(self, request), fields(target = %target, title_len = request.title.len()))]
    pub async fn create_issue(
        &self,
        target: &GithubTarget,
        request: &CreateIssueRequest,
    ) -> Result<CreatedIssue> {
        debug!("Filing issue with {} auth", self.login.kind());

        let url = format!(
            "{}/repos/{}/{}/issues",
            self.base_url,
            target.username(),
            target.repository()
        );

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.login.header_value())
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .json(request)
            .send()
            .await?;

        let issue: CreatedIssue = self.handle_response(response).await?;
        info!("Created issue #{} at {}", issue.number, issue.html_url);
        Ok(issue)
    }

    /// The login this client authenticates with.
    pub fn login(&self) -> &GithubLogin {
        &self.login
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            // Try to get error details from response body
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(error_from_response(status, &url, &error_body))
        }
    }
}

/// Create an appropriate error from an HTTP response.
fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
    ApiError::from_status(status, &extract_error_message(url, body))
}

/// Pull GitHub's error message out of a response body.
///
/// GitHub error bodies look like `{"message": "...", "errors": [...]}`.
/// Falls back to the request URL when the body has no usable message.
fn extract_error_message(url: &str, body: &str) -> String {
    if body.is_empty() {
        return url.to_string();
    }
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    url.to_string()
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://api.github.com/"),
            "https://api.github.com"
        );
    }

    #[test]
    fn test_normalize_base_url_handles_multiple_slashes() {
        assert_eq!(
            normalize_base_url("https://github.example.com/api/v3///"),
            "https://github.example.com/api/v3"
        );
    }

    #[test]
    fn test_extract_error_message_from_github_body() {
        let body = r#"{"message": "Issues are disabled for this repo", "documentation_url": "https://docs.github.com"}"#;
        assert_eq!(
            extract_error_message("https://api.github.com/x", body),
            "Issues are disabled for this repo"
        );
    }

    #[test]
    fn test_extract_error_message_falls_back_to_url() {
        assert_eq!(
            extract_error_message("https://api.github.com/x", "not json"),
            "https://api.github.com/x"
        );
        assert_eq!(
            extract_error_message("https://api.github.com/x", ""),
            "https://api.github.com/x"
        );
    }

    #[test]
    fn test_error_from_response_maps_gone_to_issues_disabled() {
        let err = error_from_response(StatusCode::GONE, "url", "");
        assert!(matches!(err, ApiError::IssuesDisabled));
    }

    #[test]
    fn test_client_default_base_url() {
        let client = GithubClient::new(GithubLogin::ApiToken("t".to_string())).unwrap();
        assert_eq!(client.base_url(), "https://api.github.com");
        assert!(client.login().uses_api_token());
    }
}
