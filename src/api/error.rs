//! API error types for the GitHub client.

use thiserror::Error;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed - the token or username/password was rejected.
    #[error("Authentication failed: GitHub rejected the credentials")]
    Unauthorized,

    /// Permission denied - the credentials lack access to the repository.
    #[error("Permission denied: no access to this repository")]
    Forbidden,

    /// Repository or endpoint not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The repository has its issue tracker disabled (HTTP 410).
    #[error("Issues are disabled for this repository")]
    IssuesDisabled,

    /// The request was well-formed but rejected (HTTP 422).
    #[error("GitHub rejected the issue: {0}")]
    ValidationFailed(String),

    /// Rate limited by the GitHub API.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// GitHub server error.
    #[error("GitHub server error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A repository spec that is not of the `owner/repo` form.
    #[error("Invalid repository target: {0:?} (expected owner/repo)")]
    InvalidTarget(String),

    /// Keyring error when storing/retrieving tokens.
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(context.to_string()),
            410 => ApiError::IssuesDisabled,
            422 => ApiError::ValidationFailed(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }
}
