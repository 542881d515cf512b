//! Centralized error types for bugport.
//!
//! This module provides a unified error hierarchy for the crate with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.
//!
//! Submission failures shown to the reporter do not travel through this
//! type; they fold into the closed [`crate::tasks::SubmissionResult`] set
//! with fixed dialog copy. `AppError` covers everything around the screen:
//! configuration, terminal setup, storage and platform integration.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;
use crate::platform::PlatformError;

/// The main application error type.
///
/// This enum aggregates all error types that can occur around the report
/// screen, providing user-friendly error messages while preserving the
/// underlying error context for debugging.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Clipboard or browser integration errors.
    #[error("{0}")]
    Platform(#[from] PlatformError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// This returns a message suitable for showing to users in the UI,
    /// without technical jargon or stack traces.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::IoError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized => {
                    "Authentication failed. Please check the configured GitHub credentials."
                        .to_string()
                }
                ApiError::Forbidden => {
                    "Access denied. The credentials lack access to this repository.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::IssuesDisabled => {
                    "Issues are disabled for the target repository.".to_string()
                }
                ApiError::ValidationFailed(msg) => format!("GitHub rejected the issue: {}", msg),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => {
                    "GitHub server error. Please try again later.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::InvalidTarget(spec) => {
                    format!("'{}' is not a valid owner/repo target.", spec)
                }
                ApiError::Keyring(_) => {
                    "Could not access secure storage for the guest token.".to_string()
                }
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from GitHub. Please try again.".to_string()
                }
            },
            AppError::Platform(e) => match e {
                PlatformError::Clipboard(_) => {
                    "Could not access the system clipboard.".to_string()
                }
                PlatformError::Browser(_) => {
                    "Could not open a browser. Please open the issue page manually.".to_string()
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error is critical and requires user acknowledgment.
    ///
    /// Critical errors typically indicate issues that prevent the screen
    /// from functioning at all, such as configuration or terminal problems.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_)
                | AppError::Api(ApiError::Unauthorized)
                | AppError::Api(ApiError::InvalidTarget(_))
                | AppError::Terminal(_)
        )
    }

    /// Check if this error is recoverable.
    ///
    /// Recoverable errors can be retried or the user can continue working.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Api(ApiError::RateLimited)
                | AppError::Api(ApiError::ServerError(_))
                | AppError::Api(ApiError::Network(_))
                | AppError::Platform(_)
        )
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_err = ConfigError::NoConfigDir;
        let app_err: AppError = config_err.into();
        assert!(matches!(
            app_err,
            AppError::Config(ConfigError::NoConfigDir)
        ));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let api_err = ApiError::Unauthorized;
        let app_err: AppError = api_err.into();
        assert!(matches!(app_err, AppError::Api(ApiError::Unauthorized)));
    }

    #[test]
    fn test_app_error_from_platform_error() {
        let platform_err = PlatformError::Clipboard("no display".to_string());
        let app_err: AppError = platform_err.into();
        assert!(matches!(app_err, AppError::Platform(_)));
    }

    #[test]
    fn test_user_message_unauthorized() {
        let err = AppError::Api(ApiError::Unauthorized);
        let msg = err.user_message();
        assert!(msg.contains("Authentication failed"));
        assert!(msg.contains("GitHub"));
    }

    #[test]
    fn test_user_message_issues_disabled() {
        let err = AppError::Api(ApiError::IssuesDisabled);
        assert!(err.user_message().contains("disabled"));
    }

    #[test]
    fn test_user_message_invalid_target() {
        let err = AppError::Api(ApiError::InvalidTarget("nope".to_string()));
        assert!(err.user_message().contains("nope"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "repository missing".to_string(),
        ));
        let msg = err.user_message();
        assert!(msg.contains("repository missing"));
    }

    #[test]
    fn test_is_critical_unauthorized() {
        let err = AppError::Api(ApiError::Unauthorized);
        assert!(err.is_critical());
    }

    #[test]
    fn test_is_critical_config() {
        let err = AppError::Config(ConfigError::NoConfigDir);
        assert!(err.is_critical());
    }

    #[test]
    fn test_is_not_critical_rate_limited() {
        let err = AppError::Api(ApiError::RateLimited);
        assert!(!err.is_critical());
    }

    #[test]
    fn test_is_recoverable_rate_limited() {
        let err = AppError::Api(ApiError::RateLimited);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_is_recoverable_platform() {
        let err = AppError::Platform(PlatformError::Browser("no handler".to_string()));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_is_not_recoverable_unauthorized() {
        let err = AppError::Api(ApiError::Unauthorized);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: test error");
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert!(matches!(err, AppError::Other(_)));
        assert_eq!(err.user_message(), "something went wrong");
    }
}
