//! Authentication handling for the GitHub API.
//!
//! This module holds the credential variants used to file issues and the
//! secure guest-token storage via the OS keyring. The guest token a host
//! ships is a low-privilege token for a dedicated reporter account, but it
//! is still kept out of config files and logs.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::error::{ApiError, Result};

/// The keyring service name for bugport guest tokens.
const KEYRING_SERVICE: &str = "bugport";

/// Credentials used to authenticate against the GitHub API.
///
/// The variant decides both the Authorization header and how a 401 response
/// is reported back to the user (bad token vs bad username/password).
#[derive(Clone, PartialEq, Eq)]
pub enum GithubLogin {
    /// A personal access token or guest reporter token.
    ApiToken(String),
    /// Username and password for hosts that still use basic auth.
    UsernamePassword {
        /// GitHub account name.
        username: String,
        /// Account password.
        password: String,
    },
}

impl GithubLogin {
    /// Whether this login authenticates with an API token.
    pub fn uses_api_token(&self) -> bool {
        matches!(self, GithubLogin::ApiToken(_))
    }

    /// Get the authorization header value for HTTP requests.
    ///
    /// Returns `Bearer ...` for tokens and `Basic ...` for username/password.
    pub fn header_value(&self) -> String {
        match self {
            GithubLogin::ApiToken(token) => format!("Bearer {}", token),
            GithubLogin::UsernamePassword { username, password } => {
                let credentials = format!("{}:{}", username, password);
                format!("Basic {}", BASE64.encode(credentials.as_bytes()))
            }
        }
    }

    /// Short credential-kind label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            GithubLogin::ApiToken(_) => "token",
            GithubLogin::UsernamePassword { .. } => "username/password",
        }
    }
}

impl fmt::Debug for GithubLogin {
    // Secrets stay out of debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GithubLogin::ApiToken(_) => write!(f, "GithubLogin::ApiToken(***)"),
            GithubLogin::UsernamePassword { username, .. } => {
                write!(f, "GithubLogin::UsernamePassword {{ username: {:?}, password: *** }}", username)
            }
        }
    }
}

/// Store a guest token in the OS keyring.
///
/// # Arguments
///
/// * `app_name` - The host application name used as the keyring username
/// * `token` - The guest token to store
///
/// # Errors
///
/// Returns an error if the token cannot be stored in the keyring.
pub fn store_guest_token(app_name: &str, token: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, app_name)
        .map_err(|e| ApiError::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(token)
        .map_err(|e| ApiError::Keyring(format!("failed to store token: {}", e)))?;

    Ok(())
}

/// Retrieve a guest token from the OS keyring.
///
/// # Arguments
///
/// * `app_name` - The host application name used as the keyring username
///
/// # Errors
///
/// Returns an error if the token cannot be retrieved from the keyring.
pub fn load_guest_token(app_name: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, app_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve token: {}", e)))
}

/// Delete a guest token from the OS keyring.
///
/// # Arguments
///
/// * `app_name` - The host application name used as the keyring username
///
/// # Errors
///
/// Returns an error if the token cannot be deleted from the keyring.
pub fn delete_guest_token(app_name: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, app_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("failed to delete token: {}", e)))?;

    Ok(())
}

/// Check if a guest token exists in the OS keyring for a host application.
///
/// # Arguments
///
/// * `app_name` - The host application name to check
///
/// # Returns
///
/// `true` if a token exists, `false` otherwise.
pub fn has_guest_token(app_name: &str) -> bool {
    load_guest_token(app_name).is_ok()
}
