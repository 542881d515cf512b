//! Configuration for the report screen.
//!
//! A [`ReporterConfig`] is built by the host application and fixed for the
//! lifetime of the screen; the guest token is the only piece of
//! configuration that can change afterwards, and it lives on the app, not
//! here. The demo binary can also read a [`FileConfig`] from a TOML file.
//! Tokens never go in config files; they belong in the OS keychain.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{ApiError, GithubTarget};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Could not determine the configuration directory")]
    NoConfigDir,

    /// Reading the config file failed.
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// The config file is not valid TOML.
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A config value failed validation.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Host-supplied configuration for the report screen.
///
/// Immutable once handed to the screen. Built with `with_*` methods:
///
/// ```
/// use bugport::api::GithubTarget;
/// use bugport::config::ReporterConfig;
///
/// let config = ReporterConfig::new(GithubTarget::new("octocat", "hello-world"))
///     .with_app_name("myapp")
///     .with_app_version("1.4.2", 142)
///     .with_email_required(true)
///     .with_min_description_length(20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Repository that receives filed issues.
    pub target: GithubTarget,
    /// Host application name; also the keyring entry for the guest token.
    pub app_name: String,
    /// Host application version string, shown in the device snapshot.
    pub app_version_name: String,
    /// Host application numeric build counter; -1 when the host has none.
    pub app_version_code: i64,
    /// Whether guest submissions must carry a reporter email.
    pub email_required: bool,
    /// Override for the browser issue page; defaults to the target's
    /// issue-creation URL when unset.
    pub public_issue_url: Option<String>,
    /// Title used when the reporter leaves the title field blank.
    pub default_title: Option<String>,
    /// Minimum description length: 0 makes the description optional, a
    /// positive value enforces that many characters, a negative value only
    /// requires a non-empty description.
    pub min_description_length: i32,
}

impl ReporterConfig {
    /// Create a configuration for the given target with default options.
    pub fn new(target: GithubTarget) -> Self {
        Self {
            target,
            app_name: "bugport".to_string(),
            app_version_name: "unknown".to_string(),
            app_version_code: -1,
            email_required: false,
            public_issue_url: None,
            default_title: None,
            min_description_length: 0,
        }
    }

    /// Set the host application name.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Set the host application version name and build counter.
    pub fn with_app_version(mut self, version_name: impl Into<String>, version_code: i64) -> Self {
        self.app_version_name = version_name.into();
        self.app_version_code = version_code;
        self
    }

    /// Require guest submissions to carry a reporter email.
    pub fn with_email_required(mut self, required: bool) -> Self {
        self.email_required = required;
        self
    }

    /// Override the browser issue page used by the local flow.
    pub fn with_public_issue_url(mut self, url: impl Into<String>) -> Self {
        self.public_issue_url = Some(url.into());
        self
    }

    /// Set the title used when the title field is left blank.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = Some(title.into());
        self
    }

    /// Set the minimum description length rule.
    pub fn with_min_description_length(mut self, min: i32) -> Self {
        self.min_description_length = min;
        self
    }

    /// The browser issue page for the local flow.
    pub fn issue_page_url(&self) -> String {
        self.public_issue_url
            .clone()
            .unwrap_or_else(|| self.target.new_issue_url())
    }

    /// Validate this configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation
    /// fails.
    pub fn validate(&self) -> Result<()> {
        if self.app_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "app name cannot be empty".to_string(),
            ));
        }

        if let Some(url) = &self.public_issue_url {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ConfigError::ValidationError(format!(
                    "public issue URL '{}' must start with http:// or https://",
                    url
                )));
            }
        }

        Ok(())
    }
}

/// Demo-binary configuration file contents.
///
/// Lives at `{config_dir}/bugport/config.toml`:
///
/// ```toml
/// repository = "octocat/hello-world"
/// email_required = true
/// min_description_length = 20
/// default_title = "Bug report"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    /// Target repository in `owner/repo` form.
    pub repository: String,

    /// Host application name.
    #[serde(default)]
    pub app_name: Option<String>,

    /// Host application version string.
    #[serde(default)]
    pub app_version: Option<String>,

    /// Whether guest submissions must carry a reporter email.
    #[serde(default)]
    pub email_required: bool,

    /// Title used when the title field is left blank.
    #[serde(default)]
    pub default_title: Option<String>,

    /// Minimum description length rule.
    #[serde(default)]
    pub min_description_length: i32,

    /// Override for the browser issue page.
    #[serde(default)]
    pub public_issue_url: Option<String>,
}

impl FileConfig {
    /// Load a config file from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the config file from the default location, if one exists.
    pub fn load_default() -> Result<Option<Self>> {
        let path = default_config_path()?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(Self::load(&path)?))
    }

    /// Convert the file contents into a [`ReporterConfig`].
    ///
    /// # Errors
    ///
    /// Returns a validation error when the repository spec is malformed.
    pub fn into_reporter_config(self) -> Result<ReporterConfig> {
        let target = GithubTarget::parse(&self.repository).map_err(|e| match e {
            ApiError::InvalidTarget(spec) => ConfigError::ValidationError(format!(
                "repository '{}' is not of the form owner/repo",
                spec
            )),
            other => ConfigError::ValidationError(other.to_string()),
        })?;

        let mut config = ReporterConfig::new(target)
            .with_email_required(self.email_required)
            .with_min_description_length(self.min_description_length);
        if let Some(app_name) = self.app_name {
            config = config.with_app_name(app_name);
        }
        if let Some(version) = self.app_version {
            config = config.with_app_version(version, -1);
        }
        if let Some(title) = self.default_title {
            config = config.with_default_title(title);
        }
        if let Some(url) = self.public_issue_url {
            config = config.with_public_issue_url(url);
        }
        config.validate()?;
        Ok(config)
    }
}

/// The default config file path: `{config_dir}/bugport/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("bugport").join("config.toml"))
}
