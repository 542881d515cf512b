//! Clipboard and browser integration.
//!
//! The submission workflow's terminal effects (copying an issue URL or log
//! text, opening the browser) go through the [`Platform`] trait so the app
//! logic stays testable with a recording stub.

use thiserror::Error;

/// Errors from clipboard or browser integration.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The system clipboard was unavailable or rejected the write.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// The URL could not be handed to a browser.
    #[error("Failed to open browser: {0}")]
    Browser(String),
}

/// Desktop integration points used by the report screen.
pub trait Platform {
    /// Put text on the system clipboard.
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), PlatformError>;

    /// Open a URL in the user's browser.
    fn open_url(&mut self, url: &str) -> Result<(), PlatformError>;
}

/// The real desktop implementation.
///
/// The clipboard handle is opened per call; keeping one open for the
/// process lifetime holds the clipboard selection on X11.
#[derive(Debug, Default)]
pub struct DesktopPlatform;

impl DesktopPlatform {
    /// Create the desktop platform.
    pub fn new() -> Self {
        Self
    }
}

impl Platform for DesktopPlatform {
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), PlatformError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| PlatformError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| PlatformError::Clipboard(e.to_string()))?;
        Ok(())
    }

    fn open_url(&mut self, url: &str) -> Result<(), PlatformError> {
        open::that(url).map_err(|e| PlatformError::Browser(e.to_string()))
    }
}
