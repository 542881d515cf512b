//! Report screen state and event handling.
//!
//! This module implements The Elm Architecture (TEA) pattern: all state
//! changes flow through [`ReporterApp::update`], rendering happens in
//! [`ReporterApp::view`]. The screen itself never spawns tasks; when a
//! remote submission is requested it parks a [`PendingSubmission`] for the
//! caller's event loop to hand to a task spawner, and consumes the result
//! later through [`ReporterApp::handle_message`].

use tracing::{debug, info, trace, warn};

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::Frame;

use crate::api::{GithubLogin, GithubTarget};
use crate::config::ReporterConfig;
use crate::events::Event;
use crate::platform::{DesktopPlatform, Platform};
use crate::report::{
    is_valid_email, validate, DeviceInfo, ExtraInfo, FormInput, Report, LOG_EXTRA_KEY,
};
use crate::tasks::{ReportMessage, SubmissionResult};
use crate::ui::{MessageDialog, ProgressDialog, ReportAction, ReportView};

/// The lifecycle state of the report screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenState {
    /// The form is editable.
    #[default]
    Editing,
    /// A submission is in flight; form input is ignored.
    Submitting,
    /// The screen is closed; the host should tear it down.
    Closed,
}

/// Host extension point, called before any submission path runs.
///
/// Implement this to attach diagnostic key/value pairs to the report, for
/// example a log excerpt under [`LOG_EXTRA_KEY`].
pub trait ReportHost {
    /// Attach extra diagnostic info to the outgoing report.
    fn save_extra_info(&mut self, _extra: &mut ExtraInfo) {}
}

/// A remote submission waiting to be handed to the task spawner.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    /// Credentials for the GitHub call.
    pub login: GithubLogin,
    /// Destination repository.
    pub target: GithubTarget,
    /// The composed report.
    pub report: Report,
}

/// The embeddable bug report screen.
pub struct ReporterApp {
    /// Host configuration, immutable after construction.
    config: ReporterConfig,
    /// Guest token for remote submission; the only mutable configuration.
    guest_token: Option<String>,
    /// Device info captured once at construction.
    device_info: DeviceInfo,
    /// Current lifecycle state.
    state: ScreenState,
    /// The form view.
    view: ReportView,
    /// Progress overlay shown while a submission is in flight.
    progress: ProgressDialog,
    /// Modal shown when a submission fails.
    failure_dialog: MessageDialog,
    /// Whether dismissing the failure dialog closes the screen.
    failure_closes_screen: bool,
    /// Submission parked for the caller's event loop.
    pending_submission: Option<PendingSubmission>,
    /// Clipboard and browser access.
    platform: Box<dyn Platform>,
    /// Host hook for extra diagnostic info.
    host: Option<Box<dyn ReportHost>>,
}

impl ReporterApp {
    /// Create the report screen for the given configuration.
    pub fn new(config: ReporterConfig) -> Self {
        debug!(repo = %config.target, "creating report screen");

        let device_info =
            DeviceInfo::capture(&config.app_version_name, config.app_version_code);
        let view = ReportView::new(&config, &device_info);

        Self {
            config,
            guest_token: None,
            device_info,
            state: ScreenState::Editing,
            view,
            progress: ProgressDialog::new(),
            failure_dialog: MessageDialog::new(),
            failure_closes_screen: false,
            pending_submission: None,
            platform: Box::new(DesktopPlatform::new()),
            host: None,
        }
    }

    /// Replace the platform seam (clipboard and browser access).
    pub fn with_platform(mut self, platform: Box<dyn Platform>) -> Self {
        self.platform = platform;
        self
    }

    /// Attach a host hook for extra diagnostic info.
    pub fn with_host(mut self, host: Box<dyn ReportHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Set or clear the guest token.
    ///
    /// An empty token is treated as absent: the remote path stays
    /// unavailable and submissions route to the local browser flow.
    pub fn set_guest_token(&mut self, token: Option<String>) {
        match token {
            Some(t) if t.is_empty() => {
                warn!("ignoring empty guest token");
                self.guest_token = None;
            }
            other => self.guest_token = other,
        }
    }

    /// Whether guest submission is currently available.
    pub fn account_available(&self) -> bool {
        self.guest_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The host configuration.
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// The device info captured at construction.
    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    /// The current lifecycle state.
    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Whether the host should tear the screen down.
    pub fn should_close(&self) -> bool {
        self.state == ScreenState::Closed
    }

    /// Take the submission parked for the caller's event loop, if any.
    pub fn take_pending_submission(&mut self) -> Option<PendingSubmission> {
        self.pending_submission.take()
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Update the screen state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "terminal resize event");
            }
            Event::Tick => {
                self.progress.tick();
            }
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: crossterm::event::KeyEvent) {
        if self.state == ScreenState::Closed {
            return;
        }

        // Ctrl+C closes the screen from anywhere
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers == KeyModifiers::CONTROL
        {
            info!("report screen closed");
            self.state = ScreenState::Closed;
            return;
        }

        // While a submission is in flight the form is frozen; Escape
        // abandons the screen, the in-flight call keeps running.
        if self.progress.is_open() {
            if key_event.code == KeyCode::Esc {
                info!("screen closed with submission in flight");
                self.progress.close();
                self.state = ScreenState::Closed;
            }
            return;
        }

        // Failure dialog blocks the form until dismissed
        if self.failure_dialog.is_open() {
            match key_event.code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.failure_dialog.dismiss();
                    if self.failure_closes_screen {
                        info!("report screen closed after unrecoverable failure");
                        self.state = ScreenState::Closed;
                    }
                }
                _ => {}
            }
            return;
        }

        let account_available = self.account_available();
        if let Some(action) = self.view.handle_input(key_event, account_available) {
            match action {
                ReportAction::Cancel => {
                    info!("report screen closed without sending");
                    self.state = ScreenState::Closed;
                }
                ReportAction::Submit => self.submit(),
                ReportAction::UseAccount => {
                    info!("use-account selected, opening issue page");
                    self.create_local_issue();
                }
            }
        }
    }

    // ========================================================================
    // Submission workflow
    // ========================================================================

    /// Run the send action: validate, then route to the remote or local flow.
    ///
    /// Routing note: after validation passes, a non-empty pattern-valid
    /// email is what selects the remote path. The option row feeds
    /// validation only; it does not gate remote vs local.
    fn submit(&mut self) {
        if self.state != ScreenState::Editing {
            debug!(state = ?self.state, "ignoring send request");
            return;
        }

        let description = self.view.description();
        let input = FormInput {
            title: self.view.title(),
            description: &description,
            email: self.view.email(),
            use_account_selected: self.view.use_account_selected(),
        };
        let errors = validate(&input, &self.config);
        let has_errors = errors.has_errors();
        self.view.set_errors(errors);
        if has_errors {
            debug!("form validation failed");
            return;
        }

        let email = self.view.email().trim().to_string();
        if self.account_available() && !email.is_empty() && is_valid_email(&email) {
            self.submit_remote(&email);
        } else {
            self.create_local_issue();
        }
    }

    /// Park a remote submission and freeze the form behind the progress
    /// dialog.
    fn submit_remote(&mut self, email: &str) {
        let Some(token) = self.guest_token.clone().filter(|t| !t.is_empty()) else {
            warn!("remote path requested without a token, falling back to issue page");
            self.create_local_issue();
            return;
        };

        let trimmed_title = self.view.title().trim().to_string();
        let title = if trimmed_title.is_empty() {
            // Validation guarantees a default exists when the field is blank
            self.config.default_title.clone().unwrap_or_default()
        } else {
            trimmed_title
        };

        let extra = self.collect_extra_info();
        let report = Report::new(
            title,
            self.view.description(),
            self.device_info.clone(),
            extra,
            Some(email.to_string()),
        );

        info!(repo = %self.config.target, "submitting bug report");
        self.pending_submission = Some(PendingSubmission {
            login: GithubLogin::ApiToken(token),
            target: self.config.target.clone(),
            report,
        });
        self.progress.open();
        self.state = ScreenState::Submitting;
    }

    /// The local flow: copy any captured log text, open the issue page in
    /// the browser and close the screen.
    fn create_local_issue(&mut self) {
        let extra = self.collect_extra_info();
        if let Some(log) = extra.get(LOG_EXTRA_KEY) {
            if let Err(error) = self.platform.copy_to_clipboard(log) {
                warn!(%error, "failed to copy log text to clipboard");
            }
        }

        let url = self.config.issue_page_url();
        info!(%url, "opening issue page in browser");
        if let Err(error) = self.platform.open_url(&url) {
            warn!(%error, "failed to open browser");
        }
        self.state = ScreenState::Closed;
    }

    /// Collect extra diagnostic info through the host hook.
    fn collect_extra_info(&mut self) -> ExtraInfo {
        let mut extra = ExtraInfo::new();
        if let Some(host) = self.host.as_mut() {
            host.save_extra_info(&mut extra);
        }
        extra
    }

    /// Apply a finished submission.
    ///
    /// The progress dialog is dismissed unconditionally. If the screen was
    /// closed while the call was in flight, the result is dropped without
    /// any further effects.
    pub fn handle_message(&mut self, message: ReportMessage) {
        let ReportMessage::SubmissionFinished(result) = message;
        self.progress.close();

        if self.state == ScreenState::Closed {
            debug!("screen already closed, dropping submission result");
            return;
        }

        match result {
            SubmissionResult::Ok { issue_url } => {
                info!(url = %issue_url, "bug report submitted");
                if let Err(error) = self.platform.copy_to_clipboard(&issue_url) {
                    warn!(%error, "failed to copy issue url to clipboard");
                }
                if let Err(error) = self.platform.open_url(&issue_url) {
                    warn!(%error, "failed to open browser");
                }
                self.state = ScreenState::Closed;
            }
            failure => {
                warn!(result = ?failure, "bug report submission failed");
                self.failure_closes_screen = failure.closes_screen_on_dismiss();
                if let Some(message) = failure.failure_message() {
                    self.failure_dialog.open("Submission failed", message);
                }
                self.state = ScreenState::Editing;
            }
        }
    }

    // ========================================================================
    // View
    // ========================================================================

    /// Render the screen.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let account_available = self.account_available();

        self.view.render(frame, area, account_available);
        self.progress.render(frame, area);
        self.failure_dialog.render(frame, area);
    }
}
