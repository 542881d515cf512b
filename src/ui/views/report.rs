//! Bug report form view.
//!
//! The single screen of the reporter: title and description fields, a
//! collapsible device info panel, the send-via options row, the reporter
//! email field and the send button. The view owns the form widgets and
//! focus state; submission decisions belong to the app layer, which
//! receives them as [`ReportAction`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::ReporterConfig;
use crate::report::{DeviceInfo, ValidationState};
use crate::ui::components::{TextEditor, TextInput};

// ============================================================================
// Report View
// ============================================================================

/// Actions returned from the report view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAction {
    /// Close the screen without sending.
    Cancel,
    /// The send button was activated.
    Submit,
    /// The use-account option was selected.
    UseAccount,
}

/// The form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    /// Title input.
    Title,
    /// Description editor.
    Description,
    /// Collapsible device info panel.
    DeviceInfo,
    /// Send-via options row.
    Options,
    /// Reporter email input.
    Email,
    /// Send button.
    Send,
}

/// Hint shown in the empty description editor.
const DESCRIPTION_PLACEHOLDER: &str = "What happened? What did you expect to happen?";

/// Focus cycle order.
const FOCUS_ORDER: [FormFocus; 6] = [
    FormFocus::Title,
    FormFocus::Description,
    FormFocus::DeviceInfo,
    FormFocus::Options,
    FormFocus::Email,
    FormFocus::Send,
];

/// Which submission option is selected in the options row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SendOption {
    /// Send through the host account (runs the local browser flow).
    UseAccount,
    /// Send as guest with the configured token.
    Guest,
}

/// The bug report form.
pub struct ReportView {
    /// Title text input.
    title_input: TextInput,
    /// Description text editor.
    description_editor: TextEditor,
    /// Reporter email input.
    email_input: TextInput,
    /// Currently focused field.
    focus: FormFocus,
    /// Selected option in the send-via row.
    selected_option: SendOption,
    /// Whether the device info panel is expanded.
    device_expanded: bool,
    /// Rendered device info, one row per line.
    device_text: String,
    /// Whether a guest email is required by configuration.
    email_required: bool,
    /// Field errors from the last submission attempt.
    errors: ValidationState,
}

impl ReportView {
    /// Create the form for the given configuration and captured device info.
    pub fn new(config: &ReporterConfig, device_info: &DeviceInfo) -> Self {
        let mut title_input = TextInput::new();
        match &config.default_title {
            Some(default) => title_input.set_placeholder(default.clone()),
            None => title_input.set_placeholder("Short summary of the problem"),
        }

        let mut description_editor = TextEditor::empty();
        description_editor.set_placeholder(DESCRIPTION_PLACEHOLDER);

        let mut email_input = TextInput::new();
        email_input.set_placeholder("you@example.com");

        Self {
            title_input,
            description_editor,
            email_input,
            focus: FormFocus::Title,
            selected_option: SendOption::Guest,
            device_expanded: false,
            device_text: device_info.to_string(),
            email_required: config.email_required,
            errors: ValidationState::default(),
        }
    }

    /// Get the title field contents.
    pub fn title(&self) -> &str {
        self.title_input.value()
    }

    /// Set the title field contents.
    pub fn set_title(&mut self, value: &str) {
        self.title_input.set_value(value);
    }

    /// Get the description field contents.
    pub fn description(&self) -> String {
        self.description_editor.content()
    }

    /// Set the description field contents.
    pub fn set_description(&mut self, content: &str) {
        let mut editor = TextEditor::new(content);
        editor.set_placeholder(DESCRIPTION_PLACEHOLDER);
        self.description_editor = editor;
    }

    /// Get the email field contents.
    pub fn email(&self) -> &str {
        self.email_input.value()
    }

    /// Set the email field contents.
    pub fn set_email(&mut self, value: &str) {
        self.email_input.set_value(value);
    }

    /// Whether the use-account option is currently selected.
    pub fn use_account_selected(&self) -> bool {
        self.selected_option == SendOption::UseAccount
    }

    /// Force the option selection without going through the key handler.
    #[cfg(test)]
    pub fn set_use_account_selected(&mut self, selected: bool) {
        self.selected_option = if selected {
            SendOption::UseAccount
        } else {
            SendOption::Guest
        };
    }

    /// Get the currently focused field.
    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    /// Whether the device info panel is expanded.
    pub fn device_expanded(&self) -> bool {
        self.device_expanded
    }

    /// Replace the field errors shown on the form.
    pub fn set_errors(&mut self, errors: ValidationState) {
        self.errors = errors;
    }

    /// Get the field errors currently shown.
    pub fn errors(&self) -> &ValidationState {
        &self.errors
    }

    // ------------------------------------------------------------------
    // Field availability
    // ------------------------------------------------------------------

    /// The options row exists only while guest submission is available.
    fn is_available(&self, focus: FormFocus, account_available: bool) -> bool {
        match focus {
            FormFocus::Options => account_available,
            FormFocus::Email => self.email_visible(account_available),
            _ => true,
        }
    }

    /// The email panel hides while the use-account option is selected.
    fn email_visible(&self, account_available: bool) -> bool {
        !(account_available && self.selected_option == SendOption::UseAccount)
    }

    fn focus_next(&mut self, account_available: bool) {
        let mut idx = FOCUS_ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        loop {
            idx = (idx + 1) % FOCUS_ORDER.len();
            if self.is_available(FOCUS_ORDER[idx], account_available) {
                self.focus = FOCUS_ORDER[idx];
                return;
            }
        }
    }

    fn focus_prev(&mut self, account_available: bool) {
        let mut idx = FOCUS_ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        loop {
            idx = (idx + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len();
            if self.is_available(FOCUS_ORDER[idx], account_available) {
                self.focus = FOCUS_ORDER[idx];
                return;
            }
        }
    }

    // ------------------------------------------------------------------
    // Input handling
    // ------------------------------------------------------------------

    /// Handle keyboard input.
    ///
    /// Returns an optional action to be handled by the app layer.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        account_available: bool,
    ) -> Option<ReportAction> {
        // Availability may have changed since the last keypress
        if !self.is_available(self.focus, account_available) {
            self.focus_next(account_available);
        }

        match (key.code, key.modifiers) {
            // Tab - next field
            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.focus_next(account_available);
                None
            }
            // Shift+Tab or BackTab - previous field
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.focus_prev(account_available);
                None
            }
            // Escape - close without sending
            (KeyCode::Esc, _) => Some(ReportAction::Cancel),
            (KeyCode::Enter, KeyModifiers::NONE) => self.handle_enter(account_available),
            // Handle field-specific input
            _ => self.handle_field_input(key, account_available),
        }
    }

    /// Enter submits on the send button, toggles the device panel, inserts
    /// a newline in the description and advances focus everywhere else.
    fn handle_enter(&mut self, account_available: bool) -> Option<ReportAction> {
        match self.focus {
            FormFocus::Send => Some(ReportAction::Submit),
            FormFocus::DeviceInfo => {
                self.device_expanded = !self.device_expanded;
                None
            }
            FormFocus::Description => {
                self.description_editor
                    .handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
                None
            }
            _ => {
                self.focus_next(account_available);
                None
            }
        }
    }

    /// Handle input for the focused field.
    fn handle_field_input(
        &mut self,
        key: KeyEvent,
        _account_available: bool,
    ) -> Option<ReportAction> {
        match self.focus {
            FormFocus::Title => {
                self.title_input.handle_input(key);
                None
            }
            FormFocus::Description => {
                self.description_editor.handle_input(key);
                None
            }
            FormFocus::Email => {
                self.email_input.handle_input(key);
                None
            }
            FormFocus::DeviceInfo => {
                if key.code == KeyCode::Char(' ') {
                    self.device_expanded = !self.device_expanded;
                }
                None
            }
            FormFocus::Options => self.handle_option_input(key),
            FormFocus::Send => None,
        }
    }

    /// Handle option row input.
    ///
    /// Selecting the use-account option is itself the action: it emits
    /// immediately rather than waiting for the send button.
    fn handle_option_input(&mut self, key: KeyEvent) -> Option<ReportAction> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.select_option(SendOption::UseAccount),
            KeyCode::Right | KeyCode::Char('l') => self.select_option(SendOption::Guest),
            KeyCode::Char(' ') => {
                let other = match self.selected_option {
                    SendOption::UseAccount => SendOption::Guest,
                    SendOption::Guest => SendOption::UseAccount,
                };
                self.select_option(other)
            }
            _ => None,
        }
    }

    fn select_option(&mut self, option: SendOption) -> Option<ReportAction> {
        if self.selected_option == option {
            return None;
        }
        self.selected_option = option;
        match option {
            SendOption::UseAccount => Some(ReportAction::UseAccount),
            SendOption::Guest => None,
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Render the form into the given area.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, account_available: bool) {
        let block = Block::default()
            .title(Span::styled(
                " Report a bug ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let device_height = if self.device_expanded {
            (self.device_text.lines().count() as u16 + 2).min(17)
        } else {
            3
        };

        let mut constraints = vec![
            Constraint::Length(3),             // Title
            Constraint::Min(5),                // Description
            Constraint::Length(device_height), // Device info
        ];
        let options_visible = account_available;
        if options_visible {
            constraints.push(Constraint::Length(3));
        }
        let email_visible = self.email_visible(account_available);
        if email_visible {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(1)); // Send button
        constraints.push(Constraint::Length(1)); // Key hints

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(inner);

        let mut idx = 0;
        self.title_input.render(
            frame,
            chunks[idx],
            "Title",
            self.focus == FormFocus::Title,
            self.errors.title.as_deref(),
        );
        idx += 1;

        self.description_editor.render(
            frame,
            chunks[idx],
            "Description",
            self.focus == FormFocus::Description,
            self.errors.description.as_deref(),
        );
        idx += 1;

        self.render_device_panel(frame, chunks[idx]);
        idx += 1;

        if options_visible {
            self.render_options_row(frame, chunks[idx]);
            idx += 1;
        }

        if email_visible {
            self.email_input.render(
                frame,
                chunks[idx],
                self.email_label(),
                self.focus == FormFocus::Email,
                self.errors.email.as_deref(),
            );
            idx += 1;
        }

        self.render_send_button(frame, chunks[idx]);
        idx += 1;

        self.render_hints(frame, chunks[idx]);
    }

    /// Render the collapsible device info panel.
    fn render_device_panel(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FormFocus::DeviceInfo;

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .title(Span::styled(" Device info ", title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let paragraph = if self.device_expanded {
            Paragraph::new(self.device_text.as_str()).block(block)
        } else {
            Paragraph::new(Span::styled(
                "Press Enter to view",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block)
        };

        frame.render_widget(paragraph, area);
    }

    /// Render the send-via options row.
    fn render_options_row(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FormFocus::Options;

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let option_style = |selected: bool| {
            if selected && focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };

        let account_selected = self.selected_option == SendOption::UseAccount;
        let line = Line::from(vec![
            Span::styled(
                format!("{} Use account", marker(account_selected)),
                option_style(account_selected),
            ),
            Span::raw("    "),
            Span::styled(
                format!("{} {}", marker(!account_selected), self.guest_option_label()),
                option_style(!account_selected),
            ),
        ]);

        let block = Block::default()
            .title(Span::styled(" Send via ", title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    /// Render the send button.
    fn render_send_button(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FormFocus::Send;

        let button_style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };

        let button = Paragraph::new(Span::styled(" [Enter] Send bug report ", button_style))
            .alignment(Alignment::Center);
        frame.render_widget(button, area);
    }

    /// Render the key hint line.
    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = Paragraph::new(Span::styled(
            "Tab: next field  Enter: send  Esc: close",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hints, area);
    }

    /// Email field caption, depending on whether a guest email is required.
    fn email_label(&self) -> &'static str {
        if self.email_required {
            "Email"
        } else {
            "Email (optional)"
        }
    }

    /// Guest option label, depending on whether a guest email is required.
    fn guest_option_label(&self) -> &'static str {
        if self.email_required {
            "Send as guest"
        } else {
            "Send anonymously"
        }
    }
}

/// Radio marker for the options row.
fn marker(selected: bool) -> &'static str {
    if selected {
        "(•)"
    } else {
        "( )"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GithubTarget;

    fn test_config() -> ReporterConfig {
        let target = GithubTarget::parse("acme/app").unwrap();
        ReporterConfig::new(target)
    }

    fn test_view(config: &ReporterConfig) -> ReportView {
        let device_info = DeviceInfo::capture("1.0.0", 1);
        ReportView::new(config, &device_info)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_view_initial_state() {
        let config = test_config();
        let view = test_view(&config);

        assert_eq!(view.focus(), FormFocus::Title);
        assert!(!view.use_account_selected());
        assert!(!view.device_expanded());
        assert!(view.title().is_empty());
        assert!(view.description().is_empty());
        assert!(view.email().is_empty());
        assert!(!view.errors().has_errors());
    }

    #[test]
    fn test_typing_routes_to_focused_field() {
        let config = test_config();
        let mut view = test_view(&config);

        view.handle_input(key(KeyCode::Char('a')), false);
        assert_eq!(view.title(), "a");

        view.handle_input(key(KeyCode::Tab), false);
        view.handle_input(key(KeyCode::Char('b')), false);
        assert_eq!(view.description(), "b");
        assert_eq!(view.title(), "a");
    }

    #[test]
    fn test_focus_cycle_without_account_skips_options() {
        let config = test_config();
        let mut view = test_view(&config);

        let expected = [
            FormFocus::Description,
            FormFocus::DeviceInfo,
            FormFocus::Email,
            FormFocus::Send,
            FormFocus::Title,
        ];
        for focus in expected {
            view.handle_input(key(KeyCode::Tab), false);
            assert_eq!(view.focus(), focus);
        }
    }

    #[test]
    fn test_focus_cycle_with_account_includes_options() {
        let config = test_config();
        let mut view = test_view(&config);

        let expected = [
            FormFocus::Description,
            FormFocus::DeviceInfo,
            FormFocus::Options,
            FormFocus::Email,
            FormFocus::Send,
            FormFocus::Title,
        ];
        for focus in expected {
            view.handle_input(key(KeyCode::Tab), true);
            assert_eq!(view.focus(), focus);
        }
    }

    #[test]
    fn test_backtab_cycles_in_reverse() {
        let config = test_config();
        let mut view = test_view(&config);

        view.handle_input(key(KeyCode::BackTab), false);
        assert_eq!(view.focus(), FormFocus::Send);
        view.handle_input(key(KeyCode::BackTab), false);
        assert_eq!(view.focus(), FormFocus::Email);
    }

    #[test]
    fn test_escape_cancels_from_any_focus() {
        let config = test_config();
        let mut view = test_view(&config);

        assert_eq!(
            view.handle_input(key(KeyCode::Esc), false),
            Some(ReportAction::Cancel)
        );

        view.handle_input(key(KeyCode::Tab), false);
        assert_eq!(
            view.handle_input(key(KeyCode::Esc), false),
            Some(ReportAction::Cancel)
        );
    }

    #[test]
    fn test_enter_on_send_submits() {
        let config = test_config();
        let mut view = test_view(&config);

        while view.focus() != FormFocus::Send {
            view.handle_input(key(KeyCode::Tab), false);
        }
        assert_eq!(
            view.handle_input(key(KeyCode::Enter), false),
            Some(ReportAction::Submit)
        );
    }

    #[test]
    fn test_enter_advances_from_title() {
        let config = test_config();
        let mut view = test_view(&config);

        assert_eq!(view.handle_input(key(KeyCode::Enter), false), None);
        assert_eq!(view.focus(), FormFocus::Description);
    }

    #[test]
    fn test_enter_inserts_newline_in_description() {
        let config = test_config();
        let mut view = test_view(&config);

        view.handle_input(key(KeyCode::Tab), false);
        view.handle_input(key(KeyCode::Char('a')), false);
        view.handle_input(key(KeyCode::Enter), false);
        view.handle_input(key(KeyCode::Char('b')), false);
        assert_eq!(view.description(), "a\nb");
        assert_eq!(view.focus(), FormFocus::Description);
    }

    #[test]
    fn test_device_panel_toggles() {
        let config = test_config();
        let mut view = test_view(&config);

        view.handle_input(key(KeyCode::Tab), false);
        view.handle_input(key(KeyCode::Tab), false);
        assert_eq!(view.focus(), FormFocus::DeviceInfo);

        view.handle_input(key(KeyCode::Enter), false);
        assert!(view.device_expanded());
        view.handle_input(key(KeyCode::Enter), false);
        assert!(!view.device_expanded());

        view.handle_input(key(KeyCode::Char(' ')), false);
        assert!(view.device_expanded());
    }

    #[test]
    fn test_selecting_use_account_emits_action() {
        let config = test_config();
        let mut view = test_view(&config);

        while view.focus() != FormFocus::Options {
            view.handle_input(key(KeyCode::Tab), true);
        }
        let action = view.handle_input(key(KeyCode::Left), true);
        assert_eq!(action, Some(ReportAction::UseAccount));
        assert!(view.use_account_selected());
    }

    #[test]
    fn test_selecting_guest_again_is_silent() {
        let config = test_config();
        let mut view = test_view(&config);

        while view.focus() != FormFocus::Options {
            view.handle_input(key(KeyCode::Tab), true);
        }
        assert_eq!(view.handle_input(key(KeyCode::Right), true), None);
        assert!(!view.use_account_selected());
    }

    #[test]
    fn test_email_hidden_while_account_selected() {
        let config = test_config();
        let mut view = test_view(&config);

        while view.focus() != FormFocus::Options {
            view.handle_input(key(KeyCode::Tab), true);
        }
        view.handle_input(key(KeyCode::Left), true);
        assert!(!view.email_visible(true));

        // Focus moves past the hidden email field
        view.handle_input(key(KeyCode::Tab), true);
        assert_eq!(view.focus(), FormFocus::Send);
    }

    #[test]
    fn test_focus_leaves_options_when_account_becomes_unavailable() {
        let config = test_config();
        let mut view = test_view(&config);

        while view.focus() != FormFocus::Options {
            view.handle_input(key(KeyCode::Tab), true);
        }
        // Token was cleared since the last keypress
        view.handle_input(key(KeyCode::Char('x')), false);
        assert_ne!(view.focus(), FormFocus::Options);
    }

    #[test]
    fn test_set_errors() {
        let config = test_config();
        let mut view = test_view(&config);

        let errors = ValidationState {
            title: Some("A title is required.".to_string()),
            ..ValidationState::default()
        };
        view.set_errors(errors);
        assert!(view.errors().has_errors());

        view.set_errors(ValidationState::default());
        assert!(!view.errors().has_errors());
    }

    #[test]
    fn test_labels_follow_email_required() {
        let config = test_config().with_email_required(true);
        let view = test_view(&config);
        assert_eq!(view.email_label(), "Email");
        assert_eq!(view.guest_option_label(), "Send as guest");

        let config = test_config();
        let view = test_view(&config);
        assert_eq!(view.email_label(), "Email (optional)");
        assert_eq!(view.guest_option_label(), "Send anonymously");
    }
}
