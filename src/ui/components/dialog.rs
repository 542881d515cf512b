//! Modal dialog components.
//!
//! Provides the overlays the report screen shows on top of the form: a
//! progress dialog while a submission is in flight and a message dialog
//! for submission failures.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::loading::LoadingIndicator;

/// Compute a centered rectangle of the given size within an area.
///
/// The result is clamped to fit inside the area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// A modal overlay shown while the report is being sent.
///
/// While open it swallows all keyboard input, so the form underneath
/// cannot change until the submission finishes.
#[derive(Debug, Clone)]
pub struct ProgressDialog {
    /// Animated spinner and message.
    loader: LoadingIndicator,
}

impl Default for ProgressDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressDialog {
    /// Create a new, closed progress dialog.
    pub fn new() -> Self {
        Self {
            loader: LoadingIndicator::with_message("Sending bug report..."),
        }
    }

    /// Open the dialog.
    pub fn open(&mut self) {
        self.loader.start();
    }

    /// Close the dialog.
    pub fn close(&mut self) {
        self.loader.stop();
    }

    /// Check whether the dialog is open.
    pub fn is_open(&self) -> bool {
        self.loader.is_active()
    }

    /// Advance the spinner animation. Call on each tick event.
    pub fn tick(&mut self) {
        self.loader.tick();
    }

    /// Render the dialog centered over the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.is_open() {
            return;
        }

        let dialog_area = centered_rect(40, 5, area);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(block, dialog_area);

        let inner = Rect::new(
            dialog_area.x + 1,
            dialog_area.y + 2,
            dialog_area.width.saturating_sub(2),
            1,
        );
        self.loader.render(frame, inner);
    }
}

/// A modal dialog showing a message that must be dismissed.
#[derive(Debug, Clone, Default)]
pub struct MessageDialog {
    /// Dialog title.
    title: String,
    /// Message body.
    message: String,
    /// Whether the dialog is currently shown.
    visible: bool,
}

impl MessageDialog {
    /// Create a new, closed message dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog with a title and message.
    pub fn open(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.title = title.into();
        self.message = message.into();
        self.visible = true;
    }

    /// Dismiss the dialog.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Check whether the dialog is open.
    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Get the current message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render the dialog centered over the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let width = 56.min(area.width.saturating_sub(4));
        let dialog_area = centered_rect(width, 7, area);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(
                Line::from(Span::styled(
                    " Enter to dismiss ",
                    Style::default().fg(Color::DarkGray),
                ))
                .alignment(Alignment::Right),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        let paragraph = Paragraph::new(self.message.as_str())
            .block(block)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, dialog_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(40, 10, area);
        assert_eq!(rect, Rect::new(30, 15, 40, 10));
    }

    #[test]
    fn test_centered_rect_offset_area() {
        let area = Rect::new(10, 5, 20, 10);
        let rect = centered_rect(10, 4, area);
        assert_eq!(rect, Rect::new(15, 8, 10, 4));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        let rect = centered_rect(40, 10, area);
        assert_eq!(rect, Rect::new(0, 0, 10, 4));
    }

    #[test]
    fn test_progress_dialog_open_close() {
        let mut dialog = ProgressDialog::new();
        assert!(!dialog.is_open());

        dialog.open();
        assert!(dialog.is_open());

        dialog.close();
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_progress_dialog_tick_when_open() {
        let mut dialog = ProgressDialog::new();
        dialog.open();
        dialog.tick();
        assert!(dialog.is_open());
    }

    #[test]
    fn test_message_dialog_open_dismiss() {
        let mut dialog = MessageDialog::new();
        assert!(!dialog.is_open());

        dialog.open("Error", "Something went wrong.");
        assert!(dialog.is_open());
        assert_eq!(dialog.message(), "Something went wrong.");

        dialog.dismiss();
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_message_dialog_reopen_replaces_message() {
        let mut dialog = MessageDialog::new();
        dialog.open("Error", "First");
        dialog.dismiss();
        dialog.open("Error", "Second");
        assert_eq!(dialog.message(), "Second");
    }
}
