//! Single-line text input component.
//!
//! Provides the title and email fields of the report form: character input
//! and deletion, cursor movement, a placeholder, and inline validation
//! error display (red border plus the message along the bottom edge).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// A single-line text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The current input value.
    value: String,
    /// Cursor byte offset within the value; always on a char boundary.
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input with an initial value.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self {
            value,
            cursor,
            placeholder: String::new(),
        }
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move cursor to end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the input was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            // Character input
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            // Backspace - delete character before cursor
            (KeyCode::Backspace, _) => {
                if let Some(prev) = self.prev_boundary() {
                    self.value.remove(prev);
                    self.cursor = prev;
                    true
                } else {
                    false
                }
            }
            // Delete - delete character at cursor
            (KeyCode::Delete, _) => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            // Left arrow - move cursor left
            (KeyCode::Left, KeyModifiers::NONE) => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                false
            }
            // Right arrow - move cursor right
            (KeyCode::Right, KeyModifiers::NONE) => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
                false
            }
            // Home - move to beginning
            (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            // End - move to end
            (KeyCode::End, _) => {
                self.cursor = self.value.len();
                false
            }
            // Ctrl+A - move to start
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                false
            }
            // Ctrl+E - move to end
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.value.len();
                false
            }
            // Ctrl+U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if !self.value.is_empty() {
                    self.value.clear();
                    self.cursor = 0;
                    true
                } else {
                    false
                }
            }
            // Ctrl+W - delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor > 0 {
                    let before = &self.value[..self.cursor];
                    let word_start = before
                        .rfind(|c: char| !c.is_alphanumeric())
                        .map(|i| i + 1)
                        .unwrap_or(0);
                    self.value.replace_range(word_start..self.cursor, "");
                    self.cursor = word_start;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Byte offset of the char boundary before the cursor.
    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    /// Byte offset of the char boundary after the cursor.
    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    /// Render the input with a label and an optional inline field error.
    ///
    /// A field error turns the border red and shows the message along the
    /// bottom edge of the block.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `area` - The area to render in
    /// * `label` - The label to display
    /// * `focused` - Whether this input is currently focused
    /// * `error` - Validation error for this field, if any
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        focused: bool,
        error: Option<&str>,
    ) {
        let showing_placeholder = self.value.is_empty() && !self.placeholder.is_empty();
        let display = if showing_placeholder {
            self.placeholder.clone()
        } else {
            self.value.clone()
        };

        let style = if showing_placeholder {
            Style::default().fg(Color::DarkGray)
        } else if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let border_style = if error.is_some() {
            Style::default().fg(Color::Red)
        } else if focused {
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

        let mut block = Block::default()
            .title(Span::styled(format!(" {} ", label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);
        if let Some(message) = error {
            block = block.title_bottom(Span::styled(
                format!(" {} ", message),
                Style::default().fg(Color::Red),
            ));
        }

        let input = Paragraph::new(display).style(style).block(block);
        frame.render_widget(input, area);

        // Show cursor if focused
        if focused {
            let cursor_x = area.x + 1 + self.value[..self.cursor].chars().count() as u16;
            let cursor_y = area.y + 1;

            if cursor_x < area.x + area.width - 1 {
                frame.set_cursor_position(Position::new(cursor_x, cursor_y));
            }
        }
    }
}
