//! Multi-line text editor component.
//!
//! Backs the description field of the report form: multi-line editing,
//! cursor movement, scrolling for content longer than the visible area,
//! a placeholder hint, and inline validation error display.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// A multi-line text editor component.
#[derive(Debug, Clone)]
pub struct TextEditor {
    /// Lines of text content.
    lines: Vec<String>,
    /// Current line (0-indexed).
    cursor_line: usize,
    /// Byte offset within the current line; always on a char boundary.
    cursor_col: usize,
    /// Scroll offset (first visible line).
    scroll: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
}

impl TextEditor {
    /// Create a new text editor with the given content.
    pub fn new(content: &str) -> Self {
        let lines: Vec<String> = if content.is_empty() {
            vec![String::new()]
        } else {
            content.lines().map(String::from).collect()
        };

        Self {
            lines,
            cursor_line: 0,
            cursor_col: 0,
            scroll: 0,
            placeholder: String::new(),
        }
    }

    /// Create an empty text editor.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Get the current content as a string.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Check if the editor holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Total number of characters in the content, newlines included.
    pub fn char_count(&self) -> usize {
        let newlines = self.lines.len() - 1;
        self.lines.iter().map(|l| l.chars().count()).sum::<usize>() + newlines
    }

    /// Get the current cursor line.
    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    /// Get the current cursor column as a byte offset.
    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get the current line.
    fn current_line(&self) -> &String {
        &self.lines[self.cursor_line]
    }

    /// Ensure the cursor column is within bounds and on a char boundary.
    fn clamp_cursor_col(&mut self) {
        let line = &self.lines[self.cursor_line];
        let mut col = self.cursor_col;
        if col > line.len() {
            col = line.len();
        }
        while !line.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor_col = col;
    }

    /// Ensure the scroll position keeps the cursor visible.
    fn ensure_cursor_visible(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        // Cursor above viewport
        if self.cursor_line < self.scroll {
            self.scroll = self.cursor_line;
        }
        // Cursor below viewport
        if self.cursor_line >= self.scroll + visible_height {
            self.scroll = self.cursor_line - visible_height + 1;
        }
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the content was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            // Character input
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                true
            }
            // Enter - insert newline
            (KeyCode::Enter, KeyModifiers::NONE) => {
                self.insert_newline();
                true
            }
            // Backspace - delete character before cursor
            (KeyCode::Backspace, _) => self.delete_backward(),
            // Delete - delete character at cursor
            (KeyCode::Delete, _) => self.delete_forward(),
            // Arrow keys - movement
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.move_left();
                false
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.move_right();
                false
            }
            (KeyCode::Up, KeyModifiers::NONE) => {
                self.move_up();
                false
            }
            (KeyCode::Down, KeyModifiers::NONE) => {
                self.move_down();
                false
            }
            // Home/End
            (KeyCode::Home, _) => {
                self.cursor_col = 0;
                false
            }
            (KeyCode::End, _) => {
                self.cursor_col = self.current_line().len();
                false
            }
            // Ctrl+A - beginning of line (emacs style)
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor_col = 0;
                false
            }
            // Ctrl+E - end of line (emacs style)
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor_col = self.current_line().len();
                false
            }
            // Ctrl+U - delete line content before cursor
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.cursor_col > 0 {
                    let cursor = self.cursor_col;
                    self.lines[self.cursor_line].replace_range(..cursor, "");
                    self.cursor_col = 0;
                    true
                } else {
                    false
                }
            }
            // Ctrl+K - delete from cursor to end of line
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                let line_len = self.current_line().len();
                if self.cursor_col < line_len {
                    let cursor = self.cursor_col;
                    self.lines[self.cursor_line].truncate(cursor);
                    true
                } else if self.cursor_line < self.lines.len() - 1 {
                    // Join with next line
                    let next_line = self.lines.remove(self.cursor_line + 1);
                    self.lines[self.cursor_line].push_str(&next_line);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Insert a character at the cursor position.
    fn insert_char(&mut self, c: char) {
        let cursor = self.cursor_col;
        self.lines[self.cursor_line].insert(cursor, c);
        self.cursor_col += c.len_utf8();
    }

    /// Insert a newline at the cursor position.
    fn insert_newline(&mut self) {
        let cursor = self.cursor_col;
        let line_idx = self.cursor_line;
        let new_line = self.lines[line_idx].split_off(cursor);
        self.lines.insert(line_idx + 1, new_line);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    /// Delete the character before the cursor.
    fn delete_backward(&mut self) -> bool {
        if self.cursor_col > 0 {
            let prev = self.prev_boundary();
            self.lines[self.cursor_line].remove(prev);
            self.cursor_col = prev;
            true
        } else if self.cursor_line > 0 {
            // Join with previous line
            let current_line = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.lines[self.cursor_line].len();
            self.lines[self.cursor_line].push_str(&current_line);
            true
        } else {
            false
        }
    }

    /// Delete the character at the cursor.
    fn delete_forward(&mut self) -> bool {
        let line_len = self.current_line().len();
        if self.cursor_col < line_len {
            let cursor = self.cursor_col;
            self.lines[self.cursor_line].remove(cursor);
            true
        } else if self.cursor_line < self.lines.len() - 1 {
            // Join with next line
            let next_line = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next_line);
            true
        } else {
            false
        }
    }

    /// Byte offset of the char boundary before the cursor on this line.
    fn prev_boundary(&self) -> usize {
        self.current_line()[..self.cursor_col]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Move cursor left.
    fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col = self.prev_boundary();
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.current_line().len();
        }
    }

    /// Move cursor right.
    fn move_right(&mut self) {
        let line = self.current_line();
        if let Some(c) = line[self.cursor_col..].chars().next() {
            self.cursor_col += c.len_utf8();
        } else if self.cursor_line < self.lines.len() - 1 {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    /// Move cursor up.
    fn move_up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.clamp_cursor_col();
        }
    }

    /// Move cursor down.
    fn move_down(&mut self) {
        if self.cursor_line < self.lines.len() - 1 {
            self.cursor_line += 1;
            self.clamp_cursor_col();
        }
    }

    /// Render the editor with a label and an optional inline field error.
    ///
    /// A field error turns the border red and shows the message along the
    /// bottom edge of the block.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `area` - The area to render in
    /// * `label` - The label to display
    /// * `focused` - Whether this editor is focused
    /// * `error` - Validation error for this field, if any
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        focused: bool,
        error: Option<&str>,
    ) {
        // Calculate visible area (accounting for borders)
        let visible_height = area.height.saturating_sub(2) as usize;

        // Ensure cursor is visible
        self.ensure_cursor_visible(visible_height);

        let showing_placeholder = self.is_empty() && !self.placeholder.is_empty();

        // Build lines to display
        let display_lines: Vec<Line> = if showing_placeholder {
            vec![Line::from(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray))]
        } else {
            self.lines
                .iter()
                .skip(self.scroll)
                .take(visible_height)
                .enumerate()
                .map(|(i, line)| {
                    let line_num = self.scroll + i;
                    if focused && line_num == self.cursor_line {
                        // Highlight current line
                        Line::from(line.as_str()).style(Style::default().bg(Color::DarkGray))
                    } else {
                        Line::from(line.as_str())
                    }
                })
                .collect()
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

        let paragraph = Paragraph::new(display_lines).block(block);

        frame.render_widget(paragraph, area);

        // Render cursor if focused
        if focused {
            let col = self.lines[self.cursor_line][..self.cursor_col]
                .chars()
                .count();
            let cursor_x = area.x + 1 + col as u16;
            let cursor_y = area.y + 1 + (self.cursor_line - self.scroll) as u16;

            // Only show cursor if it's within the visible area
            if cursor_y < area.y + area.height - 1 && cursor_x < area.x + area.width - 1 {
                frame.set_cursor_position(Position::new(cursor_x, cursor_y));
            }
        }
    }

    /// Get scroll info for display (current line / total lines).
    pub fn scroll_info(&self) -> (usize, usize) {
        (self.cursor_line + 1, self.lines.len())
    }
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::empty()
    }
}
