//! Loading indicator component.
//!
//! Animated spinner shown while the submission is in flight.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A loading indicator with an animated spinner.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    /// The message to display.
    message: String,
    /// Current spinner frame index.
    spinner_state: usize,
    /// Whether the loading indicator is active.
    active: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    /// Create a new loading indicator.
    pub fn new() -> Self {
        Self {
            message: "Loading...".to_string(),
            spinner_state: 0,
            active: false,
        }
    }

    /// Create a loading indicator with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            spinner_state: 0,
            active: false,
        }
    }

    /// Set the message.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Get the current message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Start the loading indicator.
    pub fn start(&mut self) {
        self.active = true;
        self.spinner_state = 0;
    }

    /// Stop the loading indicator.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Check if the loading indicator is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the spinner animation.
    ///
    /// This should be called on each tick event.
    pub fn tick(&mut self) {
        if self.active {
            self.spinner_state = (self.spinner_state + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Get the current spinner frame.
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_state]
    }

    /// Render the loading indicator centered in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let spinner = self.spinner_frame();
        let text = format!("{} {}", spinner, self.message);
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_indicator_new() {
        let loader = LoadingIndicator::new();
        assert_eq!(loader.message(), "Loading...");
        assert!(!loader.is_active());
    }

    #[test]
    fn test_loading_indicator_with_message() {
        let loader = LoadingIndicator::with_message("Sending bug report...");
        assert_eq!(loader.message(), "Sending bug report...");
    }

    #[test]
    fn test_loading_indicator_start_stop() {
        let mut loader = LoadingIndicator::new();
        assert!(!loader.is_active());

        loader.start();
        assert!(loader.is_active());

        loader.stop();
        assert!(!loader.is_active());
    }

    #[test]
    fn test_loading_indicator_tick() {
        let mut loader = LoadingIndicator::new();
        loader.start();

        let initial_frame = loader.spinner_frame();
        loader.tick();
        let next_frame = loader.spinner_frame();

        // Should advance to next frame
        assert_ne!(initial_frame, next_frame);
    }

    #[test]
    fn test_loading_indicator_tick_inactive() {
        let mut loader = LoadingIndicator::new();
        let initial_state = loader.spinner_state;
        loader.tick();
        // Should not advance when inactive
        assert_eq!(loader.spinner_state, initial_state);
    }

    #[test]
    fn test_loading_indicator_tick_wraps() {
        let mut loader = LoadingIndicator::new();
        loader.start();

        // Tick through all frames
        for _ in 0..SPINNER_FRAMES.len() {
            loader.tick();
        }

        // Should wrap back to first frame
        assert_eq!(loader.spinner_state, 0);
    }

    #[test]
    fn test_loading_indicator_start_resets_frame() {
        let mut loader = LoadingIndicator::new();
        loader.start();
        loader.tick();
        loader.stop();

        loader.start();
        assert_eq!(loader.spinner_state, 0);
    }
}
