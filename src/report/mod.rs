//! The bug report model.
//!
//! A [`Report`] aggregates everything the screen collected: title,
//! description, the device snapshot, host-attached extras and the optional
//! reporter email. It is immutable once built and knows how to compose the
//! issue body that gets submitted to GitHub.

pub mod device;
pub mod extra;
pub mod validation;

pub use device::DeviceInfo;
pub use extra::{ExtraInfo, LOG_EXTRA_KEY};
pub use validation::{is_valid_email, validate, FormInput, ValidationState};

/// A complete bug report ready for submission.
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    description: String,
    device_info: DeviceInfo,
    extra_info: ExtraInfo,
    reporter_email: Option<String>,
}

impl Report {
    /// Build a report from the collected pieces.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        device_info: DeviceInfo,
        extra_info: ExtraInfo,
        reporter_email: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            device_info,
            extra_info,
            reporter_email,
        }
    }

    /// The issue title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The reporter's email, when one was provided.
    pub fn reporter_email(&self) -> Option<&str> {
        self.reporter_email.as_deref()
    }

    /// Compose the issue body.
    ///
    /// Order: description, a `From:` footer when a reporter email is
    /// present, the device-info markdown, then the extra-info markdown when
    /// any extras were attached. Sections are separated by blank lines.
    pub fn body(&self) -> String {
        let mut body = String::from(self.description.trim_end());
        if let Some(email) = &self.reporter_email {
            body.push_str("\n\nFrom: ");
            body.push_str(email);
        }
        body.push_str("\n\n");
        body.push_str(&self.device_info.to_markdown());
        if !self.extra_info.is_empty() {
            body.push('\n');
            body.push_str(&self.extra_info.to_markdown());
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device_info() -> DeviceInfo {
        DeviceInfo::capture("1.0.0", 1)
    }

    #[test]
    fn test_body_contains_description_and_device_info() {
        let report = Report::new(
            "Crash on save",
            "Steps:\n1. Open a file\n2. Press save",
            device_info(),
            ExtraInfo::new(),
            None,
        );
        let body = report.body();
        assert!(body.starts_with("Steps:\n1. Open a file\n2. Press save\n\n"));
        assert!(body.contains("Device info:\n---\n<table>"));
        assert!(!body.contains("From: "));
        assert!(!body.contains("Extra info:"));
    }

    #[test]
    fn test_body_includes_email_footer_before_device_info() {
        let report = Report::new(
            "Crash",
            "It crashed",
            device_info(),
            ExtraInfo::new(),
            Some("user@example.com".to_string()),
        );
        let body = report.body();
        let footer = body.find("From: user@example.com").expect("footer present");
        let device = body.find("Device info:").expect("device section present");
        assert!(footer < device);
    }

    #[test]
    fn test_body_appends_extra_info_last() {
        let mut extra = ExtraInfo::new();
        extra.put("session", "abc");
        let report = Report::new("t", "d", device_info(), extra, None);
        let body = report.body();
        let device = body.find("Device info:").expect("device section present");
        let extras = body.find("Extra info:").expect("extra section present");
        assert!(device < extras);
    }

    #[test]
    fn test_title_accessor() {
        let report = Report::new("A title", "d", device_info(), ExtraInfo::new(), None);
        assert_eq!(report.title(), "A title");
        assert_eq!(report.reporter_email(), None);
    }
}
