//! Form validation for the report screen.
//!
//! Validation is a pure function over the current form input and the host
//! configuration. Every rule is evaluated on every attempt so one field's
//! failure never hides another's; the screen re-renders the whole result.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::ReporterConfig;

/// Email shape check, matching the common mobile-platform pattern:
/// a 1-256 character local part, an alphanumeric-led host label, and one or
/// more dot-separated alphanumeric-led labels.
const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9+._%\-]{1,256}@[A-Za-z0-9][A-Za-z0-9\-]{0,64}(\.[A-Za-z0-9][A-Za-z0-9\-]{0,25})+$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether a string is a pattern-valid email address.
///
/// Used both by validation and by submission routing, which sends remotely
/// only when the email field holds a pattern-valid address.
pub fn is_valid_email(email: &str) -> bool {
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(EMAIL_PATTERN).expect("email pattern compiles")
    });
    regex.is_match(email)
}

/// Current values of the report form fields.
#[derive(Debug, Clone, Copy)]
pub struct FormInput<'a> {
    /// Title field contents.
    pub title: &'a str,
    /// Description field contents.
    pub description: &'a str,
    /// Email field contents.
    pub email: &'a str,
    /// Whether the use-account option (rather than guest) is selected.
    pub use_account_selected: bool,
}

/// Per-field validation outcome. `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    /// Title field error, if any.
    pub title: Option<String>,
    /// Description field error, if any.
    pub description: Option<String>,
    /// Email field error, if any.
    pub email: Option<String>,
}

impl ValidationState {
    /// Whether any field failed.
    pub fn has_errors(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.email.is_some()
    }
}

/// Validate the form against the host configuration.
///
/// All checks run on trimmed input. The email rule applies only in guest
/// mode and only when the host requires a guest email. The title rule is
/// suppressed when the host configured a default title. The description
/// rule depends on the sign of the configured minimum length: 0 makes the
/// description optional, a positive value requires at least that many
/// characters, a negative value requires a non-empty description without a
/// length floor.
pub fn validate(input: &FormInput<'_>, config: &ReporterConfig) -> ValidationState {
    let mut state = ValidationState::default();

    if !input.use_account_selected && config.email_required {
        let email = input.email.trim();
        if email.is_empty() || !is_valid_email(email) {
            state.email = Some("A valid email address is required.".to_string());
        }
    }

    if input.title.trim().is_empty() && config.default_title.is_none() {
        state.title = Some("A title is required.".to_string());
    }

    let min = config.min_description_length;
    if min != 0 {
        let description = input.description.trim();
        if description.is_empty() {
            state.description = Some("A description is required.".to_string());
        } else if min > 0 && description.chars().count() < min as usize {
            state.description = Some(min_length_message(min));
        }
    }

    state
}

/// Pluralized minimum-length error message.
fn min_length_message(min: i32) -> String {
    if min == 1 {
        "Please enter at least 1 character.".to_string()
    } else {
        format!("Please enter at least {} characters.", min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GithubTarget;

    fn config() -> ReporterConfig {
        ReporterConfig::new(GithubTarget::new("octocat", "hello-world"))
    }

    fn input<'a>(title: &'a str, description: &'a str, email: &'a str) -> FormInput<'a> {
        FormInput {
            title,
            description,
            email,
            use_account_selected: false,
        }
    }

    #[test]
    fn test_defaults_pass_with_minimal_input() {
        let state = validate(&input("Crash on save", "", ""), &config());
        assert!(!state.has_errors());
    }

    #[test]
    fn test_empty_title_fails_without_default() {
        let state = validate(&input("", "something", ""), &config());
        assert_eq!(state.title.as_deref(), Some("A title is required."));
    }

    #[test]
    fn test_whitespace_title_fails_without_default() {
        let state = validate(&input("   ", "", ""), &config());
        assert!(state.title.is_some());
    }

    #[test]
    fn test_default_title_suppresses_title_error() {
        let config = config().with_default_title("Bug report");
        let state = validate(&input("", "", ""), &config);
        assert!(state.title.is_none());
    }

    #[test]
    fn test_min_length_zero_allows_empty_description() {
        let state = validate(&input("t", "", ""), &config());
        assert!(state.description.is_none());
    }

    #[test]
    fn test_positive_min_length_requires_description() {
        let config = config().with_min_description_length(3);
        let state = validate(&input("t", "", ""), &config);
        assert_eq!(
            state.description.as_deref(),
            Some("A description is required.")
        );
    }

    #[test]
    fn test_positive_min_length_rejects_short_description() {
        let config = config().with_min_description_length(3);
        let state = validate(&input("t", "ab", ""), &config);
        assert_eq!(
            state.description.as_deref(),
            Some("Please enter at least 3 characters.")
        );
    }

    #[test]
    fn test_min_length_one_uses_singular_message() {
        let config = config().with_min_description_length(1);
        // Whitespace trims to empty, so this hits the required branch.
        let state = validate(&input("t", "  ", ""), &config);
        assert_eq!(
            state.description.as_deref(),
            Some("A description is required.")
        );
        assert_eq!(min_length_message(1), "Please enter at least 1 character.");
    }

    #[test]
    fn test_positive_min_length_accepts_exact_length() {
        let config = config().with_min_description_length(3);
        let state = validate(&input("t", "abc", ""), &config);
        assert!(state.description.is_none());
    }

    #[test]
    fn test_negative_min_length_requires_non_empty_only() {
        let config = config().with_min_description_length(-1);
        let empty = validate(&input("t", "", ""), &config);
        assert_eq!(
            empty.description.as_deref(),
            Some("A description is required.")
        );
        let one_char = validate(&input("t", "x", ""), &config);
        assert!(one_char.description.is_none());
    }

    #[test]
    fn test_email_required_rejects_empty_and_malformed() {
        let config = config().with_email_required(true);
        for email in ["", "   ", "plainaddress", "user@", "user@domain", "user @x.com", "@no-local.com", "user@.com"] {
            let state = validate(&input("t", "", email), &config);
            assert!(state.email.is_some(), "email {:?} should fail", email);
        }
    }

    #[test]
    fn test_email_required_accepts_valid_addresses() {
        let config = config().with_email_required(true);
        for email in ["user@example.com", "first.last+tag@sub.domain.org", "a@b.co"] {
            let state = validate(&input("t", "", email), &config);
            assert!(state.email.is_none(), "email {:?} should pass", email);
        }
    }

    #[test]
    fn test_email_rule_skipped_for_account_option() {
        let config = config().with_email_required(true);
        let mut form = input("t", "", "");
        form.use_account_selected = true;
        let state = validate(&form, &config);
        assert!(state.email.is_none());
    }

    #[test]
    fn test_email_rule_skipped_when_not_required() {
        // A malformed non-empty email passes validation when no guest email
        // is required; routing later falls back to the local flow for it.
        let state = validate(&input("t", "", "not-an-email"), &config());
        assert!(state.email.is_none());
    }

    #[test]
    fn test_all_fields_reported_independently() {
        let config = config()
            .with_email_required(true)
            .with_min_description_length(10);
        let state = validate(&input("", "short", "bad"), &config);
        assert!(state.title.is_some());
        assert!(state.description.is_some());
        assert!(state.email.is_some());
        assert!(state.has_errors());
    }

    #[test]
    fn test_is_valid_email_pattern_edges() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("user%x@host-name.example"));
        assert!(!is_valid_email("no-at.example.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("user@host..com"));
    }
}
