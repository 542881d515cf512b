//! Host-attached key/value diagnostics for bug reports.

use std::fmt;

/// Key under which hosts attach log text.
///
/// When the local/browser flow runs and this key is present, its value is
/// copied to the clipboard so the reporter can paste it into the issue form.
pub const LOG_EXTRA_KEY: &str = "log";

/// Ordered string-to-string diagnostics attached by the host application.
///
/// Insertion order is preserved in both serializations. Re-inserting an
/// existing key replaces its value in place without moving the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraInfo {
    entries: Vec<(String, String)>,
}

impl ExtraInfo {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key/value pair.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether any entries are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the entries as a markdown fragment for the issue body.
    ///
    /// Same table shape as the device-info fragment. Empty collections
    /// render to an empty string so the body composition can skip them.
    pub fn to_markdown(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut md = String::from("Extra info:\n---\n<table>\n");
        for (key, value) in self.iter() {
            md.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>\n", key, value));
        }
        md.push_str("</table>\n");
        md
    }
}

impl fmt::Display for ExtraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_preserves_insertion_order() {
        let mut extra = ExtraInfo::new();
        extra.put("first", "1");
        extra.put("second", "2");
        extra.put("third", "3");

        let keys: Vec<&str> = extra.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_put_replaces_in_place() {
        let mut extra = ExtraInfo::new();
        extra.put("first", "1");
        extra.put("second", "2");
        extra.put("first", "one");

        let entries: Vec<(&str, &str)> = extra.iter().collect();
        assert_eq!(entries, vec![("first", "one"), ("second", "2")]);
        assert_eq!(extra.len(), 2);
    }

    #[test]
    fn test_get() {
        let mut extra = ExtraInfo::new();
        extra.put(LOG_EXTRA_KEY, "panic at src/main.rs:42");
        assert_eq!(extra.get(LOG_EXTRA_KEY), Some("panic at src/main.rs:42"));
        assert_eq!(extra.get("missing"), None);
    }

    #[test]
    fn test_empty_markdown_is_empty_string() {
        assert_eq!(ExtraInfo::new().to_markdown(), "");
    }

    #[test]
    fn test_markdown_table() {
        let mut extra = ExtraInfo::new();
        extra.put("session", "abc123");
        extra.put(LOG_EXTRA_KEY, "last 50 lines");

        let md = extra.to_markdown();
        assert!(md.starts_with("Extra info:\n---\n<table>\n"));
        assert!(md.contains("<tr><td>session</td><td>abc123</td></tr>"));
        assert!(md.contains("<tr><td>log</td><td>last 50 lines</td></tr>"));
        assert!(md.ends_with("</table>\n"));
    }
}
