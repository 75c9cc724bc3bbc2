//! Upload filename sanitizing
//!
//! Client-supplied names are reduced to a flat, ASCII-only name before they
//! touch the filesystem: separators become spaces, whitespace runs collapse
//! to `_`, everything outside `[A-Za-z0-9_.-]` is dropped and leading or
//! trailing dots/underscores are stripped.

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Characters kept after whitespace has been folded into underscores.
static UNSAFE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("invalid filename regex"));

/// A filename safe to join onto an upload subdirectory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeFileName(String);

impl SafeFileName {
    /// Sanitize a client filename.
    ///
    /// `field` names the form field for the error message.
    ///
    /// # Example
    /// ```
    /// use gapfill_server::models::SafeFileName;
    ///
    /// let name = SafeFileName::new("My Model v2.xml", "modelUpload").unwrap();
    /// assert_eq!(name.as_str(), "My_Model_v2.xml");
    /// assert!(SafeFileName::new("../..", "modelUpload").is_err());
    /// ```
    pub fn new(raw: &str, field: &'static str) -> Result<Self, ValidationError> {
        let ascii: String = raw.chars().filter(char::is_ascii).collect();
        let spaced = ascii.replace(['/', '\\'], " ");
        let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
        let cleaned = UNSAFE_CHARS_RE.replace_all(&joined, "");
        let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

        if trimmed.is_empty() {
            return Err(ValidationError::UnsafeFileName { field });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Lowercased extension including the leading dot, or empty.
    pub fn extension(&self) -> String {
        Path::new(&self.0)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default()
    }

    /// Get the filename as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeFileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
