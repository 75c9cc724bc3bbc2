//! Validation error types

use std::fmt;

/// Validation error for uploads and query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Multipart field was not sent at all
    MissingField { field: &'static str },

    /// File field was sent without a filename
    EmptyFileName { field: &'static str },

    /// Filename became empty after sanitizing
    UnsafeFileName { field: &'static str },

    /// File extension outside the allowed set
    UnsupportedExtension {
        extension: String,
        allowed: &'static [&'static str],
    },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "No '{}' file part provided.", field),
            Self::EmptyFileName { field } => {
                write!(f, "No file selected for '{}' or filename missing.", field)
            }
            Self::UnsafeFileName { field } => write!(
                f,
                "Invalid filename for '{}' (became empty after securing).",
                field
            ),
            Self::UnsupportedExtension { extension, allowed } => {
                let shown = if extension.is_empty() {
                    "(none)"
                } else {
                    extension.as_str()
                };
                write!(
                    f,
                    "Invalid main file type '{}'. Only {} allowed.",
                    shown,
                    allowed.join(", ")
                )
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::UnsupportedExtension {
            extension: ".exe".into(),
            allowed: &[".xml", ".tsv"],
        };
        assert_eq!(
            err.to_string(),
            "Invalid main file type '.exe'. Only .xml, .tsv allowed."
        );
    }

    #[test]
    fn missing_extension_is_named() {
        let err = ValidationError::UnsupportedExtension {
            extension: String::new(),
            allowed: &[".xml", ".tsv"],
        };
        assert!(err.to_string().contains("'(none)'"));
    }
}
