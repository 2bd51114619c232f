//! Core domain types for markdrop documents.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::{MarkdropError, Result};

/// File extension (without the dot) used for every stored document.
pub const DOCUMENT_EXTENSION: &str = "md";

// ---------------------------------------------------------------------------
// DocumentName
// ---------------------------------------------------------------------------

/// Character set for document names: alphanumeric first character, then
/// alphanumerics, dots, underscores, and dashes.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex"));

/// A validated document name, usable as both a storage key and a URL segment.
///
/// Construction is the only place name safety is enforced: a `DocumentName`
/// never contains path separators or a `..` sequence, so joining it onto the
/// storage root cannot resolve outside that root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentName(String);

impl DocumentName {
    /// Validate and wrap a raw name. Rejects anything outside the safe
    /// character set, plus `..` sequences even when the charset allows the
    /// individual dots.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !NAME_RE.is_match(&name) || name.contains("..") {
            return Err(MarkdropError::invalid_name(name));
        }
        Ok(Self(name))
    }

    /// The validated name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The on-disk file name for this document (`<name>.md`).
    pub fn file_name(&self) -> String {
        format!("{}.{DOCUMENT_EXTENSION}", self.0)
    }
}

impl std::fmt::Display for DocumentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentName {
    type Err = MarkdropError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// DocumentEntry
// ---------------------------------------------------------------------------

/// One row of the document catalog.
///
/// The catalog is recomputed from the storage directory on every listing;
/// entries are never persisted independently.
#[derive(Debug, Clone)]
pub struct DocumentEntry {
    /// Document name (file name minus extension).
    pub name: DocumentName,
    /// Last modification time, when the filesystem reports one.
    pub modified: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["note", "a", "my-doc", "notes_2024", "v1.2", "README"] {
            assert!(DocumentName::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for name in [
            "../secret",
            "..",
            "a..b",
            "a/b",
            "a\\b",
            "/etc/passwd",
            ".hidden",
            "",
            "na me",
        ] {
            assert!(
                matches!(
                    DocumentName::new(name),
                    Err(MarkdropError::InvalidName { .. })
                ),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn file_name_appends_extension() {
        let name = DocumentName::new("note").unwrap();
        assert_eq!(name.file_name(), "note.md");
    }

    #[test]
    fn parses_from_str() {
        let name: DocumentName = "note".parse().unwrap();
        assert_eq!(name.as_str(), "note");
        assert_eq!(name.to_string(), "note");

        let err = "../secret".parse::<DocumentName>().unwrap_err();
        assert!(err.to_string().contains("invalid document name"));
    }
}
