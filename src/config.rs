//! Registry configuration.
//!
//! A [`RegistryConfig`] decides how the registry treats repeated identifiers
//! and raw ISBN strings, and which [`Labels`] it renders with.

use crate::labels::Labels;
use serde::{Deserialize, Serialize};

/// What to do when an ISBN or card id is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Accept the duplicate; lookups keep resolving to the first registration (default)
    #[default]
    Shadow,
    /// Refuse the duplicate with an error
    Reject,
}

/// How raw ISBN strings are treated on registration and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IsbnPolicy {
    /// Use the string exactly as given (default)
    #[default]
    Verbatim,
    /// Strip hyphens and spaces before storing or comparing
    Normalize,
    /// Normalize, and refuse entries whose checksum is wrong
    Validate,
}

/// Configuration for a [`LibraryRegistry`](crate::registry::LibraryRegistry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Duplicate identifier handling
    pub duplicates: DuplicatePolicy,
    /// ISBN handling
    pub isbn: IsbnPolicy,
    /// Display and narration labels
    pub labels: Labels,
}

impl RegistryConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate identifier policy
    #[must_use]
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Set the ISBN policy
    #[must_use]
    pub fn with_isbn(mut self, policy: IsbnPolicy) -> Self {
        self.isbn = policy;
        self
    }

    /// Set the label set
    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Apply the ISBN policy to a raw string
    pub(crate) fn canonical_isbn(&self, raw: &str) -> String {
        match self.isbn {
            IsbnPolicy::Verbatim => raw.to_string(),
            IsbnPolicy::Normalize | IsbnPolicy::Validate => crate::isbn::normalize(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::new();
        assert_eq!(config.duplicates, DuplicatePolicy::Shadow);
        assert_eq!(config.isbn, IsbnPolicy::Verbatim);
        assert_eq!(config.labels, Labels::chinese());
    }

    #[test]
    fn test_canonical_isbn() {
        let verbatim = RegistryConfig::new();
        assert_eq!(verbatim.canonical_isbn("978-7-111"), "978-7-111");

        let normalized = RegistryConfig::new().with_isbn(IsbnPolicy::Normalize);
        assert_eq!(normalized.canonical_isbn("978-7-111"), "9787111");
    }

    #[test]
    fn test_partial_json() {
        let config: RegistryConfig = serde_json::from_str(r#"{"duplicates":"Reject"}"#).unwrap();
        assert_eq!(config.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.isbn, IsbnPolicy::Verbatim);
        assert_eq!(config.labels, Labels::default());
    }
}
