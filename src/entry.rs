//! Catalog entry: one book and its availability.

use crate::labels::Labels;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability state of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// On the shelf, can be borrowed
    Available,
    /// Held by a patron
    Borrowed,
}

/// A book record in the catalog
///
/// Only the registry changes `borrowed`, in step with the holding patron's
/// held-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    title: String,
    author: String,
    isbn: String,
    #[serde(default)]
    borrowed: bool,
}

impl CatalogEntry {
    /// Create a new, available entry
    ///
    /// # Examples
    ///
    /// ```
    /// use circulation::CatalogEntry;
    ///
    /// let entry = CatalogEntry::new("深入理解计算机系统", "兰德尔·E·布莱恩特", "9787111641247");
    /// assert!(entry.is_available());
    /// assert_eq!(
    ///     entry.to_string(),
    ///     "《深入理解计算机系统》- 兰德尔·E·布莱恩特 (ISBN:9787111641247) - 可借阅"
    /// );
    /// ```
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        CatalogEntry {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            borrowed: false,
        }
    }

    /// Title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// ISBN identifier
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Whether a patron currently holds this entry
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        self.borrowed
    }

    /// Whether the entry can be borrowed
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.borrowed
    }

    /// Current availability state
    #[must_use]
    pub fn status(&self) -> Availability {
        if self.borrowed {
            Availability::Borrowed
        } else {
            Availability::Available
        }
    }

    /// Render with a specific label set
    #[must_use]
    pub fn display_with<'a>(&'a self, labels: &'a Labels) -> EntryDisplay<'a> {
        EntryDisplay {
            entry: self,
            labels,
        }
    }

    pub(crate) fn set_borrowed(&mut self, borrowed: bool) {
        self.borrowed = borrowed;
    }

    pub(crate) fn set_isbn(&mut self, isbn: String) {
        self.isbn = isbn;
    }
}

/// Display adapter pairing an entry with a label set
#[derive(Debug, Clone, Copy)]
pub struct EntryDisplay<'a> {
    entry: &'a CatalogEntry,
    labels: &'a Labels,
}

impl fmt::Display for EntryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}- {} (ISBN:{}) - {}",
            self.labels.bracket(&self.entry.title),
            self.entry.author,
            self.entry.isbn,
            self.labels.status(self.entry.borrowed)
        )
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_with(&Labels::default()).fmt(f)
    }
}
