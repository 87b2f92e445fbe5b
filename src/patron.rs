//! Registered patrons and their held-sets.
//!
//! A patron's held-set stores ISBNs, not entries. Titles for display are
//! resolved through the registry (see
//! [`LibraryRegistry::patron_summary`](crate::registry::LibraryRegistry::patron_summary)).

use crate::labels::{fill, Labels};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A registered borrower
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patron {
    name: String,
    card_id: String,
    /// ISBNs in borrow order; most patrons hold only a handful
    #[serde(default)]
    held: SmallVec<[String; 4]>,
}

impl Patron {
    /// Create a patron holding nothing
    #[must_use]
    pub fn new(name: impl Into<String>, card_id: impl Into<String>) -> Self {
        Patron {
            name: name.into(),
            card_id: card_id.into(),
            held: SmallVec::new(),
        }
    }

    /// Patron name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Library card id
    #[must_use]
    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    /// Held ISBNs in borrow order
    #[must_use]
    pub fn held_isbns(&self) -> &[String] {
        &self.held
    }

    /// Whether the held-set contains the ISBN
    #[must_use]
    pub fn holds(&self, isbn: &str) -> bool {
        self.position_of(isbn).is_some()
    }

    /// Summary line given the titles of the held entries
    ///
    /// # Examples
    ///
    /// ```
    /// use circulation::{Labels, Patron};
    ///
    /// let patron = Patron::new("李四", "C002");
    /// assert_eq!(
    ///     patron.display_with::<&str>(&Labels::chinese(), &[]),
    ///     "用户：李四 (借书卡：C002)，已借书籍：无"
    /// );
    /// ```
    #[must_use]
    pub fn display_with<S: AsRef<str>>(&self, labels: &Labels, titles: &[S]) -> String {
        fill(
            &labels.messages.patron_summary,
            &[
                ("name", self.name.as_str()),
                ("card", self.card_id.as_str()),
                ("titles", labels.join_titles(titles).as_str()),
            ],
        )
    }

    pub(crate) fn position_of(&self, isbn: &str) -> Option<usize> {
        self.held.iter().position(|held| held == isbn)
    }

    pub(crate) fn push_held(&mut self, isbn: String) {
        self.held.push(isbn);
    }

    pub(crate) fn remove_held_at(&mut self, index: usize) -> String {
        self.held.remove(index)
    }

    pub(crate) fn clear_held(&mut self) {
        self.held.clear();
    }
}
