//! Human-language labels for display formatting and narration.
//!
//! The default label set reproduces the Chinese wording used by the
//! circulation desk this crate was built for. [`Labels::english`] provides an
//! alternative; any other locale can be supplied field by field.

use serde::{Deserialize, Serialize};

/// Locale label set used when rendering entries, patrons and events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    /// Status label for an entry that can be borrowed
    pub available: String,
    /// Status label for an entry held by a patron
    pub borrowed: String,
    /// Opening bracket placed before a title
    pub title_open: String,
    /// Closing bracket placed after a title
    pub title_close: String,
    /// Separator between held titles in a patron summary
    pub separator: String,
    /// Marker shown when a patron holds nothing
    pub none: String,
    /// Message templates for narrated events
    pub messages: MessageTemplates,
}

/// Narration templates.
///
/// Placeholders are `{title}`, `{name}`, `{card}` and `{isbn}`, plus
/// `{titles}` in the patron summary. `{title}` is replaced by the bracketed
/// title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct MessageTemplates {
    pub entry_registered: String,
    pub patron_registered: String,
    pub available: String,
    pub unavailable: String,
    pub entry_not_found: String,
    pub patron_not_found: String,
    pub borrowed: String,
    pub returned: String,
    pub not_held: String,
    pub patron_summary: String,
}

impl Labels {
    /// Chinese labels (the default)
    #[must_use]
    pub fn chinese() -> Self {
        Labels {
            available: "可借阅".to_string(),
            borrowed: "已借出".to_string(),
            title_open: "《".to_string(),
            title_close: "》".to_string(),
            separator: "、".to_string(),
            none: "无".to_string(),
            messages: MessageTemplates {
                entry_registered: "书籍{title}已加入图书馆！".to_string(),
                patron_registered: "用户{name}（卡号：{card}）已注册！".to_string(),
                available: "书籍{title}可借阅！".to_string(),
                unavailable: "书籍{title}当前已借出，不可借阅！".to_string(),
                entry_not_found: "未找到该ISBN对应的书籍！".to_string(),
                patron_not_found: "未找到该借书卡对应的用户！".to_string(),
                borrowed: "{name}成功借阅{title}！".to_string(),
                returned: "{name}成功归还{title}！".to_string(),
                not_held: "{name}未借阅该ISBN对应的书籍！".to_string(),
                patron_summary: "用户：{name} (借书卡：{card})，已借书籍：{titles}".to_string(),
            },
        }
    }

    /// English labels
    #[must_use]
    pub fn english() -> Self {
        Labels {
            available: "available".to_string(),
            borrowed: "borrowed".to_string(),
            title_open: "\"".to_string(),
            title_close: "\"".to_string(),
            separator: ", ".to_string(),
            none: "none".to_string(),
            messages: MessageTemplates {
                entry_registered: "Book {title} added to the library.".to_string(),
                patron_registered: "Patron {name} (card: {card}) registered.".to_string(),
                available: "Book {title} is available.".to_string(),
                unavailable: "Book {title} is already borrowed.".to_string(),
                entry_not_found: "No book found for ISBN {isbn}.".to_string(),
                patron_not_found: "No patron found for card {card}.".to_string(),
                borrowed: "{name} borrowed {title}.".to_string(),
                returned: "{name} returned {title}.".to_string(),
                not_held: "{name} has not borrowed ISBN {isbn}.".to_string(),
                patron_summary: "Patron: {name} (card: {card}), borrowed: {titles}".to_string(),
            },
        }
    }

    /// Wrap a title in this locale's brackets
    #[must_use]
    pub fn bracket(&self, title: &str) -> String {
        format!("{}{title}{}", self.title_open, self.title_close)
    }

    /// Status label for the given borrowed flag
    #[must_use]
    pub fn status(&self, borrowed: bool) -> &str {
        if borrowed {
            &self.borrowed
        } else {
            &self.available
        }
    }

    /// Join titles with the separator, or return the "none" marker if empty
    #[must_use]
    pub fn join_titles<S: AsRef<str>>(&self, titles: &[S]) -> String {
        if titles.is_empty() {
            return self.none.clone();
        }
        titles
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

impl Default for Labels {
    fn default() -> Self {
        Labels::chinese()
    }
}

/// Fill a narration template.
///
/// The template is scanned once, left to right; substituted values are
/// copied verbatim and never scanned for placeholders. Unknown placeholders
/// are left untouched.
pub(crate) fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substitution = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match substitution {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            },
            None => {
                out.push('{');
                rest = after;
            },
        }
    }
    out.push_str(rest);
    out
}
