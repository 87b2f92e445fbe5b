//! Whole-registry consistency checks.
//!
//! The borrow/return protocol keeps entries and held-sets in step on its
//! own; this module re-derives the holder relation from scratch so tests and
//! callers can confirm it after any sequence of operations.

use crate::error::{CirculationError, Result};
use crate::registry::LibraryRegistry;
use std::collections::{HashMap, HashSet};

/// Checker for the holder invariants of a [`LibraryRegistry`]
#[derive(Debug)]
pub struct ConsistencyAuditor;

impl ConsistencyAuditor {
    /// Check the registry, failing on the first violation
    ///
    /// # Errors
    ///
    /// Returns [`CirculationError::Inconsistent`] describing the violation.
    pub fn audit(registry: &LibraryRegistry) -> Result<()> {
        match Self::findings(registry).into_iter().next() {
            Some(finding) => Err(CirculationError::Inconsistent(finding)),
            None => Ok(()),
        }
    }

    /// Every violation found, in a stable order
    #[must_use]
    pub fn findings(registry: &LibraryRegistry) -> Vec<String> {
        let mut findings = Vec::new();
        let mut holders: HashMap<&str, Vec<&str>> = HashMap::new();

        for patron in registry.patrons() {
            let mut seen = HashSet::new();
            for isbn in patron.held_isbns() {
                if !seen.insert(isbn.as_str()) {
                    findings.push(format!(
                        "card {} holds ISBN {isbn} more than once",
                        patron.card_id()
                    ));
                }
                holders.entry(isbn).or_default().push(patron.card_id());

                match registry.find_entry_by_isbn(isbn) {
                    None => findings.push(format!(
                        "card {} holds unknown ISBN {isbn}",
                        patron.card_id()
                    )),
                    Some(entry) if entry.is_available() => findings.push(format!(
                        "card {} holds ISBN {isbn} but the entry is available",
                        patron.card_id()
                    )),
                    Some(_) => {},
                }
            }
        }

        for (isbn, cards) in &holders {
            let distinct: HashSet<&&str> = cards.iter().collect();
            if distinct.len() > 1 {
                let mut cards: Vec<&str> = distinct.into_iter().copied().collect();
                cards.sort_unstable();
                findings.push(format!("ISBN {isbn} held by {}", cards.join(", ")));
            }
        }

        for entry in registry.entries().iter().filter(|e| e.is_borrowed()) {
            let resolved = registry
                .find_entry_by_isbn(entry.isbn())
                .is_some_and(|found| std::ptr::eq(found, entry));
            if !resolved {
                findings.push(format!(
                    "shadowed entry for ISBN {} is marked borrowed",
                    entry.isbn()
                ));
            } else if !holders.contains_key(entry.isbn()) {
                findings.push(format!(
                    "ISBN {} is marked borrowed but no patron holds it",
                    entry.isbn()
                ));
            }
        }

        findings.sort();
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogEntry, Patron};

    #[test]
    fn test_clean_registry_has_no_findings() {
        let mut registry = LibraryRegistry::new();
        registry
            .register_entry(CatalogEntry::new("T", "A", "1"))
            .unwrap();
        registry
            .register_entry(CatalogEntry::new("T again", "A", "1"))
            .unwrap();
        registry.register_patron(Patron::new("N", "C")).unwrap();
        registry.borrow("C", "1").unwrap();

        assert!(ConsistencyAuditor::findings(&registry).is_empty());
        assert!(ConsistencyAuditor::audit(&registry).is_ok());
    }
}
