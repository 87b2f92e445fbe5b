//! The library registry: catalog, patrons and the borrow/return protocol.
//!
//! [`LibraryRegistry`] exclusively owns every [`CatalogEntry`] and
//! [`Patron`]. Patrons refer to entries by ISBN only; the registry resolves
//! those references on demand and keeps the two sides in step:
//!
//! - an entry is borrowed exactly when one patron's held-set names its ISBN
//! - a held-set never names the same ISBN twice
//!
//! Every operation either applies its whole effect or changes nothing.
//!
//! # Examples
//!
//! ```
//! use circulation::{CatalogEntry, CirculationError, LibraryRegistry, Patron};
//!
//! let mut registry = LibraryRegistry::new();
//! registry.register_entry(CatalogEntry::new("Emma", "Jane Austen", "A"))?;
//! registry.register_patron(Patron::new("Ann", "C1"))?;
//!
//! registry.borrow("C1", "A")?;
//! assert!(registry.find_entry_by_isbn("A").unwrap().is_borrowed());
//! assert_eq!(
//!     registry.borrow("C1", "A"),
//!     Err(CirculationError::AlreadyBorrowed("A".to_string()))
//! );
//!
//! registry.give_back("C1", "A")?;
//! assert!(registry.find_entry_by_isbn("A").unwrap().is_available());
//! # Ok::<(), CirculationError>(())
//! ```

use crate::audit::ConsistencyAuditor;
use crate::config::{DuplicatePolicy, IsbnPolicy, RegistryConfig};
use crate::entry::CatalogEntry;
use crate::error::{CirculationError, Result};
use crate::events::{CirculationEvent, EventSink};
use crate::labels::Labels;
use crate::patron::Patron;
use indexmap::IndexMap;
use std::fmt;

/// Owner of all catalog entries and patrons
///
/// Entries and patrons are kept in registration order. The ISBN and card
/// indexes map each identifier to its *first* registration, so with
/// [`DuplicatePolicy::Shadow`] a later duplicate is stored but never found.
pub struct LibraryRegistry {
    config: RegistryConfig,
    entries: Vec<CatalogEntry>,
    patrons: Vec<Patron>,
    entry_index: IndexMap<String, usize>,
    patron_index: IndexMap<String, usize>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl LibraryRegistry {
    /// Create an empty registry with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with the given configuration
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        LibraryRegistry {
            config,
            entries: Vec::new(),
            patrons: Vec::new(),
            entry_index: IndexMap::new(),
            patron_index: IndexMap::new(),
            sinks: Vec::new(),
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Labels used for narration and summaries
    #[must_use]
    pub fn labels(&self) -> &Labels {
        &self.config.labels
    }

    /// Subscribe a sink to all subsequent events
    pub fn subscribe<S: EventSink + 'static>(&mut self, sink: S) {
        self.sinks.push(Box::new(sink));
    }

    fn emit(&mut self, event: CirculationEvent) {
        for sink in &mut self.sinks {
            sink.notify(&event, &self.config.labels);
        }
    }

    /// Add an entry to the catalog
    ///
    /// The entry always starts out available. Its ISBN is stored according
    /// to the configured [`IsbnPolicy`].
    ///
    /// # Errors
    ///
    /// - [`CirculationError::InvalidIsbn`] under [`IsbnPolicy::Validate`] when
    ///   the checksum is wrong
    /// - [`CirculationError::DuplicateIsbn`] under [`DuplicatePolicy::Reject`]
    ///   when the ISBN is already registered
    pub fn register_entry(&mut self, mut entry: CatalogEntry) -> Result<()> {
        let isbn = self.config.canonical_isbn(entry.isbn());
        if self.config.isbn == IsbnPolicy::Validate && !crate::isbn::is_valid(&isbn) {
            return Err(CirculationError::InvalidIsbn(entry.isbn().to_string()));
        }
        if self.config.duplicates == DuplicatePolicy::Reject && self.entry_index.contains_key(&isbn) {
            return Err(CirculationError::DuplicateIsbn(isbn));
        }

        entry.set_isbn(isbn.clone());
        entry.set_borrowed(false);
        let title = entry.title().to_string();
        self.entry_index.entry(isbn.clone()).or_insert(self.entries.len());
        self.entries.push(entry);

        self.emit(CirculationEvent::EntryRegistered { title, isbn });
        Ok(())
    }

    /// Register a patron
    ///
    /// The patron always starts out holding nothing.
    ///
    /// # Errors
    ///
    /// [`CirculationError::DuplicateCard`] under [`DuplicatePolicy::Reject`]
    /// when the card id is already registered.
    pub fn register_patron(&mut self, mut patron: Patron) -> Result<()> {
        if self.config.duplicates == DuplicatePolicy::Reject
            && self.patron_index.contains_key(patron.card_id())
        {
            return Err(CirculationError::DuplicateCard(patron.card_id().to_string()));
        }

        patron.clear_held();
        let name = patron.name().to_string();
        let card_id = patron.card_id().to_string();
        self.patron_index
            .entry(card_id.clone())
            .or_insert(self.patrons.len());
        self.patrons.push(patron);

        self.emit(CirculationEvent::PatronRegistered { name, card_id });
        Ok(())
    }

    fn entry_position(&self, isbn: &str) -> Option<usize> {
        self.entry_index
            .get(self.config.canonical_isbn(isbn).as_str())
            .copied()
    }

    fn patron_position(&self, card_id: &str) -> Option<usize> {
        self.patron_index.get(card_id).copied()
    }

    /// Look up the first entry registered under an ISBN, without narration
    #[must_use]
    pub fn find_entry_by_isbn(&self, isbn: &str) -> Option<&CatalogEntry> {
        self.entry_position(isbn).map(|pos| &self.entries[pos])
    }

    /// Look up the first patron registered under a card id, without narration
    #[must_use]
    pub fn find_patron_by_card(&self, card_id: &str) -> Option<&Patron> {
        self.patron_position(card_id).map(|pos| &self.patrons[pos])
    }

    /// Look up an entry and narrate whether it can be borrowed
    ///
    /// Returns the entry whether or not it is borrowed. Use
    /// [`find_entry_by_isbn`](Self::find_entry_by_isbn) for a silent query.
    pub fn check_availability(&mut self, isbn: &str) -> Option<&CatalogEntry> {
        let pos = self.narrated_entry_position(isbn)?;
        Some(&self.entries[pos])
    }

    fn narrated_entry_position(&mut self, isbn: &str) -> Option<usize> {
        match self.entry_position(isbn) {
            Some(pos) => {
                let entry = &self.entries[pos];
                let event = CirculationEvent::AvailabilityChecked {
                    title: entry.title().to_string(),
                    isbn: entry.isbn().to_string(),
                    status: entry.status(),
                };
                self.emit(event);
                Some(pos)
            },
            None => {
                self.emit(CirculationEvent::EntryNotFound {
                    isbn: isbn.to_string(),
                });
                None
            },
        }
    }

    fn narrated_patron_position(&mut self, card_id: &str) -> Result<usize> {
        if let Some(pos) = self.patron_position(card_id) {
            return Ok(pos);
        }
        self.emit(CirculationEvent::PatronNotFound {
            card_id: card_id.to_string(),
        });
        Err(CirculationError::PatronNotFound(card_id.to_string()))
    }

    /// Lend an entry to a patron
    ///
    /// The availability check is narrated as with
    /// [`check_availability`](Self::check_availability).
    ///
    /// # Errors
    ///
    /// - [`CirculationError::PatronNotFound`] if no patron has the card
    /// - [`CirculationError::EntryNotFound`] if no entry has the ISBN
    /// - [`CirculationError::AlreadyBorrowed`] if the entry is held already
    ///
    /// Nothing changes when an error is returned.
    pub fn borrow(&mut self, card_id: &str, isbn: &str) -> Result<()> {
        let patron_pos = self.narrated_patron_position(card_id)?;
        let entry_pos = self
            .narrated_entry_position(isbn)
            .ok_or_else(|| CirculationError::EntryNotFound(isbn.to_string()))?;

        let entry = &mut self.entries[entry_pos];
        if entry.is_borrowed() {
            return Err(CirculationError::AlreadyBorrowed(entry.isbn().to_string()));
        }
        entry.set_borrowed(true);
        let key = entry.isbn().to_string();
        let title = entry.title().to_string();

        let patron = &mut self.patrons[patron_pos];
        patron.push_held(key.clone());
        let event = CirculationEvent::Borrowed {
            name: patron.name().to_string(),
            card_id: patron.card_id().to_string(),
            title,
            isbn: key,
        };
        self.emit(event);
        Ok(())
    }

    /// Take an entry back from the patron holding it
    ///
    /// Only the patron's own held-set is consulted: a patron can return only
    /// what is recorded as held by them.
    ///
    /// # Errors
    ///
    /// - [`CirculationError::PatronNotFound`] if no patron has the card
    /// - [`CirculationError::NotHeldByPatron`] if the patron does not hold the ISBN
    /// - [`CirculationError::Inconsistent`] if the held ISBN has no catalog entry
    ///
    /// Nothing changes when an error is returned.
    pub fn give_back(&mut self, card_id: &str, isbn: &str) -> Result<()> {
        let patron_pos = self.narrated_patron_position(card_id)?;
        let key = self.config.canonical_isbn(isbn);

        let Some(held_pos) = self.patrons[patron_pos].position_of(&key) else {
            let patron = &self.patrons[patron_pos];
            let event = CirculationEvent::NotHeld {
                name: patron.name().to_string(),
                card_id: patron.card_id().to_string(),
                isbn: key.clone(),
            };
            self.emit(event);
            return Err(CirculationError::NotHeldByPatron {
                card_id: card_id.to_string(),
                isbn: key,
            });
        };
        let entry_pos = self.entry_position(&key).ok_or_else(|| {
            CirculationError::Inconsistent(format!("held ISBN {key} has no catalog entry"))
        })?;

        let patron = &mut self.patrons[patron_pos];
        patron.remove_held_at(held_pos);
        let name = patron.name().to_string();
        let card = patron.card_id().to_string();

        let entry = &mut self.entries[entry_pos];
        entry.set_borrowed(false);
        let title = entry.title().to_string();

        self.emit(CirculationEvent::Returned {
            name,
            card_id: card,
            title,
            isbn: key,
        });
        Ok(())
    }

    /// All entries in registration order, shadowed duplicates included
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// All patrons in registration order, shadowed duplicates included
    #[must_use]
    pub fn patrons(&self) -> &[Patron] {
        &self.patrons
    }

    /// Number of registered entries
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of registered patrons
    #[must_use]
    pub fn patron_count(&self) -> usize {
        self.patrons.len()
    }

    /// Titles of the entries a patron holds, in borrow order
    #[must_use]
    pub fn held_titles(&self, card_id: &str) -> Option<Vec<&str>> {
        self.find_patron_by_card(card_id)
            .map(|patron| self.titles_for(patron))
    }

    fn titles_for(&self, patron: &Patron) -> Vec<&str> {
        patron
            .held_isbns()
            .iter()
            .filter_map(|isbn| self.find_entry_by_isbn(isbn))
            .map(CatalogEntry::title)
            .collect()
    }

    /// Summary line for one patron
    #[must_use]
    pub fn patron_summary(&self, card_id: &str) -> Option<String> {
        self.find_patron_by_card(card_id)
            .map(|patron| patron.display_with(self.labels(), &self.titles_for(patron)))
    }

    /// Summary lines for every patron, in registration order
    #[must_use]
    pub fn patron_summaries(&self) -> Vec<String> {
        self.patrons
            .iter()
            .map(|patron| patron.display_with(self.labels(), &self.titles_for(patron)))
            .collect()
    }

    /// Verify the holder invariants across the whole registry
    ///
    /// # Errors
    ///
    /// [`CirculationError::Inconsistent`] describing the first violation.
    pub fn audit(&self) -> Result<()> {
        ConsistencyAuditor::audit(self)
    }
}

impl Default for LibraryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LibraryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryRegistry")
            .field("config", &self.config)
            .field("entries", &self.entries)
            .field("patrons", &self.patrons)
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}
