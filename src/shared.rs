//! Thread-safe handle over a single registry.
//!
//! A borrow or return touches a patron and an entry together, so the whole
//! registry sits behind one mutex. Every call holds the lock for the full
//! operation.

use crate::entry::CatalogEntry;
use crate::error::{CirculationError, Result};
use crate::patron::Patron;
use crate::registry::LibraryRegistry;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, lock-protected [`LibraryRegistry`]
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<LibraryRegistry>>,
}

impl SharedRegistry {
    /// Wrap a registry for use from several threads
    #[must_use]
    pub fn new(registry: LibraryRegistry) -> Self {
        SharedRegistry {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LibraryRegistry>> {
        self.inner.lock().map_err(|_| CirculationError::LockPoisoned)
    }

    /// See [`LibraryRegistry::register_entry`]
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CirculationError::LockPoisoned`].
    pub fn register_entry(&self, entry: CatalogEntry) -> Result<()> {
        self.lock()?.register_entry(entry)
    }

    /// See [`LibraryRegistry::register_patron`]
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CirculationError::LockPoisoned`].
    pub fn register_patron(&self, patron: Patron) -> Result<()> {
        self.lock()?.register_patron(patron)
    }

    /// See [`LibraryRegistry::borrow`]
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CirculationError::LockPoisoned`].
    pub fn borrow(&self, card_id: &str, isbn: &str) -> Result<()> {
        self.lock()?.borrow(card_id, isbn)
    }

    /// See [`LibraryRegistry::give_back`]
    ///
    /// # Errors
    ///
    /// As the wrapped call, or [`CirculationError::LockPoisoned`].
    pub fn give_back(&self, card_id: &str, isbn: &str) -> Result<()> {
        self.lock()?.give_back(card_id, isbn)
    }

    /// Narrated availability check returning a snapshot of the entry
    ///
    /// # Errors
    ///
    /// [`CirculationError::LockPoisoned`].
    pub fn check_availability(&self, isbn: &str) -> Result<Option<CatalogEntry>> {
        Ok(self.lock()?.check_availability(isbn).cloned())
    }

    /// Silent lookup returning a snapshot of the entry
    ///
    /// # Errors
    ///
    /// [`CirculationError::LockPoisoned`].
    pub fn find_entry_by_isbn(&self, isbn: &str) -> Result<Option<CatalogEntry>> {
        Ok(self.lock()?.find_entry_by_isbn(isbn).cloned())
    }

    /// Run a read-only closure while holding the lock
    ///
    /// # Errors
    ///
    /// [`CirculationError::LockPoisoned`].
    pub fn with<R>(&self, f: impl FnOnce(&LibraryRegistry) -> R) -> Result<R> {
        let guard = self.lock()?;
        Ok(f(&*guard))
    }
}

impl From<LibraryRegistry> for SharedRegistry {
    fn from(registry: LibraryRegistry) -> Self {
        Self::new(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_one_winner_per_entry() {
        let mut registry = LibraryRegistry::new();
        registry
            .register_entry(CatalogEntry::new("Only copy", "A", "X"))
            .unwrap();
        for n in 0..8 {
            registry
                .register_patron(Patron::new(format!("P{n}"), format!("C{n}")))
                .unwrap();
        }
        let shared = SharedRegistry::new(registry);

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let shared = shared.clone();
                thread::spawn(move || shared.borrow(&format!("C{n}"), "X").is_ok())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        shared.with(|r| r.audit()).unwrap().unwrap();
        assert!(shared.find_entry_by_isbn("X").unwrap().unwrap().is_borrowed());
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let mut registry = LibraryRegistry::new();
        registry
            .register_entry(CatalogEntry::new("Only copy", "A", "X"))
            .unwrap();
        registry.register_patron(Patron::new("P1", "C1")).unwrap();
        let shared = SharedRegistry::new(registry);

        let reader = shared.clone();
        let crashed = thread::spawn(move || {
            let _ = reader.with(|_| panic!("reader crashed while holding the lock"));
        })
        .join();
        assert!(crashed.is_err());

        assert_eq!(shared.borrow("C1", "X"), Err(CirculationError::LockPoisoned));
        assert_eq!(
            shared.find_entry_by_isbn("X"),
            Err(CirculationError::LockPoisoned)
        );
    }
}
