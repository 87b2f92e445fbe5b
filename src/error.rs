//! Error types for catalog and circulation operations.
//!
//! This module provides the [`CirculationError`] type for all registry
//! operations and the [`Result`] convenience type. Every variant is a
//! recoverable condition: a failed operation leaves the registry unchanged
//! and usable.

use thiserror::Error;

/// Error type for all catalog and circulation operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CirculationError {
    /// No registered patron carries the given card id.
    #[error("Patron not found for card: {0}")]
    PatronNotFound(String),

    /// No catalog entry carries the given ISBN.
    #[error("Entry not found for ISBN: {0}")]
    EntryNotFound(String),

    /// The entry exists but is currently held by a patron.
    #[error("Entry already borrowed: {0}")]
    AlreadyBorrowed(String),

    /// The patron's held-set does not contain the ISBN.
    #[error("Patron {card_id} does not hold ISBN {isbn}")]
    NotHeldByPatron {
        /// Card id of the patron attempting the return
        card_id: String,
        /// ISBN that was not found in the held-set
        isbn: String,
    },

    /// An entry with this ISBN is already registered.
    #[error("Duplicate ISBN: {0}")]
    DuplicateIsbn(String),

    /// A patron with this card id is already registered.
    #[error("Duplicate card id: {0}")]
    DuplicateCard(String),

    /// The ISBN failed checksum validation.
    #[error("Invalid ISBN: {0}")]
    InvalidIsbn(String),

    /// The registry state violates a holder invariant.
    #[error("Inconsistent registry: {0}")]
    Inconsistent(String),

    /// A thread panicked while holding the shared registry lock.
    #[error("Registry lock poisoned")]
    LockPoisoned,
}

/// Convenience type alias for [`std::result::Result`] with [`CirculationError`].
pub type Result<T> = std::result::Result<T, CirculationError>;
