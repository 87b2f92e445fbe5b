//! Circulation events and the sinks that receive them.
//!
//! The registry never prints. Each operation reports what happened as a
//! [`CirculationEvent`] to every subscribed [`EventSink`]; callers decide
//! whether to narrate it, log it as JSON, record it, or drop it.
//!
//! # Examples
//!
//! ```
//! use circulation::{CatalogEntry, EventLog, LibraryRegistry};
//!
//! let log = EventLog::new();
//! let mut registry = LibraryRegistry::new();
//! registry.subscribe(log.clone());
//! registry.register_entry(CatalogEntry::new("Dune", "Frank Herbert", "1")).unwrap();
//!
//! assert_eq!(log.narration(registry.labels()), ["书籍《Dune》已加入图书馆！"]);
//! ```

use crate::entry::Availability;
use crate::labels::{fill, Labels};
use serde::Serialize;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Something that happened in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CirculationEvent {
    /// An entry was added to the catalog
    EntryRegistered {
        /// Entry title
        title: String,
        /// Entry ISBN
        isbn: String,
    },
    /// A patron was registered
    PatronRegistered {
        /// Patron name
        name: String,
        /// Card id
        card_id: String,
    },
    /// An availability check found the entry
    AvailabilityChecked {
        /// Entry title
        title: String,
        /// Entry ISBN
        isbn: String,
        /// State at the time of the check
        status: Availability,
    },
    /// A lookup found no entry for the ISBN
    EntryNotFound {
        /// Requested ISBN
        isbn: String,
    },
    /// A lookup found no patron for the card
    PatronNotFound {
        /// Requested card id
        card_id: String,
    },
    /// A borrow succeeded
    Borrowed {
        /// Patron name
        name: String,
        /// Card id
        card_id: String,
        /// Entry title
        title: String,
        /// Entry ISBN
        isbn: String,
    },
    /// A return succeeded
    Returned {
        /// Patron name
        name: String,
        /// Card id
        card_id: String,
        /// Entry title
        title: String,
        /// Entry ISBN
        isbn: String,
    },
    /// A return named an ISBN the patron does not hold
    NotHeld {
        /// Patron name
        name: String,
        /// Card id
        card_id: String,
        /// Requested ISBN
        isbn: String,
    },
}

impl CirculationEvent {
    /// Render the event as a human-readable line
    ///
    /// The text is informational; do not parse it.
    #[must_use]
    pub fn narrate(&self, labels: &Labels) -> String {
        let m = &labels.messages;
        match self {
            CirculationEvent::EntryRegistered { title, isbn } => fill(
                &m.entry_registered,
                &[("title", labels.bracket(title).as_str()), ("isbn", isbn.as_str())],
            ),
            CirculationEvent::PatronRegistered { name, card_id } => fill(
                &m.patron_registered,
                &[("name", name.as_str()), ("card", card_id.as_str())],
            ),
            CirculationEvent::AvailabilityChecked {
                title,
                isbn,
                status,
            } => {
                let template = match status {
                    Availability::Available => &m.available,
                    Availability::Borrowed => &m.unavailable,
                };
                fill(
                    template,
                    &[("title", labels.bracket(title).as_str()), ("isbn", isbn.as_str())],
                )
            },
            CirculationEvent::EntryNotFound { isbn } => {
                fill(&m.entry_not_found, &[("isbn", isbn.as_str())])
            },
            CirculationEvent::PatronNotFound { card_id } => {
                fill(&m.patron_not_found, &[("card", card_id.as_str())])
            },
            CirculationEvent::Borrowed {
                name,
                card_id,
                title,
                isbn,
            } => fill(
                &m.borrowed,
                &[
                    ("name", name.as_str()),
                    ("card", card_id.as_str()),
                    ("title", labels.bracket(title).as_str()),
                    ("isbn", isbn.as_str()),
                ],
            ),
            CirculationEvent::Returned {
                name,
                card_id,
                title,
                isbn,
            } => fill(
                &m.returned,
                &[
                    ("name", name.as_str()),
                    ("card", card_id.as_str()),
                    ("title", labels.bracket(title).as_str()),
                    ("isbn", isbn.as_str()),
                ],
            ),
            CirculationEvent::NotHeld {
                name,
                card_id,
                isbn,
            } => fill(
                &m.not_held,
                &[
                    ("name", name.as_str()),
                    ("card", card_id.as_str()),
                    ("isbn", isbn.as_str()),
                ],
            ),
        }
    }
}

/// Receiver of circulation events
///
/// Sinks must not fail the operation that produced the event; a sink that
/// can fail keeps its own error count.
pub trait EventSink: Send {
    /// Handle one event
    fn notify(&mut self, event: &CirculationEvent, labels: &Labels);
}

impl<F> EventSink for F
where
    F: FnMut(&CirculationEvent) + Send,
{
    fn notify(&mut self, event: &CirculationEvent, _labels: &Labels) {
        self(event);
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &CirculationEvent, _labels: &Labels) {}
}

/// In-memory event recorder
///
/// Clones share the same buffer, so a caller can keep one handle and give
/// another to the registry.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<CirculationEvent>>>,
}

impl EventLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded events, oldest first
    #[must_use]
    pub fn events(&self) -> Vec<CirculationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Narrate every recorded event
    #[must_use]
    pub fn narration(&self, labels: &Labels) -> Vec<String> {
        self.events().iter().map(|e| e.narrate(labels)).collect()
    }

    /// Number of recorded events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all recorded events
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl EventSink for EventLog {
    fn notify(&mut self, event: &CirculationEvent, _labels: &Labels) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Writes one narrated line per event
#[derive(Debug)]
pub struct NarrationSink<W: Write> {
    writer: W,
    write_failures: usize,
}

impl<W: Write> NarrationSink<W> {
    /// Narrate into the given writer
    pub fn new(writer: W) -> Self {
        NarrationSink {
            writer,
            write_failures: 0,
        }
    }

    /// Number of lines that could not be written
    #[must_use]
    pub fn write_failures(&self) -> usize {
        self.write_failures
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventSink for NarrationSink<W> {
    fn notify(&mut self, event: &CirculationEvent, labels: &Labels) {
        if writeln!(self.writer, "{}", event.narrate(labels)).is_err() {
            self.write_failures += 1;
        }
    }
}

/// Writes one JSON object per line for each event
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    write_failures: usize,
}

impl<W: Write> JsonLinesSink<W> {
    /// Log into the given writer
    pub fn new(writer: W) -> Self {
        JsonLinesSink {
            writer,
            write_failures: 0,
        }
    }

    /// Number of events that could not be written
    #[must_use]
    pub fn write_failures(&self) -> usize {
        self.write_failures
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn notify(&mut self, event: &CirculationEvent, _labels: &Labels) {
        let written = serde_json::to_writer(&mut self.writer, event)
            .map_err(std::io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));
        if written.is_err() {
            self.write_failures += 1;
        }
    }
}
