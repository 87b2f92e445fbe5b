#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Circulation: library catalog and lending
//!
//! An in-memory library catalog: books, registered patrons, and the
//! borrow/return protocol that keeps them consistent.
//!
//! ## Quick Start
//!
//! ```
//! use circulation::{CatalogEntry, LibraryRegistry, NarrationSink, Patron};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = LibraryRegistry::new();
//! registry.subscribe(NarrationSink::new(std::io::stdout()));
//!
//! registry.register_entry(CatalogEntry::new(
//!     "Python编程：从入门到实践",
//!     "埃里克·马瑟斯",
//!     "9787115428028",
//! ))?;
//! registry.register_patron(Patron::new("张三", "C001"))?;
//!
//! registry.borrow("C001", "9787115428028")?;
//! registry.give_back("C001", "9787115428028")?;
//!
//! for line in registry.patron_summaries() {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`entry`]: Catalog entries and their availability
//! - [`patron`]: Patrons and their held-sets
//! - [`registry`]: The owning registry and the borrow/return protocol
//! - [`events`]: Circulation events and sinks (narration, JSON lines, in-memory log)
//! - [`config`]: Duplicate and ISBN policies
//! - [`labels`]: Locale labels for display and narration
//! - [`isbn`]: ISBN normalization and checksums
//! - [`audit`]: Holder invariant checks
//! - [`shared`]: Single-lock wrapper for multi-threaded callers
//! - [`error`]: Error types and result type

pub mod audit;
pub mod config;
pub mod entry;
pub mod error;
pub mod events;
pub mod isbn;
pub mod labels;
pub mod patron;
pub mod registry;
pub mod shared;

pub use audit::ConsistencyAuditor;
pub use config::{DuplicatePolicy, IsbnPolicy, RegistryConfig};
pub use entry::{Availability, CatalogEntry, EntryDisplay};
pub use error::{CirculationError, Result};
pub use events::{CirculationEvent, EventLog, EventSink, JsonLinesSink, NarrationSink, NullSink};
pub use labels::{Labels, MessageTemplates};
pub use patron::Patron;
pub use registry::LibraryRegistry;
pub use shared::SharedRegistry;
