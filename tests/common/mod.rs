//! Common test helpers and utilities shared across the test suite.

use circulation::{CatalogEntry, EventLog, LibraryRegistry, Patron, RegistryConfig};
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Books from the reference circulation desk, in registration order.
#[allow(dead_code)]
pub const BOOKS: [(&str, &str, &str); 3] = [
    ("Python编程：从入门到实践", "埃里克·马瑟斯", "9787115428028"),
    ("数据结构与算法分析", "马克·艾伦·维斯", "9787115546926"),
    ("深入理解计算机系统", "兰德尔·E·布莱恩特", "9787111641247"),
];

/// Creates a registry holding entries "A" and "B" and patron "P1" / "C1".
///
/// The returned log is subscribed but empty.
#[allow(dead_code)]
pub fn create_small_registry() -> (LibraryRegistry, EventLog) {
    create_small_registry_with(RegistryConfig::default())
}

/// Same as [`create_small_registry`] with a custom configuration.
#[allow(dead_code)]
pub fn create_small_registry_with(config: RegistryConfig) -> (LibraryRegistry, EventLog) {
    let log = EventLog::new();
    let mut registry = LibraryRegistry::with_config(config);
    registry.subscribe(log.clone());
    registry
        .register_entry(CatalogEntry::new("Alpha", "Author A", "A"))
        .expect("register A");
    registry
        .register_entry(CatalogEntry::new("Beta", "Author B", "B"))
        .expect("register B");
    registry
        .register_patron(Patron::new("P1", "C1"))
        .expect("register P1");
    log.clear();
    (registry, log)
}

/// Creates the reference desk: three books and patrons 张三 / C001, 李四 / C002.
#[allow(dead_code)]
pub fn create_reference_desk() -> (LibraryRegistry, EventLog) {
    let log = EventLog::new();
    let mut registry = LibraryRegistry::new();
    registry.subscribe(log.clone());
    for (title, author, isbn) in BOOKS {
        registry
            .register_entry(CatalogEntry::new(title, author, isbn))
            .expect("register book");
    }
    registry
        .register_patron(Patron::new("张三", "C001"))
        .expect("register 张三");
    registry
        .register_patron(Patron::new("李四", "C002"))
        .expect("register 李四");
    (registry, log)
}

/// Snapshot of every entry's flag and every patron's held-set.
#[allow(dead_code)]
pub fn state_of(registry: &LibraryRegistry) -> (Vec<bool>, Vec<Vec<String>>) {
    (
        registry.entries().iter().map(CatalogEntry::is_borrowed).collect(),
        registry
            .patrons()
            .iter()
            .map(|p| p.held_isbns().to_vec())
            .collect(),
    )
}

/// Writer that rejects every write and counts the attempts.
#[allow(dead_code)]
#[derive(Debug)]
pub struct FailingWriter {
    attempts: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FailingWriter {
    /// Creates a writer that bumps `attempts` on every write.
    pub fn new(attempts: &Arc<AtomicUsize>) -> Self {
        FailingWriter {
            attempts: Arc::clone(attempts),
        }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
