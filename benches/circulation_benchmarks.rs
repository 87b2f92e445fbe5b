#![allow(missing_docs)]
//! Benchmarks for the circulation registry.
//!
//! Measures lookup and the borrow/return cycle on a catalog large enough for
//! the identifier indexes to matter.

use circulation::{CatalogEntry, LibraryRegistry, NullSink, Patron};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Build a registry with `entries` books and `patrons` patrons.
///
/// A `NullSink` is subscribed so event dispatch is part of every measurement.
fn build_registry(entries: usize, patrons: usize) -> LibraryRegistry {
    let mut registry = LibraryRegistry::new();
    registry.subscribe(NullSink);
    for n in 0..entries {
        registry
            .register_entry(CatalogEntry::new(
                format!("Title {n}"),
                "Author",
                format!("isbn-{n}"),
            ))
            .expect("register entry");
    }
    for n in 0..patrons {
        registry
            .register_patron(Patron::new(format!("Patron {n}"), format!("card-{n}")))
            .expect("register patron");
    }
    registry
}

/// Benchmark silent lookups in a 10,000 entry catalog.
fn benchmark_lookup_10k(c: &mut Criterion) {
    let registry = build_registry(10_000, 10);

    c.bench_function("find_entry_by_isbn_10k", |b| {
        b.iter(|| registry.find_entry_by_isbn(black_box("isbn-9999")).is_some());
    });
}

/// Benchmark a full borrow and return of one entry.
fn benchmark_borrow_return(c: &mut Criterion) {
    let mut registry = build_registry(10_000, 1_000);

    c.bench_function("borrow_give_back_cycle", |b| {
        b.iter(|| {
            registry
                .borrow(black_box("card-500"), black_box("isbn-5000"))
                .expect("borrow");
            registry
                .give_back(black_box("card-500"), black_box("isbn-5000"))
                .expect("give back");
        });
    });
}

criterion_group!(benches, benchmark_lookup_10k, benchmark_borrow_return);
criterion_main!(benches);
