//! Property tests: random circulation scripts never break the holder invariants

mod common;

use circulation::{CatalogEntry, CirculationError, LibraryRegistry, Patron};
use common::state_of;
use proptest::prelude::*;

const ISBNS: [&str; 4] = ["A", "B", "C", "D"];
const CARDS: [&str; 3] = ["C1", "C2", "C3"];

#[derive(Debug, Clone)]
enum Step {
    Borrow(usize, usize),
    GiveBack(usize, usize),
    Check(usize),
}

fn step() -> impl Strategy<Value = Step> {
    // Indexes one past the end stand for unknown cards and ISBNs
    prop_oneof![
        (0..=CARDS.len(), 0..=ISBNS.len()).prop_map(|(c, i)| Step::Borrow(c, i)),
        (0..=CARDS.len(), 0..=ISBNS.len()).prop_map(|(c, i)| Step::GiveBack(c, i)),
        (0..=ISBNS.len()).prop_map(Step::Check),
    ]
}

fn card(index: usize) -> &'static str {
    CARDS.get(index).copied().unwrap_or("unknown-card")
}

fn isbn(index: usize) -> &'static str {
    ISBNS.get(index).copied().unwrap_or("unknown-isbn")
}

fn registry() -> LibraryRegistry {
    let mut registry = LibraryRegistry::new();
    for id in ISBNS {
        registry
            .register_entry(CatalogEntry::new(format!("Title {id}"), "Author", id))
            .unwrap();
    }
    // A shadowed duplicate must never be lent out
    registry
        .register_entry(CatalogEntry::new("Shadow", "Author", "A"))
        .unwrap();
    for id in CARDS {
        registry.register_patron(Patron::new(id, id)).unwrap();
    }
    registry
}

proptest! {
    #[test]
    fn prop_invariants_hold_after_any_script(steps in prop::collection::vec(step(), 0..60)) {
        let mut registry = registry();

        for step in steps {
            let before = state_of(&registry);
            let result = match step {
                Step::Borrow(c, i) => registry.borrow(card(c), isbn(i)),
                Step::GiveBack(c, i) => registry.give_back(card(c), isbn(i)),
                Step::Check(i) => {
                    let _ = registry.check_availability(isbn(i));
                    Ok(())
                },
            };
            if result.is_err() {
                prop_assert_eq!(state_of(&registry), before);
            }
            prop_assert!(registry.audit().is_ok(), "{:?}", registry.audit());
        }

        for entry in registry.entries() {
            let holders = registry
                .patrons()
                .iter()
                .filter(|p| p.holds(entry.isbn()))
                .count();
            let canonical = std::ptr::eq(registry.find_entry_by_isbn(entry.isbn()).unwrap(), entry);
            if canonical {
                prop_assert_eq!(entry.is_borrowed(), holders == 1);
                prop_assert!(holders <= 1);
            } else {
                prop_assert!(entry.is_available());
            }
        }
    }

    #[test]
    fn prop_borrow_then_return_is_identity(c in 0..CARDS.len(), i in 0..ISBNS.len()) {
        let mut registry = registry();
        let before = state_of(&registry);

        registry.borrow(card(c), isbn(i)).unwrap();
        registry.give_back(card(c), isbn(i)).unwrap();

        prop_assert_eq!(state_of(&registry), before);
    }

    #[test]
    fn prop_second_borrow_always_fails(first in 0..CARDS.len(), second in 0..CARDS.len(), i in 0..ISBNS.len()) {
        let mut registry = registry();
        registry.borrow(card(first), isbn(i)).unwrap();

        prop_assert_eq!(
            registry.borrow(card(second), isbn(i)),
            Err(CirculationError::AlreadyBorrowed(isbn(i).to_string()))
        );
    }
}
