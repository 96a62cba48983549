// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use expensebook::engine::{ExpenseQuery, category_icon, filter_sort_group};
use expensebook::error::Error;
use expensebook::ledger::{self, ExpenseDraft};
use expensebook::store::{self, EXPENSES_KEY, MemoryStore, RecordStore};
use rust_decimal::Decimal;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 20, 9, 30, 0).unwrap()
}

fn draft(amount: &str, category: &str, note: Option<&str>) -> ExpenseDraft {
    ExpenseDraft {
        amount: amount.into(),
        category: category.into(),
        note: note.map(String::from),
    }
}

#[test]
fn add_expense_persists_record() {
    let store = MemoryStore::new();
    let saved = ledger::add_expense(&store, &draft("12.50", "Food", Some("Tea")), now()).unwrap();
    assert_eq!(saved.id, now().timestamp_millis());
    assert_eq!(saved.amount, Decimal::new(1250, 2));
    assert_eq!(saved.date.raw(), "2024-06-20T09:30:00.000Z");

    let loaded = store::load_expenses(&store).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].category, "Food");
    assert_eq!(loaded[0].note.as_deref(), Some("Tea"));
}

#[test]
fn invalid_drafts_write_nothing() {
    let store = MemoryStore::new();
    for bad in [
        draft("", "Food", None),
        draft("abc", "Food", None),
        draft("-5", "Food", None),
        draft("10", "   ", None),
    ] {
        let err = ledger::add_expense(&store, &bad, now()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{:?}", bad);
    }
    assert_eq!(store.get(EXPENSES_KEY).unwrap(), None);
}

#[test]
fn zero_amount_is_accepted() {
    let store = MemoryStore::new();
    let saved = ledger::add_expense(&store, &draft("0", "Food", None), now()).unwrap();
    assert_eq!(saved.amount, Decimal::ZERO);
}

#[test]
fn ids_are_never_reused() {
    let store = MemoryStore::new();
    let a = ledger::add_expense(&store, &draft("1", "Food", None), now()).unwrap();
    let b = ledger::add_expense(&store, &draft("2", "Food", None), now()).unwrap();
    assert_eq!(b.id, a.id + 1);
}

#[test]
fn blank_note_is_stored_as_none() {
    let existing = Vec::new();
    let e = ledger::new_expense(&draft("3", "Food", Some("  ")), &existing, now()).unwrap();
    assert_eq!(e.note, None);
}

#[test]
fn unknown_category_is_still_recorded() {
    let store = MemoryStore::new();
    store::load_categories(&store).unwrap();
    ledger::add_expense(&store, &draft("8", "Pets", None), now()).unwrap();
    assert_eq!(store::load_expenses(&store).unwrap()[0].category, "Pets");
}

#[test]
fn category_add_trims_and_allows_duplicates() {
    let store = MemoryStore::new();
    ledger::add_category(&store, "  Pets ").unwrap();
    let cats = ledger::add_category(&store, "Pets").unwrap();
    assert_eq!(&cats[5..], ["Pets", "Pets"]);
    assert!(matches!(
        ledger::add_category(&store, "  "),
        Err(Error::Validation(_))
    ));
}

#[test]
fn removing_a_category_orphans_its_expenses() {
    let store = MemoryStore::new();
    ledger::add_category(&store, "Pets").unwrap();
    ledger::add_category(&store, "Pets").unwrap();
    ledger::add_expense(&store, &draft("20", "Pets", Some("kibble")), now()).unwrap();

    assert_eq!(ledger::remove_category(&store, "Pets").unwrap(), 2);
    assert_eq!(ledger::remove_category(&store, "Pets").unwrap(), 0);
    assert!(!store::load_categories(&store).unwrap().contains(&"Pets".to_string()));

    let expenses = store::load_expenses(&store).unwrap();
    assert_eq!(expenses[0].category, "Pets");
    let sections = filter_sort_group(&expenses, &ExpenseQuery::default());
    assert_eq!(sections[0].items[0].category, "Pets");
    assert_eq!(category_icon("Pets"), "📦");
}

#[test]
fn oversized_amount_is_rejected() {
    let store = MemoryStore::new();
    let err = ledger::add_expense(
        &store,
        &draft("50000000000000000000000000000", "Food", None),
        now(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(store.get(EXPENSES_KEY).unwrap(), None);

    let max = ledger::MAX_AMOUNT.to_string();
    let saved = ledger::add_expense(&store, &draft(&max, "Food", None), now()).unwrap();
    assert_eq!(saved.amount, Decimal::from(ledger::MAX_AMOUNT));
}
