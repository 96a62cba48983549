// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use expensebook::db;
use expensebook::error::Error;
use expensebook::store::{
    self, CATEGORIES_KEY, DEFAULT_CATEGORIES, EXPENSES_KEY, MemoryStore, RecordStore,
};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn sqlite_store_round_trips_blobs() {
    let conn = setup();
    assert_eq!(conn.get("expenses").unwrap(), None);
    conn.set("expenses", "[]").unwrap();
    conn.set("expenses", "[1]").unwrap();
    assert_eq!(conn.get("expenses").unwrap().as_deref(), Some("[1]"));
    conn.remove("expenses").unwrap();
    assert_eq!(conn.get("expenses").unwrap(), None);
}

#[test]
fn sqlite_store_reports_missing_schema_as_read_error() {
    let conn = Connection::open_in_memory().unwrap();
    let err = conn.get("expenses").unwrap_err();
    assert!(matches!(err, Error::StorageRead { .. }));
    let err = conn.set("expenses", "[]").unwrap_err();
    assert!(matches!(err, Error::StorageWrite { .. }));
}

#[test]
fn absent_expenses_load_as_empty() {
    let store = MemoryStore::new();
    assert!(store::load_expenses(&store).unwrap().is_empty());
}

#[test]
fn malformed_records_are_skipped() {
    let conn = setup();
    conn.set(
        EXPENSES_KEY,
        r#"[
            {"id": 1, "amount": 12, "category": "Food", "note": "", "date": "2024-06-01T10:00:00"},
            "not an object",
            {"amount": 3, "category": "Food", "date": "2024-06-01"},
            {"id": 4, "amount": "abc", "category": "Bills", "date": "2024-06-02"},
            {"id": 5, "amount": 7, "category": "Bills", "date": null}
        ]"#,
    )
    .unwrap();
    let expenses = store::load_expenses(&conn).unwrap();
    let ids: Vec<i64> = expenses.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(expenses[0].note, None);
    assert_eq!(expenses[1].amount, Decimal::ZERO);
}

#[test]
fn non_list_blob_is_an_error() {
    let store = MemoryStore::new();
    store.set(EXPENSES_KEY, r#"{"id": 1}"#).unwrap();
    assert!(matches!(
        store::load_expenses(&store),
        Err(Error::MalformedBlob(_))
    ));
    store.set(CATEGORIES_KEY, "not json").unwrap();
    assert!(matches!(
        store::load_categories(&store),
        Err(Error::MalformedBlob(_))
    ));
}

#[test]
fn first_category_load_seeds_defaults() {
    let conn = setup();
    assert_eq!(store::read_categories(&conn).unwrap(), None);
    let cats = store::load_categories(&conn).unwrap();
    assert_eq!(cats, DEFAULT_CATEGORIES.to_vec());
    assert_eq!(
        conn.get(CATEGORIES_KEY).unwrap().as_deref(),
        Some(r#"["Food","Transport","Shopping","Bills","Other"]"#)
    );
}

#[test]
fn non_string_categories_are_skipped() {
    let store = MemoryStore::new();
    store.set(CATEGORIES_KEY, r#"["Food", 3, null, "Pets"]"#).unwrap();
    assert_eq!(store::load_categories(&store).unwrap(), vec!["Food", "Pets"]);
}

#[test]
fn saved_expenses_reload_identically() {
    let store = MemoryStore::new();
    store
        .set(
            EXPENSES_KEY,
            r#"[{"id": 9, "amount": 4.5, "category": "Food", "note": "tea", "date": "2024-06-01T10:00:00.000Z"}]"#,
        )
        .unwrap();
    let first = store::load_expenses(&store).unwrap();
    store::save_expenses(&store, &first).unwrap();
    let second = store::load_expenses(&store).unwrap();
    assert_eq!(first, second);
    assert_eq!(second[0].date.raw(), "2024-06-01T10:00:00.000Z");
}

#[test]
fn clear_all_removes_both_collections() {
    let conn = setup();
    conn.set(EXPENSES_KEY, "[]").unwrap();
    store::load_categories(&conn).unwrap();
    store::clear_all(&conn).unwrap();
    assert_eq!(conn.get(EXPENSES_KEY).unwrap(), None);
    assert_eq!(conn.get(CATEGORIES_KEY).unwrap(), None);
}
