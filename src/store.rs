// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use crate::models::Expense;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const EXPENSES_KEY: &str = "expenses";
pub const CATEGORIES_KEY: &str = "categories";

pub const DEFAULT_CATEGORIES: [&str; 5] = ["Food", "Transport", "Shopping", "Bills", "Other"];

/// Key-value persistence of serialized collections. No querying: callers
/// read the whole blob, change it in memory and write it back.
pub trait RecordStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

fn parse_list(key: &str, blob: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(blob) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(Value::Null) => Ok(Vec::new()),
        _ => Err(Error::MalformedBlob(key.to_string())),
    }
}

/// Loads every well-formed expense. Records that do not match the expense
/// shape are skipped with a warning so one bad entry cannot hide the rest.
pub fn load_expenses<S: RecordStore + ?Sized>(store: &S) -> Result<Vec<Expense>> {
    let Some(blob) = store.get(EXPENSES_KEY)? else {
        return Ok(Vec::new());
    };
    let items = parse_list(EXPENSES_KEY, &blob)?;
    let mut expenses = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Expense>(item) {
            Ok(exp) => expenses.push(exp),
            Err(err) => warn!(index = idx, error = %err, "skipping malformed expense record"),
        }
    }
    debug!(count = expenses.len(), "loaded expenses");
    Ok(expenses)
}

pub fn save_expenses<S: RecordStore + ?Sized>(store: &S, expenses: &[Expense]) -> Result<()> {
    let blob = serde_json::to_string(expenses)?;
    store.set(EXPENSES_KEY, &blob)?;
    debug!(count = expenses.len(), "saved expenses");
    Ok(())
}

/// Stored categories, or `None` when nothing has been saved yet.
pub fn read_categories<S: RecordStore + ?Sized>(store: &S) -> Result<Option<Vec<String>>> {
    let Some(blob) = store.get(CATEGORIES_KEY)? else {
        return Ok(None);
    };
    let items = parse_list(CATEGORIES_KEY, &blob)?;
    let mut categories = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(name) => categories.push(name),
            other => warn!(value = %other, "skipping non-string category"),
        }
    }
    Ok(Some(categories))
}

/// Loads categories, seeding and persisting the default set on first run.
pub fn load_categories<S: RecordStore + ?Sized>(store: &S) -> Result<Vec<String>> {
    if let Some(categories) = read_categories(store)? {
        return Ok(categories);
    }
    let defaults: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
    save_categories(store, &defaults)?;
    info!("seeded default categories");
    Ok(defaults)
}

pub fn save_categories<S: RecordStore + ?Sized>(store: &S, categories: &[String]) -> Result<()> {
    let blob = serde_json::to_string(categories)?;
    store.set(CATEGORIES_KEY, &blob)
}

/// Removes both collections. Categories are re-seeded on the next load.
pub fn clear_all<S: RecordStore + ?Sized>(store: &S) -> Result<()> {
    store.remove(EXPENSES_KEY)?;
    store.remove(CATEGORIES_KEY)?;
    info!("cleared all stored data");
    Ok(())
}
