// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Write paths: recording expenses and managing the category list.
//!
//! Each function reloads the collection it changes, so concurrent writers
//! simply overwrite each other (last write wins).

use crate::error::{Error, Result};
use crate::models::{Expense, Timestamp, parse_amount};
use crate::store::{self, RecordStore};
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Largest amount a single expense may carry.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Raw form input for a new expense.
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub amount: String,
    pub category: String,
    pub note: Option<String>,
}

/// Validates a draft and builds the record to store. The id is the creation
/// time in milliseconds, bumped past any existing id so it is never reused.
pub fn new_expense(draft: &ExpenseDraft, existing: &[Expense], now: DateTime<Utc>) -> Result<Expense> {
    let amount = parse_amount(&draft.amount).ok_or_else(|| {
        Error::Validation(format!(
            "amount '{}' is not a valid number",
            draft.amount.trim()
        ))
    })?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::Validation(format!(
            "amount '{}' must not be negative",
            amount
        )));
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(Error::Validation(format!(
            "amount '{}' exceeds the maximum of {}",
            amount, MAX_AMOUNT
        )));
    }
    let category = draft.category.trim();
    if category.is_empty() {
        return Err(Error::Validation("a category must be selected".into()));
    }

    let now_ms = now.timestamp_millis();
    let id = existing
        .iter()
        .map(|e| e.id)
        .max()
        .map_or(now_ms, |max| now_ms.max(max.saturating_add(1)));
    let note = draft
        .note
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string);

    Ok(Expense {
        id,
        amount,
        category: category.to_string(),
        note,
        date: Timestamp::parse(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    })
}

/// Records a new expense. Nothing is written if validation fails.
pub fn add_expense<S: RecordStore + ?Sized>(
    store: &S,
    draft: &ExpenseDraft,
    now: DateTime<Utc>,
) -> Result<Expense> {
    let mut expenses = store::load_expenses(store)?;
    let expense = new_expense(draft, &expenses, now)?;

    let known = store::read_categories(store)?.unwrap_or_default();
    if !known.iter().any(|c| c == &expense.category) {
        warn!(category = %expense.category, "expense uses a category that is not in the list");
    }

    expenses.push(expense.clone());
    store::save_expenses(store, &expenses)?;
    info!(id = expense.id, amount = %expense.amount, category = %expense.category, "expense recorded");
    Ok(expense)
}

/// Appends a category. Duplicates are allowed, as in the category screen.
pub fn add_category<S: RecordStore + ?Sized>(store: &S, name: &str) -> Result<Vec<String>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation("category name must not be empty".into()));
    }
    let mut categories = store::load_categories(store)?;
    categories.push(name.to_string());
    store::save_categories(store, &categories)?;
    info!(category = name, "category added");
    Ok(categories)
}

/// Removes every entry equal to `name` and returns how many went away.
/// Expenses referencing the category are left untouched.
pub fn remove_category<S: RecordStore + ?Sized>(store: &S, name: &str) -> Result<usize> {
    let mut categories = store::load_categories(store)?;
    let before = categories.len();
    categories.retain(|c| c != name);
    let removed = before - categories.len();
    if removed > 0 {
        store::save_categories(store, &categories)?;
        info!(category = name, removed, "category removed");
    }
    Ok(removed)
}
