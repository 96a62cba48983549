// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{ExpenseQuery, Section, category_icon, filter_sort_group};
use crate::ledger::{self, ExpenseDraft};
use crate::models::{CategoryFilter, SortMode};
use crate::store;
use crate::utils::{fmt_money, get_currency, get_date_format, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

fn arg<'a>(sub: &'a clap::ArgMatches, name: &str) -> &'a str {
    sub.get_one::<String>(name).map(String::as_str).unwrap_or("")
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let draft = ExpenseDraft {
        amount: arg(sub, "amount").to_string(),
        category: arg(sub, "category").to_string(),
        note: sub.get_one::<String>("note").cloned(),
    };
    let expense = ledger::add_expense(conn, &draft, Utc::now()).context("Expense not saved")?;
    let symbol = get_currency(conn)?;
    println!(
        "Expense saved: {} {} {}",
        category_icon(&expense.category),
        expense.category,
        fmt_money(&expense.amount, &symbol)
    );
    Ok(())
}

pub fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let sections = query_sections(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &sections)? {
        return Ok(());
    }
    if sections.is_empty() {
        println!("No expenses found");
        return Ok(());
    }
    let symbol = get_currency(conn)?;
    let mut rows = Vec::new();
    for section in &sections {
        for exp in &section.items {
            rows.push(vec![
                section.title.clone(),
                format!("{} {}", category_icon(&exp.category), exp.category),
                fmt_money(&exp.amount, &symbol),
                exp.note.clone().unwrap_or_default(),
            ]);
        }
    }
    println!(
        "{}",
        pretty_table(&["Date", "Category", "Amount", "Note"], rows)
    );
    Ok(())
}

/// Loads the expenses and runs the search/filter/sort/group pipeline for
/// the arguments of `list`.
pub fn query_sections(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Section>> {
    let category = match arg(sub, "category") {
        "" => CategoryFilter::All,
        c => c.parse::<CategoryFilter>().unwrap_or_default(),
    };
    let sort = match arg(sub, "sort") {
        "" => SortMode::Latest,
        s => s.parse::<SortMode>()?,
    };
    let query = ExpenseQuery {
        search: arg(sub, "search").to_string(),
        category,
        sort,
        date_format: get_date_format(conn)?,
    };
    let expenses = store::load_expenses(conn)?;
    Ok(filter_sort_group(&expenses, &query))
}
