// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation over an in-memory list of expenses.
//!
//! Everything here is a pure function of its inputs plus a reference instant
//! in local wall-clock time. Records whose date does not parse are left out
//! of every period and weekly window; non-numeric amounts were already
//! coerced to zero when the record was loaded.

use crate::models::{CategoryFilter, Expense, Period, SortMode};
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write;

/// Chart colours, assigned to category slices by position.
pub const PALETTE: [&str; 5] = ["#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF"];

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

pub const UNDATED_SECTION: &str = "Unknown date";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub today: Decimal,
    pub week: Decimal,
    pub month: Decimal,
}

impl PeriodTotals {
    pub fn select(&self, period: Period) -> Decimal {
        match period {
            Period::Daily => self.today,
            Period::Weekly => self.week,
            Period::Monthly => self.month,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub color_index: usize,
}

impl CategoryTotal {
    pub fn color(&self) -> &'static str {
        PALETTE[self.color_index % PALETTE.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseQuery {
    /// Case-insensitive substring of the note; empty matches everything.
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortMode,
    /// strftime pattern for section titles.
    pub date_format: String,
}

impl Default for ExpenseQuery {
    fn default() -> Self {
        ExpenseQuery {
            search: String::new(),
            category: CategoryFilter::All,
            sort: SortMode::Latest,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub items: Vec<Expense>,
}

/// Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Today / this-week / this-month sums. The week runs Sunday through
/// Saturday by calendar date, regardless of the reference time of day.
pub fn period_totals(expenses: &[Expense], reference: NaiveDateTime) -> PeriodTotals {
    let today = reference.date();
    let week_start = start_of_week(today);
    let week_end = week_start.checked_add_days(Days::new(6)).unwrap_or(week_start);

    let mut totals = PeriodTotals::default();
    for exp in expenses {
        let Some(date) = exp.date.date() else {
            continue;
        };
        if date == today {
            totals.today = totals.today.saturating_add(exp.amount);
        }
        if date >= week_start && date <= week_end {
            totals.week = totals.week.saturating_add(exp.amount);
        }
        if same_month(date, today) {
            totals.month = totals.month.saturating_add(exp.amount);
        }
    }
    totals
}

/// Per-category sums for the reference month, in first-seen order.
pub fn category_totals(expenses: &[Expense], reference: NaiveDateTime) -> Vec<CategoryTotal> {
    let month = reference.date();
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for exp in expenses {
        if !exp.date.date().is_some_and(|d| same_month(d, month)) {
            continue;
        }
        match index.get(exp.category.as_str()) {
            Some(&pos) => totals[pos].amount = totals[pos].amount.saturating_add(exp.amount),
            None => {
                let pos = totals.len();
                index.insert(&exp.category, pos);
                totals.push(CategoryTotal {
                    category: exp.category.clone(),
                    amount: exp.amount,
                    color_index: pos % PALETTE.len(),
                });
            }
        }
    }
    totals
}

/// Day-by-day sums indexed Sunday..Saturday. Unlike [`period_totals`], the
/// window ends at the reference instant itself, so later entries this week
/// are not counted.
pub fn weekly_series(expenses: &[Expense], reference: NaiveDateTime) -> [Decimal; 7] {
    let week_start = start_of_week(reference.date()).and_time(NaiveTime::MIN);
    let mut series = [Decimal::ZERO; 7];
    for exp in expenses {
        let Some(at) = exp.date.local() else {
            continue;
        };
        if at >= week_start && at <= reference {
            let day = &mut series[at.weekday().num_days_from_sunday() as usize];
            *day = day.saturating_add(exp.amount);
        }
    }
    series
}

/// Sum of every record regardless of date.
pub fn grand_total(expenses: &[Expense]) -> Decimal {
    saturating_sum(expenses.iter().map(|e| e.amount))
}

/// Sums clamp at `Decimal::MAX`/`MIN` instead of overflowing.
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// Search, filter, sort and group into date sections.
///
/// Records sharing a rendered date title form one section. Sections are
/// ordered by their newest date; inside a section the sort order is
/// preserved. Undated records end up in a trailing [`UNDATED_SECTION`].
pub fn filter_sort_group(expenses: &[Expense], query: &ExpenseQuery) -> Vec<Section> {
    let needle = query.search.to_lowercase();
    let mut matched: Vec<&Expense> = expenses
        .iter()
        .filter(|e| note_matches(e, &needle))
        .filter(|e| query.category.matches(&e.category))
        .collect();

    // sort_by is stable, so ties keep their input order
    match query.sort {
        SortMode::Latest => matched.sort_by(|a, b| latest_first(a, b)),
        SortMode::Highest => matched.sort_by(|a, b| b.amount.cmp(&a.amount)),
    }

    // grouped by the rendered title, so coarse formats merge days
    let mut sections: Vec<Section> = Vec::new();
    let mut by_title: HashMap<String, usize> = HashMap::new();
    let mut undated = Vec::new();
    for exp in matched {
        let Some(date) = exp.date.date() else {
            undated.push(exp.clone());
            continue;
        };
        let title = format_day(date, &query.date_format);
        match by_title.get(&title) {
            Some(&pos) => {
                let section = &mut sections[pos];
                section.items.push(exp.clone());
                if section.date.is_none_or(|d| date > d) {
                    section.date = Some(date);
                }
            }
            None => {
                by_title.insert(title.clone(), sections.len());
                sections.push(Section {
                    title,
                    date: Some(date),
                    items: vec![exp.clone()],
                });
            }
        }
    }
    // newest day in each section decides its position
    sections.sort_by(|a, b| b.date.cmp(&a.date));
    if !undated.is_empty() {
        sections.push(Section {
            title: UNDATED_SECTION.to_string(),
            date: None,
            items: undated,
        });
    }
    sections
}

fn note_matches(exp: &Expense, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    exp.note
        .as_deref()
        .is_some_and(|n| n.to_lowercase().contains(needle))
}

fn latest_first(a: &Expense, b: &Expense) -> Ordering {
    match (a.date.local(), b.date.local()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Formats a section date, falling back to ISO when the pattern is invalid.
pub fn format_day(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Display icon for a category; unknown and orphaned categories share the
/// fallback.
pub fn category_icon(category: &str) -> &'static str {
    match category {
        "Food" => "🍔",
        "Transport" => "🚌",
        "Shopping" => "🛒",
        "Bills" => "💡",
        "Other" => "📦",
        _ => "📦",
    }
}
