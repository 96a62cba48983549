// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{
    CategoryTotal, PeriodTotals, WEEKDAY_LABELS, category_icon, category_totals, grand_total,
    period_totals, saturating_sum, weekly_series,
};
use crate::models::Period;
use crate::store;
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn totals(conn: &Connection, sub: &clap::ArgMatches, reference: NaiveDateTime) -> Result<()> {
    let period = match sub.get_one::<String>("period") {
        Some(p) => p.parse::<Period>()?,
        None => Period::default(),
    };
    let expenses = store::load_expenses(conn)?;
    let totals = period_totals(&expenses, reference);
    let all_time = grand_total(&expenses);

    if sub.get_flag("json") {
        #[derive(Serialize)]
        struct Out {
            #[serde(flatten)]
            totals: PeriodTotals,
            period: Period,
            selected: Decimal,
            all_time: Decimal,
        }
        let out = Out {
            totals,
            period,
            selected: totals.select(period),
            all_time,
        };
        maybe_print_json(true, false, &out)?;
        return Ok(());
    }

    let symbol = get_currency(conn)?;
    let rows = vec![
        vec!["Today".into(), fmt_money(&totals.today, &symbol)],
        vec!["This week".into(), fmt_money(&totals.week, &symbol)],
        vec!["This month".into(), fmt_money(&totals.month, &symbol)],
        vec![
            format!("Selected ({})", period),
            fmt_money(&totals.select(period), &symbol),
        ],
        vec!["All time".into(), fmt_money(&all_time, &symbol)],
    ];
    println!("{}", pretty_table(&["Period", "Spent"], rows));
    Ok(())
}

pub fn query_totals(conn: &Connection, reference: NaiveDateTime) -> Result<PeriodTotals> {
    let expenses = store::load_expenses(conn)?;
    Ok(period_totals(&expenses, reference))
}

pub fn chart(conn: &Connection, m: &clap::ArgMatches, reference: NaiveDateTime) -> Result<()> {
    match m.subcommand() {
        Some(("category", sub)) => by_category(conn, sub, reference)?,
        Some(("weekly", sub)) => weekly(conn, sub, reference)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: Decimal,
    pub color: &'static str,
}

impl From<&CategoryTotal> for CategorySlice {
    fn from(t: &CategoryTotal) -> Self {
        CategorySlice {
            category: t.category.clone(),
            amount: t.amount,
            color: t.color(),
        }
    }
}

fn by_category(conn: &Connection, sub: &clap::ArgMatches, reference: NaiveDateTime) -> Result<()> {
    let expenses = store::load_expenses(conn)?;
    let totals = category_totals(&expenses, reference);
    let slices: Vec<CategorySlice> = totals.iter().map(CategorySlice::from).collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &slices)? {
        return Ok(());
    }
    if slices.is_empty() {
        println!("No data yet");
        return Ok(());
    }
    let symbol = get_currency(conn)?;
    let month_total = saturating_sum(totals.iter().map(|t| t.amount));
    let rows: Vec<Vec<String>> = slices
        .iter()
        .map(|s| {
            vec![
                format!("{} {}", category_icon(&s.category), s.category),
                fmt_money(&s.amount, &symbol),
                s.color.to_string(),
            ]
        })
        .collect();
    println!("Total this month: {}", fmt_money(&month_total, &symbol));
    println!("{}", pretty_table(&["Category", "Spent", "Color"], rows));
    Ok(())
}

#[derive(Serialize)]
struct DayPoint {
    day: &'static str,
    amount: Decimal,
}

fn weekly(conn: &Connection, sub: &clap::ArgMatches, reference: NaiveDateTime) -> Result<()> {
    let expenses = store::load_expenses(conn)?;
    let series = weekly_series(&expenses, reference);
    let points: Vec<DayPoint> = WEEKDAY_LABELS
        .into_iter()
        .zip(series)
        .map(|(day, amount)| DayPoint { day, amount })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &points)? {
        return Ok(());
    }
    if !series.iter().any(|v| *v > Decimal::ZERO) {
        println!("No data yet");
        return Ok(());
    }
    let symbol = get_currency(conn)?;
    let rows = points
        .iter()
        .map(|p| vec![p.day.to_string(), fmt_money(&p.amount, &symbol)])
        .collect();
    println!("{}", pretty_table(&["Day", "Spent"], rows));
    Ok(())
}
