// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::models::Expense;
use std::io::Write;

pub const CSV_HEADER: [&str; 4] = ["Date", "Category", "Amount", "Note"];

/// One row per expense in storage order. The date column is the stored text.
pub fn write_csv<W: Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for exp in expenses {
        wtr.write_record([
            exp.date.raw().to_string(),
            exp.category.clone(),
            exp.amount_text(),
            exp.note.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    serde_json::to_writer_pretty(writer, expenses)?;
    Ok(())
}
