// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::export::{write_csv, write_json};
use crate::store;
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use std::fs::File;
use std::io::{self, BufWriter};

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let expenses = store::load_expenses(conn)?;
    if expenses.is_empty() {
        eprintln!("No expenses to export");
        return Ok(());
    }

    match sub.get_one::<String>("out") {
        Some(out) => {
            let file = File::create(out).with_context(|| format!("Create {}", out))?;
            let writer = BufWriter::new(file);
            if fmt == "csv" {
                write_csv(writer, &expenses)?;
            } else {
                write_json(writer, &expenses)?;
            }
            println!("Exported {} expenses to {}", expenses.len(), out);
        }
        None => {
            let stdout = io::stdout().lock();
            if fmt == "csv" {
                write_csv(stdout, &expenses)?;
            } else {
                write_json(stdout, &expenses)?;
                println!();
            }
        }
    }
    Ok(())
}
