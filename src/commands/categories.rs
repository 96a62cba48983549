// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::category_icon;
use crate::ledger;
use crate::store;
use crate::utils::{confirm, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").map(String::as_str).unwrap_or("");
            ledger::add_category(conn, name)?;
            println!("Added category '{}'", name.trim());
        }
        Some(("list", _)) => {
            let data: Vec<Vec<String>> = store::load_categories(conn)?
                .into_iter()
                .map(|c| vec![category_icon(&c).to_string(), c])
                .collect();
            println!("{}", pretty_table(&["", "Category"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").map(String::as_str).unwrap_or("");
            if !sub.get_flag("yes")
                && !confirm(&format!("Are you sure you want to delete \"{}\"?", name))?
            {
                println!("Cancelled");
                return Ok(());
            }
            match ledger::remove_category(conn, name)? {
                0 => println!("No category named '{}'", name),
                _ => println!("Removed category '{}'", name),
            }
        }
        _ => {}
    }
    Ok(())
}
