// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{DEFAULT_CURRENCY, confirm, get_date_format, get_setting, set_setting};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn config(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").map(String::as_str).unwrap_or("");
            let value = match key {
                "currency" => get_setting(conn, key)?.unwrap_or_else(|| DEFAULT_CURRENCY.into()),
                "date_format" => get_date_format(conn)?,
                other => return Err(anyhow!("Unknown setting '{}'", other)),
            };
            println!("{}", value);
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").map(String::as_str).unwrap_or("");
            let value = sub.get_one::<String>("value").map(String::as_str).unwrap_or("");
            set_setting(conn, key, value)?;
            println!("{} = {}", key, value);
        }
        _ => {}
    }
    Ok(())
}

pub fn clear(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") && !confirm("Are you sure you want to clear all data?")? {
        println!("Cancelled");
        return Ok(());
    }
    store::clear_all(conn)?;
    println!("All data cleared.");
    Ok(())
}
