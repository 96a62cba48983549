// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;

use expensebook::{cli, commands, db, logging, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_flag("verbose"));

    // Reloaded on every invocation; nothing is cached between commands.
    let db_path = matches.get_one::<String>("db").map(Path::new);
    let conn = db::open_or_init(db_path)?;
    let reference = utils::reference_instant(matches.get_one::<String>("at").map(String::as_str))?;

    match matches.subcommand() {
        Some(("init", _)) => match db_path {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("add", sub)) => commands::expenses::add(&conn, sub)?,
        Some(("list", sub)) => commands::expenses::list(&conn, sub)?,
        Some(("totals", sub)) => commands::reports::totals(&conn, sub, reference)?,
        Some(("chart", sub)) => commands::reports::chart(&conn, sub, reference)?,
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("clear", sub)) => commands::settings::clear(&conn, sub)?,
        Some(("config", sub)) => commands::settings::config(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
