// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn yes_flag() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt")
}

pub fn build_cli() -> Command {
    Command::new("expensebook")
        .about("Expensebook: track expenses, see period totals and category charts")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("EXPENSEBOOK_DB")
                .value_name("PATH")
                .help("Database file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("at")
                .long("at")
                .global(true)
                .value_name("DATETIME")
                .help("Reference instant, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS (default: now)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log progress to stderr"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("add")
                .about("Record an expense")
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("Browse expenses grouped by day")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .default_value("")
                        .help("Case-insensitive text to find in notes"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .default_value("All"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(["latest", "highest"])
                        .default_value("latest"),
                ),
        ))
        .subcommand(
            Command::new("totals")
                .about("Today, this week and this month")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .value_parser(["daily", "weekly", "monthly"])
                        .default_value("monthly"),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("chart")
                .about("Chart data for the current month and week")
                .subcommand(json_flags(
                    Command::new("category").about("Monthly spending by category"),
                ))
                .subcommand(json_flags(
                    Command::new("weekly").about("Spending per weekday so far this week"),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("name").required(true))
                        .arg(yes_flag()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export all expenses")
                .arg(Arg::new("format").long("format").default_value("csv"))
                .arg(
                    Arg::new("out")
                        .long("out")
                        .help("Output file (default: stdout)"),
                ),
        )
        .subcommand(
            Command::new("clear")
                .about("Delete all expenses and categories")
                .arg(yes_flag()),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
}
