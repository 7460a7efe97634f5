// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .value_name("YYYY-MM")
        .help("Only show records dated in this month (UTC)")
}

pub fn build_cli() -> Command {
    Command::new("bilancio")
        .version(crate_version!())
        .about("Track incomes and expenses, with monthly and per-category summaries")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("SQLite database file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("remote")
                .long("remote")
                .global(true)
                .value_name("URL")
                .env("BILANCIO_REMOTE")
                .help("Base URL of a remote record store serving /api/*"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add a category to the local database")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List categories"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record an income or an expense")
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .required(true),
                        )
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .required(true),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .value_name("ID|NAME")
                                .required(true)
                                .help("Category id or name; the income category records an income"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(month_arg())
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .short('k')
                                .value_parser(["income", "expense", "all"])
                                .default_value("all"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Totals, balance, per-category totals and drill-down")
                .arg(month_arg())
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .value_name("NAME")
                        .help("Show the expenses behind this category total"),
                ),
        ))
        .subcommand(
            Command::new("config")
                .about("Persistent settings")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set-remote")
                        .about("Use a remote record store by default")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(Command::new("clear-remote").about("Go back to the local database"))
                .subcommand(Command::new("show").about("Show the active settings")),
        )
}
