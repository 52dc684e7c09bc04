// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("from").long("from").help("Start date, inclusive (YYYY-MM-DD)"))
        .arg(Arg::new("to").long("to").help("End date, inclusive (YYYY-MM-DD)"))
}

fn filter_args(cmd: Command) -> Command {
    range_args(cmd)
        .arg(
            Arg::new("type")
                .long("type")
                .value_parser(["income", "expense"])
                .help("Only income or only expense"),
        )
        .arg(Arg::new("category").long("category").help("Category name"))
        .arg(
            Arg::new("limit")
                .long("limit")
                .value_parser(value_parser!(usize))
                .help("Maximum number of rows, most recent first"),
        )
}

fn amount_arg(required: bool) -> Arg {
    Arg::new("amount")
        .long("amount")
        .required(required)
        .allow_hyphen_values(true)
        .help("Positive amount, e.g. 120.50")
}

pub fn build_cli() -> Command {
    Command::new("financeflow")
        .version(clap::crate_version!())
        .about("Personal income and expense tracker")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Database file (defaults to $FINANCEFLOW_DB, then the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(Command::new("init").about("Create the database and default categories"))
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(json_args(
                    Command::new("list").arg(
                        Arg::new("type")
                            .long("type")
                            .value_parser(["income", "expense"]),
                    ),
                )),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .arg(amount_arg(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Change a transaction; omitted fields keep their value")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(amount_arg(false))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_args(filter_args(Command::new("list")))),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries, monthly rollups and category breakdowns")
                .subcommand(json_args(range_args(Command::new("summary"))))
                .subcommand(json_args(range_args(Command::new("monthly"))))
                .subcommand(json_args(range_args(
                    Command::new("categories").arg(
                        Arg::new("type")
                            .long("type")
                            .value_parser(["income", "expense"])
                            .default_value("expense"),
                    ),
                )))
                .subcommand(json_args(Command::new("dashboard"))),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budgets per category")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("amount").required(true).allow_hyphen_values(true))
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .help("YYYY-MM"),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list").arg(Arg::new("month").long("month")),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export transactions")
                .subcommand(filter_args(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .help("Output file, stdout when omitted"),
                        ),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Read or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
}
