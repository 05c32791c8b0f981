// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
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

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).num_args(1).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn record_filters(cmd: Command) -> Command {
    cmd.arg(opt("search", "Case-insensitive text to look for in descriptions"))
        .arg(opt("category", "Only this category ('all' for any)"))
        .arg(
            opt("type", "all|income|expense")
                .value_parser(["all", "income", "expense"])
                .default_value("all"),
        )
        .arg(opt("method", "Only this payment method ('all' for any)"))
        .arg(
            opt("order", "Date order")
                .value_parser(["asc", "desc"])
                .default_value("desc"),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Transactions page")
        .subcommand(json_flags(record_filters(
            Command::new("list")
                .about("List transactions with totals")
                .arg(
                    opt("limit", "Show at most N rows")
                        .value_parser(value_parser!(usize)),
                ),
        )))
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(req("description", "What the transaction was"))
                .arg(req("amount", "Positive amount"))
                .arg(opt("type", "income|expense").default_value("expense"))
                .arg(opt("category", "Category name"))
                .arg(opt("date", "YYYY-MM-DD, defaults to today"))
                .arg(opt("method", "Payment method"))
                .arg(opt("status", "completed|pending|failed")),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of a transaction")
                .arg(req("id", "Transaction id"))
                .arg(opt("description", "New description"))
                .arg(opt("amount", "New amount"))
                .arg(opt("type", "income|expense"))
                .arg(opt("category", "New category"))
                .arg(opt("date", "New date, YYYY-MM-DD"))
                .arg(opt("method", "New payment method"))
                .arg(opt("status", "completed|pending|failed")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(req("id", "Transaction id")),
        )
}

fn budget_cmd() -> Command {
    let period = || opt("period", "Budget period id").default_value("current");
    Command::new("budget")
        .about("Budget page")
        .subcommand(json_flags(
            Command::new("report")
                .about("Per-category progress for a period")
                .arg(period()),
        ))
        .subcommand(json_flags(
            Command::new("periods").about("List budget periods"),
        ))
        .subcommand(
            Command::new("add")
                .about("Add a budget category")
                .arg(period())
                .arg(req("name", "Category name"))
                .arg(req("allocated", "Allocated amount"))
                .arg(opt("spent", "Already spent").default_value("0"))
                .arg(opt("id", "Category id, derived from the name when omitted")),
        )
        .subcommand(
            Command::new("edit")
                .about("Change a budget category")
                .arg(period())
                .arg(req("id", "Category id"))
                .arg(opt("name", "New name"))
                .arg(opt("allocated", "New allocated amount"))
                .arg(opt("spent", "New spent amount")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a budget category")
                .arg(period())
                .arg(req("id", "Category id")),
        )
        .subcommand(
            Command::new("spend")
                .about("Record spending against a category")
                .arg(period())
                .arg(req("id", "Category id"))
                .arg(req("amount", "Amount spent")),
        )
}

fn income_cmd() -> Command {
    Command::new("income")
        .about("Income page")
        .subcommand(json_flags(
            Command::new("summary").about("Totals, recurring split, and category shares"),
        ))
        .subcommand(json_flags(
            Command::new("list").about("List income entries").arg(
                opt("order", "Date order")
                    .value_parser(["asc", "desc"])
                    .default_value("desc"),
            ),
        ))
        .subcommand(
            Command::new("add")
                .about("Record an income entry")
                .arg(req("source", "Where the money came from"))
                .arg(req("amount", "Positive amount"))
                .arg(req("category", "Income category"))
                .arg(opt("date", "YYYY-MM-DD, defaults to today"))
                .arg(opt("recurring", "weekly|biweekly|monthly|yearly"))
                .arg(opt("notes", "Free-form notes")),
        )
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Settings page")
        .subcommand(json_flags(Command::new("show").about("Show preferences")))
        .subcommand(
            Command::new("set")
                .about("Change preferences")
                .arg(opt("currency", "Display currency code"))
                .arg(opt("language", "Interface language"))
                .arg(opt("theme", "light|dark|system"))
                .arg(
                    opt("compact", "Compact tables")
                        .value_parser(value_parser!(bool)),
                )
                .arg(
                    Arg::new("notify")
                        .long("notify")
                        .num_args(1)
                        .action(ArgAction::Append)
                        .help("Notification switch as KEY=on|off, repeatable"),
                ),
        )
}

pub fn build_cli() -> Command {
    Command::new("finboard")
        .about("Personal-finance dashboard: transactions, budgets, income, and analysis")
        .version(clap::crate_version!())
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .num_args(1)
                .help("Session file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .num_args(1)
                .help("Settings file (defaults to the platform config dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .subcommand(Command::new("init").about("Create the session file with sample data"))
        .subcommand(json_flags(
            Command::new("dashboard").about("Overview of balances, budget, and income"),
        ))
        .subcommand(tx_cmd())
        .subcommand(budget_cmd())
        .subcommand(income_cmd())
        .subcommand(json_flags(
            Command::new("analysis").about("Monthly trend and spending highlights"),
        ))
        .subcommand(settings_cmd())
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("transactions")
                    .about("Import transactions from CSV")
                    .arg(req(
                        "path",
                        "CSV with date,description,amount,type,category,method,status",
                    )),
            ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export transactions")
                    .arg(
                        opt("format", "csv|json")
                            .value_parser(["csv", "json"])
                            .default_value("csv"),
                    )
                    .arg(req("out", "Output file")),
            ),
        )
}
