// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

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

fn dashboard_arg() -> Arg {
    Arg::new("dashboard")
        .long("dashboard")
        .short('d')
        .required(true)
        .help("Dashboard id")
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true)
}

fn report_cmd(name: &'static str, about: &'static str) -> Command {
    json_args(
        Command::new(name).about(about).arg(dashboard_arg()).arg(
            Arg::new("now")
                .long("now")
                .help("Reference time YYYY-MM-DD[THH:MM[:SS]] (defaults to now)"),
        ),
    )
}

pub fn build_cli() -> Command {
    Command::new("finboard")
        .about("Personal finance dashboards: log income and expenses, see six-month reports")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("auth")
                .about("Sign up, sign in and out")
                .subcommand(
                    Command::new("signup")
                        .arg(Arg::new("email").long("email").required(true)),
                )
                .subcommand(
                    Command::new("signin")
                        .arg(Arg::new("email").long("email").required(true)),
                )
                .subcommand(Command::new("signout"))
                .subcommand(Command::new("whoami")),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Manage dashboards")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(json_args(
                    Command::new("show")
                        .about("Totals for one month of a dashboard")
                        .arg(id_arg())
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current")),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage income and expense entries")
                .subcommand(
                    Command::new("add")
                        .arg(dashboard_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("value").long("value").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("payment-method")
                                .long("payment-method")
                                .help("Cash|Debit|Credit|PIX|Transfer|BankSlip; marks the entry as an expense"),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(dashboard_arg())
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("value").long("value"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("payment-method").long("payment-method"))
                        .arg(
                            Arg::new("income")
                                .long("income")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("payment-method")
                                .help("Turn the entry into income"),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Six-month reports")
                .subcommand(report_cmd("summary", "Totals and monthly averages"))
                .subcommand(
                    report_cmd("categories", "Breakdown by category").arg(
                        Arg::new("kind")
                            .long("kind")
                            .default_value("expense")
                            .help("income|expense"),
                    ),
                )
                .subcommand(report_cmd("monthly", "Income, expenses and balance per month"))
                .subcommand(
                    report_cmd("chart", "Chart-ready rows").arg(
                        Arg::new("type")
                            .long("type")
                            .required(true)
                            .value_parser(["pie", "bar", "line"]),
                    )
                    .arg(
                        Arg::new("kind")
                            .long("kind")
                            .default_value("income")
                            .help("Category set for the pie chart: income|expense"),
                    ),
                ),
        )
        .subcommand(
            Command::new("config").about("Settings").subcommand(
                Command::new("currency")
                    .about("Show or set the display currency")
                    .arg(Arg::new("set").long("set")),
            ),
        )
}
