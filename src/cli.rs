// Copyright (c) AlphaVelocity.
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
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("moneydash")
        .about("Terminal client for the Moneydash personal-finance API")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(
            Command::new("login")
                .about("Authenticate and store the session tokens")
                .arg(Arg::new("email").long("email").short('e').required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .short('p')
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account on the backend, then log in")
                .arg(Arg::new("email").long("email").short('e').required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .short('p')
                        .required(true),
                )
                .arg(Arg::new("name").long("name").short('n').required(true)),
        )
        .subcommand(Command::new("logout").about("Clear the stored session"))
        .subcommand(json_flags(
            Command::new("whoami").about("Show the current user profile"),
        ))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("checking|savings|credit|cash|investment|loan"),
                        )
                        .arg(Arg::new("balance").long("balance"))
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(
                    Command::new("show").arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                ))
                .subcommand(
                    Command::new("update")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64)))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("balance").long("balance"))
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Unsigned decimal amount"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income|expense"),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .required(true),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .required(true)
                                .value_parser(clap::value_parser!(i64))
                                .help("Account id"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_parser(clap::value_parser!(i64))
                                .help("Category id"),
                        )
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .help("income|expense"),
                        )
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("page")
                                .long("page")
                                .value_parser(clap::value_parser!(usize)),
                        )
                        .arg(
                            Arg::new("size")
                                .long("size")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("update")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64)))
                        .arg(Arg::new("amount").long("amount").help("Unsigned decimal amount"))
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .value_parser(clap::value_parser!(i64))
                                .help("Account id"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_parser(clap::value_parser!(i64))
                                .help("Category id"),
                        )
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                )
                .subcommand(
                    Command::new("export")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage category budgets")
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .value_parser(clap::value_parser!(i64))
                                .help("Category id"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .default_value("monthly")
                                .help("monthly|yearly"),
                        )
                        .arg(
                            Arg::new("start")
                                .long("start")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("end").long("end").help("YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("color").long("color").help("Hex color, e.g. #22c55e")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("update")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64)))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("color").long("color").help("Hex color, e.g. #22c55e")),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Dashboard summaries")
                .subcommand(json_flags(Command::new("overview")))
                .subcommand(json_flags(
                    Command::new("spending")
                        .arg(Arg::new("out").long("out").help("Also write the breakdown as CSV")),
                ))
                .subcommand(json_flags(
                    Command::new("recent").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(clap::value_parser!(usize)),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("accounts").about("Per-account balances with totals"),
                )),
        )
}
