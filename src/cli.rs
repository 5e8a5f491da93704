// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{arg, value_parser, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue))
        .arg(arg!(--jsonl "Print as JSON lines").action(ArgAction::SetTrue))
}

fn rows_arg() -> Arg {
    Arg::new("rows")
        .long("rows")
        .help("Row positions as shown by `tx list` with the same filters")
        .value_parser(value_parser!(usize))
        .value_delimiter(',')
        .num_args(1..)
        .action(ArgAction::Append)
}

fn view_args(cmd: Command) -> Command {
    cmd.arg(arg!(--"view-account" <ACCOUNT> "Account filter the row positions refer to"))
        .arg(
            arg!(--"view-year" <YEAR> "Year filter the row positions refer to")
                .value_parser(value_parser!(i32)),
        )
}

fn field_args(cmd: Command, required: bool) -> Command {
    cmd.arg(arg!(--date <DATE> "DD/MM/YYYY").required(required))
        .arg(arg!(--account <ACCOUNT>).required(required))
        .arg(arg!(--category <CATEGORY>).required(required))
        .arg(arg!(--description <TEXT>))
        .arg(arg!(--currency <CCY>).required(required))
        .arg(Arg::new("in").long("in").value_name("AMOUNT").help("Income amount"))
        .arg(Arg::new("out").long("out").value_name("AMOUNT").help("Expense amount"))
}

pub fn build_cli() -> Command {
    Command::new("pfdash")
        .about("Personal finance ledger: balances, category shares and wealth")
        .version(clap::crate_version!())
        .arg(arg!(--ledger <PATH> "Ledger CSV file to use").global(true))
        .arg(
            arg!(--"log-level" <LEVEL> "off|error|warn|info|debug|trace")
                .global(true)
                .default_value("warn"),
        )
        .subcommand(Command::new("init").about("Create the settings database"))
        .subcommand(
            Command::new("account")
                .about("Manage the account registry")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .help("bank|savings")
                                .default_value("bank"),
                        )
                        .arg(arg!(--currency <CCY>).required(true)),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(arg!(--name <NAME>).required(true))),
        )
        .subcommand(
            Command::new("category")
                .about("Manage the category registry")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--kind <KIND> "income|expense").required(true)),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(arg!(--name <NAME>).required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Add, list, edit and remove transactions")
                .subcommand(field_args(Command::new("add"), true))
                .subcommand(json_args(
                    Command::new("list")
                        .arg(arg!(--account <ACCOUNT>))
                        .arg(arg!(--year <YEAR>).value_parser(value_parser!(i32)))
                        .arg(arg!(--limit <N>).value_parser(value_parser!(usize))),
                ))
                .subcommand(field_args(view_args(Command::new("edit").arg(rows_arg())), false))
                .subcommand(view_args(Command::new("rm").arg(rows_arg()))),
        )
        .subcommand(
            Command::new("report")
                .about("Derived tables")
                .subcommand(json_args(
                    Command::new("balance")
                        .about("Running balance of one account")
                        .arg(arg!(--account <ACCOUNT>).required(true))
                        .arg(arg!(--year <YEAR>).value_parser(value_parser!(i32))),
                ))
                .subcommand(json_args(
                    Command::new("periods")
                        .about("Monthly totals and closing balance of one account")
                        .arg(arg!(--account <ACCOUNT>).required(true))
                        .arg(arg!(--year <YEAR>).value_parser(value_parser!(i32))),
                ))
                .subcommand(json_args(
                    Command::new("by-category")
                        .about("Monthly net per category of one account")
                        .arg(arg!(--account <ACCOUNT>).required(true))
                        .arg(arg!(--year <YEAR>).value_parser(value_parser!(i32)))
                        .arg(arg!(--month <MONTH>).value_parser(value_parser!(u32).range(1..=12))),
                ))
                .subcommand(json_args(
                    Command::new("categories")
                        .about("Category shares of monthly income across accounts")
                        .arg(arg!(--year <YEAR>).value_parser(value_parser!(i32)))
                        .arg(arg!(--month <MONTH>).value_parser(value_parser!(u32).range(1..=12)))
                        .arg(arg!(--all "Include categories with no net share").action(ArgAction::SetTrue)),
                ))
                .subcommand(json_args(Command::new("balances").about("Latest balance per account")))
                .subcommand(json_args(Command::new("wealth").about("Total wealth in the base currency")))
                .subcommand(json_args(
                    Command::new("summary")
                        .about("Needs/wants/savings against the 50/30/20 rule")
                        .arg(arg!(--account <ACCOUNT>).required(true))
                        .arg(arg!(--year <YEAR>).value_parser(value_parser!(i32)))
                        .arg(arg!(--month <MONTH>).value_parser(value_parser!(u32).range(1..=12))),
                )),
        )
        .subcommand(
            Command::new("fx")
                .about("Fixed conversion rates")
                .subcommand(Command::new("set-base").arg(arg!(<currency>)))
                .subcommand(Command::new("set-rate").arg(arg!(<currency>)).arg(arg!(<rate>)))
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("convert")
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--from <CCY>).required(true)),
                ),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("transactions").arg(arg!(--path <PATH>).required(true)),
            ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(arg!(--format <FORMAT> "csv|json").default_value("csv"))
                    .arg(arg!(--out <PATH>).required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check the ledger for inconsistencies"))
}
